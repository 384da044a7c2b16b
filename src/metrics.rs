//! Minimal process-wide counters for host dashboards. Plain atomics; no
//! exposition format is owned here.
use std::sync::atomic::{AtomicU64, Ordering};

static TRIPS_STARTED: AtomicU64 = AtomicU64::new(0);
static TRIPS_FINISHED: AtomicU64 = AtomicU64::new(0);
static BLACKLIST_SYNCS: AtomicU64 = AtomicU64::new(0);
static SPONSOR_EVENTS: AtomicU64 = AtomicU64::new(0);

pub fn inc_trips_started() {
    TRIPS_STARTED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_trips_finished() {
    TRIPS_FINISHED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_blacklist_syncs() {
    BLACKLIST_SYNCS.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_sponsor_events() {
    SPONSOR_EVENTS.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub trips_started: u64,
    pub trips_finished: u64,
    pub blacklist_syncs: u64,
    pub sponsor_events: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        trips_started: TRIPS_STARTED.load(Ordering::Relaxed),
        trips_finished: TRIPS_FINISHED.load(Ordering::Relaxed),
        blacklist_syncs: BLACKLIST_SYNCS.load(Ordering::Relaxed),
        sponsor_events: SPONSOR_EVENTS.load(Ordering::Relaxed),
    }
}
