//! Trip resolution: per-activity reward resolvers and the lifecycle glue
//! that turns a finished [`ActivityRecord`] into persisted loot and a
//! player-facing message.
//!
//! Collaborators are injected at construction time. Ordering guarantee:
//! loot is durably recorded before the trip-finished notification goes
//! out, so a crash between the two can never report success without
//! persisted loot. The core does not deduplicate deliveries and does not
//! serialize per-player lifecycles; both are the caller's responsibility.

use std::time::Duration;

use rand::Rng;

use crate::metrics;
use crate::minion::bank::Bank;
use crate::minion::clues::{clue_tier, ClueTierId};
use crate::minion::commands::{RING_OF_WEALTH_5, WEALTH_INVENTORY_SIZE};
use crate::minion::errors::MinionError;
use crate::minion::trip::roll;
use crate::minion::types::{ActivityKind, ActivityRecord, UserRecord};

/// One-in-N chance that a wealth charging repetition ends in a death.
pub const WEALTH_DEATH_CHANCE: u32 = 9;

/// Maximum allowed trip duration for a user and activity. Policy lives with
/// the host (perk tiers, boosts); the core only consumes the result.
pub trait TripLengthPolicy {
    fn max_trip_length(&self, user: &UserRecord, kind: &ActivityKind) -> Duration;
}

/// Accepts a new activity record and guarantees the matching resolver is
/// eventually invoked once, at or after `record.duration()` has elapsed.
pub trait ActivityScheduler {
    fn schedule(&self, record: &ActivityRecord) -> Result<(), MinionError>;
}

/// Durable loot recording. `collection_log` also records the items for
/// achievement/collection tracking.
pub trait LootPersistence {
    fn merge_loot(
        &self,
        user_id: &str,
        loot: &Bank,
        collection_log: bool,
    ) -> Result<(), MinionError>;
}

/// Delivers the trip-finished message plus the raw record and loot, so
/// external systems can award secondary effects keyed off the same data.
pub trait TripNotifier {
    fn notify_trip_finished(
        &self,
        user: &UserRecord,
        channel_id: &str,
        message: &str,
        record: &ActivityRecord,
        loot: &Bank,
    );
}

/// Result of resolving one finished trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripOutcome {
    pub loot: Bank,
    pub message: String,
    /// Deaths during the trip (zero for activities without attrition).
    pub deaths: u32,
}

/// Clue completion: one reward casket per finished clue.
pub fn resolve_clue_completion(
    user: &UserRecord,
    record: &ActivityRecord,
    tier_id: ClueTierId,
) -> TripOutcome {
    let tier = clue_tier(tier_id);
    let mut loot = Bank::new();
    loot.add(tier.casket_id, u64::from(record.quantity));
    let plural = if record.quantity > 1 { "s" } else { "" };
    let message = format!(
        "{}, {} finished completing {} {} clues. {} carefully places the reward casket{} in your bank. You can open this casket using `/open name:{}`",
        user.username,
        user.minion_name,
        record.quantity,
        tier.name,
        user.minion_name,
        plural,
        tier.name
    );
    TripOutcome {
        loot,
        message,
        deaths: 0,
    }
}

/// Wealth charging with attrition. Each repetition rolls a one-in-`chance`
/// death; survivors bank a full inventory of charged rings. The "rings
/// lost" figure is `deaths * inventory size` regardless of how many
/// repetitions actually succeeded; that matches the live game's
/// accounting and is preserved as-is.
pub fn resolve_wealth_charging_with_chance(
    user: &UserRecord,
    record: &ActivityRecord,
    death_chance: u32,
    rng: &mut impl Rng,
) -> TripOutcome {
    let (loot, deaths) = (0..record.quantity).fold(
        (Bank::new(), 0u32),
        |(mut loot, deaths), _| {
            if roll(death_chance, rng) {
                (loot, deaths + 1)
            } else {
                loot.add(RING_OF_WEALTH_5, u64::from(WEALTH_INVENTORY_SIZE));
                (loot, deaths)
            }
        },
    );

    let charged = loot.amount(RING_OF_WEALTH_5);
    let mut message = if loot.is_empty() {
        format!(
            "{}, {} finished their ring of wealth charging trip, but died and lost all rings of wealth.",
            user.username, user.minion_name
        )
    } else {
        format!(
            "{}, {} finished charging {} rings of wealth.",
            user.username, user.minion_name, charged
        )
    };
    if !loot.is_empty() && deaths > 0 {
        message.push_str(&format!(
            " They died {}x times, causing the loss of {} rings of wealth.",
            deaths,
            u64::from(WEALTH_INVENTORY_SIZE) * u64::from(deaths)
        ));
    }

    TripOutcome {
        loot,
        message,
        deaths,
    }
}

pub fn resolve_wealth_charging(
    user: &UserRecord,
    record: &ActivityRecord,
    rng: &mut impl Rng,
) -> TripOutcome {
    resolve_wealth_charging_with_chance(user, record, WEALTH_DEATH_CHANCE, rng)
}

/// Aerial fishing resolves with no per-catch loot table here; the record's
/// quantity feeds the finish message and downstream experience awards.
fn resolve_aerial_fishing(user: &UserRecord, record: &ActivityRecord) -> TripOutcome {
    let message = format!(
        "{}, {} finished aerial fishing and caught {} fish.",
        user.username, user.minion_name, record.quantity
    );
    TripOutcome {
        loot: Bank::new(),
        message,
        deaths: 0,
    }
}

/// Lifecycle glue: resolve, persist, then notify.
pub struct TripRunner<'a> {
    persistence: &'a dyn LootPersistence,
    notifier: &'a dyn TripNotifier,
}

impl<'a> TripRunner<'a> {
    pub fn new(persistence: &'a dyn LootPersistence, notifier: &'a dyn TripNotifier) -> Self {
        Self {
            persistence,
            notifier,
        }
    }

    /// Resolve a finished trip. Loot is merged into the player's holdings
    /// (and the collection log) before the notification is sent; if
    /// persistence fails, the error propagates and no notification goes
    /// out. The input record is never mutated.
    pub fn finish_trip(
        &self,
        user: &UserRecord,
        record: &ActivityRecord,
        rng: &mut impl Rng,
    ) -> Result<TripOutcome, MinionError> {
        let outcome = match &record.kind {
            ActivityKind::ClueCompletion { tier } => resolve_clue_completion(user, record, *tier),
            ActivityKind::WealthCharging => resolve_wealth_charging(user, record, rng),
            ActivityKind::AerialFishing => resolve_aerial_fishing(user, record),
        };

        self.persistence
            .merge_loot(&record.user_id, &outcome.loot, true)?;
        self.notifier.notify_trip_finished(
            user,
            &record.channel_id,
            &outcome.message,
            record,
            &outcome.loot,
        );

        metrics::inc_trips_finished();
        user.log(&format!(
            "finished {} trip: quantity[{}] deaths[{}]",
            record.kind.name(),
            record.quantity,
            outcome.deaths
        ));
        Ok(outcome)
    }
}
