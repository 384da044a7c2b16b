//! Blacklisted user/guild cache, refreshed on a timer.
//!
//! The authoritative list lives in an external service; this cache keeps an
//! in-memory copy so every incoming command can be checked without a round
//! trip. A sync replaces the whole contents (it never merges), so entries
//! removed upstream disappear here on the next refresh.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::metrics;
use crate::minion::errors::MinionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlacklistedEntityKind {
    User,
    Guild,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistedEntity {
    pub kind: BlacklistedEntityKind,
    pub id: String,
}

/// Source of truth for the blacklist (database, remote API, fixture).
pub trait BlacklistSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<BlacklistedEntity>, MinionError>;
}

#[derive(Debug, Default)]
pub struct BlacklistCache {
    users: RwLock<HashSet<String>>,
    guilds: RwLock<HashSet<String>>,
}

impl BlacklistCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_user_blacklisted(&self, user_id: &str) -> bool {
        self.users
            .read()
            .expect("blacklist user lock poisoned")
            .contains(user_id)
    }

    pub fn is_guild_blacklisted(&self, guild_id: &str) -> bool {
        self.guilds
            .read()
            .expect("blacklist guild lock poisoned")
            .contains(guild_id)
    }

    /// Replace the cached sets with a fresh fetch from the source. Builds
    /// the new sets before swapping so readers never observe a half-empty
    /// cache.
    pub fn sync(&self, source: &dyn BlacklistSource) -> Result<(), MinionError> {
        let entities = source.fetch()?;
        let mut users = HashSet::new();
        let mut guilds = HashSet::new();
        for entity in entities {
            match entity.kind {
                BlacklistedEntityKind::User => users.insert(entity.id),
                BlacklistedEntityKind::Guild => guilds.insert(entity.id),
            };
        }
        *self.users.write().expect("blacklist user lock poisoned") = users;
        *self.guilds.write().expect("blacklist guild lock poisoned") = guilds;
        metrics::inc_blacklist_syncs();
        Ok(())
    }
}

/// Start the periodic refresh task. Fetch failures are logged and retried
/// on the next tick; the task itself never dies.
pub fn spawn_refresh(
    cache: Arc<BlacklistCache>,
    source: Arc<dyn BlacklistSource>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = cache.sync(source.as_ref()) {
                log::warn!("blacklist sync failed: {}", e);
            } else {
                log::debug!("blacklist synced");
            }
        }
    })
}
