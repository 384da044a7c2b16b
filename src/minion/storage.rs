use std::path::{Path, PathBuf};

use sled::IVec;

use crate::minion::bank::Bank;
use crate::minion::errors::MinionError;
use crate::minion::tasks::{ActivityScheduler, LootPersistence};
use crate::minion::types::{
    ActivityRecord, PerkTier, UserRecord, ACTIVITY_SCHEMA_VERSION, USER_SCHEMA_VERSION,
};
use uuid::Uuid;

const TREE_USERS: &str = "minion_users";
const TREE_ACTIVITIES: &str = "minion_activities";
const TREE_COLLECTION: &str = "minion_collection_log";

/// Helper builder so tests can easily create throwaway stores.
pub struct MinionStoreBuilder {
    path: PathBuf,
}

impl MinionStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(self) -> Result<MinionStore, MinionError> {
        MinionStore::open(self.path)
    }
}

/// Sled-backed persistence for player state, pending activity records, and
/// the per-player collection log.
pub struct MinionStore {
    _db: sled::Db,
    users: sled::Tree,
    activities: sled::Tree,
    collection: sled::Tree,
}

impl MinionStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MinionError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let users = db.open_tree(TREE_USERS)?;
        let activities = db.open_tree(TREE_ACTIVITIES)?;
        let collection = db.open_tree(TREE_COLLECTION)?;
        Ok(Self {
            _db: db,
            users,
            activities,
            collection,
        })
    }

    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, MinionError> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(bytes: IVec) -> Result<T, MinionError> {
        Ok(bincode::deserialize::<T>(&bytes)?)
    }

    /// Insert or update a player record.
    pub fn put_user(&self, mut user: UserRecord) -> Result<(), MinionError> {
        user.schema_version = USER_SCHEMA_VERSION;
        user.touch();
        let bytes = Self::serialize(&user)?;
        self.users.insert(user.id.as_bytes(), bytes)?;
        self.users.flush()?;
        Ok(())
    }

    /// Fetch a player record by id.
    pub fn get_user(&self, user_id: &str) -> Result<UserRecord, MinionError> {
        let Some(bytes) = self.users.get(user_id.as_bytes())? else {
            return Err(MinionError::NotFound(format!("user: {}", user_id)));
        };
        let record: UserRecord = Self::deserialize(bytes)?;
        if record.schema_version != USER_SCHEMA_VERSION {
            return Err(MinionError::SchemaMismatch {
                entity: "user",
                expected: USER_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }

    /// Find the player who linked a given GitHub account, if any.
    pub fn user_by_github_id(&self, github_id: &str) -> Result<Option<UserRecord>, MinionError> {
        for entry in self.users.iter() {
            let (_, bytes) = entry?;
            let record: UserRecord = Self::deserialize(bytes)?;
            if record.github_id.as_deref() == Some(github_id) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Persist a pending activity record.
    pub fn put_activity(&self, record: &ActivityRecord) -> Result<(), MinionError> {
        let bytes = Self::serialize(record)?;
        self.activities.insert(record.id.as_bytes(), bytes)?;
        self.activities.flush()?;
        Ok(())
    }

    /// Remove and return a pending activity record. Each record can be taken
    /// exactly once; a second take reports `NotFound`. This is the storage
    /// half of the consume-once contract — duplicate scheduler firings are
    /// still the host's problem.
    pub fn take_activity(&self, id: Uuid) -> Result<ActivityRecord, MinionError> {
        let Some(bytes) = self.activities.remove(id.as_bytes())? else {
            return Err(MinionError::NotFound(format!("activity: {}", id)));
        };
        self.activities.flush()?;
        let record: ActivityRecord = Self::deserialize(bytes)?;
        if record.schema_version != ACTIVITY_SCHEMA_VERSION {
            return Err(MinionError::SchemaMismatch {
                entity: "activity",
                expected: ACTIVITY_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }

    /// Everything a player has ever received with collection logging on.
    pub fn collection_log(&self, user_id: &str) -> Result<Bank, MinionError> {
        match self.collection.get(user_id.as_bytes())? {
            Some(bytes) => Self::deserialize(bytes),
            None => Ok(Bank::new()),
        }
    }
}

impl LootPersistence for MinionStore {
    /// Merge loot into the player's bank (and collection log when flagged)
    /// as one logical update, flushed before returning.
    fn merge_loot(
        &self,
        user_id: &str,
        loot: &Bank,
        collection_log: bool,
    ) -> Result<(), MinionError> {
        let mut user = self.get_user(user_id)?;
        user.bank.add_bank(loot);
        if collection_log {
            let mut logged = self.collection_log(user_id)?;
            logged.add_bank(loot);
            self.collection
                .insert(user_id.as_bytes(), Self::serialize(&logged)?)?;
        }
        self.put_user(user)?;
        self.collection.flush()?;
        Ok(())
    }
}

impl crate::sponsors::SponsorDirectory for MinionStore {
    fn user_id_for_github(&self, github_id: &str) -> Result<Option<String>, MinionError> {
        Ok(self.user_by_github_id(github_id)?.map(|user| user.id))
    }
}

impl crate::sponsors::PerkService for MinionStore {
    fn give_perks(&self, user_id: &str, tier: PerkTier) -> Result<(), MinionError> {
        let mut user = self.get_user(user_id)?;
        user.perk_tier = tier;
        self.put_user(user)
    }

    fn change_tier(&self, user_id: &str, _from: PerkTier, to: PerkTier) -> Result<(), MinionError> {
        let mut user = self.get_user(user_id)?;
        user.perk_tier = to;
        self.put_user(user)
    }

    fn remove_perks(&self, user_id: &str) -> Result<(), MinionError> {
        let mut user = self.get_user(user_id)?;
        user.perk_tier = PerkTier::One;
        self.put_user(user)
    }
}

impl ActivityScheduler for MinionStore {
    /// Scheduling here means durably parking the record; the host's timer
    /// fires the resolver once `record.duration()` has elapsed.
    fn schedule(&self, record: &ActivityRecord) -> Result<(), MinionError> {
        self.put_activity(record)
    }
}
