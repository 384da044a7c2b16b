use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::minion::bank::Bank;
use crate::minion::clues::ClueTierId;
use crate::minion::gear::{GearSetupType, GearStats};

pub const USER_SCHEMA_VERSION: u8 = 1;
pub const ACTIVITY_SCHEMA_VERSION: u8 = 1;

/// OSRS-style numeric item identifier.
pub type ItemId = u32;

/// Trainable skills. Only the skills the game core actually gates on are
/// listed; adding one is a plain enum extension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Attack,
    Strength,
    Defence,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Fishing,
    Hunter,
    Agility,
    Slayer,
    Cooking,
    Woodcutting,
    Mining,
    Crafting,
}

impl Skill {
    /// Lowercase name used inside player-facing messages.
    pub fn name(&self) -> &'static str {
        match self {
            Skill::Attack => "attack",
            Skill::Strength => "strength",
            Skill::Defence => "defence",
            Skill::Hitpoints => "hitpoints",
            Skill::Ranged => "ranged",
            Skill::Prayer => "prayer",
            Skill::Magic => "magic",
            Skill::Fishing => "fishing",
            Skill::Hunter => "hunter",
            Skill::Agility => "agility",
            Skill::Slayer => "slayer",
            Skill::Cooking => "cooking",
            Skill::Woodcutting => "woodcutting",
            Skill::Mining => "mining",
            Skill::Crafting => "crafting",
        }
    }
}

/// Monetization-derived privilege level. Computed by an external system and
/// consumed here as an opaque ordering; affects trip limits and perks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PerkTier {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl PerkTier {
    /// 1-based tier number used in announcements and comparisons.
    pub fn number(&self) -> u8 {
        match self {
            PerkTier::One => 1,
            PerkTier::Two => 2,
            PerkTier::Three => 3,
            PerkTier::Four => 4,
            PerkTier::Five => 5,
            PerkTier::Six => 6,
        }
    }
}

impl Default for PerkTier {
    fn default() -> Self {
        PerkTier::One
    }
}

/// Boolean account flags stored as a set rather than individual columns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BitField {
    IsPatron,
    HasPermanentTripBonus,
    DisabledRandomEvents,
    IsIronman,
}

/// Minimal item metadata consumed through injected lookups. The full item
/// catalog lives outside this crate; callers hand in whatever subset the
/// operation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub highalch: Option<u32>,
    pub tradeable: bool,
}

/// Persistent player state. Mutated by command handlers and trip resolvers,
/// persisted through `MinionStore`; lives for the player's whole presence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    /// Discord snowflake, stored as a string.
    pub id: String,
    pub username: String,
    /// Display name of the player's automated agent.
    pub minion_name: String,
    pub quest_points: u32,
    /// skill -> level; unlisted skills are level 1.
    #[serde(default)]
    pub skills: HashMap<Skill, u8>,
    #[serde(default)]
    pub bank: Bank,
    /// Items currently worn across all gear setups.
    #[serde(default)]
    pub equipped_items: HashSet<ItemId>,
    /// Equipped stat bundle per gear setup.
    #[serde(default)]
    pub gear: HashMap<GearSetupType, GearStats>,
    #[serde(default)]
    pub bitfield: Vec<BitField>,
    #[serde(default)]
    pub perk_tier: PerkTier,
    #[serde(default)]
    pub favorite_alchables: Vec<ItemId>,
    #[serde(default)]
    pub slayer_points: u32,
    /// Ids of slayer rewards currently unlocked.
    #[serde(default)]
    pub slayer_unlocks: Vec<u32>,
    /// GitHub account id, when the player linked one (sponsorship perks).
    #[serde(default)]
    pub github_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl UserRecord {
    pub fn new(id: &str, username: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            username: username.to_string(),
            minion_name: format!("{}'s minion", username),
            quest_points: 0,
            skills: HashMap::new(),
            bank: Bank::new(),
            equipped_items: HashSet::new(),
            gear: HashMap::new(),
            bitfield: Vec::new(),
            perk_tier: PerkTier::One,
            favorite_alchables: Vec::new(),
            slayer_points: 0,
            slayer_unlocks: Vec::new(),
            github_id: None,
            created_at: now,
            updated_at: now,
            schema_version: USER_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// What a scheduled trip is doing, with any type-specific payload.
/// Externally tagged: bincode cannot decode internally-tagged enums, and
/// these records live in the sled activity tree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    AerialFishing,
    WealthCharging,
    ClueCompletion { tier: ClueTierId },
}

impl ActivityKind {
    /// Stable tag used for logging and trip-length policy lookups.
    pub fn name(&self) -> &'static str {
        match self {
            ActivityKind::AerialFishing => "AerialFishing",
            ActivityKind::WealthCharging => "WealthCharging",
            ActivityKind::ClueCompletion { .. } => "ClueCompletion",
        }
    }
}

/// Immutable-once-created description of a scheduled trip. Created by a
/// command handler at trip start and consumed exactly once by the matching
/// resolver when the trip finishes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRecord {
    pub id: Uuid,
    pub user_id: String,
    /// Channel the trip-finished message should be delivered to.
    pub channel_id: String,
    pub kind: ActivityKind,
    pub quantity: u32,
    /// Total trip duration in milliseconds. Stored as an integer so the
    /// record serializes the same everywhere.
    pub duration_ms: u64,
    pub started_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl ActivityRecord {
    pub fn new(
        user_id: &str,
        channel_id: &str,
        kind: ActivityKind,
        quantity: u32,
        duration: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            channel_id: channel_id.to_string(),
            kind,
            quantity,
            duration_ms: duration.as_millis() as u64,
            started_at: Utc::now(),
            schema_version: ACTIVITY_SCHEMA_VERSION,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
