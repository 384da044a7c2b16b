//! Minion game core: trip planning, requirement gating, loot resolution,
//! and the sled-backed persistence behind them. Command handlers start
//! timed activities; the matching resolver turns each finished record into
//! loot and a player-facing message.

pub mod bank;
pub mod clues;
pub mod commands;
pub mod errors;
pub mod gear;
pub mod requirements;
pub mod shop;
pub mod storage;
pub mod tasks;
pub mod trip;
pub mod types;
pub mod user;

pub use bank::Bank;
pub use clues::{clue_tier, ClueTier, ClueTierId, CLUE_TIERS};
pub use commands::{
    aerial_fishing_command, charge_wealth_command, clue_command, RING_OF_WEALTH,
    RING_OF_WEALTH_5, WEALTH_INVENTORY_SIZE,
};
pub use errors::MinionError;
pub use gear::{readable_stat_name, GearSetupType, GearStat, GearStats};
pub use requirements::{check_requirements, ItemRequirement, RequirementSet, UnmetRequirement};
pub use shop::{
    find_buyable, slayer_shop_buy, slayer_shop_disable, slayer_shop_list, slayer_shop_my_unlocks,
    RewardListFilter, SlayerShopEntry, SLAYER_PURCHASE_ERROR, SLAYER_SHOP,
};
pub use storage::{MinionStore, MinionStoreBuilder};
pub use tasks::{
    resolve_clue_completion, resolve_wealth_charging, resolve_wealth_charging_with_chance,
    ActivityScheduler, LootPersistence, TripLengthPolicy, TripNotifier, TripOutcome, TripRunner,
    WEALTH_DEATH_CHANCE,
};
pub use trip::{
    format_duration, plan_trip, randomized_duration, roll, PerkAwareTripLength, StaticTripLength,
    TripPlan,
};
pub use types::*;
pub use user::TIME_PER_ALCH;
