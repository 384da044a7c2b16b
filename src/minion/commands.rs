//! Abstracted command handlers that start trips. Each handler gates the
//! request, plans how many repetitions fit into the player's maximum trip
//! length, schedules the activity record, and returns the reply string.
//! Refusals come back as [`MinionError::Refused`] with the full
//! player-facing message.

use std::time::Duration;

use rand::Rng;

use crate::metrics;
use crate::minion::clues::{clue_tier, ClueTierId};
use crate::minion::errors::MinionError;
use crate::minion::tasks::{ActivityScheduler, TripLengthPolicy};
use crate::minion::trip::{format_duration, plan_trip, randomized_duration};
use crate::minion::types::{ActivityKind, ActivityRecord, ItemId, Skill, UserRecord};

/// Rings charged per surviving wealth-charging repetition (one inventory).
pub const WEALTH_INVENTORY_SIZE: u32 = 4;
/// Uncharged ring brought along for charging.
pub const RING_OF_WEALTH: ItemId = 2572;
/// Fully charged ring produced at the Fountain of Rune.
pub const RING_OF_WEALTH_5: ItemId = 11_980;

/// Base time for one aerial fishing catch, before variation.
const TIME_PER_FISH: Duration = Duration::from_secs(2);
/// Base time for one wealth charging inventory run, before variation.
const TIME_PER_WEALTH_INVENTORY: Duration = Duration::from_secs(8 * 60 + 30);
/// Base time to complete one clue, before variation.
const TIME_PER_CLUE: Duration = Duration::from_secs(3 * 60);

fn refuse<T>(message: String) -> Result<T, MinionError> {
    Err(MinionError::Refused(message))
}

fn start_trip(
    user: &UserRecord,
    channel_id: &str,
    kind: ActivityKind,
    quantity: u32,
    duration: Duration,
    scheduler: &dyn ActivityScheduler,
) -> Result<ActivityRecord, MinionError> {
    let record = ActivityRecord::new(&user.id, channel_id, kind, quantity, duration);
    scheduler.schedule(&record)?;
    metrics::inc_trips_started();
    user.log(&format!(
        "started {} trip: quantity[{}] duration[{}ms]",
        record.kind.name(),
        record.quantity,
        record.duration_ms
    ));
    Ok(record)
}

/// Start an aerial fishing trip.
pub fn aerial_fishing_command(
    user: &UserRecord,
    channel_id: &str,
    trip_length: &dyn TripLengthPolicy,
    scheduler: &dyn ActivityScheduler,
    rng: &mut impl Rng,
) -> Result<String, MinionError> {
    if user.skill_level(Skill::Fishing) < 43 || user.skill_level(Skill::Hunter) < 35 {
        return refuse(
            "You need at least level 35 Hunter and 43 Fishing to do Aerial fishing.".to_string(),
        );
    }

    let kind = ActivityKind::AerialFishing;
    let time_per_fish = randomized_duration(TIME_PER_FISH, 7.5, rng);
    let max_trip = trip_length.max_trip_length(user, &kind);
    let plan = plan_trip(max_trip, time_per_fish);
    if plan.is_empty() {
        return refuse(format!(
            "{} can't fit a single catch into your maximum trip length of {}.",
            user.minion_name,
            format_duration(max_trip)
        ));
    }

    start_trip(
        user,
        channel_id,
        kind,
        plan.quantity,
        plan.total_duration,
        scheduler,
    )?;

    Ok(format!(
        "{} is now doing Aerial fishing, it will take around {} to finish.",
        user.minion_name,
        format_duration(plan.total_duration)
    ))
}

/// Start a ring of wealth charging trip at the Fountain of Rune.
pub fn charge_wealth_command(
    user: &UserRecord,
    channel_id: &str,
    trip_length: &dyn TripLengthPolicy,
    scheduler: &dyn ActivityScheduler,
    rng: &mut impl Rng,
) -> Result<String, MinionError> {
    if !user.bank.has(RING_OF_WEALTH) {
        return refuse("You don't have any rings of wealth to charge.".to_string());
    }

    let kind = ActivityKind::WealthCharging;
    let time_per_inventory = randomized_duration(TIME_PER_WEALTH_INVENTORY, 5.0, rng);
    let max_trip = trip_length.max_trip_length(user, &kind);
    let plan = plan_trip(max_trip, time_per_inventory);
    if plan.is_empty() {
        return refuse(format!(
            "{} can't fit a single charging run into your maximum trip length of {}.",
            user.minion_name,
            format_duration(max_trip)
        ));
    }

    start_trip(
        user,
        channel_id,
        kind,
        plan.quantity,
        plan.total_duration,
        scheduler,
    )?;

    Ok(format!(
        "{} is now charging {} inventories of rings of wealth, it will take around {} to finish.",
        user.minion_name,
        plan.quantity,
        format_duration(plan.total_duration)
    ))
}

/// Start a clue completion trip for a tier.
pub fn clue_command(
    user: &UserRecord,
    channel_id: &str,
    tier_id: ClueTierId,
    trip_length: &dyn TripLengthPolicy,
    scheduler: &dyn ActivityScheduler,
    rng: &mut impl Rng,
) -> Result<String, MinionError> {
    let tier = clue_tier(tier_id);
    let kind = ActivityKind::ClueCompletion { tier: tier_id };
    let time_per_clue = randomized_duration(TIME_PER_CLUE, 10.0, rng);
    let max_trip = trip_length.max_trip_length(user, &kind);
    let plan = plan_trip(max_trip, time_per_clue);
    if plan.is_empty() {
        return refuse(format!(
            "{} can't fit a single {} clue into your maximum trip length of {}.",
            user.minion_name,
            tier.name,
            format_duration(max_trip)
        ));
    }

    start_trip(
        user,
        channel_id,
        kind,
        plan.quantity,
        plan.total_duration,
        scheduler,
    )?;

    Ok(format!(
        "{} is now completing {} {} clues, it will take around {} to finish.",
        user.minion_name,
        plan.quantity,
        tier.name,
        format_duration(plan.total_duration)
    ))
}
