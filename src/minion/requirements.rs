//! Prerequisite gating for monsters and activities.
//!
//! Categories are evaluated in a fixed order (quest points, items, skill
//! levels, gear stats) and the first failure wins. Failure reasons are the
//! exact strings shown to the player, so everything here is deterministic:
//! no randomness, stable iteration order, no internal detail leaked.

use std::collections::BTreeMap;
use std::fmt;

use crate::minion::gear::{readable_stat_name, GearSetupType, GearStat};
use crate::minion::types::{ItemId, Skill, UserRecord};

/// One item prerequisite: a specific item, or any one out of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRequirement {
    Single(ItemId),
    AnyOf(Vec<ItemId>),
}

/// Prerequisite bundle for a monster or activity. Read-only reference data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementSet {
    /// Name used inside refusal messages ("to kill {name}").
    pub name: String,
    pub quest_points: Option<u32>,
    pub items: Vec<ItemRequirement>,
    /// Minimum level per skill. BTreeMap so the consolidated message lists
    /// skills in a stable order.
    pub levels: BTreeMap<Skill, u8>,
    /// Per-setup minimum gear stats.
    pub gear: BTreeMap<GearSetupType, BTreeMap<GearStat, i32>>,
}

/// A requirement the player does not meet, carrying the full player-facing
/// explanation. This is an expected outcome, not a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmetRequirement(pub String);

impl fmt::Display for UnmetRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the full item requirement list for messages, e.g.
/// "Dragon scimitar, Ranger boots/Robin hood hat".
fn format_item_reqs(items: &[ItemRequirement], item_name: &impl Fn(ItemId) -> String) -> String {
    items
        .iter()
        .map(|req| match req {
            ItemRequirement::Single(id) => item_name(*id),
            ItemRequirement::AnyOf(ids) => ids
                .iter()
                .map(|id| item_name(*id))
                .collect::<Vec<_>>()
                .join("/"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a player against a requirement set. Short-circuits on the first
/// unmet category; success carries no payload.
pub fn check_requirements(
    user: &UserRecord,
    reqs: &RequirementSet,
    item_name: impl Fn(ItemId) -> String,
) -> Result<(), UnmetRequirement> {
    if let Some(required_qp) = reqs.quest_points {
        if user.quest_points < required_qp {
            return Err(UnmetRequirement(format!(
                "You need {} QP to kill {}. You can get Quest Points through questing with `/activities quest`",
                required_qp, reqs.name
            )));
        }
    }

    if !reqs.items.is_empty() {
        let full_list = format_item_reqs(&reqs.items, &item_name);
        for requirement in &reqs.items {
            match requirement {
                ItemRequirement::AnyOf(ids) => {
                    if !ids.iter().any(|id| user.has_item_equipped_or_in_bank(*id)) {
                        return Err(UnmetRequirement(format!(
                            "You need these items to kill {}: {}",
                            reqs.name, full_list
                        )));
                    }
                }
                ItemRequirement::Single(id) => {
                    if !user.has_item_equipped_or_in_bank(*id) {
                        return Err(UnmetRequirement(format!(
                            "You need {} to kill {}. You're missing {}.",
                            full_list,
                            reqs.name,
                            item_name(*id)
                        )));
                    }
                }
            }
        }
    }

    if !reqs.levels.is_empty() {
        let unmet: Vec<String> = reqs
            .levels
            .iter()
            .filter(|(skill, &level)| user.skill_level(**skill) < level)
            .map(|(skill, level)| format!("{} {}", level, skill.name()))
            .collect();
        if !unmet.is_empty() {
            return Err(UnmetRequirement(format!(
                "You don't meet the skill requirements to kill {}, you need: {}.",
                reqs.name,
                unmet.join(", ")
            )));
        }
    }

    for (setup, minimums) in &reqs.gear {
        let stats = user.gear.get(setup).copied().unwrap_or_default();
        if let Err((stat, has)) = stats.meets_stat_requirements(minimums) {
            let required = minimums.get(&stat).copied().unwrap_or(0);
            return Err(UnmetRequirement(format!(
                "You don't have the requirements to kill {}! Your {} stat in your {} setup is {}, but you need at least {}.",
                reqs.name,
                readable_stat_name(stat),
                setup.name(),
                has,
                required
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_names(id: ItemId) -> String {
        match id {
            4151 => "Abyssal whip".to_string(),
            11_840 => "Dragon boots".to_string(),
            2577 => "Ranger boots".to_string(),
            other => format!("item {}", other),
        }
    }

    fn demanding_set() -> RequirementSet {
        let mut levels = BTreeMap::new();
        levels.insert(Skill::Attack, 70);
        levels.insert(Skill::Slayer, 85);
        RequirementSet {
            name: "Abyssal Sire".to_string(),
            quest_points: Some(12),
            items: vec![
                ItemRequirement::Single(4151),
                ItemRequirement::AnyOf(vec![11_840, 2577]),
            ],
            levels,
            gear: BTreeMap::new(),
        }
    }

    #[test]
    fn quest_points_fail_first() {
        let user = UserRecord::new("1", "bob");
        let err = check_requirements(&user, &demanding_set(), item_names).unwrap_err();
        assert!(err.0.contains("12 QP"), "got: {}", err);
    }

    #[test]
    fn missing_single_item_names_the_item() {
        let mut user = UserRecord::new("1", "bob");
        user.quest_points = 12;
        let err = check_requirements(&user, &demanding_set(), item_names).unwrap_err();
        assert!(err.0.contains("You're missing Abyssal whip."), "got: {}", err);
        assert!(err.0.contains("Dragon boots/Ranger boots"), "got: {}", err);
    }

    #[test]
    fn any_of_group_accepts_either_item() {
        let mut user = UserRecord::new("1", "bob");
        user.quest_points = 12;
        user.bank.add(4151, 1);
        user.equipped_items.insert(2577);
        user.skills.insert(Skill::Attack, 70);
        user.skills.insert(Skill::Slayer, 85);
        assert!(check_requirements(&user, &demanding_set(), item_names).is_ok());
    }

    #[test]
    fn skill_message_consolidates_every_unmet_skill() {
        let mut user = UserRecord::new("1", "bob");
        user.quest_points = 12;
        user.bank.add(4151, 1);
        user.bank.add(11_840, 1);
        let err = check_requirements(&user, &demanding_set(), item_names).unwrap_err();
        assert!(err.0.contains("70 attack"), "got: {}", err);
        assert!(err.0.contains("85 slayer"), "got: {}", err);
    }

    #[test]
    fn gear_failure_reports_stat_have_and_need() {
        let mut user = UserRecord::new("1", "bob");
        let mut stat_reqs = BTreeMap::new();
        stat_reqs.insert(GearStat::AttackCrush, 30);
        let mut gear = BTreeMap::new();
        gear.insert(GearSetupType::Melee, stat_reqs);
        let reqs = RequirementSet {
            name: "Tekton".to_string(),
            gear,
            ..Default::default()
        };
        user.gear
            .insert(GearSetupType::Melee, crate::minion::gear::GearStats::default());
        let err = check_requirements(&user, &reqs, item_names).unwrap_err();
        assert!(err.0.contains("attack crush"), "got: {}", err);
        assert!(err.0.contains("is 0"), "got: {}", err);
        assert!(err.0.contains("at least 30"), "got: {}", err);
    }

    #[test]
    fn exact_thresholds_pass_and_lowering_keeps_passing() {
        let mut user = UserRecord::new("1", "alice");
        user.quest_points = 12;
        user.bank.add(4151, 1);
        user.bank.add(2577, 1);
        user.skills.insert(Skill::Attack, 70);
        user.skills.insert(Skill::Slayer, 85);
        let mut reqs = demanding_set();
        assert!(check_requirements(&user, &reqs, item_names).is_ok());

        // Monotonicity: relaxing any single threshold keeps the result Ok.
        reqs.quest_points = Some(1);
        assert!(check_requirements(&user, &reqs, item_names).is_ok());
        reqs.levels.insert(Skill::Attack, 1);
        assert!(check_requirements(&user, &reqs, item_names).is_ok());
    }
}
