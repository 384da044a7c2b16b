//! Equipped-gear stat bundles and per-slot threshold checks.
//!
//! Each gear setup (melee, range, ...) carries the summed combat stats of
//! whatever the player has equipped in it. Requirement descriptors compare
//! those sums against per-stat minima.

use serde::{Deserialize, Serialize};

/// Named gear setup slots a player maintains in parallel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GearSetupType {
    Melee,
    Range,
    Mage,
    Misc,
    Skilling,
    Wildy,
}

impl GearSetupType {
    pub fn name(&self) -> &'static str {
        match self {
            GearSetupType::Melee => "melee",
            GearSetupType::Range => "range",
            GearSetupType::Mage => "mage",
            GearSetupType::Misc => "misc",
            GearSetupType::Skilling => "skilling",
            GearSetupType::Wildy => "wildy",
        }
    }
}

/// Individual gear stat names. Ord so requirement maps iterate in a fixed
/// order and failure messages stay deterministic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GearStat {
    AttackStab,
    AttackSlash,
    AttackCrush,
    AttackMagic,
    AttackRanged,
    DefenceStab,
    DefenceSlash,
    DefenceCrush,
    DefenceMagic,
    DefenceRanged,
    MeleeStrength,
    RangedStrength,
    MagicDamage,
    Prayer,
}

/// Human-readable stat name for refusal messages.
pub fn readable_stat_name(stat: GearStat) -> &'static str {
    match stat {
        GearStat::AttackStab => "attack stab",
        GearStat::AttackSlash => "attack slash",
        GearStat::AttackCrush => "attack crush",
        GearStat::AttackMagic => "attack magic",
        GearStat::AttackRanged => "attack ranged",
        GearStat::DefenceStab => "defence stab",
        GearStat::DefenceSlash => "defence slash",
        GearStat::DefenceCrush => "defence crush",
        GearStat::DefenceMagic => "defence magic",
        GearStat::DefenceRanged => "defence ranged",
        GearStat::MeleeStrength => "melee strength",
        GearStat::RangedStrength => "ranged strength",
        GearStat::MagicDamage => "magic damage",
        GearStat::Prayer => "prayer",
    }
}

/// Summed stats of everything equipped in one gear setup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GearStats {
    pub attack_stab: i32,
    pub attack_slash: i32,
    pub attack_crush: i32,
    pub attack_magic: i32,
    pub attack_ranged: i32,
    pub defence_stab: i32,
    pub defence_slash: i32,
    pub defence_crush: i32,
    pub defence_magic: i32,
    pub defence_ranged: i32,
    pub melee_strength: i32,
    pub ranged_strength: i32,
    pub magic_damage: i32,
    pub prayer: i32,
}

impl GearStats {
    pub fn get(&self, stat: GearStat) -> i32 {
        match stat {
            GearStat::AttackStab => self.attack_stab,
            GearStat::AttackSlash => self.attack_slash,
            GearStat::AttackCrush => self.attack_crush,
            GearStat::AttackMagic => self.attack_magic,
            GearStat::AttackRanged => self.attack_ranged,
            GearStat::DefenceStab => self.defence_stab,
            GearStat::DefenceSlash => self.defence_slash,
            GearStat::DefenceCrush => self.defence_crush,
            GearStat::DefenceMagic => self.defence_magic,
            GearStat::DefenceRanged => self.defence_ranged,
            GearStat::MeleeStrength => self.melee_strength,
            GearStat::RangedStrength => self.ranged_strength,
            GearStat::MagicDamage => self.magic_damage,
            GearStat::Prayer => self.prayer,
        }
    }

    /// Compare this setup against per-stat minima. Returns the first unmet
    /// stat (requirements iterate in `GearStat` order) together with the
    /// value the player actually has.
    pub fn meets_stat_requirements(
        &self,
        requirements: &std::collections::BTreeMap<GearStat, i32>,
    ) -> Result<(), (GearStat, i32)> {
        for (&stat, &required) in requirements {
            let has = self.get(stat);
            if has < required {
                return Err((stat, has));
            }
        }
        Ok(())
    }
}
