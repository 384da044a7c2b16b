//! Derived player state: the extension methods command handlers lean on.
//! The base record lives in [`crate::minion::types`]; this module adds the
//! lookups and requirement checks computed from it.

use std::time::Duration;

use crate::logutil::escape_log;
use crate::minion::requirements::{check_requirements, RequirementSet, UnmetRequirement};
use crate::minion::types::{ItemDef, ItemId, Skill, UserRecord};

/// Cast time of a single high alchemy spell.
pub const TIME_PER_ALCH: Duration = Duration::from_secs(3);

impl UserRecord {
    /// Current level in a skill; untrained skills are level 1.
    pub fn skill_level(&self, skill: Skill) -> u8 {
        self.skills.get(&skill).copied().unwrap_or(1).max(1)
    }

    /// Item possession check used by requirement gating: worn in any gear
    /// setup, or sitting in the bank.
    pub fn has_item_equipped_or_in_bank(&self, item: ItemId) -> bool {
        self.equipped_items.contains(&item) || self.bank.has(item)
    }

    /// "name[id]" with parentheses stripped, safe to embed in log lines.
    pub fn sanitized_name(&self) -> String {
        let cleaned: String = self
            .username
            .chars()
            .filter(|c| *c != '(' && *c != ')')
            .collect();
        format!("({})[{}]", cleaned, self.id)
    }

    /// Emit a single-line log entry attributed to this player.
    pub fn log(&self, entry: &str) {
        log::info!("{} {}", self.sanitized_name(), escape_log(entry));
    }

    /// Check this player against a monster/activity requirement bundle.
    pub fn has_requirements(
        &self,
        reqs: &RequirementSet,
        item_name: impl Fn(ItemId) -> String,
    ) -> Result<(), UnmetRequirement> {
        check_requirements(self, reqs, item_name)
    }

    /// Favourite alchables the player owns, most profitable first for the
    /// given trip length. Profit per item is capped by how many casts fit
    /// into the trip and how many copies are banked. Item metadata comes
    /// from the injected lookup; unknown, untradeable, or alch-worthless
    /// items are filtered out.
    pub fn fav_alchs(
        &self,
        trip_length: Duration,
        get_item: impl Fn(ItemId) -> Option<ItemDef>,
    ) -> Vec<ItemDef> {
        let max_casts = (trip_length.as_millis() / TIME_PER_ALCH.as_millis()) as u64;
        let alch_value = |item: &ItemDef| {
            let casts = max_casts.min(self.bank.amount(item.id));
            casts * u64::from(item.highalch.unwrap_or(0))
        };
        let mut owned: Vec<ItemDef> = self
            .favorite_alchables
            .iter()
            .filter(|id| self.bank.has(**id))
            .filter_map(|id| get_item(*id))
            .filter(|item| item.tradeable && item.highalch.unwrap_or(0) > 0)
            .collect();
        owned.sort_by(|a, b| alch_value(b).cmp(&alch_value(a)));
        owned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ItemId, name: &str, highalch: Option<u32>, tradeable: bool) -> ItemDef {
        ItemDef {
            id,
            name: name.to_string(),
            highalch,
            tradeable,
        }
    }

    fn catalog(id: ItemId) -> Option<ItemDef> {
        match id {
            1163 => Some(item(1163, "Rune full helm", Some(21_000), true)),
            1201 => Some(item(1201, "Rune kiteshield", Some(32_640), true)),
            4151 => Some(item(4151, "Abyssal whip", Some(72_000), false)),
            617 => Some(item(617, "Coins", None, true)),
            _ => None,
        }
    }

    #[test]
    fn skill_level_defaults_to_one() {
        let mut user = UserRecord::new("1", "alice");
        assert_eq!(user.skill_level(Skill::Fishing), 1);
        user.skills.insert(Skill::Fishing, 43);
        assert_eq!(user.skill_level(Skill::Fishing), 43);
    }

    #[test]
    fn equipped_or_banked_items_both_count() {
        let mut user = UserRecord::new("1", "alice");
        assert!(!user.has_item_equipped_or_in_bank(4151));
        user.bank.add(4151, 1);
        assert!(user.has_item_equipped_or_in_bank(4151));
        user.bank.remove(4151, 1);
        user.equipped_items.insert(4151);
        assert!(user.has_item_equipped_or_in_bank(4151));
    }

    #[test]
    fn sanitized_name_strips_parens() {
        let user = UserRecord::new("123", "a(li)ce");
        assert_eq!(user.sanitized_name(), "(alice)[123]");
    }

    #[test]
    fn fav_alchs_sorts_by_trip_value_and_filters() {
        let mut user = UserRecord::new("1", "alice");
        user.favorite_alchables = vec![1163, 1201, 4151, 617, 9999];
        user.bank.add(1163, 10_000); // capped by casts, not stock
        user.bank.add(1201, 2); // capped by stock
        user.bank.add(4151, 1); // untradeable, filtered
        user.bank.add(617, 50); // no highalch, filtered

        let alchs = user.fav_alchs(Duration::from_secs(30), catalog);
        let names: Vec<&str> = alchs.iter().map(|i| i.name.as_str()).collect();
        // 10 casts fit: helm = 10 * 21k = 210k beats kite = 2 * 32.6k.
        assert_eq!(names, vec!["Rune full helm", "Rune kiteshield"]);
    }
}
