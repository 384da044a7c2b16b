//! Slayer reward shop: spend slayer points on items or persistent unlocks.
//!
//! Point deduction is persisted before items are granted, and a failed
//! grant surfaces the generic purchase error instead of a partial-success
//! reply. Unlock toggles live on the player record as a plain id list.

use crate::minion::bank::Bank;
use crate::minion::errors::MinionError;
use crate::minion::storage::MinionStore;
use crate::minion::tasks::LootPersistence;
use crate::minion::types::{ItemId, UserRecord};

pub const SLAYER_PURCHASE_ERROR: &str =
    "An error occurred trying to make this purchase. Please try again or contact support if the issue persists.";

/// One entry in the slayer reward catalog. Entries with an item are bought
/// repeatedly (unless `have_one`); entries without one are unlockables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlayerShopEntry {
    pub id: u32,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Item granted per purchase, when this is a buyable.
    pub item: Option<ItemId>,
    pub point_cost: u32,
    /// Only one may ever be owned.
    pub have_one: bool,
    /// Task-extension multiplier for extend-type unlocks.
    pub extend_mult: Option<f64>,
    pub desc: &'static str,
}

pub const SLAYER_SHOP: &[SlayerShopEntry] = &[
    SlayerShopEntry {
        id: 1,
        name: "Slayer ring (8)",
        aliases: &["slayer ring"],
        item: Some(11_866),
        point_cost: 75,
        have_one: false,
        extend_mult: None,
        desc: "A ring with 8 teleport charges to slayer locations.",
    },
    SlayerShopEntry {
        id: 2,
        name: "Herb sack",
        aliases: &["herbsack"],
        item: Some(13_226),
        point_cost: 750,
        have_one: true,
        extend_mult: None,
        desc: "Stores grimy herbs gathered on task.",
    },
    SlayerShopEntry {
        id: 3,
        name: "Rune pouch",
        aliases: &[],
        item: Some(12_791),
        point_cost: 750,
        have_one: true,
        extend_mult: None,
        desc: "Stores three types of runes.",
    },
    SlayerShopEntry {
        id: 100,
        name: "Malevolent Masquerade",
        aliases: &["slayer helmet"],
        item: None,
        point_cost: 400,
        have_one: false,
        extend_mult: None,
        desc: "Unlocks the ability to assemble a slayer helmet.",
    },
    SlayerShopEntry {
        id: 101,
        name: "Broader Fletching",
        aliases: &["broads"],
        item: None,
        point_cost: 300,
        have_one: false,
        extend_mult: None,
        desc: "Unlocks fletching of broad bolts and arrows.",
    },
    SlayerShopEntry {
        id: 102,
        name: "Need More Darkness",
        aliases: &[],
        item: None,
        point_cost: 100,
        have_one: false,
        extend_mult: Some(1.5),
        desc: "Extends dark beast tasks.",
    },
];

fn string_matches(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Look an entry up by name or alias, case-insensitive.
pub fn find_buyable(name: &str) -> Option<&'static SlayerShopEntry> {
    SLAYER_SHOP.iter().find(|entry| {
        string_matches(entry.name, name)
            || entry.aliases.iter().any(|alias| string_matches(alias, name))
    })
}

/// Buy an item or unlock a reward with slayer points.
pub fn slayer_shop_buy(
    store: &MinionStore,
    user_id: &str,
    buyable: &str,
    quantity: Option<u32>,
) -> Result<String, MinionError> {
    let Some(entry) = find_buyable(buyable) else {
        return Err(MinionError::Refused(format!(
            "Cannot find Slayer buyable with the name {}",
            buyable
        )));
    };
    let mut user = store.get_user(user_id)?;

    if let Some(item) = entry.item {
        if entry.have_one && user.has_item_equipped_or_in_bank(item) {
            return Err(MinionError::Refused(format!(
                "You already own a {}",
                entry.name
            )));
        }
        let qty = if entry.have_one {
            1
        } else {
            quantity.unwrap_or(1).max(1)
        };
        // Quantity is caller-supplied; cost math stays in u64 so it cannot
        // overflow before the points check.
        let cost = u64::from(qty) * u64::from(entry.point_cost);
        if u64::from(user.slayer_points) < cost {
            return Err(MinionError::Refused(format!(
                "You don't have enough slayer points to purchase {}x {}. You need {} and you have {}.",
                qty, entry.name, cost, user.slayer_points
            )));
        }
        user.slayer_points -= cost as u32;
        store.put_user(user)?;
        let mut loot = Bank::new();
        loot.add(item, u64::from(qty));
        if let Err(e) = store.merge_loot(user_id, &loot, true) {
            log::error!(
                "slayer shop: failed granting {}x {} to {}: {}",
                qty,
                entry.name,
                user_id,
                e
            );
            return Err(MinionError::Refused(SLAYER_PURCHASE_ERROR.to_string()));
        }
        Ok(format!("You bought {}x {}.", qty, entry.name))
    } else {
        if user.slayer_unlocks.contains(&entry.id) {
            return Err(MinionError::Refused(format!(
                "You already have {} unlocked.",
                entry.name
            )));
        }
        if user.slayer_points < entry.point_cost {
            return Err(MinionError::Refused(format!(
                "You don't have enough slayer points to purchase {}. You need {} and have {}.",
                entry.name, entry.point_cost, user.slayer_points
            )));
        }
        user.slayer_points -= entry.point_cost;
        user.slayer_unlocks.push(entry.id);
        let remaining = user.slayer_points;
        store.put_user(user)?;
        Ok(format!(
            "You successfully unlocked {}. Remaining slayer points: {}",
            entry.name, remaining
        ))
    }
}

/// Disable (re-lock) a previously unlocked reward. No refund.
pub fn slayer_shop_disable(
    store: &MinionStore,
    user_id: &str,
    buyable: &str,
) -> Result<String, MinionError> {
    let Some(entry) = find_buyable(buyable) else {
        return Err(MinionError::Refused(format!(
            "Cannot find Slayer buyable with the name {}",
            buyable
        )));
    };
    let mut user = store.get_user(user_id)?;
    if !user.slayer_unlocks.contains(&entry.id) {
        return Err(MinionError::Refused(format!(
            "You don't have {} unlocked.",
            entry.name
        )));
    }
    user.slayer_unlocks.retain(|id| *id != entry.id);
    store.put_user(user)?;
    Ok(format!("You have disabled the reward: {}.", entry.name))
}

/// List the rewards a player currently has unlocked.
pub fn slayer_shop_my_unlocks(user: &UserRecord) -> String {
    if user.slayer_unlocks.is_empty() {
        return "You don't have any Slayer rewards unlocked.".to_string();
    }
    let names: Vec<&str> = SLAYER_SHOP
        .iter()
        .filter(|entry| user.slayer_unlocks.contains(&entry.id))
        .map(|entry| entry.name)
        .collect();
    format!(
        "Current points: {}\nYou currently have the following rewards unlocked:\n{}",
        user.slayer_points,
        names.join("\n")
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardListFilter {
    All,
    Unlocks,
    Buyables,
}

/// Format the catalog for display, optionally filtered by kind.
pub fn slayer_shop_list(filter: RewardListFilter) -> String {
    let mut lines = vec!["Points | Name | Description | Type".to_string()];
    for entry in SLAYER_SHOP {
        let keep = match filter {
            RewardListFilter::All => true,
            RewardListFilter::Unlocks => entry.item.is_none(),
            RewardListFilter::Buyables => entry.item.is_some(),
        };
        if !keep {
            continue;
        }
        let kind = if entry.item.is_some() {
            "item"
        } else if entry.extend_mult.is_some() {
            "extend"
        } else {
            "unlock"
        };
        lines.push(format!(
            "{} | {} | {} | {}",
            entry.point_cost, entry.name, entry.desc, kind
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_names_and_aliases() {
        assert_eq!(find_buyable("herb sack").map(|e| e.id), Some(2));
        assert_eq!(find_buyable("HERBSACK").map(|e| e.id), Some(2));
        assert_eq!(find_buyable("broads").map(|e| e.id), Some(101));
        assert!(find_buyable("nonsense").is_none());
    }

    #[test]
    fn unlock_listing_shows_points_and_names() {
        let mut user = UserRecord::new("1", "alice");
        assert!(slayer_shop_my_unlocks(&user).contains("don't have any"));
        user.slayer_points = 50;
        user.slayer_unlocks.push(101);
        let listing = slayer_shop_my_unlocks(&user);
        assert!(listing.contains("Current points: 50"));
        assert!(listing.contains("Broader Fletching"));
    }

    #[test]
    fn list_filters_by_kind() {
        let unlocks = slayer_shop_list(RewardListFilter::Unlocks);
        assert!(unlocks.contains("Malevolent Masquerade"));
        assert!(!unlocks.contains("Herb sack"));
        let buyables = slayer_shop_list(RewardListFilter::Buyables);
        assert!(buyables.contains("Herb sack"));
        assert!(!buyables.contains("Broader Fletching"));
    }
}
