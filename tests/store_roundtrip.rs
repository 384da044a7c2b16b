//! Persistence round-trips for player and activity records, plus loot
//! merging into the bank and collection log.

use std::time::Duration;

use minionbot::minion::{
    ActivityKind, ActivityRecord, Bank, ClueTierId, LootPersistence, MinionError, MinionStore,
    MinionStoreBuilder, PerkTier, Skill, UserRecord,
};
use minionbot::sponsors::{PerkService, SponsorDirectory};

fn open_store() -> (tempfile::TempDir, MinionStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = MinionStoreBuilder::new(dir.path()).open().unwrap();
    (dir, store)
}

#[test]
fn user_records_round_trip() {
    let (_dir, store) = open_store();
    let mut user = UserRecord::new("42", "alice");
    user.quest_points = 120;
    user.skills.insert(Skill::Fishing, 76);
    user.bank.add(11_980, 4);
    store.put_user(user.clone()).unwrap();

    let loaded = store.get_user("42").unwrap();
    assert_eq!(loaded.quest_points, 120);
    assert_eq!(loaded.skill_level(Skill::Fishing), 76);
    assert_eq!(loaded.bank.amount(11_980), 4);
}

#[test]
fn missing_user_is_not_found() {
    let (_dir, store) = open_store();
    assert!(matches!(
        store.get_user("nobody"),
        Err(MinionError::NotFound(_))
    ));
}

#[test]
fn activity_records_round_trip() {
    let (_dir, store) = open_store();
    let record = ActivityRecord::new(
        "42",
        "chan",
        ActivityKind::AerialFishing,
        250,
        Duration::from_secs(1500),
    );
    store.put_activity(&record).unwrap();
    let taken = store.take_activity(record.id).unwrap();
    assert_eq!(taken.quantity, 250);
    assert_eq!(taken.duration(), Duration::from_secs(1500));
    assert_eq!(taken.kind, ActivityKind::AerialFishing);
}

#[test]
fn kind_payloads_survive_the_activity_tree() {
    let (_dir, store) = open_store();
    let record = ActivityRecord::new(
        "42",
        "chan",
        ActivityKind::ClueCompletion {
            tier: ClueTierId::Master,
        },
        7,
        Duration::from_secs(1260),
    );
    store.put_activity(&record).unwrap();
    let taken = store.take_activity(record.id).unwrap();
    assert_eq!(
        taken.kind,
        ActivityKind::ClueCompletion {
            tier: ClueTierId::Master
        }
    );
}

#[test]
fn stale_schema_version_is_rejected() {
    let (_dir, store) = open_store();
    let mut record = ActivityRecord::new(
        "42",
        "chan",
        ActivityKind::WealthCharging,
        3,
        Duration::from_secs(600),
    );
    record.schema_version = 0;
    store.put_activity(&record).unwrap();
    assert!(matches!(
        store.take_activity(record.id),
        Err(MinionError::SchemaMismatch { entity: "activity", .. })
    ));
}

#[test]
fn merge_loot_updates_bank_and_collection_log() {
    let (_dir, store) = open_store();
    store.put_user(UserRecord::new("42", "alice")).unwrap();

    let mut loot = Bank::new();
    loot.add(20_544, 3);
    store.merge_loot("42", &loot, true).unwrap();
    store.merge_loot("42", &loot, false).unwrap();

    let user = store.get_user("42").unwrap();
    assert_eq!(user.bank.amount(20_544), 6);
    // Only the logged merge lands in the collection log.
    let logged = store.collection_log("42").unwrap();
    assert_eq!(logged.amount(20_544), 3);
}

#[test]
fn merge_loot_for_unknown_user_fails() {
    let (_dir, store) = open_store();
    let mut loot = Bank::new();
    loot.add(1, 1);
    assert!(matches!(
        store.merge_loot("nobody", &loot, true),
        Err(MinionError::NotFound(_))
    ));
}

#[test]
fn github_directory_and_perk_service() {
    let (_dir, store) = open_store();
    let mut user = UserRecord::new("42", "alice");
    user.github_id = Some("gh-9".to_string());
    store.put_user(user).unwrap();
    store.put_user(UserRecord::new("43", "bob")).unwrap();

    assert_eq!(
        store.user_id_for_github("gh-9").unwrap(),
        Some("42".to_string())
    );
    assert_eq!(store.user_id_for_github("gh-404").unwrap(), None);

    store.give_perks("42", PerkTier::Four).unwrap();
    assert_eq!(store.get_user("42").unwrap().perk_tier, PerkTier::Four);
    store.remove_perks("42").unwrap();
    assert_eq!(store.get_user("42").unwrap().perk_tier, PerkTier::One);
}
