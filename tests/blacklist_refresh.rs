//! Blacklist cache refresh behavior under the tokio runtime.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use minionbot::blacklist::{
    spawn_refresh, BlacklistCache, BlacklistSource, BlacklistedEntity, BlacklistedEntityKind,
};
use minionbot::minion::MinionError;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct CountingSource {
    fetches: AtomicU32,
}

impl BlacklistSource for CountingSource {
    fn fetch(&self) -> Result<Vec<BlacklistedEntity>, MinionError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![BlacklistedEntity {
            kind: BlacklistedEntityKind::User,
            id: format!("user-{}", n),
        }])
    }
}

#[tokio::test]
async fn refresh_task_resyncs_on_each_tick() {
    init_logs();
    let cache = Arc::new(BlacklistCache::new());
    let source = Arc::new(CountingSource {
        fetches: AtomicU32::new(0),
    });

    let handle = spawn_refresh(
        Arc::clone(&cache),
        Arc::clone(&source) as Arc<dyn BlacklistSource>,
        Duration::from_millis(20),
    );

    tokio::time::sleep(Duration::from_millis(110)).await;
    handle.abort();
    let _ = handle.await;

    let fetches = source.fetches.load(Ordering::SeqCst);
    assert!(fetches >= 3, "expected several fetches, got {}", fetches);

    // Each sync replaced the previous snapshot, so only the latest id is
    // present.
    let latest = format!("user-{}", fetches - 1);
    assert!(cache.is_user_blacklisted(&latest));
    assert!(!cache.is_user_blacklisted("user-0") || fetches == 1);
}

struct FlakySource {
    calls: AtomicU32,
}

impl BlacklistSource for FlakySource {
    fn fetch(&self) -> Result<Vec<BlacklistedEntity>, MinionError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n % 2 == 0 {
            Err(MinionError::Internal("flaky".to_string()))
        } else {
            Ok(vec![BlacklistedEntity {
                kind: BlacklistedEntityKind::Guild,
                id: "bad-guild".to_string(),
            }])
        }
    }
}

#[tokio::test]
async fn refresh_task_survives_fetch_failures() {
    init_logs();
    let cache = Arc::new(BlacklistCache::new());
    let source = Arc::new(FlakySource {
        calls: AtomicU32::new(0),
    });

    let handle = spawn_refresh(
        Arc::clone(&cache),
        Arc::clone(&source) as Arc<dyn BlacklistSource>,
        Duration::from_millis(20),
    );

    tokio::time::sleep(Duration::from_millis(110)).await;
    handle.abort();
    let _ = handle.await;

    assert!(source.calls.load(Ordering::SeqCst) >= 3);
    assert!(cache.is_guild_blacklisted("bad-guild"));
}
