//! # Minionbot - game core for a Discord minion/skilling simulation
//!
//! Minionbot implements the mechanics behind an idle skilling game: players
//! send their "minion" on timed trips, the trip resolves into loot once the
//! duration elapses, and everything is persisted between sessions. The
//! Discord gateway, slash-command framework, HTTP server, and full item
//! catalog live in the host application; this crate owns the game rules.
//!
//! ## Features
//!
//! - **Trip planning**: randomized per-action durations, repetition counts
//!   fitted to a per-player maximum trip length, perk-tier trip bonuses.
//! - **Requirement gating**: quest points, item possession (including
//!   either/or groups), skill levels, and per-slot gear stat thresholds,
//!   with deterministic player-facing refusal messages.
//! - **Loot resolution**: per-activity resolvers (clue caskets, ring of
//!   wealth charging with death attrition) feeding a bank multiset, with
//!   loot persisted before the finish notification goes out.
//! - **Persistence**: Sled-backed store for players, pending activities,
//!   and collection logs.
//! - **Moderation**: blacklist cache with timed refresh.
//! - **Sponsorships**: verified webhook event handling mapped onto perk
//!   tiers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minionbot::config::Config;
//! use minionbot::minion::{MinionStore, StaticTripLength, aerial_fishing_command};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let store = MinionStore::open(&config.storage.data_dir)?;
//!     let policy = StaticTripLength(config.max_trip_length());
//!     let user = store.get_user("123456789")?;
//!     let mut rng = rand::thread_rng();
//!     let reply = aerial_fishing_command(&user, "chan", &policy, &store, &mut rng)?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`minion`] - trip mechanics, requirement gate, resolvers, storage
//! - [`blacklist`] - blacklisted user/guild cache with timed refresh
//! - [`sponsors`] - sponsorship event handling and perk mapping
//! - [`config`] - configuration management and validation
//! - [`metrics`] - process-wide counters
//! - [`logutil`] - single-line log sanitization

pub mod blacklist;
pub mod config;
pub mod logutil;
pub mod metrics;
pub mod minion;
pub mod sponsors;
