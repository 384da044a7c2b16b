//! Trip duration math: the randomized per-action duration estimator, the
//! quantity planner that fits repetitions into a maximum trip length, and
//! duration formatting for player-facing replies.
//!
//! Every function taking randomness receives an [`rand::Rng`] from the
//! caller so tests can pass a seeded generator and get repeatable output.

use std::time::Duration;

use rand::Rng;

use crate::minion::tasks::TripLengthPolicy;
use crate::minion::types::{ActivityKind, UserRecord};

/// Perturb `base` by a uniformly random offset in ±`variation_percent`% of
/// itself. Never returns less than one millisecond, so downstream division
/// stays safe even for tiny bases.
pub fn randomized_duration(base: Duration, variation_percent: f64, rng: &mut impl Rng) -> Duration {
    let spread = variation_percent.clamp(0.0, 100.0);
    let factor = 1.0 + rng.gen_range(-spread..=spread) / 100.0;
    let millis = (base.as_millis() as f64 * factor).round() as u64;
    Duration::from_millis(millis.max(1))
}

/// How many repetitions fit into a trip, and the exact time they consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripPlan {
    pub quantity: u32,
    pub total_duration: Duration,
}

impl TripPlan {
    /// A zero plan means the activity is too slow for even one repetition;
    /// callers must refuse the trip rather than schedule a zero-length one.
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

/// `quantity = floor(max_trip / per_unit)`, `total = quantity * per_unit`.
/// A per-unit time of zero (or longer than the trip) yields the zero plan.
pub fn plan_trip(max_trip: Duration, per_unit: Duration) -> TripPlan {
    if per_unit.is_zero() || per_unit > max_trip {
        return TripPlan {
            quantity: 0,
            total_duration: Duration::ZERO,
        };
    }
    let quantity = (max_trip.as_millis() / per_unit.as_millis()) as u32;
    TripPlan {
        quantity,
        total_duration: per_unit * quantity,
    }
}

/// One-in-`chance` Bernoulli trial. A chance of zero never fires, which is
/// what tests use to force the no-failure path.
pub fn roll(chance: u32, rng: &mut impl Rng) -> bool {
    chance > 0 && rng.gen_range(0..chance) == 0
}

/// Render a duration the way trip replies expect: "1 hour, 23 minutes".
/// Sub-second durations render as "less than a second".
pub fn format_duration(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    if secs == 0 {
        return "less than a second".to_string();
    }
    let units: [(&str, u64); 4] = [("day", 86_400), ("hour", 3_600), ("minute", 60), ("second", 1)];
    let mut parts = Vec::new();
    for (name, unit_secs) in units {
        let count = secs / unit_secs;
        if count > 0 {
            secs -= count * unit_secs;
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", count, name, plural));
        }
    }
    parts.join(", ")
}

/// Fixed trip length regardless of user or activity. Handy for tests and
/// hosts without perk bonuses.
#[derive(Debug, Clone, Copy)]
pub struct StaticTripLength(pub Duration);

impl TripLengthPolicy for StaticTripLength {
    fn max_trip_length(&self, _user: &UserRecord, _kind: &ActivityKind) -> Duration {
        self.0
    }
}

/// Base trip length plus a flat bonus per perk tier above the first.
#[derive(Debug, Clone, Copy)]
pub struct PerkAwareTripLength {
    pub base: Duration,
    pub per_tier_bonus: Duration,
}

impl TripLengthPolicy for PerkAwareTripLength {
    fn max_trip_length(&self, user: &UserRecord, _kind: &ActivityKind) -> Duration {
        let tiers_above_base = u32::from(user.perk_tier.number().saturating_sub(1));
        self.base + self.per_tier_bonus * tiers_above_base
    }
}

impl PerkAwareTripLength {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            per_tier_bonus: Duration::from_secs(3 * 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minion::types::PerkTier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn randomized_duration_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = Duration::from_secs(2);
        for _ in 0..500 {
            let d = randomized_duration(base, 7.5, &mut rng);
            assert!(d >= Duration::from_millis(1850), "too short: {:?}", d);
            assert!(d <= Duration::from_millis(2150), "too long: {:?}", d);
        }
    }

    #[test]
    fn randomized_duration_never_hits_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let d = randomized_duration(Duration::from_millis(1), 100.0, &mut rng);
            assert!(d >= Duration::from_millis(1));
        }
    }

    #[test]
    fn plan_floors_and_multiplies_exactly() {
        let plan = plan_trip(Duration::from_secs(30), Duration::from_secs(7));
        assert_eq!(plan.quantity, 4);
        assert_eq!(plan.total_duration, Duration::from_secs(28));
        assert!(plan.total_duration <= Duration::from_secs(30));
    }

    #[test]
    fn plan_is_zero_when_unit_exceeds_trip() {
        let plan = plan_trip(Duration::from_secs(5), Duration::from_secs(6));
        assert!(plan.is_empty());
        assert_eq!(plan.total_duration, Duration::ZERO);
    }

    #[test]
    fn plan_is_zero_for_zero_unit() {
        let plan = plan_trip(Duration::from_secs(5), Duration::ZERO);
        assert!(plan.is_empty());
    }

    #[test]
    fn roll_zero_chance_never_fires() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(!roll(0, &mut rng));
        }
    }

    #[test]
    fn roll_one_chance_always_fires() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(roll(1, &mut rng));
        }
    }

    #[test]
    fn format_duration_lists_units() {
        assert_eq!(format_duration(Duration::from_secs(0)), "less than a second");
        assert_eq!(format_duration(Duration::from_secs(1)), "1 second");
        assert_eq!(
            format_duration(Duration::from_secs(3 * 3600 + 5 * 60)),
            "3 hours, 5 minutes"
        );
        assert_eq!(
            format_duration(Duration::from_secs(86_400 + 61)),
            "1 day, 1 minute, 1 second"
        );
    }

    #[test]
    fn perk_tiers_extend_trip_length() {
        let policy = PerkAwareTripLength::new(Duration::from_secs(30 * 60));
        let mut user = UserRecord::new("1", "alice");
        let kind = ActivityKind::AerialFishing;
        assert_eq!(
            policy.max_trip_length(&user, &kind),
            Duration::from_secs(30 * 60)
        );
        user.perk_tier = PerkTier::Three;
        assert_eq!(
            policy.max_trip_length(&user, &kind),
            Duration::from_secs(36 * 60)
        );
    }
}
