//! Clue tier reference table. Only what the clue resolver needs: the tier
//! name for narratives and the reward casket item granted per completion.
//! Opening mechanics live elsewhere.

use serde::{Deserialize, Serialize};

use crate::minion::types::ItemId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ClueTierId {
    Beginner,
    Easy,
    Medium,
    Hard,
    Elite,
    Master,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClueTier {
    pub id: ClueTierId,
    pub name: &'static str,
    /// Reward casket item placed in the bank per completed clue.
    pub casket_id: ItemId,
}

pub const CLUE_TIERS: [ClueTier; 6] = [
    ClueTier {
        id: ClueTierId::Beginner,
        name: "Beginner",
        casket_id: 23_245,
    },
    ClueTier {
        id: ClueTierId::Easy,
        name: "Easy",
        casket_id: 20_546,
    },
    ClueTier {
        id: ClueTierId::Medium,
        name: "Medium",
        casket_id: 20_545,
    },
    ClueTier {
        id: ClueTierId::Hard,
        name: "Hard",
        casket_id: 20_544,
    },
    ClueTier {
        id: ClueTierId::Elite,
        name: "Elite",
        casket_id: 20_543,
    },
    ClueTier {
        id: ClueTierId::Master,
        name: "Master",
        casket_id: 19_836,
    },
];

/// Fetch the reference entry for a tier. Total over `ClueTierId`.
pub fn clue_tier(id: ClueTierId) -> &'static ClueTier {
    CLUE_TIERS
        .iter()
        .find(|tier| tier.id == id)
        .unwrap_or(&CLUE_TIERS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tier_resolves() {
        for tier in &CLUE_TIERS {
            assert_eq!(clue_tier(tier.id).name, tier.name);
        }
        assert_eq!(clue_tier(ClueTierId::Master).name, "Master");
    }
}
