//! Tier registry: default tier seeds and the rating <-> position mapping.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shared::domain::{Tier, TierId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSeed {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub color: String,
}

impl TierSeed {
    pub fn new(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

/// Initial tier sequence and the placeholder used for appended tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDefaults {
    pub tiers: Vec<TierSeed>,
    pub new_tier_name: String,
    pub new_tier_color: String,
}

impl Default for BoardDefaults {
    fn default() -> Self {
        Self {
            tiers: vec![
                TierSeed::new("tier-s", "S", "#FC7D82"),
                TierSeed::new("tier-a", "A", "#BCFF81"),
                TierSeed::new("tier-b", "B", "#FBFF82"),
                TierSeed::new("tier-c", "C", "#FCC082"),
                TierSeed::new("tier-d", "D", "#FBE182"),
                TierSeed::new("tier-f", "F", "#6a1b9a"),
            ],
            new_tier_name: "New tier".into(),
            new_tier_color: "#808080".into(),
        }
    }
}

impl BoardDefaults {
    /// Builds empty tiers from the seeds. Seeds without an id, or whose id was
    /// already taken by an earlier seed, get a generated one.
    pub fn seed_tiers(&self) -> Vec<Tier> {
        let mut seen = HashSet::new();
        self.tiers
            .iter()
            .map(|seed| {
                let id = match &seed.id {
                    Some(raw) if !raw.is_empty() && seen.insert(raw.clone()) => TierId::new(raw),
                    _ => TierId::generate(),
                };
                Tier::new(id, seed.name.clone(), seed.color.clone())
            })
            .collect()
    }

    pub fn placeholder_tier(&self) -> Tier {
        Tier::new(
            TierId::generate(),
            self.new_tier_name.clone(),
            self.new_tier_color.clone(),
        )
    }
}

/// Rating carried by an entry placed into the tier at `position` of `tier_count`.
pub fn rating_for_position(tier_count: usize, position: usize) -> i64 {
    debug_assert!(position < tier_count);
    tier_count as i64 - 1 - position as i64
}

/// Tier position an entry with `rating` belongs to, or `None` when the rating
/// falls outside `0..tier_count`.
pub fn position_for_rating(tier_count: usize, rating: i64) -> Option<usize> {
    let top = tier_count as i64 - 1;
    if rating < 0 || rating > top {
        return None;
    }
    usize::try_from(top - rating).ok()
}
