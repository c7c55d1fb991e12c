// Risk screening for players on the weaker side of a matchup.

use crate::dataset::{Player, Team};
use crate::tier::Tier;

/// Probability cutoffs applied when the player's team is strictly weaker
/// than its opponent. Design constants, not derived from data; overridable
/// in `[policy]` of config.toml.
#[derive(Debug, Clone, Copy)]
pub struct RiskThresholds {
    pub tier_a: f64,
    pub tier_b: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            tier_a: 80.0,
            tier_b: 90.0,
        }
    }
}

/// Why the policy rejected a player. Diagnostic only; never drives control
/// flow beyond the keep/discard decision itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscardReason {
    /// Tier-C player on the weaker side is never worth starting.
    WeakerSideTierC { opponent_tier: Tier },
    /// Player tier demands a minimum probability on the weaker side.
    BelowTierThreshold {
        tier: Tier,
        probability: f64,
        threshold: f64,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct DiscardPolicy {
    thresholds: RiskThresholds,
}

impl DiscardPolicy {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Decide whether a player must be excluded from the ranked candidates.
    ///
    /// A team at or above its opponent's tier is always a safe start, so only
    /// a strictly lower team tier triggers the per-player screening ladder.
    /// Pure function; `Some` carries the reason for diagnostics.
    pub fn evaluate(
        &self,
        player: &Player,
        team: &Team,
        opponent: &Team,
        probability: f64,
    ) -> Option<DiscardReason> {
        if team.tier.rank() >= opponent.tier.rank() {
            return None;
        }

        match player.tier {
            Tier::C => Some(DiscardReason::WeakerSideTierC {
                opponent_tier: opponent.tier,
            }),
            Tier::B if probability < self.thresholds.tier_b => {
                Some(DiscardReason::BelowTierThreshold {
                    tier: Tier::B,
                    probability,
                    threshold: self.thresholds.tier_b,
                })
            }
            Tier::A if probability < self.thresholds.tier_a => {
                Some(DiscardReason::BelowTierThreshold {
                    tier: Tier::A,
                    probability,
                    threshold: self.thresholds.tier_a,
                })
            }
            // Tier S has no threshold; qualifying A/B players fall through.
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
