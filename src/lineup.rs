// Lineup assembly: pack ranked candidates into a valid formation.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::pool::{Candidate, Position};

/// Per-position seat caps for the assembled formation. Defaults to the
/// classic 1-4-4-3 split; caps must sum to a full eleven (validated by the
/// config layer).
#[derive(Debug, Clone, Copy)]
pub struct Quotas {
    pub goalkeepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl Default for Quotas {
    fn default() -> Self {
        Self {
            goalkeepers: 1,
            defenders: 4,
            midfielders: 4,
            forwards: 3,
        }
    }
}

impl Quotas {
    pub fn cap(self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    pub fn total(self) -> usize {
        self.goalkeepers + self.defenders + self.midfielders + self.forwards
    }
}

/// Candidates ordered by (tier rank, probability), both descending.
///
/// Tier is the primary key: an elite-tier player outranks a marginally more
/// probable player from a lower tier. The sort is stable, so equal keys keep
/// discovery order.
pub fn rank(candidates: &[Candidate]) -> Vec<Candidate> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|a, b| {
        b.tier
            .rank()
            .cmp(&a.tier.rank())
            .then_with(|| {
                b.probability
                    .partial_cmp(&a.probability)
                    .unwrap_or(Ordering::Equal)
            })
    });
    ranked
}

/// Select up to a full lineup from the candidates, honoring per-position caps.
///
/// Two passes over the ranked order: a strict walk that admits while the
/// position quota and total seat count allow, then a backfill walk from the
/// top that admits any not-yet-selected candidate whose quota is still open.
/// The result is deduplicated by display name (first occurrence wins) and may
/// hold fewer seats than the quota total when the pool is too small or too
/// position-skewed; that is a valid outcome, not an error.
pub fn assemble(candidates: &[Candidate], quotas: Quotas) -> Vec<Candidate> {
    let ranked = rank(candidates);
    let seats = quotas.total();

    let mut counts = [0usize; 4];
    let mut picked = vec![false; ranked.len()];
    let mut selection: Vec<&Candidate> = Vec::new();

    // Pass 1: strict quota order.
    for (i, candidate) in ranked.iter().enumerate() {
        if selection.len() >= seats {
            break;
        }
        let slot = slot(candidate.position);
        if counts[slot] < quotas.cap(candidate.position) {
            counts[slot] += 1;
            picked[i] = true;
            selection.push(candidate);
        }
    }

    // Pass 2: backfill seats pass 1 left open, same caps.
    for (i, candidate) in ranked.iter().enumerate() {
        if selection.len() >= seats {
            break;
        }
        let slot = slot(candidate.position);
        if !picked[i] && counts[slot] < quotas.cap(candidate.position) {
            counts[slot] += 1;
            picked[i] = true;
            selection.push(candidate);
        }
    }

    // Dedup by player display name, keeping first occurrence in selection order.
    let mut seen = HashSet::new();
    selection
        .into_iter()
        .filter(|c| seen.insert(c.name.clone()))
        .cloned()
        .collect()
}

fn slot(position: Position) -> usize {
    match position {
        Position::Goalkeeper => 0,
        Position::Defender => 1,
        Position::Midfielder => 2,
        Position::Forward => 3,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::Tier;

    fn candidate(name: &str, tier: Tier, position: Position, probability: f64) -> Candidate {
        Candidate {
            name: name.to_string(),
            team: "Team".to_string(),
            tier,
            position,
            probability,
        }
    }

    fn names(selection: &[Candidate]) -> Vec<&str> {
        selection.iter().map(|c| c.name.as_str()).collect()
    }

    // -- Ranking --

    #[test]
    fn rank_orders_by_tier_then_probability() {
        let pool = vec![
            candidate("B High", Tier::B, Position::Midfielder, 99.0),
            candidate("S Low", Tier::S, Position::Midfielder, 60.0),
            candidate("S High", Tier::S, Position::Midfielder, 70.0),
        ];
        let ranked = rank(&pool);
        assert_eq!(names(&ranked), ["S High", "S Low", "B High"]);
    }

    #[test]
    fn rank_is_stable_on_equal_keys() {
        let pool = vec![
            candidate("First", Tier::A, Position::Defender, 75.0),
            candidate("Second", Tier::A, Position::Defender, 75.0),
        ];
        let ranked = rank(&pool);
        assert_eq!(names(&ranked), ["First", "Second"]);
    }

    // -- Quota enforcement --

    #[test]
    fn second_goalkeeper_never_selected() {
        let pool = vec![
            candidate("Keeper One", Tier::S, Position::Goalkeeper, 99.0),
            candidate("Keeper Two", Tier::S, Position::Goalkeeper, 98.0),
            candidate("Back", Tier::C, Position::Defender, 55.0),
        ];
        let selection = assemble(&pool, Quotas::default());
        assert_eq!(names(&selection), ["Keeper One", "Back"]);
    }

    #[test]
    fn default_quotas_cap_each_position() {
        let mut pool = Vec::new();
        for i in 0..3 {
            pool.push(candidate(&format!("GK {i}"), Tier::A, Position::Goalkeeper, 90.0));
        }
        for i in 0..6 {
            pool.push(candidate(&format!("DF {i}"), Tier::A, Position::Defender, 90.0));
        }
        for i in 0..6 {
            pool.push(candidate(&format!("MF {i}"), Tier::A, Position::Midfielder, 90.0));
        }
        for i in 0..5 {
            pool.push(candidate(&format!("FW {i}"), Tier::A, Position::Forward, 90.0));
        }
        let selection = assemble(&pool, Quotas::default());
        assert_eq!(selection.len(), 11);
        let count = |p: Position| selection.iter().filter(|c| c.position == p).count();
        assert_eq!(count(Position::Goalkeeper), 1);
        assert_eq!(count(Position::Defender), 4);
        assert_eq!(count(Position::Midfielder), 4);
        assert_eq!(count(Position::Forward), 3);
    }

    #[test]
    fn tier_outranks_probability_for_scarce_seats() {
        // One forward seat: the S-tier forward wins over a higher-probability B.
        let quotas = Quotas {
            goalkeepers: 0,
            defenders: 0,
            midfielders: 0,
            forwards: 1,
        };
        let pool = vec![
            candidate("B Forward", Tier::B, Position::Forward, 99.0),
            candidate("S Forward", Tier::S, Position::Forward, 70.0),
        ];
        let selection = assemble(&pool, quotas);
        assert_eq!(names(&selection), ["S Forward"]);
    }

    // -- Result size --

    #[test]
    fn result_is_min_of_seats_and_admissible() {
        // Skewed pool: 8 midfielders, quota admits only 4.
        let pool: Vec<Candidate> = (0..8)
            .map(|i| candidate(&format!("MF {i}"), Tier::A, Position::Midfielder, 80.0))
            .collect();
        let selection = assemble(&pool, Quotas::default());
        assert_eq!(selection.len(), 4);
    }

    #[test]
    fn small_pool_yields_small_lineup() {
        let pool = vec![
            candidate("Keeper", Tier::A, Position::Goalkeeper, 90.0),
            candidate("Back", Tier::B, Position::Defender, 70.0),
        ];
        let selection = assemble(&pool, Quotas::default());
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn empty_pool_yields_empty_lineup() {
        assert!(assemble(&[], Quotas::default()).is_empty());
    }

    #[test]
    fn full_pool_fills_eleven_seats() {
        let mut pool = Vec::new();
        pool.push(candidate("GK", Tier::B, Position::Goalkeeper, 80.0));
        for i in 0..4 {
            pool.push(candidate(&format!("DF {i}"), Tier::B, Position::Defender, 80.0));
        }
        for i in 0..4 {
            pool.push(candidate(&format!("MF {i}"), Tier::B, Position::Midfielder, 80.0));
        }
        for i in 0..3 {
            pool.push(candidate(&format!("FW {i}"), Tier::B, Position::Forward, 80.0));
        }
        let selection = assemble(&pool, Quotas::default());
        assert_eq!(selection.len(), 11);
    }

    // -- Deduplication --

    #[test]
    fn duplicate_names_appear_once() {
        // The same player requested twice produces two identical candidates.
        let pool = vec![
            candidate("Keeper", Tier::A, Position::Goalkeeper, 90.0),
            candidate("Twin", Tier::A, Position::Defender, 85.0),
            candidate("Twin", Tier::A, Position::Defender, 85.0),
            candidate("Back", Tier::B, Position::Defender, 70.0),
        ];
        let selection = assemble(&pool, Quotas::default());
        let twins = selection.iter().filter(|c| c.name == "Twin").count();
        assert_eq!(twins, 1);
        assert_eq!(selection.len(), 3);
    }

    // -- Backfill --

    #[test]
    fn backfill_never_violates_quotas() {
        // More of everything than fits; both passes together must still
        // respect every cap.
        let mut pool = Vec::new();
        for i in 0..10 {
            pool.push(candidate(&format!("DF {i}"), Tier::S, Position::Defender, 95.0));
        }
        for i in 0..10 {
            pool.push(candidate(&format!("FW {i}"), Tier::C, Position::Forward, 55.0));
        }
        let selection = assemble(&pool, Quotas::default());
        let count = |p: Position| selection.iter().filter(|c| c.position == p).count();
        assert_eq!(count(Position::Defender), 4);
        assert_eq!(count(Position::Forward), 3);
        assert_eq!(selection.len(), 7);
    }

    #[test]
    fn selection_preserves_rank_order_within_result() {
        let pool = vec![
            candidate("Low FW", Tier::B, Position::Forward, 60.0),
            candidate("Top MF", Tier::S, Position::Midfielder, 90.0),
            candidate("Mid DF", Tier::A, Position::Defender, 80.0),
        ];
        let selection = assemble(&pool, Quotas::default());
        assert_eq!(names(&selection), ["Top MF", "Mid DF", "Low FW"]);
    }
}
