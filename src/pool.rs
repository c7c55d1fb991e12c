// Candidate pool construction.
//
// One parameterized pipeline serves both run modes (round-scoped lineup and
// all-rounds market scan); they differ only in the `FixtureSchedule` passed
// in. Per-player failures are recorded and skipped, never fatal — a run that
// completes always yields the per-position view and the ranked candidates,
// and every absence is attributable to a recorded exclusion.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::fixtures::FixtureSchedule;
use crate::policy::{DiscardPolicy, DiscardReason};
use crate::probability::{parse_percent, ProbabilityLookup};
use crate::report::Reporter;
use crate::roster::RosterIndex;
use crate::tier::Tier;

/// Candidates need strictly more than this to enter the ranked list.
const RANKED_MIN_PROBABILITY: f64 = 50.0;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Normalized field position. Dataset positions are free text in English or
/// the legacy Spanish spellings; anything else fails to normalize and the
/// player is excluded from every pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "goalkeeper" | "portero" => Some(Position::Goalkeeper),
            "defender" | "defensa" => Some(Position::Defender),
            "midfielder" | "centrocampista" => Some(Position::Midfielder),
            "forward" | "delantero" => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeepers",
            Position::Defender => "Defenders",
            Position::Midfielder => "Midfielders",
            Position::Forward => "Forwards",
        }
    }
}

// ---------------------------------------------------------------------------
// Candidates and exclusion diagnostics
// ---------------------------------------------------------------------------

/// A player evaluated for this run, carrying its resolved team, normalized
/// position and fetched probability. Built fresh each run, never persisted.
/// Identity is the display name.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub team: String,
    pub tier: Tier,
    pub position: Position,
    pub probability: f64,
}

/// Why a requested name is absent from an output collection. Recorded for
/// diagnostics; none of these abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum Exclusion {
    /// The query resolved no roster player.
    NotFound { query: String },
    /// Lookup failed or returned an unparsable value.
    ProbabilityUnavailable { player: String, team: String },
    /// The dataset position did not normalize.
    UnrecognizedPosition { player: String, position: String },
    /// Probability not strictly above the ranked-list minimum.
    LowProbability { player: String, probability: f64 },
    /// The player's team has no matchup in the fixture context.
    NoFixture { player: String, team: String },
    /// A matchup exists but the opponent is missing from the roster dataset.
    OpponentUnknown { player: String, opponent: String },
    /// The discard policy rejected the player.
    Discarded {
        player: String,
        reason: DiscardReason,
    },
}

/// Everything a run produces before assembly and formatting.
#[derive(Debug)]
pub struct Pool {
    /// Every player that was looked up successfully, per position, sorted
    /// descending by probability (independent of discard decisions).
    pub all_by_position: BTreeMap<Position, Vec<Candidate>>,
    /// Ranked-list candidates in discovery order (pre-ranking).
    pub candidates: Vec<Candidate>,
    /// One record per player that is missing from some output collection.
    pub exclusions: Vec<Exclusion>,
}

impl Pool {
    fn new() -> Self {
        let mut all_by_position = BTreeMap::new();
        for position in Position::ALL {
            all_by_position.insert(position, Vec::new());
        }
        Self {
            all_by_position,
            candidates: Vec::new(),
            exclusions: Vec::new(),
        }
    }

    /// The per-position view for one position. Always present, possibly empty.
    pub fn position(&self, position: Position) -> &[Candidate] {
        self.all_by_position
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Pool builder
// ---------------------------------------------------------------------------

pub struct PoolBuilder<'a> {
    index: &'a RosterIndex,
    lookup: &'a dyn ProbabilityLookup,
    policy: DiscardPolicy,
}

impl<'a> PoolBuilder<'a> {
    pub fn new(
        index: &'a RosterIndex,
        lookup: &'a dyn ProbabilityLookup,
        policy: DiscardPolicy,
    ) -> Self {
        Self {
            index,
            lookup,
            policy,
        }
    }

    /// Evaluate the requested names in input order, one at a time.
    ///
    /// Evaluation is strictly sequential: each player suspends on its
    /// probability lookup before the next starts, keeping request load low
    /// and progress reporting ordered. The reporter is notified once per
    /// input name, including misses.
    pub async fn build(
        &self,
        names: &[String],
        schedule: &FixtureSchedule<'_>,
        reporter: &mut dyn Reporter,
    ) -> Pool {
        let mut pool = Pool::new();

        for (done, query) in names.iter().enumerate() {
            self.evaluate(query, schedule, &mut pool).await;
            reporter.progress(done + 1, names.len(), query);
        }

        // Stable sort keeps discovery order for equal probabilities.
        for list in pool.all_by_position.values_mut() {
            list.sort_by(|a, b| {
                b.probability
                    .partial_cmp(&a.probability)
                    .unwrap_or(Ordering::Equal)
            });
        }

        pool
    }

    async fn evaluate(&self, query: &str, schedule: &FixtureSchedule<'_>, pool: &mut Pool) {
        let Some((team, player)) = self.index.resolve(query) else {
            warn!(query, "player not found in roster");
            pool.exclusions.push(Exclusion::NotFound {
                query: query.to_string(),
            });
            return;
        };

        let probability = match self.lookup.lookup(&player.probability_ref).await {
            Ok(raw) => match parse_percent(&raw) {
                Some(value) => value,
                None => {
                    warn!(player = %player.name, raw = %raw, "unparsable probability value");
                    pool.exclusions.push(Exclusion::ProbabilityUnavailable {
                        player: player.name.clone(),
                        team: team.name.clone(),
                    });
                    return;
                }
            },
            Err(e) => {
                warn!(player = %player.name, error = %e, "probability lookup failed");
                pool.exclusions.push(Exclusion::ProbabilityUnavailable {
                    player: player.name.clone(),
                    team: team.name.clone(),
                });
                return;
            }
        };

        let Some(position) = Position::from_raw(&player.position) else {
            warn!(
                player = %player.name,
                position = %player.position,
                "unrecognized position, excluding from all pools"
            );
            pool.exclusions.push(Exclusion::UnrecognizedPosition {
                player: player.name.clone(),
                position: player.position.clone(),
            });
            return;
        };

        let candidate = Candidate {
            name: player.name.clone(),
            team: team.name.clone(),
            tier: player.tier,
            position,
            probability,
        };

        // The "every player looked up" view ignores discard decisions.
        if let Some(list) = pool.all_by_position.get_mut(&position) {
            list.push(candidate.clone());
        }

        if probability <= RANKED_MIN_PROBABILITY {
            info!(
                player = %candidate.name,
                team = %candidate.team,
                probability,
                "below ranked-list minimum"
            );
            pool.exclusions.push(Exclusion::LowProbability {
                player: candidate.name,
                probability,
            });
            return;
        }

        let Some(opponent_name) = schedule.opponent_of(&team.name) else {
            info!(player = %candidate.name, team = %candidate.team, "no matchup in fixture context");
            pool.exclusions.push(Exclusion::NoFixture {
                player: candidate.name,
                team: candidate.team,
            });
            return;
        };

        let Some(opponent) = self.index.team(opponent_name) else {
            warn!(team = %team.name, opponent = opponent_name, "opponent team not in roster dataset");
            pool.exclusions.push(Exclusion::OpponentUnknown {
                player: candidate.name,
                opponent: opponent_name.to_string(),
            });
            return;
        };

        if let Some(reason) = self.policy.evaluate(player, team, opponent, probability) {
            info!(player = %candidate.name, ?reason, "discarded by policy");
            pool.exclusions.push(Exclusion::Discarded {
                player: candidate.name,
                reason,
            });
            return;
        }

        pool.candidates.push(candidate);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
