// Opponent resolution over the fixture calendar.
//
// The lineup flow looks at a single requested round; the market flow scans
// every round and takes the first matchup involving the team. Both are
// expressed as a flattened, ordered matchup view so the pool builder needs
// only one code path.

use thiserror::Error;

use crate::dataset::{Calendar, Matchup};

#[derive(Debug, Error)]
#[error("round {0} is not present in the calendar")]
pub struct RoundNotFound(pub u32);

/// The fixture context a run evaluates opponents against.
#[derive(Debug)]
pub struct FixtureSchedule<'a> {
    matchups: Vec<&'a Matchup>,
}

impl<'a> FixtureSchedule<'a> {
    /// Matchups of one designated round. A missing round is a fatal
    /// data-integrity error for the run.
    pub fn for_round(calendar: &'a Calendar, number: u32) -> Result<Self, RoundNotFound> {
        let round = calendar.round(number).ok_or(RoundNotFound(number))?;
        Ok(Self {
            matchups: round.matchups.iter().collect(),
        })
    }

    /// All matchups across all rounds, in calendar order.
    pub fn across_rounds(calendar: &'a Calendar) -> Self {
        Self {
            matchups: calendar
                .rounds
                .iter()
                .flat_map(|r| r.matchups.iter())
                .collect(),
        }
    }

    /// The opponent of `team_name` in the first matchup involving it.
    ///
    /// Team names are matched by exact equality; `None` means the team has
    /// no scheduled matchup in this context.
    pub fn opponent_of(&self, team_name: &str) -> Option<&'a str> {
        self.matchups.iter().find_map(|m| {
            if m.home == team_name {
                Some(m.away.as_str())
            } else if m.away == team_name {
                Some(m.home.as_str())
            } else {
                None
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Round;

    fn matchup(home: &str, away: &str) -> Matchup {
        Matchup {
            home: home.to_string(),
            away: away.to_string(),
        }
    }

    fn calendar() -> Calendar {
        Calendar {
            rounds: vec![
                Round {
                    number: 1,
                    matchups: vec![
                        matchup("Real Madrid", "Getafe"),
                        matchup("Sevilla", "Valencia"),
                    ],
                },
                Round {
                    number: 2,
                    matchups: vec![matchup("Valencia", "Real Madrid")],
                },
            ],
        }
    }

    #[test]
    fn missing_round_is_an_error() {
        let cal = calendar();
        let err = FixtureSchedule::for_round(&cal, 9).unwrap_err();
        assert_eq!(err.to_string(), "round 9 is not present in the calendar");
    }

    #[test]
    fn round_scope_resolves_home_and_away() {
        let cal = calendar();
        let schedule = FixtureSchedule::for_round(&cal, 1).unwrap();
        assert_eq!(schedule.opponent_of("Real Madrid"), Some("Getafe"));
        assert_eq!(schedule.opponent_of("Getafe"), Some("Real Madrid"));
        assert_eq!(schedule.opponent_of("Valencia"), Some("Sevilla"));
    }

    #[test]
    fn round_scope_excludes_other_rounds() {
        let cal = calendar();
        let schedule = FixtureSchedule::for_round(&cal, 2).unwrap();
        assert_eq!(schedule.opponent_of("Getafe"), None);
        assert_eq!(schedule.opponent_of("Real Madrid"), Some("Valencia"));
    }

    #[test]
    fn across_rounds_takes_first_matchup() {
        let cal = calendar();
        let schedule = FixtureSchedule::across_rounds(&cal);
        // Real Madrid appears in round 1 and round 2; round 1 wins.
        assert_eq!(schedule.opponent_of("Real Madrid"), Some("Getafe"));
        assert_eq!(schedule.opponent_of("Valencia"), Some("Sevilla"));
    }

    #[test]
    fn team_names_match_exactly_not_by_substring() {
        let cal = Calendar {
            rounds: vec![Round {
                number: 1,
                matchups: vec![matchup("Real Madrid Castilla", "Getafe")],
            }],
        };
        let schedule = FixtureSchedule::across_rounds(&cal);
        assert_eq!(schedule.opponent_of("Real Madrid"), None);
        assert_eq!(schedule.opponent_of("Real Madrid Castilla"), Some("Getafe"));
    }
}
