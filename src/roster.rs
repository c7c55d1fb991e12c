// Roster index: resolves free-text player queries against the loaded teams.

use crate::dataset::{Player, Team};

/// Read-only view over the roster dataset.
///
/// Player queries are human-entered and tolerate partial names; resolution
/// splits the query into lowercase whitespace tokens and matches the first
/// player (in stored team/player order) whose lowercase display name contains
/// every token as a substring. Team lookups, by contrast, are exact-name only
/// because team names come from the calendar dataset, not from users.
pub struct RosterIndex {
    teams: Vec<Team>,
}

impl RosterIndex {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Resolve a free-text query to the first matching (team, player) pair.
    ///
    /// Returns `None` for an empty query or when no player matches; callers
    /// treat this as a per-player miss, not a fatal error.
    pub fn resolve(&self, query: &str) -> Option<(&Team, &Player)> {
        let tokens: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        if tokens.is_empty() {
            return None;
        }

        for team in &self.teams {
            for player in &team.players {
                let name = player.name.to_lowercase();
                if tokens.iter().all(|t| name.contains(t.as_str())) {
                    return Some((team, player));
                }
            }
        }
        None
    }

    /// Exact-name team lookup (used for fixture opponents).
    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
