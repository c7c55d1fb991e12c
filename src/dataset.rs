// Roster and calendar dataset loading.
//
// Both datasets are JSON files loaded once per run and never mutated by the
// evaluation pipeline. The raw structs accept the legacy Spanish field names
// (`nombre`, `jugadores`, `jornadas`, ...) via serde aliases, so files from
// the original data exports keep working unchanged.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::tier::Tier;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A rostered player. `position` is free text, normalized later by the pool
/// builder; `probability_ref` is the URL the probability lookup resolves.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub tier: Tier,
    pub position: String,
    pub probability_ref: String,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    pub tier: Tier,
    pub players: Vec<Player>,
}

/// One scheduled game between two named teams.
#[derive(Debug, Clone)]
pub struct Matchup {
    pub home: String,
    pub away: String,
}

/// One slate of fixtures (a "jornada").
#[derive(Debug, Clone)]
pub struct Round {
    pub number: u32,
    pub matchups: Vec<Matchup>,
}

#[derive(Debug, Clone)]
pub struct Calendar {
    pub rounds: Vec<Round>,
}

impl Calendar {
    pub fn round(&self, number: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.number == number)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("in {path}: unknown tier label `{label}` for {subject}")]
    UnknownTier {
        path: String,
        label: String,
        subject: String,
    },
}

/// Parse-level error without path context; the public loaders attach the path.
enum ParseError {
    Json(serde_json::Error),
    UnknownTier { label: String, subject: String },
}

impl ParseError {
    fn with_path(self, path: &Path) -> DatasetError {
        let path = path.display().to_string();
        match self {
            ParseError::Json(source) => DatasetError::Json { path, source },
            ParseError::UnknownTier { label, subject } => {
                DatasetError::UnknownTier { path, label, subject }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(alias = "nombre")]
    name: String,
    tier: String,
    #[serde(alias = "posicion")]
    position: String,
    #[serde(rename = "url", alias = "probability_ref")]
    probability_ref: String,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    #[serde(alias = "nombre")]
    name: String,
    tier: String,
    #[serde(alias = "jugadores")]
    players: Vec<RawPlayer>,
}

#[derive(Debug, Deserialize)]
struct RawMatchup {
    #[serde(alias = "local")]
    home: String,
    #[serde(alias = "visitante")]
    away: String,
}

#[derive(Debug, Deserialize)]
struct RawRound {
    #[serde(rename = "round", alias = "jornada")]
    number: u32,
    #[serde(alias = "partidos")]
    matchups: Vec<RawMatchup>,
}

#[derive(Debug, Deserialize)]
struct RawCalendar {
    #[serde(alias = "jornadas")]
    rounds: Vec<RawRound>,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_teams_from_reader<R: Read>(rdr: R) -> Result<Vec<Team>, ParseError> {
    let raw: Vec<RawTeam> = serde_json::from_reader(rdr).map_err(ParseError::Json)?;

    let mut teams = Vec::with_capacity(raw.len());
    for raw_team in raw {
        let team_name = raw_team.name.trim().to_string();
        let tier = Tier::from_label(&raw_team.tier).map_err(|e| ParseError::UnknownTier {
            label: e.0,
            subject: format!("team `{team_name}`"),
        })?;

        let mut players = Vec::with_capacity(raw_team.players.len());
        for raw_player in raw_team.players {
            let player_name = raw_player.name.trim().to_string();
            let player_tier =
                Tier::from_label(&raw_player.tier).map_err(|e| ParseError::UnknownTier {
                    label: e.0,
                    subject: format!("player `{player_name}` of team `{team_name}`"),
                })?;
            players.push(Player {
                name: player_name,
                tier: player_tier,
                position: raw_player.position.trim().to_string(),
                probability_ref: raw_player.probability_ref.trim().to_string(),
            });
        }

        teams.push(Team {
            name: team_name,
            tier,
            players,
        });
    }
    Ok(teams)
}

fn load_calendar_from_reader<R: Read>(rdr: R) -> Result<Calendar, ParseError> {
    let raw: RawCalendar = serde_json::from_reader(rdr).map_err(ParseError::Json)?;

    let rounds = raw
        .rounds
        .into_iter()
        .map(|r| Round {
            number: r.number,
            matchups: r
                .matchups
                .into_iter()
                .map(|m| Matchup {
                    home: m.home.trim().to_string(),
                    away: m.away.trim().to_string(),
                })
                .collect(),
        })
        .collect();

    Ok(Calendar { rounds })
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load the roster dataset: an ordered array of team records.
pub fn load_teams(path: &Path) -> Result<Vec<Team>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_teams_from_reader(file).map_err(|e| e.with_path(path))
}

/// Load the calendar dataset: an ordered sequence of rounds.
pub fn load_calendar(path: &Path) -> Result<Calendar, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_calendar_from_reader(file).map_err(|e| e.with_path(path))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
