// Configuration loading and validation (config.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::lineup::Quotas;
use crate::policy::RiskThresholds;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataPaths,
    #[serde(default)]
    pub lookup: LookupSection,
    #[serde(default)]
    pub policy: PolicySection,
    #[serde(default)]
    pub formation: FormationSection,
    pub lineup: LineupSection,
    pub market: MarketSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub roster: String,
    pub calendar: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupSection {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LookupSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    20
}

/// Probability cutoffs for the discard policy's weaker-side screening.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicySection {
    #[serde(default = "default_tier_a_threshold")]
    pub tier_a_threshold: f64,
    #[serde(default = "default_tier_b_threshold")]
    pub tier_b_threshold: f64,
}

impl Default for PolicySection {
    fn default() -> Self {
        Self {
            tier_a_threshold: default_tier_a_threshold(),
            tier_b_threshold: default_tier_b_threshold(),
        }
    }
}

fn default_tier_a_threshold() -> f64 {
    RiskThresholds::default().tier_a
}

fn default_tier_b_threshold() -> f64 {
    RiskThresholds::default().tier_b
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormationSection {
    #[serde(default = "default_goalkeepers")]
    pub goalkeepers: usize,
    #[serde(default = "default_defenders")]
    pub defenders: usize,
    #[serde(default = "default_midfielders")]
    pub midfielders: usize,
    #[serde(default = "default_forwards")]
    pub forwards: usize,
}

impl Default for FormationSection {
    fn default() -> Self {
        Self {
            goalkeepers: default_goalkeepers(),
            defenders: default_defenders(),
            midfielders: default_midfielders(),
            forwards: default_forwards(),
        }
    }
}

fn default_goalkeepers() -> usize {
    Quotas::default().goalkeepers
}

fn default_defenders() -> usize {
    Quotas::default().defenders
}

fn default_midfielders() -> usize {
    Quotas::default().midfielders
}

fn default_forwards() -> usize {
    Quotas::default().forwards
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineupSection {
    /// The round whose matchups scope opponent resolution.
    pub round: u32,
    /// Free-text queries for the squad the lineup is picked from.
    pub players: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketSection {
    /// Free-text queries for transfer-market players to shortlist.
    pub players: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversions into domain types
// ---------------------------------------------------------------------------

impl Config {
    pub fn thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            tier_a: self.policy.tier_a_threshold,
            tier_b: self.policy.tier_b_threshold,
        }
    }

    pub fn quotas(&self) -> Quotas {
        Quotas {
            goalkeepers: self.formation.goalkeepers,
            defenders: self.formation.defenders,
            midfielders: self.formation.midfielders,
            forwards: self.formation.forwards,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load and validate configuration from the given TOML file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.lookup.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "lookup.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    let thresholds: &[(&str, f64)] = &[
        ("policy.tier_a_threshold", config.policy.tier_a_threshold),
        ("policy.tier_b_threshold", config.policy.tier_b_threshold),
    ];
    for (field, value) in thresholds {
        if !(0.0..=100.0).contains(value) {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: format!("must be between 0 and 100 inclusive, got {value}"),
            });
        }
    }

    let quotas = config.quotas();
    if quotas.goalkeepers != 1 {
        return Err(ConfigError::ValidationError {
            field: "formation.goalkeepers".into(),
            message: format!("a formation fields exactly one goalkeeper, got {}", quotas.goalkeepers),
        });
    }
    if quotas.total() != 11 {
        return Err(ConfigError::ValidationError {
            field: "formation".into(),
            message: format!("position caps must sum to 11, got {}", quotas.total()),
        });
    }

    if config.lineup.round == 0 {
        return Err(ConfigError::ValidationError {
            field: "lineup.round".into(),
            message: "rounds are numbered from 1".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID: &str = r#"
[data]
roster = "data/roster.json"
calendar = "data/calendar.json"

[lookup]
timeout_secs = 15

[policy]
tier_a_threshold = 80.0
tier_b_threshold = 90.0

[formation]
goalkeepers = 1
defenders = 4
midfielders = 4
forwards = 3

[lineup]
round = 1
players = ["Thibaut Courtois", "Saúl"]

[market]
players = ["Kubo"]
"#;

    fn write_config(name: &str, text: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lineup_config_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn loads_valid_config() {
        let path = write_config("valid", VALID);
        let config = load_config_from(&path).expect("should load valid config");

        assert_eq!(config.data.roster, "data/roster.json");
        assert_eq!(config.lookup.timeout_secs, 15);
        assert!((config.thresholds().tier_b - 90.0).abs() < f64::EPSILON);
        assert_eq!(config.quotas().total(), 11);
        assert_eq!(config.lineup.round, 1);
        assert_eq!(config.lineup.players.len(), 2);
        assert_eq!(config.market.players, vec!["Kubo"]);
    }

    #[test]
    fn optional_sections_take_defaults() {
        let minimal = r#"
[data]
roster = "r.json"
calendar = "c.json"

[lineup]
round = 3
players = []

[market]
players = []
"#;
        let path = write_config("minimal", minimal);
        let config = load_config_from(&path).expect("should load with defaults");

        assert_eq!(config.lookup.timeout_secs, 20);
        assert!((config.thresholds().tier_a - 80.0).abs() < f64::EPSILON);
        assert!((config.thresholds().tier_b - 90.0).abs() < f64::EPSILON);
        assert_eq!(config.quotas().goalkeepers, 1);
        assert_eq!(config.quotas().total(), 11);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = load_config_from(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let path = write_config("invalid_toml", "this is not [[[ toml");
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let modified = VALID.replace("tier_b_threshold = 90.0", "tier_b_threshold = 101.0");
        let path = write_config("threshold", &modified);
        let err = load_config_from(&path).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "policy.tier_b_threshold");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn rejects_two_goalkeepers() {
        let modified = VALID
            .replace("goalkeepers = 1", "goalkeepers = 2")
            .replace("defenders = 4", "defenders = 3");
        let path = write_config("two_gk", &modified);
        let err = load_config_from(&path).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "formation.goalkeepers");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn rejects_quotas_not_summing_to_eleven() {
        let modified = VALID.replace("forwards = 3", "forwards = 4");
        let path = write_config("quota_sum", &modified);
        let err = load_config_from(&path).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "formation"),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn rejects_round_zero() {
        let modified = VALID.replace("round = 1", "round = 0");
        let path = write_config("round_zero", &modified);
        let err = load_config_from(&path).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "lineup.round"),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        let modified = VALID.replace("timeout_secs = 15", "timeout_secs = 0");
        let path = write_config("timeout", &modified);
        let err = load_config_from(&path).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "lookup.timeout_secs"),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }
}
