// Tier labels and their total order.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("unknown tier label `{0}` (expected one of S, A, B, C)")]
pub struct UnknownTier(pub String);

/// Coarse quality label for teams and players. `S` is best, `C` worst.
///
/// Parsing happens once at dataset load time; an unknown label there aborts
/// the run. After that the set is closed and `rank()` is infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    S,
    A,
    B,
    C,
}

impl Tier {
    /// Numeric rank used for comparisons: S=3, A=2, B=1, C=0.
    pub fn rank(self) -> u8 {
        match self {
            Tier::S => 3,
            Tier::A => 2,
            Tier::B => 1,
            Tier::C => 0,
        }
    }

    pub fn from_label(label: &str) -> Result<Self, UnknownTier> {
        match label.trim() {
            "S" => Ok(Tier::S),
            "A" => Ok(Tier::A),
            "B" => Ok(Tier::B),
            "C" => Ok(Tier::C),
            other => Err(UnknownTier(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
        }
    }
}

// Ord agrees with rank(): S > A > B > C.
impl Ord for Tier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Tier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
