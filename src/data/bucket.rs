use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::CellValue;

// ---------------------------------------------------------------------------
// Position ranges
// ---------------------------------------------------------------------------

/// Bucket of a SERP rank position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PositionRange {
    Top3,
    Top10,
    Top20,
    Top50,
    Top100,
    Other,
}

impl PositionRange {
    /// Every label in ladder order, sentinel last.
    pub const ALL: [PositionRange; 6] = [
        PositionRange::Top3,
        PositionRange::Top10,
        PositionRange::Top20,
        PositionRange::Top50,
        PositionRange::Top100,
        PositionRange::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PositionRange::Top3 => "1-3",
            PositionRange::Top10 => "4-10",
            PositionRange::Top20 => "11-20",
            PositionRange::Top50 => "21-50",
            PositionRange::Top100 => "51-100",
            PositionRange::Other => "Other",
        }
    }

    /// Bucket a numeric cell that may hold a non-integral rank.
    ///
    /// Uses the same ladder as [`categorize_position`]: each bucket is closed
    /// on its upper bound, so no value between two integer edges is lost.
    pub fn from_value(position: f64) -> Self {
        if position.fract() == 0.0 && position.abs() < i64::MAX as f64 {
            return categorize_position(position as i64);
        }
        if position.is_nan() || position < 1.0 {
            PositionRange::Other
        } else if position <= 3.0 {
            PositionRange::Top3
        } else if position <= 10.0 {
            PositionRange::Top10
        } else if position <= 20.0 {
            PositionRange::Top20
        } else if position <= 50.0 {
            PositionRange::Top50
        } else if position <= 100.0 {
            PositionRange::Top100
        } else {
            PositionRange::Other
        }
    }

    /// Bucket a loaded cell. Null means "not ranking".
    pub fn from_cell(cell: &CellValue) -> Self {
        cell.as_f64()
            .map(PositionRange::from_value)
            .unwrap_or(PositionRange::Other)
    }
}

/// Map an integer rank to its range label.
pub fn categorize_position(position: i64) -> PositionRange {
    match position {
        1..=3 => PositionRange::Top3,
        4..=10 => PositionRange::Top10,
        11..=20 => PositionRange::Top20,
        21..=50 => PositionRange::Top50,
        51..=100 => PositionRange::Top100,
        _ => PositionRange::Other,
    }
}

// ---------------------------------------------------------------------------
// Keyword difficulty ranges
// ---------------------------------------------------------------------------

/// Bucket of a keyword difficulty score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DifficultyRange {
    VeryEasy,
    Easy,
    Possible,
    Moderate,
    Difficult,
    Hard,
    VeryHard,
    Unknown,
}

impl DifficultyRange {
    pub const ALL: [DifficultyRange; 8] = [
        DifficultyRange::VeryEasy,
        DifficultyRange::Easy,
        DifficultyRange::Possible,
        DifficultyRange::Moderate,
        DifficultyRange::Difficult,
        DifficultyRange::Hard,
        DifficultyRange::VeryHard,
        DifficultyRange::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DifficultyRange::VeryEasy => "0-15",
            DifficultyRange::Easy => "16-25",
            DifficultyRange::Possible => "26-35",
            DifficultyRange::Moderate => "36-45",
            DifficultyRange::Difficult => "46-55",
            DifficultyRange::Hard => "56-65",
            DifficultyRange::VeryHard => ">65",
            DifficultyRange::Unknown => "Unknown",
        }
    }

    pub fn from_cell(cell: &CellValue) -> Self {
        cell.as_f64()
            .map(categorize_keyword_difficulty)
            .unwrap_or(DifficultyRange::Unknown)
    }
}

/// Map a difficulty score to its range label.
///
/// Buckets are closed on their upper bound; a score such as `15.5` lands in
/// `16-25` rather than falling between two buckets.
pub fn categorize_keyword_difficulty(score: f64) -> DifficultyRange {
    if score.is_nan() || score < 0.0 {
        DifficultyRange::Unknown
    } else if score <= 15.0 {
        DifficultyRange::VeryEasy
    } else if score <= 25.0 {
        DifficultyRange::Easy
    } else if score <= 35.0 {
        DifficultyRange::Possible
    } else if score <= 45.0 {
        DifficultyRange::Moderate
    } else if score <= 55.0 {
        DifficultyRange::Difficult
    } else if score <= 65.0 {
        DifficultyRange::Hard
    } else {
        DifficultyRange::VeryHard
    }
}

// ---------------------------------------------------------------------------
// Label text conversions
// ---------------------------------------------------------------------------

macro_rules! label_conversions {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|r| r.label() == s.trim())
                    .ok_or_else(|| format!("unknown {} '{}'", $what, s))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = String;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(r: $ty) -> String {
                r.label().to_string()
            }
        }
    };
}

label_conversions!(PositionRange, "position range");
label_conversions!(DifficultyRange, "keyword difficulty range");
