use serde::{Deserialize, Serialize};
use std::fmt;

use super::row::CleanedRow;

/// Column spellings probed for the quiz type, first non-blank wins.
const TYPE_COLUMNS: [&str; 7] = [
    "type",
    "Type",
    "TYPE",
    "difficulty",
    "Difficulty",
    "quizType",
    "QuizType",
];

/// The three difficulty tiers. `Difficult` serializes as `"hard"`, the
/// form the bulk-upload endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[serde(rename = "hard")]
    Difficult,
}

impl Difficulty {
    /// Map a cleaned row to a difficulty tier using the tolerant synonym
    /// set. `None` means the row is dropped from every bucket — a silent
    /// skip, not a validation error.
    pub fn classify(row: &CleanedRow) -> Option<Difficulty> {
        let value = TYPE_COLUMNS
            .iter()
            .find_map(|key| row.get(key).filter(|v| !v.is_empty()))
            .unwrap_or("");
        let value = value.trim().to_lowercase();

        if value == "easy" || value == "e" || value.contains("easy") {
            Some(Difficulty::Easy)
        } else if value == "medium" || value == "m" || value.contains("medium") {
            Some(Difficulty::Medium)
        } else if value == "difficult"
            || value == "hard"
            || value == "d"
            || value == "h"
            || value.contains("difficult")
            || value.contains("hard")
        {
            Some(Difficulty::Difficult)
        } else {
            None
        }
    }

    /// Wire form used in the upload payload.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Difficult => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}
