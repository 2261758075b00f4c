//! Diagnostic labels and score selection.
//!
//! The class ordering is fixed by the trained classifier's output head:
//! index 0 is benign, 1 is malignant, 2 is normal. Everything downstream of
//! the classifier (argmax, string forms, parsing) derives from that ordering.

use crate::core::constants::NUM_CLASSES;
use crate::core::errors::TriageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-class scores in the fixed class order, as emitted by the classifier's
/// softmax head. Sums to ~1.0.
pub type ClassScores = [f32; NUM_CLASSES];

/// Diagnostic category assigned to a segmented region of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diagnosis {
    /// Lesion present, benign appearance.
    Benign,
    /// Lesion present, malignant appearance.
    Malignant,
    /// No lesion.
    Normal,
}

impl Diagnosis {
    /// All diagnoses in classifier output order.
    pub const ALL: [Diagnosis; NUM_CLASSES] =
        [Diagnosis::Benign, Diagnosis::Malignant, Diagnosis::Normal];

    /// Returns the canonical string form of this diagnosis.
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Benign => "benign",
            Diagnosis::Malignant => "malignant",
            Diagnosis::Normal => "normal",
        }
    }

    /// Selects the diagnosis with the highest score.
    ///
    /// Ties break to the lowest index in classifier output order.
    pub fn from_scores(scores: &ClassScores) -> Self {
        let mut best = 0;
        for (idx, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = idx;
            }
        }
        Self::ALL[best]
    }

    /// Parses a canonical label string, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Diagnosis {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TriageError::config(format!("unknown diagnosis '{s}'")))
    }
}
