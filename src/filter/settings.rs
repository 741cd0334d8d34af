//! Settings shared by inference, criterion parsing and export.

use serde::{Deserialize, Serialize};

use super::culture::Culture;

/// Default number of non-empty cells sampled to infer a column type.
pub const DEFAULT_SAMPLE_LIMIT: usize = 300;

/// Tunables for filtering a workbook.
///
/// Missing fields fall back to their defaults when deserialized, so hosts can
/// persist a partial configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Maximum number of non-empty cells examined per column
    pub sample_limit: usize,
    /// Culture tried before the invariant culture when parsing user input
    pub culture: Culture,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            culture: Culture::Invariant,
        }
    }
}

impl FilterSettings {
    /// Settings with a custom sample cap.
    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    /// Settings with a custom culture.
    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }
}
