//! Run configuration
//!
//! A `CommConfig` is built once and then only read. The
//! classifier and renderer each take it by reference at construction.

use serde::Serialize;

/// Default column separator
pub const DEFAULT_DELIMITER: &str = "\t";

/// How the two inputs are walked against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    /// Pull one line from each side on every step, whatever their order.
    /// Unequal pairs come out as a single diverged record.
    #[default]
    LockStep,
    /// Merge-join: advance only the side holding the smaller line.
    Merge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommConfig {
    /// Hide column 1 (lines only in FILE1)
    pub suppress_first: bool,
    /// Hide column 2 (lines only in FILE2)
    pub suppress_second: bool,
    /// Hide column 3 (lines in both)
    pub suppress_third: bool,
    /// Compare lines after lower-casing them
    pub case_insensitive: bool,
    /// With `case_insensitive`, also emit the lower-cased text
    pub fold_output: bool,
    pub alignment: Alignment,
    pub delimiter: String,
}

impl Default for CommConfig {
    fn default() -> Self {
        Self {
            suppress_first: false,
            suppress_second: false,
            suppress_third: false,
            case_insensitive: false,
            fold_output: true,
            alignment: Alignment::LockStep,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl CommConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn suppress(mut self, first: bool, second: bool, third: bool) -> Self {
        self.suppress_first = first;
        self.suppress_second = second;
        self.suppress_third = third;
        self
    }

    #[must_use]
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    #[must_use]
    pub fn fold_output(mut self, enabled: bool) -> Self {
        self.fold_output = enabled;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Whether emitted text is the lower-cased comparison key
    pub fn folds_emitted_text(&self) -> bool {
        self.case_insensitive && self.fold_output
    }
}
