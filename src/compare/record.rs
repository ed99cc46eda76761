//! Per-step classification result

use crate::line_source::Line;

/// Outcome of one comparison step
///
/// `Diverged` only comes out of lock-step alignment, when both sides had a
/// line and the lines differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedRecord {
    OnlyFirst(Line),
    OnlySecond(Line),
    Both(Line),
    Diverged { first: Line, second: Line },
}

impl ClassifiedRecord {
    /// Column 1 slot: line only in FILE1
    pub fn only_in_first(&self) -> Option<&[u8]> {
        match self {
            ClassifiedRecord::OnlyFirst(line) => Some(line.as_slice()),
            ClassifiedRecord::Diverged { first, .. } => Some(first.as_slice()),
            _ => None,
        }
    }

    /// Column 2 slot: line only in FILE2
    pub fn only_in_second(&self) -> Option<&[u8]> {
        match self {
            ClassifiedRecord::OnlySecond(line) => Some(line.as_slice()),
            ClassifiedRecord::Diverged { second, .. } => Some(second.as_slice()),
            _ => None,
        }
    }

    /// Column 3 slot: line in both
    pub fn in_both(&self) -> Option<&[u8]> {
        match self {
            ClassifiedRecord::Both(line) => Some(line.as_slice()),
            _ => None,
        }
    }

    /// Slots in column order
    pub fn columns(&self) -> [Option<&[u8]>; 3] {
        [self.only_in_first(), self.only_in_second(), self.in_both()]
    }
}
