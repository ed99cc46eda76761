//! rcomm - compare two sorted files line by line
//!
//! Produces the classic three-column report:
//!
//! - column 1: lines only in FILE1
//! - column 2: lines only in FILE2
//! - column 3: lines in both
//!
//! Inputs are expected to be sorted already; nothing here sorts.

pub mod compare;
pub mod config;
pub mod error;
pub mod input;
pub mod line_source;

pub use compare::{compare, ClassifiedRecord, ColumnRenderer, CompareSummary, MergeClassifier};
pub use config::{Alignment, CommConfig};
pub use error::{CommError, Result, Side};
pub use input::InputSource;
pub use line_source::{Line, LineSource, MemoryLineSource, ReaderLineSource};

use std::io::Write;

/// Open both inputs and run a comparison into `sink`
///
/// The dual-stdin check happens before any file is opened.
pub fn run<W: Write>(
    first: &InputSource,
    second: &InputSource,
    config: &CommConfig,
    sink: &mut W,
) -> Result<CompareSummary> {
    let (a, b) = input::open_pair(first, second)?;
    compare(a, b, config, sink)
}
