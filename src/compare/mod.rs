//! Line comparison pipeline
//!
//! Line sources → [`MergeClassifier`] → [`ColumnRenderer`] → sink.
//!
//! Everything is streamed: one record is classified, rendered and written
//! before the next pair of lines is pulled, so memory stays bounded by the
//! longest line regardless of input size.
//!
//! Lines are bytes end to end, so input that is not UTF-8 is compared and
//! printed exactly as read.

pub mod classifier;
pub mod record;
pub mod render;

pub use classifier::MergeClassifier;
pub use record::ClassifiedRecord;
pub use render::ColumnRenderer;

use std::io::Write;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::CommConfig;
use crate::error::{CommError, Result};
use crate::line_source::{Line, LineSource};

/// Per-category counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompareSummary {
    pub only_first: u64,
    pub only_second: u64,
    pub both: u64,
    /// Lock-step pairs that populated columns 1 and 2 together
    pub diverged: u64,
    /// Records that produced no output line
    pub elided: u64,
}

impl CompareSummary {
    pub fn record(&mut self, record: &ClassifiedRecord) {
        match record {
            ClassifiedRecord::OnlyFirst(_) => self.only_first += 1,
            ClassifiedRecord::OnlySecond(_) => self.only_second += 1,
            ClassifiedRecord::Both(_) => self.both += 1,
            ClassifiedRecord::Diverged { .. } => self.diverged += 1,
        }
    }

    pub fn records(&self) -> u64 {
        self.only_first + self.only_second + self.both + self.diverged
    }

    pub fn lines_written(&self) -> u64 {
        self.records() - self.elided
    }
}

/// Compare two sorted line sources and write the three-column report
///
/// Lines already written stay written if a read fails part way; the error
/// is returned and nothing further is produced.
pub fn compare<A, B, W>(
    first: A,
    second: B,
    config: &CommConfig,
    sink: &mut W,
) -> Result<CompareSummary>
where
    A: LineSource,
    B: LineSource,
    W: Write,
{
    debug!(?config, "starting comparison");

    let start_time = Instant::now();
    let renderer = ColumnRenderer::new(config);
    let mut summary = CompareSummary::default();
    let mut scratch = Vec::new();

    for record in MergeClassifier::new(first, second, config) {
        let record = record?;
        summary.record(&record);
        if !renderer.write_record(&record, &mut scratch, sink)? {
            summary.elided += 1;
        }
    }
    sink.flush().map_err(|source| CommError::Write { source })?;

    info!(
        only_first = summary.only_first,
        only_second = summary.only_second,
        both = summary.both,
        diverged = summary.diverged,
        elided = summary.elided,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "comparison complete"
    );
    Ok(summary)
}

/// Convenience wrapper returning the rendered lines, used by tests and
/// callers that want the report in memory
pub fn compare_to_lines<A, B>(first: A, second: B, config: &CommConfig) -> Result<Vec<Line>>
where
    A: LineSource,
    B: LineSource,
{
    let renderer = ColumnRenderer::new(config);
    MergeClassifier::new(first, second, config)
        .filter_map(|record| match record {
            Ok(record) => renderer.render(&record).map(Ok),
            Err(e) => Some(Err(e)),
        })
        .collect()
}
