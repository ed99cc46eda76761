//! Merge classifier
//!
//! Pulls lines from FILE1 and FILE2 and yields one `ClassifiedRecord` per
//! step. Two alignments are supported:
//!
//! - **Lock-step** (default): both sides advance on every step. Equal lines
//!   go to column 3, a lone line goes to its own column, and an unequal pair
//!   becomes one `Diverged` record. Inputs with interleaved unique lines are
//!   reported pairwise rather than merged.
//! - **Merge**: the classic merge-join walk over two sorted streams. Only the
//!   side holding the smaller line advances, so `Diverged` never occurs.

use std::borrow::Cow;
use std::cmp::Ordering;

use tracing::{trace, warn};

use super::record::ClassifiedRecord;
use crate::config::{Alignment, CommConfig};
use crate::error::{CommError, Result, Side};
use crate::line_source::{Line, LineSource};

/// One input plus its end-of-input latch
///
/// Once a source reports end-of-input it is never pulled again; a terminal
/// on standard input would otherwise block waiting for more.
struct Cursor<S> {
    source: S,
    side: Side,
    exhausted: bool,
}

impl<S: LineSource> Cursor<S> {
    fn new(source: S, side: Side) -> Self {
        Self {
            source,
            side,
            exhausted: false,
        }
    }

    fn pull(&mut self) -> Result<Option<Line>> {
        if self.exhausted {
            return Ok(None);
        }
        match self.source.next_line() {
            Ok(Some(line)) => Ok(Some(line)),
            Ok(None) => {
                self.exhausted = true;
                Ok(None)
            }
            Err(source) => Err(CommError::Read {
                side: self.side,
                source,
            }),
        }
    }
}

pub struct MergeClassifier<A, B> {
    first: Cursor<A>,
    second: Cursor<B>,
    alignment: Alignment,
    case_insensitive: bool,
    fold_output: bool,
    // Lookahead held back by merge alignment
    pending_first: Option<Line>,
    pending_second: Option<Line>,
    steps: u64,
    finished: bool,
}

impl<A: LineSource, B: LineSource> MergeClassifier<A, B> {
    pub fn new(first: A, second: B, config: &CommConfig) -> Self {
        Self {
            first: Cursor::new(first, Side::First),
            second: Cursor::new(second, Side::Second),
            alignment: config.alignment,
            case_insensitive: config.case_insensitive,
            fold_output: config.folds_emitted_text(),
            pending_first: None,
            pending_second: None,
            steps: 0,
            finished: false,
        }
    }

    /// Records produced so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn key<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        if self.case_insensitive {
            Cow::Owned(fold_case(line))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn emit(&self, line: Line) -> Line {
        if self.fold_output {
            fold_case(&line)
        } else {
            line
        }
    }

    /// Advance one step; `Ok(None)` once both sides are exhausted
    pub fn next_record(&mut self) -> Result<Option<ClassifiedRecord>> {
        if self.finished {
            return Ok(None);
        }
        let step = match self.alignment {
            Alignment::LockStep => self.lock_step(),
            Alignment::Merge => self.merge_step(),
        };
        match step {
            Ok(Some(record)) => {
                self.steps += 1;
                trace!(step = self.steps, ?record, "classified");
                Ok(Some(record))
            }
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(e) => {
                self.finished = true;
                warn!(step = self.steps, error = %e, "comparison aborted");
                Err(e)
            }
        }
    }

    fn lock_step(&mut self) -> Result<Option<ClassifiedRecord>> {
        let a = self.first.pull()?;
        let b = self.second.pull()?;

        let record = match (a, b) {
            (None, None) => return Ok(None),
            (Some(a), None) => ClassifiedRecord::OnlyFirst(self.emit(a)),
            (None, Some(b)) => ClassifiedRecord::OnlySecond(self.emit(b)),
            (Some(a), Some(b)) => {
                if self.key(&a) == self.key(&b) {
                    ClassifiedRecord::Both(self.emit(a))
                } else {
                    ClassifiedRecord::Diverged {
                        first: self.emit(a),
                        second: self.emit(b),
                    }
                }
            }
        };
        Ok(Some(record))
    }

    fn merge_step(&mut self) -> Result<Option<ClassifiedRecord>> {
        let a = match self.pending_first.take() {
            Some(line) => Some(line),
            None => self.first.pull()?,
        };
        let b = match self.pending_second.take() {
            Some(line) => Some(line),
            None => self.second.pull()?,
        };

        let record = match (a, b) {
            (None, None) => return Ok(None),
            (Some(a), None) => ClassifiedRecord::OnlyFirst(self.emit(a)),
            (None, Some(b)) => ClassifiedRecord::OnlySecond(self.emit(b)),
            (Some(a), Some(b)) => {
                let ordering = self.key(&a).cmp(&self.key(&b));
                match ordering {
                    Ordering::Equal => ClassifiedRecord::Both(self.emit(a)),
                    Ordering::Less => {
                        // FILE1 is behind: keep FILE2's line for the next step
                        self.pending_second = Some(b);
                        ClassifiedRecord::OnlyFirst(self.emit(a))
                    }
                    Ordering::Greater => {
                        self.pending_first = Some(a);
                        ClassifiedRecord::OnlySecond(self.emit(b))
                    }
                }
            }
        };
        Ok(Some(record))
    }
}

/// Lower-case the UTF-8 parts of a line; invalid bytes pass through as-is
pub fn fold_case(line: &[u8]) -> Line {
    let mut out = Vec::with_capacity(line.len());
    for chunk in line.utf8_chunks() {
        out.extend_from_slice(chunk.valid().to_lowercase().as_bytes());
        out.extend_from_slice(chunk.invalid());
    }
    out
}

impl<A: LineSource, B: LineSource> Iterator for MergeClassifier<A, B> {
    type Item = Result<ClassifiedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl<A: LineSource, B: LineSource> std::iter::FusedIterator for MergeClassifier<A, B> {}
