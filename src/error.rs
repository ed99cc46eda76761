//! Error types for a comparison run
//!
//! Every variant is fatal: the run stops at the first one and nothing is
//! retried.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two inputs an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// FILE1, the source of column 1
    First,
    /// FILE2, the source of column 2
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("FILE1"),
            Side::Second => f.write_str("FILE2"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CommError {
    /// Both inputs name standard input. Detected before anything is opened.
    #[error("Both input files cannot be STDIN (\"-\")")]
    BothStdin,

    /// A named input file could not be opened.
    #[error("error opening {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the next line failed part way through a comparison.
    #[error("error reading {side}: {source}")]
    Read {
        side: Side,
        #[source]
        source: io::Error,
    },

    /// The output sink rejected a rendered line.
    #[error("error writing output: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
}

impl CommError {
    /// True when the output sink went away (e.g. `rcomm a b | head`)
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, CommError::Write { source } if source.kind() == io::ErrorKind::BrokenPipe)
    }
}

pub type Result<T> = std::result::Result<T, CommError>;
