//! Opening the two inputs
//!
//! `-` names standard input. At most one side may use it; the check runs
//! before any file is touched.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CommError, Result};
use crate::line_source::{LineSource, ReaderLineSource};

/// Argument spelling for standard input
pub const STDIN_ALIAS: &str = "-";

const READ_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Path(PathBuf),
}

impl InputSource {
    pub fn parse(arg: &str) -> Self {
        if arg == STDIN_ALIAS {
            InputSource::Stdin
        } else {
            InputSource::Path(PathBuf::from(arg))
        }
    }

    pub fn is_stdin(&self) -> bool {
        matches!(self, InputSource::Stdin)
    }

    /// Open this input as a buffered line source
    pub fn open(&self) -> Result<Box<dyn LineSource>> {
        match self {
            InputSource::Stdin => {
                debug!("reading from standard input");
                Ok(Box::new(ReaderLineSource::new(BufReader::new(io::stdin()))))
            }
            InputSource::Path(path) => open_file(path),
        }
    }
}

impl From<&str> for InputSource {
    fn from(arg: &str) -> Self {
        InputSource::parse(arg)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str(STDIN_ALIAS),
            InputSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

fn open_file(path: &Path) -> Result<Box<dyn LineSource>> {
    let file = File::open(path).map_err(|source| CommError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "opened input");
    Ok(Box::new(ReaderLineSource::new(BufReader::with_capacity(
        READ_BUFFER_SIZE,
        file,
    ))))
}

/// Reject a pair that reads standard input twice
pub fn check_pair(first: &InputSource, second: &InputSource) -> Result<()> {
    if first.is_stdin() && second.is_stdin() {
        return Err(CommError::BothStdin);
    }
    Ok(())
}

/// Validate, then open FILE1 and FILE2 in order
pub fn open_pair(
    first: &InputSource,
    second: &InputSource,
) -> Result<(Box<dyn LineSource>, Box<dyn LineSource>)> {
    check_pair(first, second)?;
    let a = first.open()?;
    let b = second.open()?;
    Ok((a, b))
}
