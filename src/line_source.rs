//! Line sources: "next line or end-of-input" over any input
//!
//! The classifier only ever sees this trait, so files, standard input and
//! in-memory fixtures are interchangeable.
//!
//! Lines are raw bytes. Input that is not valid UTF-8 is compared and
//! written back exactly as read.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// One input line, terminator and surrounding whitespace removed
pub type Line = Vec<u8>;

/// Ordered, finite, non-restartable producer of lines
pub trait LineSource {
    /// Pull the next line
    ///
    /// `Ok(None)` is end-of-input and is distinct from an empty line,
    /// which comes back as `Ok(Some(Vec::new()))`.
    fn next_line(&mut self) -> io::Result<Option<Line>>;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> io::Result<Option<Line>> {
        (**self).next_line()
    }
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn next_line(&mut self) -> io::Result<Option<Line>> {
        (**self).next_line()
    }
}

/// Strip the line terminator and surrounding whitespace
///
/// Valid UTF-8 is trimmed of Unicode whitespace; anything else only of
/// ASCII whitespace, leaving the invalid bytes in place.
pub fn trim_line(raw: &[u8]) -> &[u8] {
    match std::str::from_utf8(raw) {
        Ok(text) => text.trim().as_bytes(),
        Err(_) => raw.trim_ascii(),
    }
}

/// Buffered reader adapter
pub struct ReaderLineSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
        }
    }
}

impl<R: BufRead> LineSource for ReaderLineSource<R> {
    fn next_line(&mut self) -> io::Result<Option<Line>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(trim_line(&self.buf).to_vec()))
    }
}

/// In-memory source, mostly for tests and benches
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSource {
    lines: VecDeque<Line>,
}

impl MemoryLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Line>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|line| {
                    let line: Line = line.into();
                    trim_line(&line).to_vec()
                })
                .collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for MemoryLineSource {
    fn next_line(&mut self) -> io::Result<Option<Line>> {
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    fn drain(source: &mut impl LineSource) -> Vec<Line> {
        let mut out = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            out.push(line);
        }
        out
    }

    #[test]
    fn test_reader_trims_and_signals_end() {
        let mut source = ReaderLineSource::new(Cursor::new("alpha  \r\n\nbeta\n  gamma"));
        assert_eq!(
            drain(&mut source),
            vec![b"alpha".to_vec(), Vec::new(), b"beta".to_vec(), b"gamma".to_vec()]
        );
        // Stays exhausted
        assert!(source.next_line().unwrap().is_none());
    }

    #[test]
    fn test_reader_empty_input() {
        let mut source = ReaderLineSource::new(Cursor::new(""));
        assert!(source.next_line().unwrap().is_none());
    }

    #[test]
    fn test_reader_keeps_invalid_utf8_bytes() {
        let bytes: &[u8] = b"ok\n caf\xe9 \r\ncaf\xe8\n";
        let mut source = ReaderLineSource::new(Cursor::new(bytes));
        assert_eq!(
            drain(&mut source),
            vec![b"ok".to_vec(), b"caf\xe9".to_vec(), b"caf\xe8".to_vec()]
        );
    }

    #[test]
    fn test_trim_line() {
        assert_eq!(trim_line(b"  x y \n"), b"x y");
        assert_eq!(trim_line("\u{a0}ünï\u{a0}".as_bytes()), "ünï".as_bytes());
        assert_eq!(trim_line(b"\t\xff\r\n"), b"\xff");
        assert_eq!(trim_line(b"\n"), b"");
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        }
    }

    #[test]
    fn test_reader_propagates_io_errors() {
        let mut source = ReaderLineSource::new(BufReader::new(FailingReader));
        let err = source.next_line().unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_memory_source() {
        let mut source = MemoryLineSource::new(["a ", "b"]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(drain(&mut source), vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_boxed_source() {
        let mut boxed: Box<dyn LineSource> = Box::new(MemoryLineSource::new(["x"]));
        assert_eq!(boxed.next_line().unwrap(), Some(b"x".to_vec()));
        assert!(boxed.next_line().unwrap().is_none());
    }
}
