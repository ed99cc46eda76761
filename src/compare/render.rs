//! Column renderer
//!
//! Layout of one output line:
//!
//! ```text
//! [column 1] DELIM [column 2] DELIM [column 3]
//! ```
//!
//! Both delimiters are always written so column positions never shift when
//! a column is hidden or empty. One trailing delimiter is then dropped. A
//! record where no column contributed text produces no line at all.
//!
//! Fields are written as the raw bytes they were read as.

use std::io::Write;

use super::record::ClassifiedRecord;
use crate::config::CommConfig;
use crate::error::{CommError, Result};

pub struct ColumnRenderer {
    show: [bool; 3],
    delimiter: Vec<u8>,
}

impl ColumnRenderer {
    pub fn new(config: &CommConfig) -> Self {
        Self {
            show: [
                !config.suppress_first,
                !config.suppress_second,
                !config.suppress_third,
            ],
            delimiter: config.delimiter.as_bytes().to_vec(),
        }
    }

    /// Render into `out` (cleared first); returns false when elided
    pub fn render_into(&self, record: &ClassifiedRecord, out: &mut Vec<u8>) -> bool {
        out.clear();
        let mut wrote_any = false;

        for (i, slot) in record.columns().into_iter().enumerate() {
            if i > 0 {
                out.extend_from_slice(&self.delimiter);
            }
            if let Some(text) = slot.filter(|text| self.show[i] && !text.is_empty()) {
                out.extend_from_slice(text);
                wrote_any = true;
            }
        }

        if !wrote_any {
            out.clear();
            return false;
        }
        if out.ends_with(&self.delimiter) {
            out.truncate(out.len() - self.delimiter.len());
        }
        true
    }

    pub fn render(&self, record: &ClassifiedRecord) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        self.render_into(record, &mut out).then_some(out)
    }

    /// Write one newline-terminated line unless the record is elided
    ///
    /// `scratch` is reused across calls to avoid a fresh allocation per line.
    pub fn write_record<W: Write>(
        &self,
        record: &ClassifiedRecord,
        scratch: &mut Vec<u8>,
        sink: &mut W,
    ) -> Result<bool> {
        if !self.render_into(record, scratch) {
            return Ok(false);
        }
        scratch.push(b'\n');
        sink.write_all(scratch)
            .map_err(|source| CommError::Write { source })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(config: &CommConfig, record: ClassifiedRecord) -> Option<String> {
        ColumnRenderer::new(config)
            .render(&record)
            .map(|line| String::from_utf8(line).unwrap())
    }

    #[test]
    fn test_default_layout() {
        let config = CommConfig::default();
        assert_eq!(
            render(&config, ClassifiedRecord::OnlyFirst("apple".into())).as_deref(),
            Some("apple\t")
        );
        assert_eq!(
            render(&config, ClassifiedRecord::OnlySecond("date".into())).as_deref(),
            Some("\tdate")
        );
        assert_eq!(
            render(&config, ClassifiedRecord::Both("kiwi".into())).as_deref(),
            Some("\t\tkiwi")
        );
        assert_eq!(
            render(
                &config,
                ClassifiedRecord::Diverged {
                    first: "apple".into(),
                    second: "banana".into()
                }
            )
            .as_deref(),
            Some("apple\tbanana")
        );
    }

    #[test]
    fn test_suppressed_columns_keep_positions() {
        let config = CommConfig::new().suppress(true, false, false);
        let diverged = ClassifiedRecord::Diverged {
            first: "apple".into(),
            second: "banana".into(),
        };
        assert_eq!(render(&config, diverged).as_deref(), Some("\tbanana"));
        assert_eq!(
            render(&config, ClassifiedRecord::Both("kiwi".into())).as_deref(),
            Some("\t\tkiwi")
        );
    }

    #[test]
    fn test_fully_suppressed_record_is_elided() {
        let config = CommConfig::new().suppress(true, true, false);
        assert_eq!(render(&config, ClassifiedRecord::OnlyFirst("a".into())), None);
        assert_eq!(render(&config, ClassifiedRecord::OnlySecond("b".into())), None);
        assert_eq!(
            render(&config, ClassifiedRecord::Both("c".into())).as_deref(),
            Some("\t\tc")
        );
    }

    #[test]
    fn test_blank_line_is_elided() {
        let config = CommConfig::default();
        assert_eq!(render(&config, ClassifiedRecord::Both(Vec::new())), None);
        assert_eq!(render(&config, ClassifiedRecord::OnlyFirst(Vec::new())), None);
    }

    #[test]
    fn test_custom_delimiter() {
        let config = CommConfig::new().delimiter("||");
        assert_eq!(
            render(&config, ClassifiedRecord::OnlyFirst("a".into())).as_deref(),
            Some("a||")
        );
        assert_eq!(
            render(&config, ClassifiedRecord::Both("c".into())).as_deref(),
            Some("||||c")
        );
    }

    #[test]
    fn test_content_that_looks_like_a_delimiter_is_kept() {
        let config = CommConfig::new().delimiter(",");
        assert_eq!(
            render(&config, ClassifiedRecord::OnlySecond(",".into())).as_deref(),
            Some(",,")
        );
    }

    #[test]
    fn test_write_record() {
        let renderer = ColumnRenderer::new(&CommConfig::new().suppress(false, false, true));
        let mut sink = Vec::new();
        let mut scratch = Vec::new();
        assert!(renderer
            .write_record(&ClassifiedRecord::OnlyFirst("a".into()), &mut scratch, &mut sink)
            .unwrap());
        assert!(!renderer
            .write_record(&ClassifiedRecord::Both("b".into()), &mut scratch, &mut sink)
            .unwrap());
        assert_eq!(String::from_utf8(sink).unwrap(), "a\t\n");
    }

    #[test]
    fn test_empty_delimiter_joins_fields() {
        let config = CommConfig::new().delimiter("");
        let diverged = ClassifiedRecord::Diverged {
            first: "apple".into(),
            second: "banana".into(),
        };
        assert_eq!(render(&config, diverged).as_deref(), Some("applebanana"));
        assert_eq!(
            render(&config, ClassifiedRecord::Both("kiwi".into())).as_deref(),
            Some("kiwi")
        );
        assert_eq!(render(&config, ClassifiedRecord::Both(Vec::new())), None);
    }

    #[test]
    fn test_raw_bytes_written_unchanged() {
        let renderer = ColumnRenderer::new(&CommConfig::default());
        let record = ClassifiedRecord::Diverged {
            first: b"caf\xe9".to_vec(),
            second: b"caf\xe8".to_vec(),
        };
        assert_eq!(renderer.render(&record), Some(b"caf\xe9\tcaf\xe8".to_vec()));
    }
}
