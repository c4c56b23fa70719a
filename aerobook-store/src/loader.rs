use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::record::RecordError;
use crate::{StoreError, StoreResult};

/// A line that was skipped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub line: usize,
    pub error: RecordError,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Records read from a file, plus one warning per skipped line
#[derive(Debug)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub warnings: Vec<LoadWarning>,
}

impl<T> LoadReport<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Parse every non-blank line with `parse`, skipping (and warning about) the
/// ones it rejects or that are not valid UTF-8. Only I/O failures abort the
/// load.
pub fn read_records<T, R, F>(mut reader: R, source: &Path, parse: F) -> StoreResult<LoadReport<T>>
where
    R: BufRead,
    F: Fn(&str) -> Result<T, RecordError>,
{
    let mut report = LoadReport::empty();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source_err| StoreError::Io {
                path: source.to_path_buf(),
                source: source_err,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim_start_matches('\u{feff}');
                let line = line.strip_suffix('\n').unwrap_or(line);
                let line = line.strip_suffix('\r').unwrap_or(line);
                if line.trim().is_empty() {
                    continue;
                }
                parse(line)
            }
            Err(err) => Err(RecordError::Encoding {
                valid_up_to: err.valid_up_to(),
            }),
        };

        match parsed {
            Ok(record) => report.records.push(record),
            Err(error) => {
                let warning = LoadWarning {
                    line: line_no,
                    error,
                };
                tracing::warn!("Skipping malformed record in {}, {warning}", source.display());
                report.warnings.push(warning);
            }
        }
    }

    Ok(report)
}

pub(crate) fn open(path: &Path) -> StoreResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_number(line: &str) -> Result<u32, RecordError> {
        line.trim().parse().map_err(|_| RecordError::FieldCount {
            expected: "1",
            found: 0,
        })
    }

    #[test]
    fn test_bad_lines_become_warnings() {
        let input = Cursor::new("1\n\nnope\n3\n");
        let report = read_records(input, Path::new("numbers.txt"), parse_number).unwrap();

        assert_eq!(report.records, vec![1, 3]);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line, 3);
    }

    #[test]
    fn test_non_utf8_line_is_skipped() {
        let input = Cursor::new(b"1\n2\xF3\n3\r\n".to_vec());
        let report = read_records(input, Path::new("numbers.txt"), parse_number).unwrap();

        assert_eq!(report.records, vec![1, 3]);
        assert_eq!(
            report.warnings,
            vec![LoadWarning {
                line: 2,
                error: RecordError::Encoding { valid_up_to: 1 },
            }]
        );
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let input = Cursor::new("\u{feff}7\n");
        let report = read_records(input, Path::new("numbers.txt"), parse_number).unwrap();
        assert_eq!(report.records, vec![7]);
    }
}
