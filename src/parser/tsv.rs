//! Tab-separated file reader and writer

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::DELIMITER;
use crate::error::{Result, RowError, TsvError};

/// A data line as split from the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Original line number in the source file (1-indexed)
    pub line: usize,
    /// Tab-separated tokens, verbatim
    pub fields: Vec<String>,
}

/// Header and data lines of a TSV file, without any typing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Header tokens, verbatim
    pub columns: Vec<String>,
    /// Data lines in file order
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Fail on the first row whose token count differs from the header's
    pub fn check_shape(&self, path: &Path) -> Result<()> {
        for row in &self.rows {
            if row.fields.len() != self.columns.len() {
                return Err(TsvError::Row {
                    path: path.to_path_buf(),
                    line: row.line,
                    source: RowError::ColumnCount {
                        expected: self.columns.len(),
                        found: row.fields.len(),
                    },
                });
            }
        }
        Ok(())
    }
}

/// Fail unless `found` names the same columns as `expected`, in the same order
pub fn check_columns(path: &Path, expected: &[String], found: &[String]) -> Result<()> {
    if expected == found {
        return Ok(());
    }
    Err(TsvError::ColumnsMismatch {
        path: path.to_path_buf(),
        expected: expected.to_vec(),
        found: found.to_vec(),
    })
}

fn split_line(line: &str) -> Vec<String> {
    line.split(DELIMITER).map(str::to_string).collect()
}

/// Read a whole TSV file into memory
///
/// The first line is the header. Every following line is a row, blank
/// ones included. LF and CRLF terminators are both accepted; a final
/// terminator does not start an extra row.
pub fn read_raw(path: &Path) -> Result<RawTable> {
    if path.is_dir() {
        return Err(TsvError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path).map_err(|e| TsvError::open(path, e))?;

    let mut lines = contents.lines();

    // Read headers
    let columns = match lines.next() {
        Some(header) => split_line(header),
        None => {
            return Err(TsvError::EmptyFile {
                path: path.to_path_buf(),
            })
        }
    };

    // Read rows
    let rows = lines
        .enumerate()
        .map(|(index, line)| RawRow {
            line: index + 2, // +2 for 1-indexing and header
            fields: split_line(line),
        })
        .collect();

    Ok(RawTable { columns, rows })
}

/// Write a header and rows, replacing any existing file
///
/// Tokens are written verbatim, joined by tabs, one `\n`-terminated line
/// per row.
pub fn write_raw<I, R, S>(path: &Path, columns: &[String], rows: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = File::create(path).map_err(|e| TsvError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    write_line(&mut writer, columns).map_err(|e| TsvError::io(path, e))?;
    for row in rows {
        write_line(&mut writer, row).map_err(|e| TsvError::io(path, e))?;
    }

    writer.flush().map_err(|e| TsvError::io(path, e))
}

fn write_line<W, R, S>(writer: &mut W, fields: R) -> std::io::Result<()>
where
    W: Write,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            write!(writer, "{}", DELIMITER)?;
        }
        writer.write_all(field.as_ref().as_bytes())?;
    }
    writer.write_all(b"\n")
}
