//! Structural reports over untyped TSV files

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{ErrorKind, Result};
use crate::parser::{check_columns, read_raw, write_raw, RawTable};

/// First structural problem found in a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub kind: ErrorKind,
    pub line: Option<usize>,
    pub message: String,
}

/// Summary of a TSV file's layout
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub problem: Option<Problem>,
}

impl Inspection {
    /// Read `path` and check every row against the header
    ///
    /// Malformed rows become a [`Problem`]; missing or empty files are errors.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = read_raw(path)?;
        let problem = raw.check_shape(path).err().map(|e| Problem {
            kind: e.kind(),
            line: e.line(),
            message: e.to_string(),
        });

        Ok(Self {
            path: path.to_path_buf(),
            columns: raw.columns,
            row_count: raw.rows.len(),
            problem,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.problem.is_none()
    }
}

/// Concatenate files that share one header into `output`
///
/// Every input must have exactly the first input's columns. Returns the
/// number of data rows written.
pub fn concat_files(inputs: &[PathBuf], output: &Path) -> Result<usize> {
    let mut merged: Option<RawTable> = None;

    for input in inputs {
        let raw = read_raw(input)?;
        raw.check_shape(input)?;

        match merged.as_mut() {
            None => merged = Some(raw),
            Some(table) => {
                check_columns(input, &table.columns, &raw.columns)?;
                table.rows.extend(raw.rows);
            }
        }
    }

    let Some(table) = merged else {
        return Ok(0);
    };

    let row_count = table.rows.len();
    write_raw(output, &table.columns, table.rows.into_iter().map(|r| r.fields))?;
    debug!(output = %output.display(), inputs = inputs.len(), rows = row_count, "concatenated files");
    Ok(row_count)
}
