//! Typed table of records backed by a TSV file

use std::path::Path;

use tracing::debug;

use crate::codec::RowCodec;
use crate::error::{Result, TsvError};
use crate::model::{derive_schema, Record};
use crate::parser::{check_columns, read_raw, write_raw};

/// An ordered collection of records sharing one column layout
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    /// Column names, fixed at construction
    columns: Vec<String>,
    /// All rows in the table
    rows: Vec<R>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Table<R> {
    /// Create an empty table whose columns are the fields of `R`
    pub fn new() -> Self {
        Self {
            columns: derive_schema::<R>(),
            rows: Vec::new(),
        }
    }

    /// Load a table from a TSV file
    ///
    /// The header line becomes the column layout as written. Header names
    /// are checked against `R` only when a data row is decoded, so a
    /// header-only file with unknown columns still loads.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = read_raw(path)?;
        let codec = RowCodec::<R>::new(&raw.columns);

        let mut rows = Vec::with_capacity(raw.row_count());
        for row in &raw.rows {
            let record = codec.decode(&row.fields).map_err(|source| TsvError::Row {
                path: path.to_path_buf(),
                line: row.line,
                source,
            })?;
            rows.push(record);
        }

        debug!(path = %path.display(), rows = rows.len(), "loaded table");
        Ok(Self {
            columns: raw.columns,
            rows,
        })
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Append a record; its fields are not checked against the columns
    pub fn add_row(&mut self, row: R) {
        self.rows.push(row);
    }

    /// Remove and return the row at `index`, shifting later rows down
    pub fn delete_row(&mut self, index: usize) -> Result<R> {
        if index >= self.rows.len() {
            return Err(TsvError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index))
    }

    /// Remove all rows, keeping the columns
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Load `path` and append its rows
    ///
    /// The file's columns must equal this table's, name for name and in the
    /// same order. Nothing is appended if loading or the check fails.
    /// Returns the number of rows appended.
    pub fn append_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let other = Self::from_file(path)?;

        check_columns(path, &self.columns, &other.columns)?;

        let appended = other.rows.len();
        self.rows.extend(other.rows);
        debug!(path = %path.display(), appended, total = self.rows.len(), "appended table");
        Ok(appended)
    }

    /// Write the header and every row to `path`, replacing the file
    ///
    /// All rows are encoded before the file is opened, so an encoding
    /// failure leaves any existing file untouched.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let codec = RowCodec::<R>::new(&self.columns);

        let lines = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                codec.encode(row).map_err(|source| TsvError::Row {
                    path: path.to_path_buf(),
                    line: index + 2, // +2 for 1-indexing and header
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        write_raw(path, &self.columns, lines)?;
        debug!(path = %path.display(), rows = self.rows.len(), "saved table");
        Ok(())
    }
}

impl<R> Table<R> {
    /// Number of rows
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Number of rows, same as [`count`](Self::count)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Row at `index`, if any
    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// Mutable row at `index`, if any
    pub fn get_mut(&mut self, index: usize) -> Option<&mut R> {
        self.rows.get_mut(index)
    }

    /// All rows in storage order
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Iterate rows in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Iterate rows mutably in storage order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, R> {
        self.rows.iter_mut()
    }
}

impl<R> Extend<R> for Table<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl<R> IntoIterator for Table<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<'a, R> IntoIterator for &'a mut Table<R> {
    type Item = &'a mut R;
    type IntoIter = std::slice::IterMut<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter_mut()
    }
}
