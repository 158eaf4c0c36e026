//! Conversion between text rows and typed records

use crate::error::RowError;
use crate::model::{FieldDef, Record};
use crate::parser::DELIMITER;

/// Column resolved against a record type
#[derive(Debug)]
struct Binding<R: 'static> {
    column: String,
    field: Option<&'static FieldDef<R>>,
}

/// Row encoder/decoder for one record type and one column layout
///
/// Column names are resolved to fields once, at construction. Columns with
/// no matching field are kept and only rejected when a row touches them.
#[derive(Debug)]
pub struct RowCodec<R: Record> {
    bindings: Vec<Binding<R>>,
}

impl<R: Record> RowCodec<R> {
    /// Bind `columns` to the fields of `R`
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        let bindings = columns
            .iter()
            .map(|column| {
                let column = column.as_ref();
                Binding {
                    column: column.to_string(),
                    field: R::field(column),
                }
            })
            .collect();
        Self { bindings }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.bindings.len()
    }

    /// Columns that match no field of `R`
    pub fn unknown_columns(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(|b| b.field.is_none())
            .map(|b| b.column.as_str())
    }

    /// Build a record from one row's tokens
    pub fn decode<S: AsRef<str>>(&self, tokens: &[S]) -> Result<R, RowError> {
        if tokens.len() != self.bindings.len() {
            return Err(RowError::ColumnCount {
                expected: self.bindings.len(),
                found: tokens.len(),
            });
        }

        let mut record = R::default();
        for (binding, token) in self.bindings.iter().zip(tokens) {
            let field = binding.resolve()?;
            (field.write)(&mut record, token.as_ref()).map_err(|source| RowError::Field {
                column: binding.column.clone(),
                source,
            })?;
        }
        Ok(record)
    }

    /// Render a record as one row of tokens, in column order
    pub fn encode(&self, record: &R) -> Result<Vec<String>, RowError> {
        self.bindings
            .iter()
            .map(|binding| binding.resolve().map(|field| (field.read)(record)))
            .collect()
    }
}

impl<R: 'static> Binding<R> {
    fn resolve(&self) -> Result<&'static FieldDef<R>, RowError> {
        self.field.ok_or_else(|| RowError::UnknownColumn {
            column: self.column.clone(),
        })
    }
}

/// Decode a single tab-separated line
pub fn decode_row<R: Record, S: AsRef<str>>(line: &str, columns: &[S]) -> Result<R, RowError> {
    let tokens: Vec<&str> = line.split(DELIMITER).collect();
    RowCodec::<R>::new(columns).decode(&tokens)
}

/// Encode a record as a single tab-separated line (no terminator)
pub fn encode_row<R: Record, S: AsRef<str>>(record: &R, columns: &[S]) -> Result<String, RowError> {
    let tokens = RowCodec::<R>::new(columns).encode(record)?;
    Ok(tokens.join(DELIMITER.to_string().as_str()))
}
