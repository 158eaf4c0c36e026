//! Error types for table loading, saving and row conversion

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::model::FieldKind;

/// Result alias used throughout the library
pub type Result<T, E = TsvError> = std::result::Result<T, E>;

/// Failure converting one token into one field value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("'{value}' is not one of {}", variants.join(", "))]
    InvalidEnumValue {
        value: String,
        variants: &'static [&'static str],
    },

    #[error("cannot convert '{value}' to {expected}")]
    Conversion { value: String, expected: FieldKind },
}

/// Failure decoding or encoding a single row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column '{column}' does not match any field of the record type")]
    UnknownColumn { column: String },

    #[error("column '{column}': {source}")]
    Field {
        column: String,
        #[source]
        source: FieldError,
    },
}

/// Top-level error for table operations
#[derive(Debug, Error)]
pub enum TsvError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("file is empty: {}", path.display())]
    EmptyFile { path: PathBuf },

    #[error("{}:{line}: {source}", path.display())]
    Row {
        path: PathBuf,
        line: usize,
        #[source]
        source: RowError,
    },

    #[error(
        "{}: columns [{}] do not match [{}]",
        path.display(),
        found.join(", "),
        expected.join(", ")
    )]
    ColumnsMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("row index {index} out of range for table with {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Flat classification of every failure the library reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    FileNotFound,
    EmptyFile,
    SchemaMismatch,
    UnknownColumn,
    InvalidEnumValue,
    TypeConversionError,
    IndexOutOfRange,
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::FileNotFound => "file not found",
            ErrorKind::EmptyFile => "empty file",
            ErrorKind::SchemaMismatch => "schema mismatch",
            ErrorKind::UnknownColumn => "unknown column",
            ErrorKind::InvalidEnumValue => "invalid enum value",
            ErrorKind::TypeConversionError => "type conversion error",
            ErrorKind::IndexOutOfRange => "index out of range",
            ErrorKind::Io => "i/o error",
        };
        f.write_str(name)
    }
}

impl FieldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
            FieldError::Conversion { .. } => ErrorKind::TypeConversionError,
        }
    }
}

impl RowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RowError::ColumnCount { .. } => ErrorKind::SchemaMismatch,
            RowError::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            RowError::Field { source, .. } => source.kind(),
        }
    }
}

impl TsvError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TsvError::FileNotFound { .. } => ErrorKind::FileNotFound,
            TsvError::EmptyFile { .. } => ErrorKind::EmptyFile,
            TsvError::Row { source, .. } => source.kind(),
            TsvError::ColumnsMismatch { .. } => ErrorKind::SchemaMismatch,
            TsvError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            TsvError::Io { .. } => ErrorKind::Io,
        }
    }

    /// 1-based source line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            TsvError::Row { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Error for a failed read of an input file
    ///
    /// A path that cannot be opened for reading counts as not found.
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                TsvError::FileNotFound { path }
            }
            _ => TsvError::Io { path, source },
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TsvError::Io {
            path: path.into(),
            source,
        }
    }
}
