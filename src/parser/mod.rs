//! Reading and writing tab-separated text

mod tsv;

pub use self::tsv::{check_columns, read_raw, write_raw, RawRow, RawTable};

/// Field separator within a line
pub const DELIMITER: char = '\t';
