//! tsvtable - Typed record tables backed by tab-separated text
//!
//! A record type declares its columns once (usually through [`tsv_record!`]);
//! a [`Table`] of those records loads from, appends from and saves to TSV
//! files whose header line names the columns.
//!
//! ```no_run
//! use tsvtable::{tsv_record, Table};
//!
//! tsv_record! {
//!     #[derive(Debug, Default)]
//!     pub struct Person {
//!         pub name: String as "Name",
//!         pub age: u32 as "Age",
//!     }
//! }
//!
//! let mut people = Table::<Person>::from_file("people.tsv")?;
//! people.add_row(Person { name: "Carol".into(), age: 41 });
//! people.save_to_file("people.tsv")?;
//! # Ok::<(), tsvtable::TsvError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod report;
pub mod table;

pub use codec::{decode_row, encode_row, RowCodec};
pub use config::Config;
pub use error::{ErrorKind, FieldError, Result, RowError, TsvError};
pub use model::{derive_schema, FieldDef, FieldKind, FieldType, Record};
pub use table::Table;
