//! Record types, field converters and schema derivation

mod field;
mod record;

pub use field::{parse_enum_index, FieldDef, FieldKind, FieldType};
pub use record::{derive_schema, Record};
