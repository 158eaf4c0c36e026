//! Field type tags and the typed converters behind them

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::FieldError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATETIME_FORMAT_ISO: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    Integer,
    Float,
    Bool,
    Char,
    Text,
    Date,
    DateTime,
    /// Enumeration with its symbolic names in declaration order
    Enum(&'static [&'static str]),
}

impl FieldKind {
    /// Symbolic names for enum fields, empty otherwise
    pub fn variants(&self) -> &'static [&'static str] {
        match self {
            FieldKind::Enum(names) => names,
            _ => &[],
        }
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, FieldKind::Enum(_))
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Char => write!(f, "char"),
            FieldKind::Text => write!(f, "text"),
            FieldKind::Date => write!(f, "date"),
            FieldKind::DateTime => write!(f, "datetime"),
            FieldKind::Enum(names) => write!(f, "enum ({})", names.join("|")),
        }
    }
}

/// A value type that can live in a TSV column
pub trait FieldType: Sized {
    /// Type tag reported in schema errors
    const KIND: FieldKind;

    /// Parse one raw token
    fn parse(token: &str) -> Result<Self, FieldError>;

    /// Canonical text for this value
    fn render(&self) -> String;
}

/// One entry of a record type's column mapping
///
/// Built once per record type, usually by [`tsv_record!`](crate::tsv_record).
pub struct FieldDef<R> {
    /// Column name this field reads from and writes to
    pub name: &'static str,
    /// Declared type of the field
    pub kind: FieldKind,
    /// Render the field's current value
    pub read: fn(&R) -> String,
    /// Parse a token and store it in the field
    pub write: fn(&mut R, &str) -> Result<(), FieldError>,
}

impl<R> Clone for FieldDef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldDef<R> {}

impl<R> std::fmt::Debug for FieldDef<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

fn conversion_error(token: &str, expected: FieldKind) -> FieldError {
    FieldError::Conversion {
        value: token.to_string(),
        expected,
    }
}

macro_rules! impl_parsed_field {
    ($kind:expr => $($t:ty),* $(,)?) => {
        $(
            impl FieldType for $t {
                const KIND: FieldKind = $kind;

                fn parse(token: &str) -> Result<Self, FieldError> {
                    token
                        .trim()
                        .parse::<$t>()
                        .map_err(|_| conversion_error(token, Self::KIND))
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_parsed_field!(FieldKind::Integer => i8, i16, i32, i64, i128, isize);
impl_parsed_field!(FieldKind::Integer => u8, u16, u32, u64, u128, usize);
impl_parsed_field!(FieldKind::Float => f32, f64);

impl FieldType for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn parse(token: &str) -> Result<Self, FieldError> {
        let trimmed = token.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(conversion_error(token, Self::KIND))
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl FieldType for char {
    const KIND: FieldKind = FieldKind::Char;

    fn parse(token: &str) -> Result<Self, FieldError> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(conversion_error(token, Self::KIND)),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::Text;

    fn parse(token: &str) -> Result<Self, FieldError> {
        Ok(token.to_string())
    }

    fn render(&self) -> String {
        self.clone()
    }
}

impl FieldType for NaiveDate {
    const KIND: FieldKind = FieldKind::Date;

    fn parse(token: &str) -> Result<Self, FieldError> {
        NaiveDate::parse_from_str(token.trim(), DATE_FORMAT)
            .map_err(|_| conversion_error(token, Self::KIND))
    }

    fn render(&self) -> String {
        self.format(DATE_FORMAT).to_string()
    }
}

impl FieldType for NaiveDateTime {
    const KIND: FieldKind = FieldKind::DateTime;

    fn parse(token: &str) -> Result<Self, FieldError> {
        let trimmed = token.trim();
        NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT_ISO))
            .map_err(|_| conversion_error(token, Self::KIND))
    }

    fn render(&self) -> String {
        self.format(DATETIME_FORMAT).to_string()
    }
}

/// Case-insensitive lookup of `token` among an enumeration's names
///
/// Returns the position of the matching name. Used by [`tsv_enum!`](crate::tsv_enum).
pub fn parse_enum_index(token: &str, variants: &'static [&'static str]) -> Result<usize, FieldError> {
    let trimmed = token.trim();
    variants
        .iter()
        .position(|name| name.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| FieldError::InvalidEnumValue {
            value: token.to_string(),
            variants,
        })
}
