//! Record types and the schema derived from them

use super::field::FieldDef;

/// A type whose values map to rows of a table
///
/// Implementations expose one [`FieldDef`] per column, in declaration
/// order. The [`tsv_record!`](crate::tsv_record) macro generates this impl;
/// writing it by hand is equally valid.
pub trait Record: Default + 'static {
    /// Column mapping for this type, in declaration order
    fn fields() -> &'static [FieldDef<Self>];

    /// Find the field bound to `column`
    fn field(column: &str) -> Option<&'static FieldDef<Self>> {
        Self::fields().iter().find(|f| f.name == column)
    }
}

/// Ordered column names for a record type
pub fn derive_schema<R: Record>() -> Vec<String> {
    R::fields().iter().map(|f| f.name.to_string()).collect()
}

/// Declare a struct and register it as a [`Record`]
///
/// Column names default to the field identifiers; `as "Name"` after the
/// field type overrides one.
///
/// ```
/// tsvtable::tsv_record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Person {
///         pub name: String as "Name",
///         pub age: u32 as "Age",
///     }
/// }
///
/// assert_eq!(tsvtable::derive_schema::<Person>(), ["Name", "Age"]);
/// ```
#[macro_export]
macro_rules! tsv_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(as $column:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn fields() -> &'static [$crate::FieldDef<Self>] {
                const FIELDS: &[$crate::FieldDef<$name>] = &[
                    $(
                        $crate::FieldDef {
                            name: $crate::__tsv_column_name!($field $(, $column)?),
                            kind: <$ty as $crate::FieldType>::KIND,
                            read: |record: &$name| $crate::FieldType::render(&record.$field),
                            write: |record: &mut $name, token: &str| {
                                record.$field = <$ty as $crate::FieldType>::parse(token)?;
                                Ok(())
                            },
                        },
                    )*
                ];
                FIELDS
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tsv_column_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $column:literal) => {
        $column
    };
}

/// Declare a fieldless enum usable as a record field
///
/// Values parse from their variant names, ignoring ASCII case, and render
/// as the exact variant name.
#[macro_export]
macro_rules! tsv_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
        }

        impl $crate::FieldType for $name {
            const KIND: $crate::FieldKind = $crate::FieldKind::Enum(&[$(stringify!($variant)),*]);

            fn parse(token: &str) -> ::std::result::Result<Self, $crate::FieldError> {
                let variants = <Self as $crate::FieldType>::KIND.variants();
                let index = $crate::model::parse_enum_index(token, variants)?;
                [$($name::$variant),*]
                    .into_iter()
                    .nth(index)
                    .ok_or_else(|| $crate::FieldError::InvalidEnumValue {
                        value: token.to_string(),
                        variants,
                    })
            }

            fn render(&self) -> String {
                match self {
                    $($name::$variant => stringify!($variant),)*
                }
                .to_string()
            }
        }
    };
}
