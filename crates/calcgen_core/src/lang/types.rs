//! Declared value types of constants and variables.
//!
//! The calculation language only knows three storage types: a decimal scalar, an integer, and an array of
//! decimals. Spellings follow the source pseudocode (`BigDecimal`, `int`, `BigDecimal[]`).

/// Declared type of a constant, variable, or list-literal element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Decimal,
    Integer,
    DecimalArray,
}

/// Metadata for a value type.
#[derive(Debug, Clone, Copy)]
pub struct ValueTypeInfo {
    pub id: ValueType,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

/// Registry of all value types.
pub const VALUE_TYPES: &[ValueTypeInfo] = &[
    ValueTypeInfo {
        id: ValueType::Decimal,
        canonical: "BigDecimal",
        aliases: &[],
    },
    ValueTypeInfo {
        id: ValueType::Integer,
        canonical: "int",
        aliases: &["long"],
    },
    ValueTypeInfo {
        id: ValueType::DecimalArray,
        canonical: "BigDecimal[]",
        aliases: &[],
    },
];

/// Resolve a type spelling (canonical or alias).
pub fn from_str(spelling: &str) -> Option<ValueType> {
    let spelling = spelling.trim();
    VALUE_TYPES
        .iter()
        .find(|t| t.canonical == spelling || t.aliases.contains(&spelling))
        .map(|t| t.id)
}

/// Return the canonical spelling of a type.
pub fn as_str(ty: ValueType) -> &'static str {
    match ty {
        ValueType::Decimal => "BigDecimal",
        ValueType::Integer => "int",
        ValueType::DecimalArray => "BigDecimal[]",
    }
}

impl ValueType {
    pub fn is_array(self) -> bool {
        matches!(self, ValueType::DecimalArray)
    }

    /// Element type of an array type; scalars are their own element type.
    pub fn element(self) -> ValueType {
        match self {
            ValueType::DecimalArray => ValueType::Decimal,
            other => other,
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}
