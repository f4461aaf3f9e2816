//! Logical value types and owned cell values. Pure data; no storage encoding
//! knowledge here — physical representations live in `strata-segment`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Long,
    Float,
    Double,
    String,
    /// Opaque, codec-defined type. The codec is looked up by the complex
    /// type name carried in [`TypeSignature`].
    Complex,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueType::Long => "LONG",
            ValueType::Float => "FLOAT",
            ValueType::Double => "DOUBLE",
            ValueType::String => "STRING",
            ValueType::Complex => "COMPLEX",
        };
        f.write_str(s)
    }
}

/// Full type description: semantic type plus, for complex columns, the
/// logical type name the codec registry keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSignature {
    pub value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complex_type_name: Option<String>,
}

impl TypeSignature {
    pub const LONG: TypeSignature = TypeSignature::simple(ValueType::Long);
    pub const FLOAT: TypeSignature = TypeSignature::simple(ValueType::Float);
    pub const DOUBLE: TypeSignature = TypeSignature::simple(ValueType::Double);
    pub const STRING: TypeSignature = TypeSignature::simple(ValueType::String);

    pub const fn simple(value_type: ValueType) -> Self {
        Self {
            value_type,
            complex_type_name: None,
        }
    }

    pub fn complex(type_name: impl Into<String>) -> Self {
        Self {
            value_type: ValueType::Complex,
            complex_type_name: Some(type_name.into()),
        }
    }

    /// Complex without a known type name (e.g. a segment written by a newer
    /// version than this process understands).
    pub const fn unknown_complex() -> Self {
        Self {
            value_type: ValueType::Complex,
            complex_type_name: None,
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value_type, &self.complex_type_name) {
            (ValueType::Complex, Some(name)) => write!(f, "COMPLEX<{}>", name),
            (vt, _) => write!(f, "{}", vt),
        }
    }
}

/// One owned cell value. Operators and the analyzer move these around;
/// columns stay columnar underneath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Complex(Vec<u8>),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Scalar::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}
