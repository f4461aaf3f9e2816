//! Declared column capabilities.
//!
//! Capabilities describe what a column *claims* to be. The physical column
//! behind a holder may disagree (a segment written by a buggy or newer
//! producer); consumers that dereference the physical side must treat a
//! mismatch as a column-scoped condition, not a fatal one.

use serde::{Deserialize, Serialize};
use strata_core::types::{TypeSignature, ValueType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCapabilities {
    pub value_type: ValueType,
    /// Logical type name for complex columns; keys the codec registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complex_type_name: Option<String>,
    pub has_multiple_values: bool,
    pub dictionary_encoded: bool,
}

impl ColumnCapabilities {
    pub fn long() -> Self {
        Self::simple(ValueType::Long)
    }

    pub fn float() -> Self {
        Self::simple(ValueType::Float)
    }

    pub fn double() -> Self {
        Self::simple(ValueType::Double)
    }

    pub fn string(has_multiple_values: bool) -> Self {
        Self {
            value_type: ValueType::String,
            complex_type_name: None,
            has_multiple_values,
            dictionary_encoded: true,
        }
    }

    /// `None` type name models a complex column whose producer this process
    /// no longer (or never did) understand.
    pub fn complex(type_name: Option<&str>) -> Self {
        Self {
            value_type: ValueType::Complex,
            complex_type_name: type_name.map(str::to_owned),
            has_multiple_values: false,
            dictionary_encoded: false,
        }
    }

    fn simple(value_type: ValueType) -> Self {
        Self {
            value_type,
            complex_type_name: None,
            has_multiple_values: false,
            dictionary_encoded: false,
        }
    }

    pub fn type_signature(&self) -> TypeSignature {
        match (&self.value_type, &self.complex_type_name) {
            (ValueType::Complex, Some(name)) => TypeSignature::complex(name.clone()),
            (ValueType::Complex, None) => TypeSignature::unknown_complex(),
            (vt, _) => TypeSignature::simple(*vt),
        }
    }
}
