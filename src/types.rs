//! Semantic type tags and column classification

use crate::table::{Column, DataType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of semantic column types used by schema and statistics checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Integer,
    Float,
    Datetime,
    Boolean,
    String,
}

impl TypeTag {
    pub fn is_numeric(self) -> bool {
        matches!(self, TypeTag::Integer | TypeTag::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::Datetime => "datetime",
            TypeTag::Boolean => "boolean",
            TypeTag::String => "string",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DataType {
    /// Classify by storage type only; values are never inspected, so a text
    /// column of digits stays `String`.
    pub fn classify(&self) -> TypeTag {
        match self {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Int128
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::UInt128 => TypeTag::Integer,
            DataType::Float32 | DataType::Float64 | DataType::Decimal => TypeTag::Float,
            DataType::Date | DataType::Timestamp => TypeTag::Datetime,
            DataType::Boolean => TypeTag::Boolean,
            DataType::Utf8 | DataType::Other(_) => TypeTag::String,
        }
    }
}

/// Type tag of a column
pub fn classify(column: &Column) -> TypeTag {
    column.data_type().classify()
}
