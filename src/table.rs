//! In-memory table model consumed by the validation engine
//!
//! A [`Table`] is an ordered set of uniquely named [`Column`]s of equal
//! length. Each column carries the storage type its loader declared
//! ([`DataType`]) and a vector of [`Value`]s; rows are aligned by position.

use crate::error::{DatasureError, Result};
use crate::types::TypeTag;
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage type declared for a column by whatever produced the table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    Float32,
    Float64,
    Decimal,
    Date,
    Timestamp,
    Utf8,
    Other(String),
}

impl DataType {
    /// Map a DuckDB type name (as reported by `DESCRIBE`) to a storage type
    pub fn from_duckdb(type_name: &str) -> Self {
        let upper = type_name.trim().to_uppercase();
        match upper.as_str() {
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "TINYINT" | "INT1" => Self::Int8,
            "SMALLINT" | "INT2" => Self::Int16,
            "INTEGER" | "INT" | "INT4" => Self::Int32,
            "BIGINT" | "INT8" | "LONG" => Self::Int64,
            "HUGEINT" | "INT128" => Self::Int128,
            "UTINYINT" => Self::UInt8,
            "USMALLINT" => Self::UInt16,
            "UINTEGER" => Self::UInt32,
            "UBIGINT" => Self::UInt64,
            "UHUGEINT" => Self::UInt128,
            "FLOAT" | "REAL" | "FLOAT4" => Self::Float32,
            "DOUBLE" | "FLOAT8" => Self::Float64,
            "DATE" => Self::Date,
            "VARCHAR" | "TEXT" | "STRING" => Self::Utf8,
            s if s.starts_with("DECIMAL") || s.starts_with("NUMERIC") => Self::Decimal,
            s if s.starts_with("TIMESTAMP") || s == "DATETIME" => Self::Timestamp,
            s if s.starts_with("VARCHAR") => Self::Utf8,
            _ => Self::Other(type_name.trim().to_string()),
        }
    }

    /// Integer storage wider than the signed 64 bits cells are held in
    pub fn is_wide_integer(&self) -> bool {
        matches!(self, Self::Int128 | Self::UInt64 | Self::UInt128)
    }

    /// Whether a value may be stored in a column of this type
    pub fn accepts(&self, value: &Value) -> bool {
        match (self.classify(), value) {
            (_, Value::Null) => true,
            (TypeTag::Integer, Value::Integer(_)) => true,
            (TypeTag::Float, Value::Float(_)) => true,
            (TypeTag::Datetime, Value::Timestamp(_)) => matches!(self, Self::Timestamp),
            (TypeTag::Datetime, Value::Date(_)) => matches!(self, Self::Date),
            (TypeTag::Boolean, Value::Boolean(_)) => true,
            (TypeTag::String, Value::Text(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Int8 => write!(f, "TINYINT"),
            Self::Int16 => write!(f, "SMALLINT"),
            Self::Int32 => write!(f, "INTEGER"),
            Self::Int64 => write!(f, "BIGINT"),
            Self::Int128 => write!(f, "HUGEINT"),
            Self::UInt8 => write!(f, "UTINYINT"),
            Self::UInt16 => write!(f, "USMALLINT"),
            Self::UInt32 => write!(f, "UINTEGER"),
            Self::UInt64 => write!(f, "UBIGINT"),
            Self::UInt128 => write!(f, "UHUGEINT"),
            Self::Float32 => write!(f, "FLOAT"),
            Self::Float64 => write!(f, "DOUBLE"),
            Self::Decimal => write!(f, "DECIMAL"),
            Self::Date => write!(f, "DATE"),
            Self::Timestamp => write!(f, "TIMESTAMP"),
            Self::Utf8 => write!(f, "VARCHAR"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl Value {
    /// Null and NaN both count as missing
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    /// Display string used in reports; missing renders as an empty string
    pub fn display_string(&self) -> String {
        if self.is_missing() {
            return String::new();
        }
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Date(d) => write!(f, "{}", d),
            Value::Timestamp(ts) => write!(f, "{}", ts),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Float rendering shared by cells and aggregates: whole numbers keep one
/// fractional digit (`3.0`)
pub fn format_float(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{:.1}", x)
    } else {
        x.to_string()
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A named, typed column of values
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data_type: DataType,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            data_type,
            values,
        }
    }

    pub fn integers<T: Into<Value>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::typed(name, DataType::Int64, values)
    }

    pub fn floats<T: Into<Value>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::typed(name, DataType::Float64, values)
    }

    pub fn booleans<T: Into<Value>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::typed(name, DataType::Boolean, values)
    }

    pub fn timestamps<T: Into<Value>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::typed(name, DataType::Timestamp, values)
    }

    pub fn dates<T: Into<Value>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::typed(name, DataType::Date, values)
    }

    pub fn strings<T: Into<Value>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::typed(name, DataType::Utf8, values)
    }

    fn typed<T: Into<Value>>(name: impl Into<String>, data_type: DataType, values: Vec<T>) -> Self {
        Self::new(name, data_type, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Semantic type tag of this column
    pub fn type_tag(&self) -> TypeTag {
        self.data_type.classify()
    }
}

/// Name and storage type of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
    pub type_tag: TypeTag,
}

/// Ordered collection of equal-length, uniquely named columns
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, rejecting ragged columns, duplicate names and values
    /// that do not fit their column's storage type
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        let mut by_name = IndexMap::with_capacity(columns.len());

        for column in columns {
            if column.len() != row_count {
                return Err(DatasureError::invalid_input(format!(
                    "Column '{}' has {} values, expected {}",
                    column.name,
                    column.len(),
                    row_count
                )));
            }

            if let Some(row) = column.values.iter().position(|v| !column.data_type.accepts(v)) {
                return Err(DatasureError::invalid_input(format!(
                    "Column '{}' ({}) holds an incompatible value at row {}: {:?}",
                    column.name, column.data_type, row, column.values[row]
                )));
            }

            if by_name.contains_key(&column.name) {
                return Err(DatasureError::invalid_input(format!(
                    "Duplicate column name '{}'",
                    column.name
                )));
            }
            by_name.insert(column.name.clone(), column);
        }

        Ok(Self {
            columns: by_name,
            row_count,
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn descriptors(&self) -> Vec<ColumnDescriptor> {
        self.columns
            .values()
            .map(|c| ColumnDescriptor {
                name: c.name.clone(),
                data_type: c.data_type.to_string(),
                type_tag: c.type_tag(),
            })
            .collect()
    }
}
