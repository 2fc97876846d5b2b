//! Row types
//!
//! A row maps column keys to values and carries two reserved keys: `_id`, the
//! row's identity, and `index`, its display position. Both are supplied by
//! internal columns (see [`crate::hoist`]).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::{CellValue, StorageValue};

/// Reserved row key holding the row identity
pub const ID_KEY: &str = "_id";

/// Reserved row key holding the display position
pub const INDEX_KEY: &str = "index";

/// Row identity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl RowId {
    /// Read a row id from a stored value: integers and non-empty strings qualify
    pub fn from_storage(value: &StorageValue) -> Option<Self> {
        match value {
            StorageValue::Number(_) => integer(value).map(RowId::Int),
            StorageValue::String(s) if !s.is_empty() => Some(RowId::Text(s.clone())),
            _ => None,
        }
    }
}

/// Read a stored number as an integer. Whole floats such as `3.0` qualify, since
/// number cells are stored as floats.
pub fn integer(value: &StorageValue) -> Option<i64> {
    let StorageValue::Number(n) = value else {
        return None;
    };
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{n}"),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Int(n)
    }
}

impl From<i32> for RowId {
    fn from(n: i32) -> Self {
        RowId::Int(n.into())
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Text(s)
    }
}

/// A row of cells of type `V`
///
/// Serialized as a flat object: `{"_id": .., "index": .., "<key>": <value>, ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "V: Serialize", deserialize = "V: Deserialize<'de>"))]
pub struct Row<V> {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    #[serde(flatten)]
    pub cells: BTreeMap<String, V>,
}

/// A row as returned by the view store
pub type StorageRow = Row<StorageValue>;

/// A row of rich values
pub type CellRow = Row<CellValue>;

impl<V> Default for Row<V> {
    fn default() -> Self {
        Self {
            id: None,
            index: None,
            cells: BTreeMap::new(),
        }
    }
}

impl<V> Row<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row identity
    pub fn with_id<I: Into<RowId>>(mut self, id: I) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the display position
    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    /// Set a cell
    pub fn with_cell<K: Into<String>, T: Into<V>>(mut self, key: K, value: T) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    /// Get a cell by column key
    pub fn get(&self, key: &str) -> Option<&V> {
        self.cells.get(key)
    }

    /// Set a cell, returning the previous value
    pub fn set<K: Into<String>>(&mut self, key: K, value: V) -> Option<V> {
        self.cells.insert(key.into(), value)
    }

    /// Number of cells, reserved keys excluded
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Row<StorageValue> {
    /// Build a storage row from a JSON object, reading the reserved keys when present
    pub fn from_json(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}
