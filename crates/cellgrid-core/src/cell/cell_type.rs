//! Cell type brands

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Logical type of a column's values, independent of the SQL storage type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    String,
    Number,
    Percentage,
    Currency,
    Boolean,
    Date,
    DateTime,
    Time,
    Avatar,
    Link,
    Email,
    Select,
    MultiSelect,
    Complex,
}

impl CellType {
    /// Number of cell types
    pub const COUNT: usize = 14;

    /// All cell types, in declaration order
    pub const ALL: [CellType; Self::COUNT] = [
        CellType::String,
        CellType::Number,
        CellType::Percentage,
        CellType::Currency,
        CellType::Boolean,
        CellType::Date,
        CellType::DateTime,
        CellType::Time,
        CellType::Avatar,
        CellType::Link,
        CellType::Email,
        CellType::Select,
        CellType::MultiSelect,
        CellType::Complex,
    ];

    /// Position of this type in [`CellType::ALL`]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Brand name used in column metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            CellType::String => "string",
            CellType::Number => "number",
            CellType::Percentage => "percentage",
            CellType::Currency => "currency",
            CellType::Boolean => "boolean",
            CellType::Date => "date",
            CellType::DateTime => "date_time",
            CellType::Time => "time",
            CellType::Avatar => "avatar",
            CellType::Link => "link",
            CellType::Email => "email",
            CellType::Select => "select",
            CellType::MultiSelect => "multi_select",
            CellType::Complex => "complex",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CellType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        CellType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| Error::UnknownCellType(s.to_string()))
    }
}
