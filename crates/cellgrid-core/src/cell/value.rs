//! Cell value types

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;

use super::{CellType, StorageValue};

/// Currency code assumed when a stored amount carries no code
pub const DEFAULT_CURRENCY: &str = "USD";

/// Represents the rich value of a cell
///
/// Every variant except the blank ones (`Empty`, `Blank`) and `Raw` is owned by
/// exactly one [`CellType`], see [`CellValue::owner`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// No value (stored `null` or missing key)
    Empty,

    /// Empty text (stored `""`)
    Blank,

    /// A stored value that could not be read as its column's type.
    /// Carried untouched so that it is written back as it was found.
    Raw(StorageValue),

    String(String),

    /// Finite floating point number
    Number(f64),

    /// Percentage in the `0..=100` range
    Percentage(f64),

    Currency(Money),

    Boolean(bool),

    Date(NaiveDate),

    DateTime(DateTime<Utc>),

    Time(NaiveTime),

    /// Image URL
    Avatar(String),

    /// URL
    Link(String),

    Email(String),

    /// Single option label
    Select(String),

    /// Option labels, in display order
    MultiSelect(Vec<String>),

    /// Arbitrary structured data
    Complex(serde_json::Value),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Create a new currency value
    pub fn currency<S: Into<String>>(amount: Decimal, code: S) -> Self {
        CellValue::Currency(Money::new(amount, code))
    }

    /// Check if the cell is blank (`Empty` or `Blank`)
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Empty | CellValue::Blank)
    }

    /// The cell type that owns this value's representation.
    ///
    /// Returns `None` for blank and raw values.
    pub fn owner(&self) -> Option<CellType> {
        Some(match self {
            CellValue::Empty | CellValue::Blank | CellValue::Raw(_) => return None,
            CellValue::String(_) => CellType::String,
            CellValue::Number(_) => CellType::Number,
            CellValue::Percentage(_) => CellType::Percentage,
            CellValue::Currency(_) => CellType::Currency,
            CellValue::Boolean(_) => CellType::Boolean,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
            CellValue::Time(_) => CellType::Time,
            CellValue::Avatar(_) => CellType::Avatar,
            CellValue::Link(_) => CellType::Link,
            CellValue::Email(_) => CellType::Email,
            CellValue::Select(_) => CellType::Select,
            CellValue::MultiSelect(_) => CellType::MultiSelect,
            CellValue::Complex(_) => CellType::Complex,
        })
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Blank => "blank",
            CellValue::Raw(_) => "raw",
            other => other.owner().map(|t| t.as_str()).unwrap_or("raw"),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<Money> for CellValue {
    fn from(m: Money) -> Self {
        CellValue::Currency(m)
    }
}

/// A decimal amount in a given currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    pub amount: Decimal,
    /// ISO 4217 code, e.g. `EUR`
    pub currency: String,
}

impl Money {
    pub fn new<S: Into<String>>(amount: Decimal, currency: S) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Check that the currency code is three uppercase ASCII letters
    pub fn has_valid_code(&self) -> bool {
        self.currency.len() == 3 && self.currency.bytes().all(|b| b.is_ascii_uppercase())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
