//! Cell-related types
//!
//! This module contains:
//! - [`CellType`] - The logical type (brand) of a column's values
//! - [`CellValue`] - The rich, in-memory form of a cell
//! - [`Money`] - The representation of currency cells
//! - [`StorageValue`] - The physical payload exchanged with the view store

mod cell_type;
mod value;

pub use cell_type::CellType;
pub use value::{CellValue, Money, DEFAULT_CURRENCY};

/// Physical representation of a cell as stored by the view store
pub type StorageValue = serde_json::Value;

/// Check whether a stored value is blank (`null` or `""`).
///
/// Blank values bypass every cell type's serializer and deserializer.
pub fn is_blank(value: &StorageValue) -> bool {
    match value {
        StorageValue::Null => true,
        StorageValue::String(s) => s.is_empty(),
        _ => false,
    }
}
