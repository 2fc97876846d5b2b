//! Checkbox cells
//!
//! Booleans have no editor: the formatter toggles them directly.

use super::{mismatch, unreadable, CellTypeDef};
use crate::cell::{CellType, CellValue, StorageValue};
use crate::error::Result;

pub(super) static BOOLEAN: CellTypeDef = CellTypeDef {
    cell_type: CellType::Boolean,
    has_editor: false,
    validate: validate,
    serialize: serialize,
    deserialize: deserialize,
    export: export,
};

fn validate(value: &CellValue) -> bool {
    matches!(value, CellValue::Boolean(_))
}

fn serialize(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Boolean(b) => Ok(StorageValue::Bool(*b)),
        other => Err(mismatch(CellType::Boolean, other)),
    }
}

fn deserialize(storage: &StorageValue) -> Result<CellValue> {
    let b = match storage {
        StorageValue::Bool(b) => Some(*b),
        StorageValue::Number(n) => match n.as_f64() {
            Some(n) if n == 0.0 => Some(false),
            Some(n) if n == 1.0 => Some(true),
            _ => None,
        },
        StorageValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    b.map(CellValue::Boolean)
        .ok_or_else(|| unreadable(CellType::Boolean, storage))
}

fn export(value: &CellValue) -> String {
    match value {
        CellValue::Boolean(b) => b.to_string(),
        _ => String::new(),
    }
}
