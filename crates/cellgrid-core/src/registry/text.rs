//! Plain text cells

use super::{mismatch, unreadable, CellTypeDef};
use crate::cell::{CellType, CellValue, StorageValue};
use crate::error::Result;

pub(super) static STRING: CellTypeDef = CellTypeDef {
    cell_type: CellType::String,
    has_editor: true,
    validate: validate,
    serialize: serialize,
    deserialize: deserialize,
    export: export,
};

fn validate(value: &CellValue) -> bool {
    matches!(value, CellValue::String(_))
}

fn serialize(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::String(s) => Ok(StorageValue::String(s.clone())),
        other => Err(mismatch(CellType::String, other)),
    }
}

/// Text reads the storage form of every type that converts to it without a scan
fn deserialize(storage: &StorageValue) -> Result<CellValue> {
    let text = match storage {
        StorageValue::String(s) => s.clone(),
        StorageValue::Number(n) => n.to_string(),
        StorageValue::Bool(b) => b.to_string(),
        // Multi-select labels
        StorageValue::Array(items) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(|| unreadable(CellType::String, storage)))
            .collect::<Result<Vec<_>>>()?
            .join(", "),
        StorageValue::Null | StorageValue::Object(_) => {
            return Err(unreadable(CellType::String, storage))
        }
    };
    Ok(CellValue::String(text))
}

fn export(value: &CellValue) -> String {
    match value {
        CellValue::String(s) => s.clone(),
        _ => String::new(),
    }
}
