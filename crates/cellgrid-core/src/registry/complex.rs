//! Structured JSON cells

use super::{mismatch, CellTypeDef};
use crate::cell::{CellType, CellValue, StorageValue};
use crate::error::Result;

pub(super) static COMPLEX: CellTypeDef = CellTypeDef {
    cell_type: CellType::Complex,
    has_editor: false,
    validate: validate,
    serialize: serialize,
    deserialize: deserialize,
    export: export,
};

fn validate(value: &CellValue) -> bool {
    matches!(value, CellValue::Complex(_))
}

fn serialize(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Complex(v) => Ok(v.clone()),
        other => Err(mismatch(CellType::Complex, other)),
    }
}

fn deserialize(storage: &StorageValue) -> Result<CellValue> {
    Ok(CellValue::Complex(storage.clone()))
}

fn export(value: &CellValue) -> String {
    match value {
        CellValue::Complex(v) => serde_json::to_string(v).unwrap_or_default(),
        _ => String::new(),
    }
}
