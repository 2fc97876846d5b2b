//! Select and multi-select cells
//!
//! Option labels are non-blank, trimmed and never contain a comma, so a comma separated
//! list of labels splits back into the same labels.

use std::collections::HashSet;

use super::{mismatch, unreadable, CellTypeDef};
use crate::cell::{CellType, CellValue, StorageValue};
use crate::error::Result;

pub(super) static SELECT: CellTypeDef = CellTypeDef {
    cell_type: CellType::Select,
    has_editor: true,
    validate: validate_select,
    serialize: serialize_select,
    deserialize: deserialize_select,
    export: export_select,
};

pub(super) static MULTI_SELECT: CellTypeDef = CellTypeDef {
    cell_type: CellType::MultiSelect,
    has_editor: true,
    validate: validate_multi_select,
    serialize: serialize_multi_select,
    deserialize: deserialize_multi_select,
    export: export_multi_select,
};

/// Labels carry no surrounding whitespace, which comma separated text would lose
fn is_label(s: &str) -> bool {
    !s.is_empty() && s.trim() == s && !s.contains([',', '\n', '\r'])
}

fn validate_select(value: &CellValue) -> bool {
    matches!(value, CellValue::Select(s) if is_label(s))
}

fn serialize_select(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Select(s) => Ok(StorageValue::String(s.clone())),
        other => Err(mismatch(CellType::Select, other)),
    }
}

/// Also reads a multi-select holding exactly one label
fn deserialize_select(storage: &StorageValue) -> Result<CellValue> {
    match storage {
        StorageValue::String(s) => Ok(CellValue::Select(s.clone())),
        StorageValue::Array(items) => match items.as_slice() {
            [StorageValue::String(s)] => Ok(CellValue::Select(s.clone())),
            _ => Err(unreadable(CellType::Select, storage)),
        },
        _ => Err(unreadable(CellType::Select, storage)),
    }
}

fn export_select(value: &CellValue) -> String {
    match value {
        CellValue::Select(s) => s.clone(),
        _ => String::new(),
    }
}

fn validate_multi_select(value: &CellValue) -> bool {
    match value {
        CellValue::MultiSelect(items) => {
            let mut seen = HashSet::with_capacity(items.len());
            items.iter().all(|s| is_label(s) && seen.insert(s.as_str()))
        }
        _ => false,
    }
}

fn serialize_multi_select(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::MultiSelect(items) => Ok(StorageValue::Array(
            items.iter().cloned().map(StorageValue::String).collect(),
        )),
        other => Err(mismatch(CellType::MultiSelect, other)),
    }
}

/// Reads a label array, or comma separated text (a single select label included)
fn deserialize_multi_select(storage: &StorageValue) -> Result<CellValue> {
    match storage {
        StorageValue::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| unreadable(CellType::MultiSelect, storage))
            })
            .collect::<Result<Vec<_>>>()
            .map(CellValue::MultiSelect),
        StorageValue::String(s) => Ok(CellValue::MultiSelect(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        _ => Err(unreadable(CellType::MultiSelect, storage)),
    }
}

fn export_multi_select(value: &CellValue) -> String {
    match value {
        CellValue::MultiSelect(items) => items.join(", "),
        _ => String::new(),
    }
}
