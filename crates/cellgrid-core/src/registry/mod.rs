//! Cell type registry
//!
//! Every [`CellType`] has exactly one [`CellTypeDef`] describing how its values are
//! validated, moved between rich and storage form, exported as text, and whether an
//! editor exists for it. The definitions are plain `static` data; dispatch is an
//! exhaustive `match` on the cell type so a new variant cannot be added without a
//! definition.
//!
//! Blank values (`null` and `""`) are never handed to a definition: the row pipeline
//! passes them through, and [`export`] renders them as an empty string.

mod boolean;
mod complex;
mod numeric;
mod select;
mod temporal;
mod text;
mod web;

use crate::cell::{is_blank, CellType, CellValue, StorageValue};
use crate::error::{Error, Result};

/// Validation predicate for rich values
pub type ValidateFn = fn(&CellValue) -> bool;
/// Rich to storage conversion, only called with values that passed validation
pub type SerializeFn = fn(&CellValue) -> Result<StorageValue>;
/// Storage to rich conversion, never called with blank storage values
pub type DeserializeFn = fn(&StorageValue) -> Result<CellValue>;
/// Text rendering for clipboard/CSV, only called with values that passed validation
pub type ExportFn = fn(&CellValue) -> String;

/// Behavior of a single cell type
pub struct CellTypeDef {
    pub cell_type: CellType,
    /// Whether cells of this type can be edited in place.
    /// Types without an editor make their columns read-only.
    pub has_editor: bool,
    pub validate: ValidateFn,
    pub serialize: SerializeFn,
    pub deserialize: DeserializeFn,
    pub export: ExportFn,
}

/// Look up the definition of a cell type
pub fn def(cell_type: CellType) -> &'static CellTypeDef {
    match cell_type {
        CellType::String => &text::STRING,
        CellType::Number => &numeric::NUMBER,
        CellType::Percentage => &numeric::PERCENTAGE,
        CellType::Currency => &numeric::CURRENCY,
        CellType::Boolean => &boolean::BOOLEAN,
        CellType::Date => &temporal::DATE,
        CellType::DateTime => &temporal::DATE_TIME,
        CellType::Time => &temporal::TIME,
        CellType::Avatar => &web::AVATAR,
        CellType::Link => &web::LINK,
        CellType::Email => &web::EMAIL,
        CellType::Select => &select::SELECT,
        CellType::MultiSelect => &select::MULTI_SELECT,
        CellType::Complex => &complex::COMPLEX,
    }
}

/// Check whether a rich value is a valid value of `cell_type`
pub fn validate(cell_type: CellType, value: &CellValue) -> bool {
    (def(cell_type).validate)(value)
}

/// Convert a rich value to its storage form
pub fn serialize(cell_type: CellType, value: &CellValue) -> Result<StorageValue> {
    let def = def(cell_type);
    if !(def.validate)(value) {
        return Err(Error::validation(
            cell_type,
            format!("{} value is not accepted", value.type_name()),
        ));
    }
    (def.serialize)(value)
}

/// Convert a stored value to its rich form
pub fn deserialize(cell_type: CellType, storage: &StorageValue) -> Result<CellValue> {
    (def(cell_type).deserialize)(storage)
}

/// Render a value as text for clipboard or CSV output.
///
/// Never fails: blank values, raw values and values invalid for `cell_type`
/// export as an empty string.
pub fn export(cell_type: CellType, value: &CellValue) -> String {
    let def = def(cell_type);
    if value.is_blank() || !(def.validate)(value) {
        return String::new();
    }
    (def.export)(value)
}

/// Check whether a stored value can be read as a valid value of `cell_type`.
///
/// Blank values are always accepted.
pub fn accepts(cell_type: CellType, storage: &StorageValue) -> bool {
    if is_blank(storage) {
        return true;
    }
    let def = def(cell_type);
    match (def.deserialize)(storage) {
        Ok(value) => (def.validate)(&value),
        Err(_) => false,
    }
}

/// Whether cells of `cell_type` can be edited in place
pub fn has_editor(cell_type: CellType) -> bool {
    def(cell_type).has_editor
}

fn mismatch(cell_type: CellType, value: &CellValue) -> Error {
    Error::validation(cell_type, format!("cannot hold a {} value", value.type_name()))
}

fn unreadable(cell_type: CellType, storage: &StorageValue) -> Error {
    Error::validation(cell_type, format!("cannot read stored value {storage}"))
}
