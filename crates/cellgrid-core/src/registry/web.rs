//! Link, avatar and email cells

use lazy_regex::regex_is_match;

use super::{mismatch, unreadable, CellTypeDef};
use crate::cell::{CellType, CellValue, StorageValue};
use crate::error::Result;

pub(super) static AVATAR: CellTypeDef = CellTypeDef {
    cell_type: CellType::Avatar,
    has_editor: true,
    validate: validate_avatar,
    serialize: serialize,
    deserialize: deserialize_avatar,
    export: export,
};

pub(super) static LINK: CellTypeDef = CellTypeDef {
    cell_type: CellType::Link,
    has_editor: true,
    validate: validate_link,
    serialize: serialize,
    deserialize: deserialize_link,
    export: export,
};

pub(super) static EMAIL: CellTypeDef = CellTypeDef {
    cell_type: CellType::Email,
    has_editor: true,
    validate: validate_email,
    serialize: serialize,
    deserialize: deserialize_email,
    export: export,
};

fn is_url(s: &str) -> bool {
    regex_is_match!(r"^(?i)https?://[^\s/?#]+[^\s]*$", s)
}

fn is_email(s: &str) -> bool {
    regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", s)
}

fn validate_avatar(value: &CellValue) -> bool {
    matches!(value, CellValue::Avatar(s) if is_url(s) || s.starts_with("data:image/"))
}

fn validate_link(value: &CellValue) -> bool {
    matches!(value, CellValue::Link(s) if is_url(s))
}

fn validate_email(value: &CellValue) -> bool {
    matches!(value, CellValue::Email(s) if is_email(s))
}

fn serialize(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Avatar(s) | CellValue::Link(s) | CellValue::Email(s) => {
            Ok(StorageValue::String(s.clone()))
        }
        other => Err(mismatch(CellType::Link, other)),
    }
}

fn read_text(cell_type: CellType, storage: &StorageValue) -> Result<String> {
    storage
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| unreadable(cell_type, storage))
}

fn deserialize_avatar(storage: &StorageValue) -> Result<CellValue> {
    read_text(CellType::Avatar, storage).map(CellValue::Avatar)
}

fn deserialize_link(storage: &StorageValue) -> Result<CellValue> {
    read_text(CellType::Link, storage).map(CellValue::Link)
}

fn deserialize_email(storage: &StorageValue) -> Result<CellValue> {
    read_text(CellType::Email, storage).map(CellValue::Email)
}

fn export(value: &CellValue) -> String {
    match value {
        CellValue::Avatar(s) | CellValue::Link(s) | CellValue::Email(s) => s.clone(),
        _ => String::new(),
    }
}
