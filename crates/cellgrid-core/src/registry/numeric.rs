//! Number, percentage and currency cells

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::{mismatch, unreadable, CellTypeDef};
use crate::cell::{CellType, CellValue, Money, StorageValue, DEFAULT_CURRENCY};
use crate::error::Result;

pub(super) static NUMBER: CellTypeDef = CellTypeDef {
    cell_type: CellType::Number,
    has_editor: true,
    validate: validate_number,
    serialize: serialize_number,
    deserialize: deserialize_number,
    export: export_number,
};

pub(super) static PERCENTAGE: CellTypeDef = CellTypeDef {
    cell_type: CellType::Percentage,
    has_editor: true,
    validate: validate_percentage,
    serialize: serialize_percentage,
    deserialize: deserialize_percentage,
    export: export_percentage,
};

pub(super) static CURRENCY: CellTypeDef = CellTypeDef {
    cell_type: CellType::Currency,
    has_editor: true,
    validate: validate_currency,
    serialize: serialize_currency,
    deserialize: deserialize_currency,
    export: export_currency,
};

fn validate_number(value: &CellValue) -> bool {
    matches!(value, CellValue::Number(n) if n.is_finite())
}

fn serialize_number(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Number(n) => to_json_number(CellType::Number, *n, value),
        other => Err(mismatch(CellType::Number, other)),
    }
}

fn deserialize_number(storage: &StorageValue) -> Result<CellValue> {
    let n = match storage {
        StorageValue::Number(n) => n.as_f64(),
        StorageValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        // Currency storage ("12.50 USD") reads as its amount
        StorageValue::String(s) => parse_f64(s).or_else(|| {
            parse_money(s)
                .filter(Money::has_valid_code)?
                .amount
                .to_f64()
        }),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() => Ok(CellValue::Number(n)),
        _ => Err(unreadable(CellType::Number, storage)),
    }
}

fn export_number(value: &CellValue) -> String {
    match value {
        CellValue::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Percentages are bounded to `0..=100` here, for every caller
fn validate_percentage(value: &CellValue) -> bool {
    matches!(value, CellValue::Percentage(p) if p.is_finite() && (0.0..=100.0).contains(p))
}

fn serialize_percentage(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Percentage(p) => to_json_number(CellType::Percentage, *p, value),
        other => Err(mismatch(CellType::Percentage, other)),
    }
}

fn deserialize_percentage(storage: &StorageValue) -> Result<CellValue> {
    let p = match storage {
        StorageValue::Number(n) => n.as_f64(),
        StorageValue::String(s) => parse_f64(s.trim().trim_end_matches('%')),
        _ => None,
    };
    match p {
        Some(p) if p.is_finite() => Ok(CellValue::Percentage(p)),
        _ => Err(unreadable(CellType::Percentage, storage)),
    }
}

fn export_percentage(value: &CellValue) -> String {
    match value {
        CellValue::Percentage(p) => format!("{p}%"),
        _ => String::new(),
    }
}

fn validate_currency(value: &CellValue) -> bool {
    matches!(value, CellValue::Currency(m) if m.has_valid_code())
}

fn serialize_currency(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Currency(m) => Ok(StorageValue::String(m.to_string())),
        other => Err(mismatch(CellType::Currency, other)),
    }
}

fn deserialize_currency(storage: &StorageValue) -> Result<CellValue> {
    let money = match storage {
        StorageValue::Number(n) => {
            let amount = match n.as_i64() {
                Some(i) => Some(Decimal::from(i)),
                None => n.as_f64().and_then(Decimal::from_f64),
            };
            amount.map(|a| Money::new(a, DEFAULT_CURRENCY))
        }
        StorageValue::String(s) => parse_money(s),
        _ => None,
    };
    money
        .map(CellValue::Currency)
        .ok_or_else(|| unreadable(CellType::Currency, storage))
}

fn export_currency(value: &CellValue) -> String {
    match value {
        CellValue::Currency(m) => m.to_string(),
        _ => String::new(),
    }
}

fn to_json_number(cell_type: CellType, n: f64, value: &CellValue) -> Result<StorageValue> {
    serde_json::Number::from_f64(n)
        .map(StorageValue::Number)
        .ok_or_else(|| mismatch(cell_type, value))
}

/// Parse a finite float, rejecting `inf`/`NaN` spellings
fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse `"<amount>"` or `"<amount> <CODE>"`
fn parse_money(s: &str) -> Option<Money> {
    let mut parts = s.split_whitespace();
    let amount = Decimal::from_str(parts.next()?).ok()?;
    let code = parts.next().unwrap_or(DEFAULT_CURRENCY);
    if parts.next().is_some() {
        return None;
    }
    Some(Money::new(amount, code))
}
