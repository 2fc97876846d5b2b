//! Date, date-time and time cells
//!
//! None of these types has an editor: values are committed through their
//! formatter's picker.

use std::ops::RangeInclusive;

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

use super::{mismatch, unreadable, CellTypeDef};
use crate::cell::{CellType, CellValue, StorageValue};
use crate::error::Result;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const NAIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Years that `%Y` and RFC 3339 both write as four digits and read back
const YEARS: RangeInclusive<i32> = 0..=9999;

pub(super) static DATE: CellTypeDef = CellTypeDef {
    cell_type: CellType::Date,
    has_editor: false,
    validate: validate_date,
    serialize: serialize_date,
    deserialize: deserialize_date,
    export: export_date,
};

pub(super) static DATE_TIME: CellTypeDef = CellTypeDef {
    cell_type: CellType::DateTime,
    has_editor: false,
    validate: validate_date_time,
    serialize: serialize_date_time,
    deserialize: deserialize_date_time,
    export: export_date_time,
};

pub(super) static TIME: CellTypeDef = CellTypeDef {
    cell_type: CellType::Time,
    has_editor: false,
    validate: validate_time,
    serialize: serialize_time,
    deserialize: deserialize_time,
    export: export_time,
};

fn validate_date(value: &CellValue) -> bool {
    matches!(value, CellValue::Date(d) if YEARS.contains(&d.year()))
}

fn serialize_date(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Date(d) => Ok(StorageValue::String(d.format(DATE_FORMAT).to_string())),
        other => Err(mismatch(CellType::Date, other)),
    }
}

/// Dates also read date-times that fall exactly on midnight UTC
fn deserialize_date(storage: &StorageValue) -> Result<CellValue> {
    let s = storage
        .as_str()
        .ok_or_else(|| unreadable(CellType::Date, storage))?;
    if let Ok(d) = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT) {
        return Ok(CellValue::Date(d));
    }
    match parse_date_time(s) {
        Some(dt) if dt.time() == NaiveTime::MIN => Ok(CellValue::Date(dt.date_naive())),
        _ => Err(unreadable(CellType::Date, storage)),
    }
}

fn export_date(value: &CellValue) -> String {
    match value {
        CellValue::Date(d) => d.format(DATE_FORMAT).to_string(),
        _ => String::new(),
    }
}

fn validate_date_time(value: &CellValue) -> bool {
    matches!(value, CellValue::DateTime(dt) if YEARS.contains(&dt.year()))
}

fn serialize_date_time(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::DateTime(dt) => Ok(StorageValue::String(format_date_time(dt))),
        other => Err(mismatch(CellType::DateTime, other)),
    }
}

/// Date-times also read plain dates, as midnight UTC
fn deserialize_date_time(storage: &StorageValue) -> Result<CellValue> {
    let s = storage
        .as_str()
        .ok_or_else(|| unreadable(CellType::DateTime, storage))?;
    if let Some(dt) = parse_date_time(s) {
        return Ok(CellValue::DateTime(dt));
    }
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map(|d| CellValue::DateTime(Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN))))
        .map_err(|_| unreadable(CellType::DateTime, storage))
}

fn export_date_time(value: &CellValue) -> String {
    match value {
        CellValue::DateTime(dt) => format_date_time(dt),
        _ => String::new(),
    }
}

fn validate_time(value: &CellValue) -> bool {
    matches!(value, CellValue::Time(_))
}

fn serialize_time(value: &CellValue) -> Result<StorageValue> {
    match value {
        CellValue::Time(t) => Ok(StorageValue::String(t.format(TIME_FORMAT).to_string())),
        other => Err(mismatch(CellType::Time, other)),
    }
}

fn deserialize_time(storage: &StorageValue) -> Result<CellValue> {
    let s = storage
        .as_str()
        .map(str::trim)
        .ok_or_else(|| unreadable(CellType::Time, storage))?;
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map(CellValue::Time)
        .map_err(|_| unreadable(CellType::Time, storage))
}

fn export_time(value: &CellValue) -> String {
    match value {
        CellValue::Time(t) => t.format(TIME_FORMAT).to_string(),
        _ => String::new(),
    }
}

fn format_date_time(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// RFC 3339 with any offset, or a naive `YYYY-MM-DD HH:MM:SS` taken as UTC
fn parse_date_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, NAIVE_DATE_TIME_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
