//! Column retype validation
//!
//! Decides whether a column can change its cell type without losing data. The
//! check never modifies anything: a retype is applied whole or not at all by the
//! caller, once the report says it is safe.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::cell::{CellType, StorageValue};
use crate::column::ColumnDescriptor;
use crate::conversion::{self, Compatibility};
use crate::error::{Error, Result};
use crate::registry;
use crate::row::RowId;

/// Why a retype is unsafe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsafeReason {
    /// There is no conversion between the two types; every row is affected
    Incompatible { from: CellType, to: CellType },
    /// Some existing values do not fit the target type
    Conflict { to: CellType },
}

impl fmt::Display for UnsafeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsafeReason::Incompatible { from, to } => {
                write!(f, "type {from} cannot become type {to}")
            }
            UnsafeReason::Conflict { to } => {
                write!(f, "some values cannot be read as {to}")
            }
        }
    }
}

/// Outcome of a retype check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetypeReport {
    Safe {
        /// Set only for dependent conversions that pass but may surprise users
        warning: Option<&'static str>,
    },
    Unsafe {
        rows: BTreeSet<RowId>,
        reason: UnsafeReason,
    },
}

impl RetypeReport {
    pub fn is_safe(&self) -> bool {
        matches!(self, RetypeReport::Safe { .. })
    }

    /// Rows whose values would be lost, `None` when safe
    pub fn failed_rows(&self) -> Option<&BTreeSet<RowId>> {
        match self {
            RetypeReport::Unsafe { rows, .. } => Some(rows),
            RetypeReport::Safe { .. } => None,
        }
    }

    pub fn warning(&self) -> Option<&'static str> {
        match self {
            RetypeReport::Safe { warning } => *warning,
            RetypeReport::Unsafe { .. } => None,
        }
    }

    /// Turn an unsafe report into the matching error, keeping any warning on success
    pub fn into_result(self) -> Result<Option<&'static str>> {
        match self {
            RetypeReport::Safe { warning } => Ok(warning),
            RetypeReport::Unsafe {
                reason: UnsafeReason::Incompatible { from, to },
                ..
            } => Err(Error::IncompatibleType { from, to }),
            RetypeReport::Unsafe {
                rows,
                reason: UnsafeReason::Conflict { to },
            } => Err(Error::PartialRetypeConflict { to, rows }),
        }
    }
}

/// Check whether `column` can be retyped to `target` given all of its current values
pub fn check_retype(
    column: &ColumnDescriptor,
    target: CellType,
    values: &BTreeMap<RowId, StorageValue>,
) -> RetypeReport {
    check_retype_with(column, target, values, registry::accepts)
}

/// [`check_retype`] with a custom predicate deciding whether a stored value fits `target`
pub fn check_retype_with<F>(
    column: &ColumnDescriptor,
    target: CellType,
    values: &BTreeMap<RowId, StorageValue>,
    mut accepts: F,
) -> RetypeReport
where
    F: FnMut(CellType, &StorageValue) -> bool,
{
    let from = column.cell_type;
    if from == target {
        return RetypeReport::Safe { warning: None };
    }

    match conversion::compatibility(from, target) {
        Compatibility::None => {
            tracing::debug!(column = %column.key, %from, to = %target, "retype incompatible");
            RetypeReport::Unsafe {
                rows: values.keys().cloned().collect(),
                reason: UnsafeReason::Incompatible { from, to: target },
            }
        }
        Compatibility::Independent => {
            tracing::debug!(column = %column.key, %from, to = %target, "retype independent");
            RetypeReport::Safe { warning: None }
        }
        Compatibility::Dependent => {
            let failed: BTreeSet<RowId> = values
                .iter()
                .filter(|(id, value)| {
                    let ok = accepts(target, *value);
                    if !ok {
                        tracing::trace!(row = %id, %value, to = %target, "value does not fit");
                    }
                    !ok
                })
                .map(|(id, _)| id.clone())
                .collect();

            tracing::debug!(
                column = %column.key,
                %from,
                to = %target,
                scanned = values.len(),
                failed = failed.len(),
                "retype dependent"
            );

            if failed.is_empty() {
                RetypeReport::Safe {
                    warning: conversion::warning(from, target),
                }
            } else {
                RetypeReport::Unsafe {
                    rows: failed,
                    reason: UnsafeReason::Conflict { to: target },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn values(items: &[(i64, StorageValue)]) -> BTreeMap<RowId, StorageValue> {
        items
            .iter()
            .map(|(id, v)| (RowId::Int(*id), v.clone()))
            .collect()
    }

    #[test]
    fn test_string_to_number_reports_bad_row() {
        let column = ColumnDescriptor::new("a", CellType::String);
        let report = check_retype(
            &column,
            CellType::Number,
            &values(&[(1, json!("1")), (2, json!("2")), (3, json!("abc"))]),
        );
        assert_eq!(
            report,
            RetypeReport::Unsafe {
                rows: [RowId::Int(3)].into_iter().collect(),
                reason: UnsafeReason::Conflict {
                    to: CellType::Number
                },
            }
        );
    }

    #[test]
    fn test_text_with_trailing_word_is_not_a_number() {
        let column = ColumnDescriptor::new("a", CellType::String);
        let report = check_retype(
            &column,
            CellType::Number,
            &values(&[(1, json!("5 apples")), (2, json!("7.5 EUR")), (3, json!("5"))]),
        );
        assert_eq!(
            report.failed_rows(),
            Some(&[RowId::Int(1)].into_iter().collect())
        );
    }

    #[test]
    fn test_number_to_string_is_safe() {
        let column = ColumnDescriptor::new("n", CellType::Number);
        let report = check_retype(
            &column,
            CellType::String,
            &values(&[(1, json!(1)), (2, json!("garbage")), (3, json!({"x": 1}))]),
        );
        assert_eq!(report, RetypeReport::Safe { warning: None });
    }

    #[test]
    fn test_incompatible_reports_every_row() {
        let column = ColumnDescriptor::new("e", CellType::Email);
        let report = check_retype(
            &column,
            CellType::Number,
            &values(&[(1, json!("a@b.co")), (2, json!(null))]),
        );
        assert_eq!(
            report.failed_rows().unwrap().len(),
            2,
            "incompatible retypes affect all rows"
        );
        assert!(matches!(
            report.into_result(),
            Err(Error::IncompatibleType {
                from: CellType::Email,
                to: CellType::Number
            })
        ));
    }

    #[test]
    fn test_complex_is_never_retyped() {
        let column = ColumnDescriptor::new("c", CellType::Complex);
        let report = check_retype(&column, CellType::String, &BTreeMap::new());
        assert!(!report.is_safe());
    }

    #[test]
    fn test_blank_values_do_not_block() {
        let column = ColumnDescriptor::new("a", CellType::String);
        let report = check_retype(
            &column,
            CellType::Date,
            &values(&[(1, json!("2024-01-31")), (2, json!("")), (3, json!(null))]),
        );
        assert!(report.is_safe());
    }

    #[test]
    fn test_dependent_warning_is_attached() {
        let column = ColumnDescriptor::new("a", CellType::String);
        let report = check_retype(
            &column,
            CellType::MultiSelect,
            &values(&[(1, json!("a, b"))]),
        );
        assert!(report.is_safe());
        assert!(report.warning().unwrap().contains("split"));
    }

    #[test]
    fn test_conflict_into_result() {
        let column = ColumnDescriptor::new("p", CellType::Number);
        let err = check_retype(&column, CellType::Percentage, &values(&[(4, json!(140))]))
            .into_result()
            .unwrap_err();
        match err {
            Error::PartialRetypeConflict { to, rows } => {
                assert_eq!(to, CellType::Percentage);
                assert_eq!(rows, [RowId::Int(4)].into_iter().collect());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_type_is_safe_without_scan() {
        let column = ColumnDescriptor::new("a", CellType::String);
        let mut calls = 0;
        let report = check_retype_with(
            &column,
            CellType::String,
            &values(&[(1, json!("x"))]),
            |_, _| {
                calls += 1;
                false
            },
        );
        assert!(report.is_safe());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_independent_never_validates() {
        let column = ColumnDescriptor::new("n", CellType::Number);
        for n in [0i64, 10_000] {
            let rows: BTreeMap<_, _> = (0..n).map(|i| (RowId::Int(i), json!(i))).collect();
            let mut calls = 0;
            let report = check_retype_with(&column, CellType::String, &rows, |_, _| {
                calls += 1;
                false
            });
            assert!(report.is_safe());
            assert_eq!(calls, 0);
        }
    }

    proptest! {
        #[test]
        fn prop_single_bad_value_is_reported_alone(
            good in proptest::collection::vec(-1_000_000i64..1_000_000, 0..50),
            bad_at in any::<prop::sample::Index>(),
        ) {
            let column = ColumnDescriptor::new("a", CellType::String);
            let mut rows: BTreeMap<RowId, StorageValue> = good
                .iter()
                .enumerate()
                .map(|(i, n)| (RowId::Int(i as i64), json!(n.to_string())))
                .collect();
            let bad_id = RowId::Int(bad_at.index(good.len() + 1) as i64);
            rows.insert(bad_id.clone(), json!("not a number"));

            let report = check_retype(&column, CellType::Number, &rows);
            let expected: BTreeSet<RowId> = [bad_id].into_iter().collect();
            prop_assert_eq!(report.failed_rows(), Some(&expected));
        }
    }
}
