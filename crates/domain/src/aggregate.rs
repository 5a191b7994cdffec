// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grouping and averaging helpers for chart series.
//!
//! Flat section rows (attendance, enrollment, finance) are grouped by
//! month-year and reduced to averages and sums for chart consumption.
//! Grouping does not sort; chart series are ordered downstream by
//! `(year, month)` via `ReportingPeriod`'s ordering.

use std::collections::HashMap;

/// A row carrying the reporting period it belongs to.
pub trait MonthlyRow {
    /// The calendar month (1-12).
    fn month(&self) -> u8;
    /// The calendar year.
    fn year(&self) -> i32;
}

/// The deterministic grouping key for a month-year pair.
#[must_use]
pub fn period_key(month: u8, year: i32) -> String {
    format!("{month}-{year}")
}

/// Groups flat rows by their month-year key.
///
/// # Arguments
///
/// * `rows` - The rows to group
///
/// # Returns
///
/// A mapping from `"{month}-{year}"` to the rows of that period, in
/// input order within each group.
#[must_use]
pub fn group_by_month<T: MonthlyRow>(rows: Vec<T>) -> HashMap<String, Vec<T>> {
    let mut groups: HashMap<String, Vec<T>> = HashMap::new();
    for row in rows {
        groups
            .entry(period_key(row.month(), row.year()))
            .or_default()
            .push(row);
    }
    groups
}

/// Computes the arithmetic mean of a field over a filtered subset.
///
/// Rounds half-up to the nearest integer. Returns 0 when the filtered
/// subset is empty - the division by zero is guarded explicitly so the
/// result is never undefined.
///
/// # Arguments
///
/// * `rows` - The rows to aggregate
/// * `predicate` - Selects the subset (e.g., student rows only)
/// * `field` - Extracts the value to average
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn average_by<T, P, F>(rows: &[T], predicate: P, field: F) -> i64
where
    P: Fn(&T) -> bool,
    F: Fn(&T) -> i64,
{
    let values: Vec<i64> = rows.iter().filter(|r| predicate(r)).map(field).collect();
    if values.is_empty() {
        return 0;
    }
    let sum: i64 = values.iter().sum();
    let mean = sum as f64 / values.len() as f64;
    mean.round() as i64
}

/// Sums a field across all rows, treating missing values as 0.
///
/// # Arguments
///
/// * `rows` - The rows to sum over
/// * `field` - Extracts the value, `None` counting as 0
#[must_use]
pub fn sum_by<T, F>(rows: &[T], field: F) -> i64
where
    F: Fn(&T) -> Option<i64>,
{
    rows.iter().map(|r| field(r).unwrap_or(0)).sum()
}
