// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering of per-school submission statuses.

use edu_report_domain::ReportingPeriod;

use crate::error::ApiError;
use crate::request_response::SchoolStatusRow;

/// Renders the per-school status rows for one period as CSV.
///
/// Columns: `school_id,school_name,month,year,status`. Rows are
/// emitted in input order.
///
/// # Errors
///
/// Returns an error if CSV serialization fails.
pub fn render_statuses_csv(
    period: ReportingPeriod,
    rows: &[SchoolStatusRow],
) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["school_id", "school_name", "month", "year", "status"])
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to write CSV header: {e}"),
        })?;

    for row in rows {
        writer
            .write_record([
                row.school_id.to_string(),
                row.school_name.clone(),
                period.month().to_string(),
                period.year().to_string(),
                row.status.clone(),
            ])
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to write CSV row: {e}"),
            })?;
    }

    let bytes = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to flush CSV: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV output was not UTF-8: {e}"),
    })
}
