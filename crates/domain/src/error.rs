// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Month value is outside 1..=12.
    InvalidMonth(u8),
    /// Report status string is not recognized.
    InvalidReportStatus(String),
    /// A report in a terminal state was asked to transition.
    ReportNotDraft {
        /// The actual status of the report.
        status: String,
    },
    /// Date construction or arithmetic failed.
    InvalidDate {
        /// Description of the failing operation.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::InvalidReportStatus(status) => {
                write!(f, "Invalid report status: {status}")
            }
            Self::ReportNotDraft { status } => {
                write!(f, "Report is {status} and can no longer be modified")
            }
            Self::InvalidDate { reason } => write!(f, "Invalid date: {reason}"),
        }
    }
}

impl std::error::Error for DomainError {}
