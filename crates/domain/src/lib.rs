// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregate;
mod error;
mod period;
mod status;

pub use aggregate::{MonthlyRow, average_by, group_by_month, period_key, sum_by};
pub use error::DomainError;
pub use period::{ReportingPeriod, current_reporting_period, due_date, missing_periods};
pub use status::{ReportStatus, SubmissionStatus, classify};
