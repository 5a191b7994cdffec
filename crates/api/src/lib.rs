// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API layer for the education reporting system.
//!
//! Sits between the HTTP server and the persistence layer: session
//! authentication, role-based authorization with school and region
//! scoping, the report lifecycle, dashboards, chart series, overdue
//! reminders, the cached schools overview, and the CSV export.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod cache;
pub mod csv_export;
pub mod error;
pub mod handlers;
pub mod permissions;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, Role};
pub use cache::TtlCache;
pub use error::{ApiError, AuthError};
pub use permissions::{Operation, authorize, is_allowed};
