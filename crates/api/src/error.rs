// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use edu_report_domain::DomainError;
use edu_report_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The operation that was attempted.
        operation: String,
        /// The reason permission was denied.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { operation, reason } => {
                write!(f, "Unauthorized: '{operation}': {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent
/// the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The operation that was attempted.
        operation: String,
        /// The reason permission was denied.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { operation, reason } => {
                write!(f, "Unauthorized: '{operation}': {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { operation, reason } => {
                Self::Unauthorized { operation, reason }
            }
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidMonth(month) => ApiError::InvalidInput {
            field: String::from("month"),
            message: format!("Invalid month: {month}. Must be between 1 and 12"),
        },
        DomainError::InvalidReportStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid report status: {status}"),
        },
        DomainError::ReportNotDraft { status } => ApiError::DomainRuleViolation {
            rule: String::from("draft_only"),
            message: format!("Report is {status}; only draft reports can be modified"),
        },
        DomainError::InvalidDate { reason } => ApiError::InvalidInput {
            field: String::from("date"),
            message: reason,
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Duplicate-report violations surface as a distinct domain rule so
/// callers can tell "already exists" apart from "not found". Storage
/// failures are logged by the caller and surfaced generically.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateReport {
            school_id,
            month,
            year,
        } => ApiError::DomainRuleViolation {
            rule: String::from("unique_report"),
            message: format!(
                "A report already exists for school {school_id} in period {month}-{year}"
            ),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Report"),
            message: msg,
        },
        PersistenceError::AccountNotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Account"),
            message: msg,
        },
        PersistenceError::SessionNotFound(msg) | PersistenceError::SessionExpired(msg) => {
            ApiError::AuthenticationFailed { reason: msg }
        }
        _ => ApiError::Internal {
            message: format!("Storage error: {err}"),
        },
    }
}
