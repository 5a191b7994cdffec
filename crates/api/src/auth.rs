// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication types and the session-based authentication service.

use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use edu_report_persistence::{AccountData, Persistence, PersistenceError, SessionData};

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what operations an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Head Teacher: files monthly reports for exactly one school.
    HeadTeacher,
    /// Regional Officer: reads dashboards and exports for one region.
    RegionalOfficer,
    /// Education Official: reads dashboards, exports, and reminder sets
    /// across all regions.
    EducationOfficial,
    /// Admin: full access, including account provisioning and
    /// Head-Teacher-equivalent write powers on any school.
    Admin,
}

impl Role {
    /// Parses a role from its stored string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known role.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value {
            "HeadTeacher" => Ok(Self::HeadTeacher),
            "RegionalOfficer" => Ok(Self::RegionalOfficer),
            "EducationOfficial" => Ok(Self::EducationOfficial),
            "Admin" => Ok(Self::Admin),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {value}"),
            }),
        }
    }

    /// Returns the stored string form of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HeadTeacher => "HeadTeacher",
            Self::RegionalOfficer => "RegionalOfficer",
            Self::EducationOfficial => "EducationOfficial",
            Self::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated actor with role and scope.
///
/// The scope fields mirror the account row: a Head Teacher carries the
/// school they report for, a Regional Officer the region they read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The account this actor authenticated as.
    pub account_id: i64,
    /// The normalized login name.
    pub login_name: String,
    /// The role assigned to this actor.
    pub role: Role,
    /// The school scope (Head Teacher accounts).
    pub school_id: Option<i64>,
    /// The region scope (Regional Officer accounts).
    pub region_id: Option<i64>,
}

impl AuthenticatedActor {
    /// Builds an actor from a stored account row.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored role string is not valid.
    pub fn from_account(account: &AccountData) -> Result<Self, AuthError> {
        Ok(Self {
            account_id: account.account_id,
            login_name: account.login_name.clone(),
            role: Role::parse(&account.role)?,
            school_id: account.school_id,
            region_id: account.region_id,
        })
    }
}

/// Session-based authentication service.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates an account by login name and password and creates
    /// a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `login_name` - The account login name
    /// * `password` - The plain-text password to verify
    /// * `now` - The current instant (UTC)
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`)
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown or disabled, the
    /// password does not match, or the session cannot be created.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<(String, AuthenticatedActor), AuthError> {
        let account: AccountData = persistence
            .get_account_by_login(login_name)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!("Login attempt for unknown account: {login_name}");
                AuthError::AuthenticationFailed {
                    reason: String::from("Unknown login name or wrong password"),
                }
            })?;

        if account.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        let password_matches: bool = persistence
            .verify_password(password, &account.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_matches {
            warn!("Failed password for account: {}", account.login_name);
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unknown login name or wrong password"),
            });
        }

        let actor: AuthenticatedActor = AuthenticatedActor::from_account(&account)?;

        let session_token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime = now + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, account.account_id, &expires_at_str)
            .map_err(Self::map_persistence_error)?;
        persistence
            .update_last_login(account.account_id)
            .map_err(Self::map_persistence_error)?;

        info!(
            "Login succeeded for {} ({})",
            account.login_name, account.role
        );

        Ok((session_token, actor))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    /// * `now` - The current instant (UTC)
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired, or the
    /// account behind it is missing or disabled.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
        now: OffsetDateTime,
    ) -> Result<AuthenticatedActor, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if now > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let account: AccountData = persistence
            .get_account_by_id(session.account_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Account not found"),
            })?;

        if account.is_disabled {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is disabled"),
            });
        }

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        AuthenticatedActor::from_account(&account)
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token.
    fn generate_session_token() -> String {
        use std::time::{SystemTime, UNIX_EPOCH};
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!(
            "session_{timestamp}_{}_{}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionExpired(msg) | PersistenceError::SessionNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
