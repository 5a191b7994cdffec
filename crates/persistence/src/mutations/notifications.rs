// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification mutations.
//!
//! The notification channel consumes the overdue `(school, period)`
//! pairs computed by the reminder handler; this module only records the
//! in-app rows. Outbound email delivery is out of scope.

use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::notifications;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts an in-app notification for an account.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_notification(
    conn: &mut SqliteConnection,
    account_id: i64,
    message: &str,
) -> Result<i64, PersistenceError> {
    debug!("Inserting notification for account {account_id}");

    diesel::insert_into(notifications::table)
        .values((
            notifications::account_id.eq(account_id),
            notifications::message.eq(message),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Marks a notification as read.
///
/// # Errors
///
/// Returns `NotFound` if the notification does not exist.
pub fn mark_notification_read(
    conn: &mut SqliteConnection,
    notification_id: i64,
) -> Result<(), PersistenceError> {
    let affected = diesel::update(notifications::table)
        .filter(notifications::notification_id.eq(notification_id))
        .set(notifications::is_read.eq(1))
        .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "No notification with ID {notification_id}"
        )));
    }
    Ok(())
}
