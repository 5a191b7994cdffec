// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for account and session persistence operations.

use super::create_test_db_with_school;
use crate::Persistence;

#[test]
fn test_create_account_normalizes_login_and_hashes_password() {
    let (mut persistence, school_id) = create_test_db_with_school();

    let account_id = persistence
        .create_account(
            "head.teacher",
            "Head Teacher",
            "secret-password",
            "HeadTeacher",
            Some(school_id),
            None,
        )
        .unwrap();

    // Lookup is case-insensitive.
    let account = persistence
        .get_account_by_login("HEAD.TEACHER")
        .unwrap()
        .unwrap();
    assert_eq!(account.account_id, account_id);
    assert_eq!(account.login_name, "HEAD.TEACHER");
    assert_eq!(account.school_id, Some(school_id));
    assert!(!account.is_disabled);

    // The stored hash is not the plain text.
    assert_ne!(account.password_hash, "secret-password");
    assert!(
        persistence
            .verify_password("secret-password", &account.password_hash)
            .unwrap()
    );
    assert!(
        !persistence
            .verify_password("wrong-password", &account.password_hash)
            .unwrap()
    );
}

#[test]
fn test_get_account_by_login_returns_none_for_unknown() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.get_account_by_login("nobody").unwrap().is_none());
}

#[test]
fn test_session_round_trip_and_deletion() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let account_id = persistence
        .create_account(
            "head.teacher",
            "Head Teacher",
            "pw",
            "HeadTeacher",
            Some(school_id),
            None,
        )
        .unwrap();

    persistence
        .create_session("token-abc", account_id, "2025-03-11T00:00:00Z")
        .unwrap();

    let session = persistence
        .get_session_by_token("token-abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.account_id, account_id);
    assert_eq!(session.expires_at, "2025-03-11T00:00:00Z");

    persistence.delete_session("token-abc").unwrap();
    assert!(
        persistence
            .get_session_by_token("token-abc")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_expired_sessions_keeps_live_ones() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let account_id = persistence
        .create_account(
            "head.teacher",
            "Head Teacher",
            "pw",
            "HeadTeacher",
            Some(school_id),
            None,
        )
        .unwrap();

    persistence
        .create_session("stale", account_id, "2025-03-01T00:00:00Z")
        .unwrap();
    persistence
        .create_session("live", account_id, "2025-03-20T00:00:00Z")
        .unwrap();

    let deleted = persistence
        .delete_expired_sessions("2025-03-10T00:00:00Z")
        .unwrap();
    assert_eq!(deleted, 1);
    assert!(persistence.get_session_by_token("stale").unwrap().is_none());
    assert!(persistence.get_session_by_token("live").unwrap().is_some());
}

#[test]
fn test_head_teacher_accounts_for_school_filters_role_and_state() {
    let (mut persistence, school_id) = create_test_db_with_school();

    persistence
        .create_account("ht.one", "One", "pw", "HeadTeacher", Some(school_id), None)
        .unwrap();
    persistence
        .create_account("official", "Official", "pw", "EducationOfficial", None, None)
        .unwrap();

    let recipients = persistence
        .head_teacher_accounts_for_school(school_id)
        .unwrap();
    assert_eq!(recipients.len(), 1);
    assert_eq!(recipients[0].login_name, "HT.ONE");
}

#[test]
fn test_notifications_round_trip() {
    let (mut persistence, school_id) = create_test_db_with_school();
    let account_id = persistence
        .create_account(
            "head.teacher",
            "Head Teacher",
            "pw",
            "HeadTeacher",
            Some(school_id),
            None,
        )
        .unwrap();

    let notification_id = persistence
        .insert_notification(account_id, "Report for 2-2025 is overdue")
        .unwrap();
    persistence.mark_notification_read(notification_id).unwrap();
}
