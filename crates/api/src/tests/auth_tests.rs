// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::format_description::well_known::Iso8601;
use time::macros::datetime;

use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{CreateAccountRequest, LoginRequest};

use super::{admin, head_teacher, seeded_db};

fn create_head_teacher_account(
    persistence: &mut edu_report_persistence::Persistence,
    school_id: i64,
) -> i64 {
    persistence
        .create_account(
            "head.teacher",
            "Head Teacher",
            "hunter2",
            "HeadTeacher",
            Some(school_id),
            None,
        )
        .unwrap()
}

#[test]
fn test_login_opens_session_and_whoami_describes_actor() {
    let (mut persistence, _region_id, school_id) = seeded_db();
    let account_id = create_head_teacher_account(&mut persistence, school_id);

    let now = datetime!(2025-03-10 09:00 UTC);
    let response = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("head.teacher"),
            password: String::from("hunter2"),
        },
        now,
    )
    .unwrap();

    assert_eq!(response.account_id, account_id);
    assert_eq!(response.role, "HeadTeacher");

    let actor =
        AuthenticationService::validate_session(&mut persistence, &response.session_token, now)
            .unwrap();
    let whoami = handlers::who_am_i(&actor);
    assert_eq!(whoami.account_id, account_id);
    assert_eq!(whoami.login_name, "HEAD.TEACHER");
    assert_eq!(whoami.school_id, Some(school_id));
}

#[test]
fn test_wrong_password_and_unknown_login_are_indistinguishable() {
    let (mut persistence, _region_id, school_id) = seeded_db();
    create_head_teacher_account(&mut persistence, school_id);

    let now = datetime!(2025-03-10 09:00 UTC);
    let wrong_password = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("head.teacher"),
            password: String::from("wrong"),
        },
        now,
    )
    .unwrap_err();
    let unknown_login = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("nobody"),
            password: String::from("hunter2"),
        },
        now,
    )
    .unwrap_err();

    assert_eq!(wrong_password.to_string(), unknown_login.to_string());
}

#[test]
fn test_logout_invalidates_session() {
    let (mut persistence, _region_id, school_id) = seeded_db();
    create_head_teacher_account(&mut persistence, school_id);

    let now = datetime!(2025-03-10 09:00 UTC);
    let response = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("head.teacher"),
            password: String::from("hunter2"),
        },
        now,
    )
    .unwrap();

    handlers::logout(&mut persistence, &response.session_token).unwrap();
    assert!(
        AuthenticationService::validate_session(&mut persistence, &response.session_token, now)
            .is_err()
    );
}

#[test]
fn test_expired_session_rejected() {
    let (mut persistence, _region_id, school_id) = seeded_db();
    let account_id = create_head_teacher_account(&mut persistence, school_id);

    let expires_at = datetime!(2025-01-01 00:00 UTC)
        .format(&Iso8601::DEFAULT)
        .unwrap();
    persistence
        .create_session("stale_token", account_id, &expires_at)
        .unwrap();

    let now = datetime!(2025-02-01 00:00 UTC);
    let err =
        AuthenticationService::validate_session(&mut persistence, "stale_token", now).unwrap_err();
    assert!(err.to_string().contains("expired"));
}

#[test]
fn test_create_account_requires_admin() {
    let (mut persistence, region_id, school_id) = seeded_db();

    let request = CreateAccountRequest {
        login_name: String::from("new.official"),
        display_name: String::from("New Official"),
        password: String::from("hunter2"),
        role: String::from("EducationOfficial"),
        school_id: None,
        region_id: None,
    };

    let err = handlers::create_account(
        &mut persistence,
        &head_teacher(school_id, region_id),
        &request,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));

    let ok = handlers::create_account(&mut persistence, &admin(), &request).unwrap();
    assert_eq!(ok.login_name, "NEW.OFFICIAL");
    assert_eq!(ok.role, "EducationOfficial");
}

#[test]
fn test_create_account_rejects_unknown_role() {
    let (mut persistence, _region_id, _school_id) = seeded_db();

    let err = handlers::create_account(
        &mut persistence,
        &admin(),
        &CreateAccountRequest {
            login_name: String::from("x"),
            display_name: String::from("X"),
            password: String::from("hunter2"),
            role: String::from("Janitor"),
            school_id: None,
            region_id: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "role"));
}

#[test]
fn test_head_teacher_account_requires_existing_school() {
    let (mut persistence, _region_id, _school_id) = seeded_db();

    let missing_scope = handlers::create_account(
        &mut persistence,
        &admin(),
        &CreateAccountRequest {
            login_name: String::from("ht2"),
            display_name: String::from("HT"),
            password: String::from("hunter2"),
            role: String::from("HeadTeacher"),
            school_id: None,
            region_id: None,
        },
    )
    .unwrap_err();
    assert!(matches!(missing_scope, ApiError::InvalidInput { ref field, .. } if field == "school_id"));

    let missing_school = handlers::create_account(
        &mut persistence,
        &admin(),
        &CreateAccountRequest {
            login_name: String::from("ht2"),
            display_name: String::from("HT"),
            password: String::from("hunter2"),
            role: String::from("HeadTeacher"),
            school_id: Some(9999),
            region_id: None,
        },
    )
    .unwrap_err();
    assert!(matches!(missing_school, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_created_account_can_log_in() {
    let (mut persistence, _region_id, school_id) = seeded_db();

    handlers::create_account(
        &mut persistence,
        &admin(),
        &CreateAccountRequest {
            login_name: String::from("ht2"),
            display_name: String::from("HT"),
            password: String::from("hunter2"),
            role: String::from("HeadTeacher"),
            school_id: Some(school_id),
            region_id: None,
        },
    )
    .unwrap();

    let response = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("HT2"),
            password: String::from("hunter2"),
        },
        datetime!(2025-03-10 09:00 UTC),
    )
    .unwrap();
    assert_eq!(response.role, "HeadTeacher");
}
