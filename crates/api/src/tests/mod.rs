// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared helpers for the API test suite.

mod auth_tests;
mod export_tests;
mod report_tests;

use edu_report_persistence::Persistence;

use crate::auth::{AuthenticatedActor, Role};

/// In-memory database seeded with one region and one school.
pub(crate) fn seeded_db() -> (Persistence, i64, i64) {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let region_id = persistence.create_region("Northern Region").unwrap();
    let school_id = persistence
        .create_school(region_id, "Hillside Primary")
        .unwrap();
    (persistence, region_id, school_id)
}

pub(crate) fn head_teacher(school_id: i64, region_id: i64) -> AuthenticatedActor {
    AuthenticatedActor {
        account_id: 100,
        login_name: String::from("HEAD.TEACHER"),
        role: Role::HeadTeacher,
        school_id: Some(school_id),
        region_id: Some(region_id),
    }
}

pub(crate) fn regional_officer(region_id: i64) -> AuthenticatedActor {
    AuthenticatedActor {
        account_id: 101,
        login_name: String::from("OFFICER"),
        role: Role::RegionalOfficer,
        school_id: None,
        region_id: Some(region_id),
    }
}

pub(crate) fn education_official() -> AuthenticatedActor {
    AuthenticatedActor {
        account_id: 102,
        login_name: String::from("OFFICIAL"),
        role: Role::EducationOfficial,
        school_id: None,
        region_id: None,
    }
}

pub(crate) fn admin() -> AuthenticatedActor {
    AuthenticatedActor {
        account_id: 103,
        login_name: String::from("ADMIN"),
        role: Role::Admin,
        school_id: None,
        region_id: None,
    }
}

/// Creates and submits a report directly through persistence.
pub(crate) fn submit_report_for(
    persistence: &mut Persistence,
    school_id: i64,
    month: u8,
    year: i32,
) -> i64 {
    let report_id = persistence.create_report(school_id, month, year).unwrap();
    persistence.submit_report(report_id).unwrap();
    report_id
}
