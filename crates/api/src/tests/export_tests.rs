// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::{Duration, Instant};

use time::macros::datetime;

use crate::cache::TtlCache;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::SchoolDto;

use super::{
    education_official, head_teacher, regional_officer, seeded_db, submit_report_for,
};

#[test]
fn test_export_covers_all_schools_for_official() {
    let (mut persistence, _region_id, school_id) = seeded_db();
    let other_region = persistence.create_region("Southern Region").unwrap();
    persistence
        .create_school(other_region, "Valley Secondary")
        .unwrap();
    submit_report_for(&mut persistence, school_id, 2, 2025);

    let now = datetime!(2025-03-10 09:00 UTC);
    let csv =
        handlers::export_statuses_csv(&mut persistence, &education_official(), now).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "school_id,school_name,month,year,status");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with(",Hillside Primary,2,2025,Submitted"));
    assert!(lines[2].ends_with(",Valley Secondary,2,2025,NotSubmitted"));
}

#[test]
fn test_export_scoped_to_officer_region() {
    let (mut persistence, region_id, _school_id) = seeded_db();
    let other_region = persistence.create_region("Southern Region").unwrap();
    persistence
        .create_school(other_region, "Valley Secondary")
        .unwrap();

    let now = datetime!(2025-03-10 09:00 UTC);
    let csv =
        handlers::export_statuses_csv(&mut persistence, &regional_officer(region_id), now)
            .unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Hillside Primary"));
}

#[test]
fn test_export_denied_for_head_teacher() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let now = datetime!(2025-03-10 09:00 UTC);

    let err = handlers::export_statuses_csv(
        &mut persistence,
        &head_teacher(school_id, region_id),
        now,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_list_schools_reads_through_cache() {
    let (mut persistence, region_id, _school_id) = seeded_db();
    let mut cache: TtlCache<Vec<SchoolDto>> = TtlCache::new(Duration::from_secs(300));
    let actor = education_official();
    let now = Instant::now();

    let first = handlers::list_schools(&mut persistence, &actor, &mut cache, now).unwrap();
    assert_eq!(first.schools.len(), 1);

    // A school added behind the cache's back stays invisible until expiry.
    persistence
        .create_school(region_id, "Valley Secondary")
        .unwrap();
    let cached = handlers::list_schools(&mut persistence, &actor, &mut cache, now).unwrap();
    assert_eq!(cached.schools.len(), 1);

    let after_expiry = now + Duration::from_secs(301);
    let refreshed =
        handlers::list_schools(&mut persistence, &actor, &mut cache, after_expiry).unwrap();
    assert_eq!(refreshed.schools.len(), 2);
}

#[test]
fn test_list_schools_invalidate_forces_refresh() {
    let (mut persistence, region_id, _school_id) = seeded_db();
    let mut cache: TtlCache<Vec<SchoolDto>> = TtlCache::new(Duration::from_secs(300));
    let actor = education_official();
    let now = Instant::now();

    handlers::list_schools(&mut persistence, &actor, &mut cache, now).unwrap();
    persistence
        .create_school(region_id, "Valley Secondary")
        .unwrap();
    cache.invalidate();

    let refreshed = handlers::list_schools(&mut persistence, &actor, &mut cache, now).unwrap();
    assert_eq!(refreshed.schools.len(), 2);
}

#[test]
fn test_list_schools_denied_for_head_teacher() {
    let (mut persistence, region_id, school_id) = seeded_db();
    let mut cache: TtlCache<Vec<SchoolDto>> = TtlCache::new(Duration::from_secs(300));

    let err = handlers::list_schools(
        &mut persistence,
        &head_teacher(school_id, region_id),
        &mut cache,
        Instant::now(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}
