// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod account_tests;
mod report_tests;
mod section_tests;

use crate::Persistence;

/// Creates a fresh in-memory database with one region and one school.
///
/// Returns the persistence adapter and the school ID.
pub fn create_test_db_with_school() -> (Persistence, i64) {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let region_id = persistence.create_region("Northern Region").unwrap();
    let school_id = persistence
        .create_school(region_id, "Hillside Primary")
        .unwrap();
    (persistence, school_id)
}
