// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Region and school provisioning.
//!
//! These run during deployment setup and in test fixtures; there is no
//! self-service surface for creating regions or schools.

use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::{regions, schools};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Creates a region.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_region(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    info!("Creating region: {name}");

    diesel::insert_into(regions::table)
        .values(regions::name.eq(name))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Creates a school within a region.
///
/// # Errors
///
/// Returns an error if the insert fails (including a missing region,
/// which trips the foreign key).
pub fn create_school(
    conn: &mut SqliteConnection,
    region_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating school: {name} in region {region_id}");

    diesel::insert_into(schools::table)
        .values((schools::region_id.eq(region_id), schools::name.eq(name)))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
