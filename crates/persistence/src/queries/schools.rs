// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! School and region queries.

use diesel::prelude::*;

use crate::data_models::{RegionRecord, SchoolRecord};
use crate::diesel_schema::{regions, schools};
use crate::error::PersistenceError;

/// Lists all schools, ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_schools(conn: &mut SqliteConnection) -> Result<Vec<SchoolRecord>, PersistenceError> {
    let rows: Vec<(i64, i64, String)> = schools::table
        .select((schools::school_id, schools::region_id, schools::name))
        .order(schools::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(school_id, region_id, name)| SchoolRecord {
            school_id,
            region_id,
            name,
        })
        .collect())
}

/// Lists the schools of one region, ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_schools_in_region(
    conn: &mut SqliteConnection,
    region_id: i64,
) -> Result<Vec<SchoolRecord>, PersistenceError> {
    let rows: Vec<(i64, i64, String)> = schools::table
        .filter(schools::region_id.eq(region_id))
        .select((schools::school_id, schools::region_id, schools::name))
        .order(schools::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(school_id, region_id, name)| SchoolRecord {
            school_id,
            region_id,
            name,
        })
        .collect())
}

/// Retrieves a school by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_school(
    conn: &mut SqliteConnection,
    school_id: i64,
) -> Result<Option<SchoolRecord>, PersistenceError> {
    let result: Result<(i64, i64, String), diesel::result::Error> = schools::table
        .filter(schools::school_id.eq(school_id))
        .select((schools::school_id, schools::region_id, schools::name))
        .first(conn);

    match result {
        Ok((school_id, region_id, name)) => Ok(Some(SchoolRecord {
            school_id,
            region_id,
            name,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lists all regions, ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_regions(conn: &mut SqliteConnection) -> Result<Vec<RegionRecord>, PersistenceError> {
    let rows: Vec<(i64, String)> = regions::table
        .select((regions::region_id, regions::name))
        .order(regions::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(region_id, name)| RegionRecord { region_id, name })
        .collect())
}
