//! Storage location business logic.
//!
//! Locations are a fixed physical catalog (aisle positions like `"C3"`)
//! loaded from configuration and seeded into the store at startup. Codes are
//! case-sensitive and unique; bundles reference locations by id, history
//! entries keep the code as text.

use crate::{
    config::locations,
    entities::{Location, location},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashSet;

/// Seeds the configured locations that are not stored yet.
///
/// Safe to run on every startup: existing rows are left alone, so repeated
/// seeding never duplicates a code.
///
/// # Returns
/// How many locations were inserted
pub async fn seed_locations(db: &DatabaseConnection, config: &locations::Config) -> Result<usize> {
    let existing: HashSet<String> = Location::find()
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.codigo)
        .collect();

    let mut inserted = 0;
    for entry in &config.locations {
        if existing.contains(&entry.code) {
            continue;
        }

        let model = location::ActiveModel {
            codigo: Set(entry.code.clone()),
            ..Default::default()
        };
        model.insert(db).await?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Lists every location sorted by code.
pub async fn list_locations(db: &DatabaseConnection) -> Result<Vec<location::Model>> {
    Location::find()
        .order_by_asc(location::Column::Codigo)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Resolves a location code to its stored row.
///
/// Works within transactions by accepting any connection type.
///
/// # Errors
/// * `Error::LocationNotFound` - The code is not in the catalog
pub async fn get_location_by_code<C>(db: &C, code: &str) -> Result<location::Model>
where
    C: ConnectionTrait,
{
    Location::find()
        .filter(location::Column::Codigo.eq(code))
        .one(db)
        .await?
        .ok_or_else(|| Error::LocationNotFound {
            code: code.to_string(),
        })
}
