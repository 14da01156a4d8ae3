//! Shared test utilities for Bundle Control.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::locations::{Config, LocationConfig},
    core::{
        bundle::{BundleStatus, NewBundle, create_bundle},
        identifier::LogisticsIds,
        material, order,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized and
/// the standard location catalog (`C1` through `C10`) seeded.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    crate::core::location::seed_locations(&db, &test_location_config()).await?;
    Ok(db)
}

/// The location catalog used by tests: codes `C1` through `C10`.
#[must_use]
pub fn test_location_config() -> Config {
    Config {
        locations: (1..=10)
            .map(|n| LocationConfig {
                code: format!("C{n}"),
            })
            .collect(),
    }
}

/// Builds a unique identifier pair from a tag, e.g. `SSCC-b1` / `LUID-b1`.
#[must_use]
pub fn test_ids(tag: &str) -> LogisticsIds {
    LogisticsIds::new(format!("SSCC-{tag}"), format!("LUID-{tag}"))
}

/// Creates a test material with sensible defaults.
///
/// # Defaults
/// * `codigo`: None
/// * `activo`: true
pub async fn create_test_material(
    db: &DatabaseConnection,
    nombre: &str,
) -> Result<entities::material::Model> {
    material::create_material(db, nombre.to_string(), None).await
}

/// Creates a test cut order with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `code` - Order code
///
/// # Defaults
/// * `date`: today
/// * `material_id`: None
/// * `workflow_status`: `"pending"`
/// * `pending_bundles`: 0
pub async fn create_test_order(
    db: &DatabaseConnection,
    code: &str,
) -> Result<entities::cut_order::Model> {
    order::create_order(
        db,
        order::NewOrder {
            code: code.to_string(),
            date: chrono::Utc::now().date_naive(),
            material_id: None,
            workflow_status: "pending".to_string(),
            pending_bundles: 0,
        },
    )
    .await
}

/// Creates a test bundle with sensible defaults. The `tag` makes the
/// identifier pair unique, so two bundles need two tags.
///
/// # Defaults
/// * `base_name`: `"Bulto"`, `raw_number`: 1
/// * `status`: available
/// * `num_bobina`: None
/// * `location_code`: `"C1"`
/// * identifiers: [`test_ids`]`(tag)`
pub async fn create_test_bundle(
    db: &DatabaseConnection,
    cut_order_id: i64,
    tag: &str,
    sheets: i32,
) -> Result<entities::bundle::Model> {
    create_bundle(
        db,
        NewBundle {
            cut_order_id,
            base_name: "Bulto".to_string(),
            raw_number: Some(1),
            sheets,
            status: BundleStatus::Available,
            num_bobina: None,
            identifiers: test_ids(tag),
            location_code: "C1".to_string(),
        },
    )
    .await
}

/// Sets up a complete test environment with an order and one 100-sheet
/// bundle in `C1`. Returns (db, order, bundle) for bundle-related tests.
pub async fn setup_with_bundle() -> Result<(
    DatabaseConnection,
    entities::cut_order::Model,
    entities::bundle::Model,
)> {
    let db = setup_test_db().await?;
    let order = create_test_order(&db, "OC-100").await?;
    let item = create_test_bundle(&db, order.id, "b1", 100).await?;
    Ok((db, order, item))
}
