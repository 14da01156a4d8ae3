//! Dashboard data access - bundles flattened together with their context.
//!
//! This module is the boundary between the relational shape and the rest of
//! the system. Bundles are fetched together with their storage location,
//! their owning cut order, and that order's material, then flattened into
//! [`BundleOverview`] records so downstream code never deals with joins or
//! nullable relations.
//!
//! Only filters on flat bundle columns (status, coil number) are pushed down
//! to the store. After flattening, every present filter is applied in memory
//! over the fetched set, so [`apply_filters`] is the full conjunction on its
//! own; aggregation in [`crate::core::report`] always runs on that
//! post-filter output.

use crate::{
    entities::{Bundle, CutOrder, Location, Material, bundle, cut_order, material},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};
use std::collections::HashMap;

/// One bundle with its relational context already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOverview {
    /// Primary key of the bundle
    pub id: i64,
    /// Running number within the owning order, if one was assigned
    pub raw_number: Option<i32>,
    /// Sheets currently held by the bundle
    pub sheets: i32,
    /// Status label as stored, e.g. `"available"`
    pub status: String,
    /// Coil the sheets were cut from
    pub num_bobina: Option<String>,
    /// Code of the storage location the bundle sits in, e.g. `"C3"`
    pub location: String,
    /// Code of the owning cut order
    pub order_code: String,
    /// Date of the owning cut order
    pub order_date: Date,
    /// Id of the material the order references, if any
    pub material_id: Option<i64>,
    /// Display name of that material
    pub material_nombre: Option<String>,
}

/// Optional dashboard filters. Each field narrows the result independently;
/// a bundle must satisfy every present filter to be kept.
#[derive(Debug, Clone, Default)]
pub struct DashboardFilter {
    /// Keep bundles sitting in this location code (case-insensitive)
    pub location: Option<String>,
    /// Keep bundles whose order references this material
    pub material_id: Option<i64>,
    /// Keep bundles with exactly this status label
    pub status: Option<String>,
    /// Keep bundles whose order code contains this text (case-insensitive)
    pub order_code: Option<String>,
    /// Keep bundles whose coil reference contains this text (case-insensitive)
    pub num_bobina: Option<String>,
}

/// Fetches the dashboard's bundle rows, ordered by running number.
///
/// Status and coil filters are pushed down to the store; after flattening,
/// every present filter in `filter` is applied in memory.
///
/// # Arguments
/// * `db` - Database connection
/// * `filter` - Filters to apply; [`DashboardFilter::default`] keeps everything
///
/// # Returns
/// Flattened bundle rows matching every present filter
pub async fn fetch_dashboard_bundles(
    db: &DatabaseConnection,
    filter: &DashboardFilter,
) -> Result<Vec<BundleOverview>> {
    let mut query = Bundle::find()
        .find_also_related(Location)
        .order_by_asc(bundle::Column::RawNumber)
        .order_by_asc(bundle::Column::Id);

    if let Some(status) = &filter.status {
        query = query.filter(bundle::Column::Status.eq(status.as_str()));
    }
    if let Some(num_bobina) = &filter.num_bobina {
        query = query.filter(bundle::Column::NumBobina.contains(num_bobina.as_str()));
    }

    let bundles = query.all(db).await?;

    // One lookup table for order context instead of a query per bundle
    let orders: HashMap<i64, (cut_order::Model, Option<material::Model>)> = CutOrder::find()
        .find_also_related(Material)
        .all(db)
        .await?
        .into_iter()
        .map(|(order, mat)| (order.id, (order, mat)))
        .collect();

    let mut rows = Vec::with_capacity(bundles.len());
    for (item, location) in bundles {
        // Every bundle is created under an order; a missing entry here means
        // the row lost its parent and has no place on the dashboard
        let Some((order, mat)) = orders.get(&item.cut_order_id) else {
            continue;
        };

        rows.push(BundleOverview {
            id: item.id,
            raw_number: item.raw_number,
            sheets: item.sheets,
            status: item.status,
            num_bobina: item.num_bobina,
            location: location.map_or_else(|| "unknown".to_string(), |l| l.codigo),
            order_code: order.code.clone(),
            order_date: order.date,
            material_id: mat.as_ref().map(|m| m.id),
            material_nombre: mat.as_ref().map(|m| m.nombre.clone()),
        });
    }

    Ok(apply_filters(rows, filter))
}

/// Applies every present filter to already-flattened rows.
///
/// Pure and total: rows are kept when they satisfy every present filter, so
/// an all-`None` filter returns the input unchanged.
#[must_use]
pub fn apply_filters(rows: Vec<BundleOverview>, filter: &DashboardFilter) -> Vec<BundleOverview> {
    rows.into_iter()
        .filter(|row| row_matches(row, filter))
        .collect()
}

/// Whether one flattened row satisfies every present filter.
#[must_use]
pub fn row_matches(row: &BundleOverview, filter: &DashboardFilter) -> bool {
    if let Some(location) = &filter.location {
        if !row.location.eq_ignore_ascii_case(location) {
            return false;
        }
    }

    if let Some(material_id) = filter.material_id {
        if row.material_id != Some(material_id) {
            return false;
        }
    }

    if let Some(status) = &filter.status {
        if row.status != *status {
            return false;
        }
    }

    if let Some(order_code) = &filter.order_code {
        let needle = order_code.to_lowercase();
        if !row.order_code.to_lowercase().contains(&needle) {
            return false;
        }
    }

    if let Some(num_bobina) = &filter.num_bobina {
        let needle = num_bobina.to_lowercase();
        let coil_matches = row
            .num_bobina
            .as_ref()
            .is_some_and(|coil| coil.to_lowercase().contains(&needle));
        if !coil_matches {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::bundle::{BundleStatus, NewBundle, create_bundle, set_bundle_status},
        test_utils::{create_test_order, setup_test_db, test_ids},
    };

    fn overview(id: i64, location: &str, status: &str, order_code: &str) -> BundleOverview {
        BundleOverview {
            id,
            raw_number: Some(1),
            sheets: 50,
            status: status.to_string(),
            num_bobina: None,
            location: location.to_string(),
            order_code: order_code.to_string(),
            order_date: Date::default(),
            material_id: None,
            material_nombre: None,
        }
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let rows = vec![
            overview(1, "C1", "available", "OC-100"),
            overview(2, "C2", "used", "OC-200"),
        ];

        let kept = apply_filters(rows.clone(), &DashboardFilter::default());
        assert_eq!(kept, rows);
    }

    #[test]
    fn test_location_filter_is_case_insensitive() {
        let rows = vec![
            overview(1, "C1", "available", "OC-100"),
            overview(2, "C2", "available", "OC-100"),
        ];

        let filter = DashboardFilter {
            location: Some("c1".to_string()),
            ..Default::default()
        };

        let kept = apply_filters(rows, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_order_code_filter_matches_substring() {
        let rows = vec![
            overview(1, "C1", "available", "OC-2024-001"),
            overview(2, "C1", "available", "OC-2024-012"),
            overview(3, "C1", "available", "OC-2025-001"),
        ];

        let filter = DashboardFilter {
            order_code: Some("2024".to_string()),
            ..Default::default()
        };

        let kept = apply_filters(rows, &filter);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_filters_combine_as_conjunction() {
        let rows = vec![
            overview(1, "C1", "available", "OC-100"),
            overview(2, "C1", "used", "OC-100"),
            overview(3, "C2", "available", "OC-100"),
            overview(4, "C1", "available", "OC-999"),
        ];

        let filter = DashboardFilter {
            location: Some("C1".to_string()),
            status: Some("available".to_string()),
            order_code: Some("100".to_string()),
            ..Default::default()
        };

        let kept = apply_filters(rows, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_coil_filter_matches_substring() {
        let mut with_coil = overview(1, "C1", "available", "OC-100");
        with_coil.num_bobina = Some("BOB-441".to_string());
        let mut other_coil = overview(2, "C1", "available", "OC-100");
        other_coil.num_bobina = Some("BOB-502".to_string());
        // The third row carries no coil reference at all
        let rows = vec![
            with_coil,
            other_coil,
            overview(3, "C1", "available", "OC-100"),
        ];

        let filter = DashboardFilter {
            num_bobina: Some("bob-44".to_string()),
            ..Default::default()
        };

        let kept = apply_filters(rows, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_material_filter_excludes_unset_material() {
        let mut with_material = overview(1, "C1", "available", "OC-100");
        with_material.material_id = Some(7);
        let rows = vec![with_material, overview(2, "C1", "available", "OC-100")];

        let filter = DashboardFilter {
            material_id: Some(7),
            ..Default::default()
        };

        let kept = apply_filters(rows, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].material_id, Some(7));
    }

    #[tokio::test]
    async fn test_fetch_flattens_relational_context() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, "OC-100").await?;

        create_bundle(
            &db,
            NewBundle {
                cut_order_id: order.id,
                base_name: "Bulto".to_string(),
                raw_number: Some(1),
                sheets: 120,
                status: BundleStatus::Available,
                num_bobina: Some("B-77".to_string()),
                identifiers: test_ids("flat"),
                location_code: "C3".to_string(),
            },
        )
        .await?;

        let rows = fetch_dashboard_bundles(&db, &DashboardFilter::default()).await?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location, "C3");
        assert_eq!(rows[0].order_code, "OC-100");
        assert_eq!(rows[0].sheets, 120);
        assert_eq!(rows[0].num_bobina, Some("B-77".to_string()));
        assert_eq!(rows[0].material_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_orders_rows_by_running_number() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, "OC-100").await?;

        for (tag, number) in [("a", 3), ("b", 1), ("c", 2)] {
            create_bundle(
                &db,
                NewBundle {
                    cut_order_id: order.id,
                    base_name: "Bulto".to_string(),
                    raw_number: Some(number),
                    sheets: 10,
                    status: BundleStatus::Available,
                    num_bobina: None,
                    identifiers: test_ids(tag),
                    location_code: "C1".to_string(),
                },
            )
            .await?;
        }

        let rows = fetch_dashboard_bundles(&db, &DashboardFilter::default()).await?;

        let numbers: Vec<Option<i32>> = rows.iter().map(|r| r.raw_number).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_pushes_down_status_filter() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, "OC-100").await?;

        let kept = create_bundle(
            &db,
            NewBundle {
                cut_order_id: order.id,
                base_name: "Bulto".to_string(),
                raw_number: Some(1),
                sheets: 10,
                status: BundleStatus::Available,
                num_bobina: None,
                identifiers: test_ids("kept"),
                location_code: "C1".to_string(),
            },
        )
        .await?;
        let consumed = create_bundle(
            &db,
            NewBundle {
                cut_order_id: order.id,
                base_name: "Bulto".to_string(),
                raw_number: Some(2),
                sheets: 10,
                status: BundleStatus::Available,
                num_bobina: None,
                identifiers: test_ids("consumed"),
                location_code: "C1".to_string(),
            },
        )
        .await?;
        set_bundle_status(&db, consumed.id, BundleStatus::Used).await?;

        let filter = DashboardFilter {
            status: Some("available".to_string()),
            ..Default::default()
        };
        let rows = fetch_dashboard_bundles(&db, &filter).await?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, kept.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_filters_coil_by_substring() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, "OC-100").await?;

        for (tag, coil) in [("x", Some("BOB-441")), ("y", Some("BOB-502")), ("z", None)] {
            create_bundle(
                &db,
                NewBundle {
                    cut_order_id: order.id,
                    base_name: "Bulto".to_string(),
                    raw_number: None,
                    sheets: 10,
                    status: BundleStatus::Available,
                    num_bobina: coil.map(str::to_string),
                    identifiers: test_ids(tag),
                    location_code: "C1".to_string(),
                },
            )
            .await?;
        }

        let filter = DashboardFilter {
            num_bobina: Some("44".to_string()),
            ..Default::default()
        };
        let rows = fetch_dashboard_bundles(&db, &filter).await?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].num_bobina, Some("BOB-441".to_string()));
        Ok(())
    }
}
