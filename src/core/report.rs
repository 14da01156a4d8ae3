//! Dashboard aggregation - summary views over fetched bundle rows.
//!
//! Pure, total functions over already-flattened (and already-filtered)
//! [`BundleOverview`] rows. Nothing here touches the database: callers fetch
//! through [`crate::core::dashboard`] first and aggregate the result, so the
//! summaries always reflect exactly the set the dashboard displays.

use crate::core::dashboard::BundleOverview;
use std::collections::HashMap;

/// Label used for the material group of bundles whose order has no material.
pub const NO_MATERIAL_LABEL: &str = "no material";

/// Per-location roll-up of the dashboard's bundle rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSummary {
    /// Storage location code the group belongs to
    pub location: String,
    /// Number of bundles sitting in the location
    pub bundle_count: usize,
    /// Combined sheet count of those bundles
    pub total_sheets: i64,
}

/// Per-material roll-up of the dashboard's bundle rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialSummary {
    /// Material the group belongs to; `None` is the "no material" group
    pub material_id: Option<i64>,
    /// Display label; [`NO_MATERIAL_LABEL`] when no material is referenced
    pub material_nombre: String,
    /// Number of bundles cut from the material
    pub bundle_count: usize,
    /// Combined sheet count of those bundles
    pub total_sheets: i64,
}

/// Overall totals of the post-filter bundle set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardTotals {
    /// Number of bundles in the set
    pub bundles: usize,
    /// Combined sheet count of the set
    pub sheets: i64,
}

/// Groups bundle rows by storage location.
///
/// Every row lands in exactly one group. Groups are returned sorted by
/// location code in lexicographic order, so `"C10"` sorts between `"C1"`
/// and `"C2"`.
#[must_use]
pub fn summarize_by_location(bundles: &[BundleOverview]) -> Vec<LocationSummary> {
    let mut groups: HashMap<&str, (usize, i64)> = HashMap::new();

    for item in bundles {
        let entry = groups.entry(item.location.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += i64::from(item.sheets);
    }

    let mut summaries: Vec<LocationSummary> = groups
        .into_iter()
        .map(|(location, (bundle_count, total_sheets))| LocationSummary {
            location: location.to_string(),
            bundle_count,
            total_sheets,
        })
        .collect();

    summaries.sort_by(|a, b| a.location.cmp(&b.location));
    summaries
}

/// Groups bundle rows by the material their order references.
///
/// Rows whose order has no material share a single group labelled
/// [`NO_MATERIAL_LABEL`]; grouping is keyed on the material id, so the label
/// of a material group is taken from the first row that mentions it. Groups
/// are returned sorted by label, with ties broken by material id.
#[must_use]
pub fn summarize_by_material(bundles: &[BundleOverview]) -> Vec<MaterialSummary> {
    let mut groups: HashMap<Option<i64>, MaterialSummary> = HashMap::new();

    for item in bundles {
        let entry = groups
            .entry(item.material_id)
            .or_insert_with(|| MaterialSummary {
                material_id: item.material_id,
                material_nombre: item
                    .material_nombre
                    .clone()
                    .unwrap_or_else(|| NO_MATERIAL_LABEL.to_string()),
                bundle_count: 0,
                total_sheets: 0,
            });
        entry.bundle_count += 1;
        entry.total_sheets += i64::from(item.sheets);
    }

    let mut summaries: Vec<MaterialSummary> = groups.into_values().collect();
    // The sort key must be total: distinct materials may share a label, and
    // on a label tie alone the map's arbitrary iteration order would leak out
    summaries.sort_by(|a, b| {
        a.material_nombre
            .cmp(&b.material_nombre)
            .then(a.material_id.cmp(&b.material_id))
    });
    summaries
}

/// Overall bundle and sheet totals for the post-filter set.
#[must_use]
pub fn dashboard_totals(bundles: &[BundleOverview]) -> DashboardTotals {
    DashboardTotals {
        bundles: bundles.len(),
        sheets: bundles.iter().map(|b| i64::from(b.sheets)).sum(),
    }
}
