//! Cut order business logic - Handles all order-related operations.
//!
//! A cut order is the unit of work the plant plans around: it carries a
//! unique code, optionally references one material, and exclusively owns the
//! bundles produced for it. Reads come back as [`OrderDetail`] with the
//! material and bundle context already resolved.

use crate::{
    core::material::get_material_by_id,
    entities::{Bundle, CutOrder, Material, bundle, cut_order, material},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashMap;

/// Administrative status of a cut order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Order is open; bundles can still be added and worked
    Active,
    /// Order is closed out; its bundles remain on record
    Inactive,
}

impl OrderStatus {
    /// The label stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// Parses a stored label back into a status.
    ///
    /// # Errors
    /// Returns `Error::InvalidStatus` for any label this module never wrote.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(Error::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Everything needed to create a cut order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Unique order number, e.g. `"OC-2024-0117"`
    pub code: String,
    /// Date the order was placed
    pub date: Date,
    /// Material the order cuts, if already decided
    pub material_id: Option<i64>,
    /// Initial workflow label, e.g. `"pending"`
    pub workflow_status: String,
    /// Bundles the workflow expects to produce; must not be negative
    pub pending_bundles: i32,
}

/// A cut order with its relational context resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    /// The order row itself
    pub order: cut_order::Model,
    /// Material the order cuts, if one is referenced
    pub material: Option<material::Model>,
    /// The order's bundles ordered by running number
    pub bundles: Vec<bundle::Model>,
}

/// Creates a cut order. New orders start `Active` with no completed bundles.
///
/// # Errors
/// * `Error::Config` - Code is blank or the pending count is negative
/// * `Error::MaterialNotFound` - The referenced material does not exist
pub async fn create_order(db: &DatabaseConnection, new_order: NewOrder) -> Result<cut_order::Model> {
    let code = new_order.code.trim();
    if code.is_empty() {
        return Err(Error::Config {
            message: "Order code cannot be empty".to_string(),
        });
    }
    if new_order.pending_bundles < 0 {
        return Err(Error::Config {
            message: "Pending bundle count cannot be negative".to_string(),
        });
    }
    if let Some(material_id) = new_order.material_id {
        if get_material_by_id(db, material_id).await?.is_none() {
            return Err(Error::MaterialNotFound { id: material_id });
        }
    }

    let model = cut_order::ActiveModel {
        code: Set(code.to_string()),
        date: Set(new_order.date),
        status: Set(OrderStatus::Active.as_str().to_string()),
        workflow_status: Set(new_order.workflow_status),
        material_id: Set(new_order.material_id),
        completed_bundles: Set(0),
        pending_bundles: Set(new_order.pending_bundles),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Gets one order by its code, with material and bundles resolved.
///
/// # Errors
/// * `Error::OrderNotFound` - No order carries that code
pub async fn get_order_by_code(db: &DatabaseConnection, code: &str) -> Result<OrderDetail> {
    let order = CutOrder::find()
        .filter(cut_order::Column::Code.eq(code))
        .one(db)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            order: code.to_string(),
        })?;

    let mat = order.find_related(Material).one(db).await?;
    let bundles = crate::core::bundle::list_bundles_for_order(db, order.id).await?;

    Ok(OrderDetail {
        order,
        material: mat,
        bundles,
    })
}

/// Lists all orders sorted by code, each with material and bundles resolved.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<OrderDetail>> {
    let orders = CutOrder::find()
        .find_also_related(Material)
        .order_by_asc(cut_order::Column::Code)
        .all(db)
        .await?;

    // Group every bundle by its owner in one pass instead of a query per order
    let mut bundles_by_order: HashMap<i64, Vec<bundle::Model>> = HashMap::new();
    let all_bundles = Bundle::find()
        .order_by_asc(bundle::Column::RawNumber)
        .order_by_asc(bundle::Column::Id)
        .all(db)
        .await?;
    for item in all_bundles {
        bundles_by_order
            .entry(item.cut_order_id)
            .or_default()
            .push(item);
    }

    Ok(orders
        .into_iter()
        .map(|(order, mat)| {
            let bundles = bundles_by_order.remove(&order.id).unwrap_or_default();
            OrderDetail {
                order,
                material: mat,
                bundles,
            }
        })
        .collect())
}

/// Sets an order's administrative status.
///
/// Only the order row changes; its bundles keep their own lifecycle states.
///
/// # Errors
/// * `Error::OrderNotFound` - No order with that id
pub async fn set_order_status(
    db: &DatabaseConnection,
    order_id: i64,
    status: OrderStatus,
) -> Result<cut_order::Model> {
    let existing = CutOrder::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            order: order_id.to_string(),
        })?;

    let mut updated: cut_order::ActiveModel = existing.into();
    updated.status = Set(status.as_str().to_string());
    updated.update(db).await.map_err(Into::into)
}

/// Sets an order's free-form workflow label.
///
/// # Errors
/// * `Error::OrderNotFound` - No order with that id
pub async fn set_workflow_status(
    db: &DatabaseConnection,
    order_id: i64,
    workflow_status: &str,
) -> Result<cut_order::Model> {
    let existing = CutOrder::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            order: order_id.to_string(),
        })?;

    let mut updated: cut_order::ActiveModel = existing.into();
    updated.workflow_status = Set(workflow_status.to_string());
    updated.update(db).await.map_err(Into::into)
}

/// Sets the workflow's completed/pending bundle counts for an order.
///
/// # Errors
/// * `Error::Config` - Either count is negative
/// * `Error::OrderNotFound` - No order with that id
pub async fn set_bundle_counts(
    db: &DatabaseConnection,
    order_id: i64,
    completed_bundles: i32,
    pending_bundles: i32,
) -> Result<cut_order::Model> {
    if completed_bundles < 0 || pending_bundles < 0 {
        return Err(Error::Config {
            message: "Bundle counts cannot be negative".to_string(),
        });
    }

    let existing = CutOrder::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            order: order_id.to_string(),
        })?;

    let mut updated: cut_order::ActiveModel = existing.into();
    updated.completed_bundles = Set(completed_bundles);
    updated.pending_bundles = Set(pending_bundles);
    updated.update(db).await.map_err(Into::into)
}

/// Status filter for the order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatusFilter {
    /// Keep every order
    #[default]
    All,
    /// Keep only `Active` orders
    Active,
    /// Keep only `Inactive` orders
    Inactive,
}

/// Filters already-loaded orders by code substring and status.
///
/// The code match is case-insensitive; an empty search term matches every
/// order. Pure: the input is never reordered, only narrowed.
#[must_use]
pub fn filter_orders<'a>(
    orders: &'a [OrderDetail],
    search_term: &str,
    status: OrderStatusFilter,
) -> Vec<&'a OrderDetail> {
    let needle = search_term.to_lowercase();

    orders
        .iter()
        .filter(|detail| {
            let code_matches = detail.order.code.to_lowercase().contains(&needle);
            let status_matches = match status {
                OrderStatusFilter::All => true,
                OrderStatusFilter::Active => detail.order.status == OrderStatus::Active.as_str(),
                OrderStatusFilter::Inactive => {
                    detail.order.status == OrderStatus::Inactive.as_str()
                }
            };
            code_matches && status_matches
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{
        create_test_bundle, create_test_material, create_test_order, setup_test_db,
    };

    fn detail(code: &str, status: OrderStatus) -> OrderDetail {
        OrderDetail {
            order: cut_order::Model {
                id: 0,
                code: code.to_string(),
                date: Date::default(),
                status: status.as_str().to_string(),
                workflow_status: "pending".to_string(),
                material_id: None,
                completed_bundles: 0,
                pending_bundles: 0,
                created_at: chrono::Utc::now(),
            },
            material: None,
            bundles: Vec::new(),
        }
    }

    #[test]
    fn test_order_status_labels_round_trip() -> Result<()> {
        for status in [OrderStatus::Active, OrderStatus::Inactive] {
            assert_eq!(OrderStatus::parse(status.as_str())?, status);
        }
        assert!(OrderStatus::parse("archived").is_err());
        Ok(())
    }

    #[test]
    fn test_filter_orders_matches_code_substring_case_insensitive() {
        let orders = vec![
            detail("OC-2024-001", OrderStatus::Active),
            detail("OC-2024-012", OrderStatus::Active),
            detail("OC-2025-001", OrderStatus::Active),
        ];

        let kept = filter_orders(&orders, "oc-2024", OrderStatusFilter::All);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_filter_orders_empty_search_keeps_all() {
        let orders = vec![
            detail("OC-100", OrderStatus::Active),
            detail("OC-200", OrderStatus::Inactive),
        ];

        let kept = filter_orders(&orders, "", OrderStatusFilter::All);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_filter_orders_by_status() {
        let orders = vec![
            detail("OC-100", OrderStatus::Active),
            detail("OC-200", OrderStatus::Inactive),
            detail("OC-300", OrderStatus::Active),
        ];

        let kept = filter_orders(&orders, "", OrderStatusFilter::Inactive);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].order.code, "OC-200");
    }

    #[test]
    fn test_filter_orders_combines_search_and_status() {
        let orders = vec![
            detail("OC-100", OrderStatus::Active),
            detail("OC-101", OrderStatus::Inactive),
            detail("XX-100", OrderStatus::Active),
        ];

        let kept = filter_orders(&orders, "oc", OrderStatusFilter::Active);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].order.code, "OC-100");
    }

    #[tokio::test]
    async fn test_create_order_starts_active() -> Result<()> {
        let db = setup_test_db().await?;

        let order = create_order(
            &db,
            NewOrder {
                code: "  OC-2024-001 ".to_string(),
                date: Date::default(),
                material_id: None,
                workflow_status: "pending".to_string(),
                pending_bundles: 12,
            },
        )
        .await?;

        assert_eq!(order.code, "OC-2024-001");
        assert_eq!(order.status, "Active");
        assert_eq!(order.completed_bundles, 0);
        assert_eq!(order.pending_bundles, 12);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_rejects_blank_code() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_order(
            &db,
            NewOrder {
                code: "   ".to_string(),
                date: Date::default(),
                material_id: None,
                workflow_status: "pending".to_string(),
                pending_bundles: 0,
            },
        )
        .await;

        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_rejects_unknown_material() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_order(
            &db,
            NewOrder {
                code: "OC-100".to_string(),
                date: Date::default(),
                material_id: Some(404),
                workflow_status: "pending".to_string(),
                pending_bundles: 0,
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::MaterialNotFound { id: 404 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_rejects_duplicate_code() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_order(&db, "OC-100").await?;

        let result = create_order(
            &db,
            NewOrder {
                code: "OC-100".to_string(),
                date: Date::default(),
                material_id: None,
                workflow_status: "pending".to_string(),
                pending_bundles: 0,
            },
        )
        .await;

        assert!(matches!(result, Err(Error::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_by_code_resolves_context() -> Result<()> {
        let db = setup_test_db().await?;
        let mat = create_test_material(&db, "Carton 120g").await?;
        let order = create_order(
            &db,
            NewOrder {
                code: "OC-100".to_string(),
                date: Date::default(),
                material_id: Some(mat.id),
                workflow_status: "cutting".to_string(),
                pending_bundles: 2,
            },
        )
        .await?;
        create_test_bundle(&db, order.id, "b1", 80).await?;

        let found = get_order_by_code(&db, "OC-100").await?;

        assert_eq!(found.order.id, order.id);
        assert_eq!(found.material.map(|m| m.nombre), Some("Carton 120g".to_string()));
        assert_eq!(found.bundles.len(), 1);
        assert_eq!(found.bundles[0].sheets, 80);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_by_code_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_order_by_code(&db, "OC-404").await;
        assert!(matches!(
            result,
            Err(Error::OrderNotFound { order }) if order == "OC-404"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_sorted_with_bundles_grouped() -> Result<()> {
        let db = setup_test_db().await?;
        let second = create_test_order(&db, "OC-200").await?;
        let first = create_test_order(&db, "OC-100").await?;
        create_test_bundle(&db, first.id, "a", 10).await?;
        create_test_bundle(&db, second.id, "b", 20).await?;
        create_test_bundle(&db, second.id, "c", 30).await?;

        let orders = list_orders(&db).await?;

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order.code, "OC-100");
        assert_eq!(orders[0].bundles.len(), 1);
        assert_eq!(orders[1].order.code, "OC-200");
        assert_eq!(orders[1].bundles.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_order_status_leaves_bundles_alone() -> Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, "OC-100").await?;
        let item = create_test_bundle(&db, order.id, "b1", 40).await?;

        let updated = set_order_status(&db, order.id, OrderStatus::Inactive).await?;
        assert_eq!(updated.status, "Inactive");

        let stored = crate::core::bundle::get_bundle_by_id(&db, item.id)
            .await?
            .unwrap();
        assert_eq!(stored.status, item.status);
        assert_eq!(stored.sheets, 40);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_workflow_status() -> Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, "OC-100").await?;

        let updated = set_workflow_status(&db, order.id, "cutting").await?;
        assert_eq!(updated.workflow_status, "cutting");
        Ok(())
    }

    #[tokio::test]
    async fn test_set_bundle_counts_rejects_negative() -> Result<()> {
        let db = setup_test_db().await?;
        let order = create_test_order(&db, "OC-100").await?;

        let updated = set_bundle_counts(&db, order.id, 3, 9).await?;
        assert_eq!(updated.completed_bundles, 3);
        assert_eq!(updated.pending_bundles, 9);

        let result = set_bundle_counts(&db, order.id, -1, 9).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }
}
