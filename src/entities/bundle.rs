//! Bundle entity - Represents a physical unit of cut material.
//!
//! Each bundle is owned by exactly one cut order, holds a positive number of
//! sheets, sits in one storage location, and carries the external logistics
//! identifiers `sscc` and `luid`. Both identifiers are unique across the whole
//! bundle population; the store enforces this, not the split engine.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bundle database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bundles")]
pub struct Model {
    /// Unique identifier for the bundle
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the cut order this bundle belongs to
    pub cut_order_id: i64,
    /// Human-readable label, derived from `base_name` and `raw_number`
    pub name: String,
    /// Label stem shared by all bundles of the same order (e.g. `"Bulto"`)
    pub base_name: String,
    /// Per-order running number, None for bundles imported without one
    pub raw_number: Option<i32>,
    /// Number of sheets in the bundle; always greater than zero
    pub sheets: i32,
    /// Lifecycle status: `"available"`, `"assigned"`, or `"used"` (terminal)
    pub status: String,
    /// Optional reference to the coil the sheets were cut from
    pub num_bobina: Option<String>,
    /// Serial Shipping Container Code, unique per bundle
    #[sea_orm(unique)]
    pub sscc: String,
    /// Logistics Unit Identifier, unique per bundle
    #[sea_orm(unique)]
    pub luid: String,
    /// ID of the storage location currently holding the bundle
    pub location_id: i64,
    /// When the bundle was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Bundle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each bundle belongs to one cut order
    #[sea_orm(
        belongs_to = "super::cut_order::Entity",
        from = "Column::CutOrderId",
        to = "super::cut_order::Column::Id"
    )]
    CutOrder,
    /// Each bundle sits in one storage location
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
    /// One bundle has many history entries
    #[sea_orm(has_many = "super::bundle_history::Entity")]
    History,
}

impl Related<super::cut_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CutOrder.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::bundle_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
