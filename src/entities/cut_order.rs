//! Cut order entity - Represents a work order that produces material bundles.
//!
//! Each order has a unique code, an Active/Inactive status, a free-form
//! workflow label, and optionally references one material from the catalog.
//! `completed_bundles` and `pending_bundles` are workflow attributes kept by
//! the planning process; they are not derived from the owned bundle count.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cut order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cut_orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique order number (e.g. `"OC-2024-0117"`)
    #[sea_orm(unique)]
    pub code: String,
    /// Date the order was placed
    pub date: Date,
    /// Order status: `"Active"` or `"Inactive"`
    pub status: String,
    /// Free-form workflow label (e.g. `"pending"`, `"cutting"`, `"done"`)
    pub workflow_status: String,
    /// ID of the material this order cuts, None when not yet assigned
    pub material_id: Option<i64>,
    /// Bundles reported finished by the workflow; never negative
    pub completed_bundles: i32,
    /// Bundles still expected by the workflow; never negative
    pub pending_bundles: i32,
    /// When the order was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between CutOrder and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order exclusively owns its bundles
    #[sea_orm(has_many = "super::bundle::Entity")]
    Bundles,
    /// Each order optionally references one material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<super::bundle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bundles.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
