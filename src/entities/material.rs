//! Material entity - Catalog of materials that cut orders work with.
//!
//! Materials are reference data: orders point at them, nothing owns them.
//! The `activo` flag hides retired catalog rows without losing the reference
//! from historical orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Material database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    /// Unique identifier for the material
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the material
    pub nombre: String,
    /// Optional internal catalog code
    pub codigo: Option<String>,
    /// Whether the material is still offered to new orders
    pub activo: bool,
}

/// Defines relationships between Material and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One material is referenced by many cut orders
    #[sea_orm(has_many = "super::cut_order::Entity")]
    CutOrders,
}

impl Related<super::cut_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CutOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
