//! Location entity - Fixed catalog of storage location codes.
//!
//! Locations are little more than their code (`"C1"` .. `"C10"` in the
//! shipped configuration); they are seeded from `config.toml` at startup and
//! referenced by bundles.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage location database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    /// Unique identifier for the location
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Location code shown everywhere in the UI (e.g. `"C3"`)
    #[sea_orm(unique)]
    pub codigo: String,
}

/// Defines relationships between Location and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One location holds many bundles
    #[sea_orm(has_many = "super::bundle::Entity")]
    Bundles,
}

impl Related<super::bundle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bundles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
