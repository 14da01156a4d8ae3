//! Bundle history entity - Append-only trail of what happened to a bundle.
//!
//! Rows are only ever inserted: `"created"` when a bundle comes into
//! existence, `"moved"` on a location change, `"split"` on the original
//! bundle of a split. The `location` column records the code at the time of
//! the action, so the trail stays readable after later moves.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bundle history database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bundle_history")]
pub struct Model {
    /// Unique identifier for the history entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the bundle this entry belongs to
    pub bundle_id: i64,
    /// Action label: `"created"`, `"moved"`, or `"split"`
    pub action: String,
    /// Location code at the time of the action
    pub location: String,
    /// When the action happened
    pub recorded_at: DateTimeUtc,
}

/// Defines relationships between BundleHistory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each history entry belongs to one bundle
    #[sea_orm(
        belongs_to = "super::bundle::Entity",
        from = "Column::BundleId",
        to = "super::bundle::Column::Id"
    )]
    Bundle,
}

impl Related<super::bundle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bundle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
