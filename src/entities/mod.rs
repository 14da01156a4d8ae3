//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod bundle;
pub mod bundle_history;
pub mod cut_order;
pub mod location;
pub mod material;

// Re-export specific types to avoid conflicts
pub use bundle::{Column as BundleColumn, Entity as Bundle, Model as BundleModel};
pub use bundle_history::{
    Column as BundleHistoryColumn, Entity as BundleHistory, Model as BundleHistoryModel,
};
pub use cut_order::{Column as CutOrderColumn, Entity as CutOrder, Model as CutOrderModel};
pub use location::{Column as LocationColumn, Entity as Location, Model as LocationModel};
pub use material::{Column as MaterialColumn, Entity as Material, Model as MaterialModel};
