//! Material catalog business logic.
//!
//! Materials are the stock the plant cuts from. The catalog is soft-deleted:
//! retired materials keep their rows (orders may still reference them) but
//! stop showing up in the pick lists.

use crate::{
    entities::{Material, material},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a material. New materials start active.
///
/// # Errors
/// * `Error::Config` - The name is blank
pub async fn create_material(
    db: &DatabaseConnection,
    nombre: String,
    codigo: Option<String>,
) -> Result<material::Model> {
    if nombre.trim().is_empty() {
        return Err(Error::Config {
            message: "Material name cannot be empty".to_string(),
        });
    }

    let model = material::ActiveModel {
        nombre: Set(nombre.trim().to_string()),
        codigo: Set(codigo),
        activo: Set(true),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Gets a material by its id.
pub async fn get_material_by_id(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Option<material::Model>> {
    Material::find_by_id(material_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists active materials sorted by name. Retired materials are left out.
pub async fn list_active_materials(db: &DatabaseConnection) -> Result<Vec<material::Model>> {
    Material::find()
        .filter(material::Column::Activo.eq(true))
        .order_by_asc(material::Column::Nombre)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retires a material so it no longer appears in pick lists.
///
/// # Errors
/// * `Error::MaterialNotFound` - No material with that id
pub async fn retire_material(db: &DatabaseConnection, material_id: i64) -> Result<material::Model> {
    let existing = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or(Error::MaterialNotFound { id: material_id })?;

    let mut updated: material::ActiveModel = existing.into();
    updated.activo = Set(false);
    updated.update(db).await.map_err(Into::into)
}
