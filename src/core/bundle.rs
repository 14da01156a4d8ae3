//! Bundle business logic - Handles all bundle-related operations.
//!
//! A bundle is a stack of cut sheets belonging to one cut order, sitting in
//! one storage location, identified externally by an SSCC/LUID pair. Writes
//! that touch more than one table (creation, moves) run in a transaction and
//! leave a trail in `bundle_history`; the trail is written here, never by
//! the pure engines in [`crate::core::split`].

use crate::{
    core::identifier::LogisticsIds,
    entities::{Bundle, BundleHistory, CutOrder, bundle, bundle_history},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// History action recorded when a bundle row comes into existence.
pub const ACTION_CREATED: &str = "created";
/// History action recorded when a bundle changes storage location.
pub const ACTION_MOVED: &str = "moved";
/// History action recorded on the original bundle of a split.
pub const ACTION_SPLIT: &str = "split";

/// Lifecycle status of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleStatus {
    /// Free stock, not promised to anything
    Available,
    /// Reserved for downstream work
    Assigned,
    /// Consumed. Terminal: no transition leaves this status
    Used,
}

impl BundleStatus {
    /// The label stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Assigned => "assigned",
            Self::Used => "used",
        }
    }

    /// Parses a stored label back into a status.
    ///
    /// # Errors
    /// Returns `Error::InvalidStatus` for any label this module never wrote.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "available" => Ok(Self::Available),
            "assigned" => Ok(Self::Assigned),
            "used" => Ok(Self::Used),
            other => Err(Error::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Everything needed to create a bundle under an order.
#[derive(Debug, Clone)]
pub struct NewBundle {
    /// Id of the owning cut order
    pub cut_order_id: i64,
    /// Name stem shared by the order's bundles, e.g. `"Bulto"`
    pub base_name: String,
    /// Running number within the order, if already assigned
    pub raw_number: Option<i32>,
    /// Sheet count, must be positive
    pub sheets: i32,
    /// Status the bundle starts in
    pub status: BundleStatus,
    /// Coil the sheets were cut from
    pub num_bobina: Option<String>,
    /// SSCC/LUID pair; trimmed before storage
    pub identifiers: LogisticsIds,
    /// Code of the storage location the bundle starts in
    pub location_code: String,
}

/// Builds the display name of a bundle from its stem and running number.
#[must_use]
pub fn format_bundle_name(base_name: &str, raw_number: Option<i32>) -> String {
    match raw_number {
        Some(number) => format!("{base_name} {number}"),
        None => base_name.to_string(),
    }
}

/// Creates a bundle and its `created` history entry in one transaction.
///
/// # Arguments
/// * `db` - Database connection
/// * `new_bundle` - Field values for the bundle to create
///
/// # Errors
/// * `Error::InvalidQuantity` - Sheet count is zero or negative
/// * `Error::MissingIdentifiers` - SSCC or LUID is empty after trimming
/// * `Error::OrderNotFound` - The owning order does not exist
/// * `Error::LocationNotFound` - The location code is unknown
pub async fn create_bundle(
    db: &DatabaseConnection,
    new_bundle: NewBundle,
) -> Result<bundle::Model> {
    if new_bundle.sheets <= 0 {
        return Err(Error::InvalidQuantity {
            input: new_bundle.sheets.to_string(),
        });
    }
    if new_bundle.base_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Bundle base name cannot be empty".to_string(),
        });
    }
    let identifiers = new_bundle
        .identifiers
        .normalized()
        .ok_or(Error::MissingIdentifiers)?;

    let txn = db.begin().await?;

    if CutOrder::find_by_id(new_bundle.cut_order_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(Error::OrderNotFound {
            order: new_bundle.cut_order_id.to_string(),
        });
    }
    let location =
        crate::core::location::get_location_by_code(&txn, &new_bundle.location_code).await?;

    let model = bundle::ActiveModel {
        cut_order_id: Set(new_bundle.cut_order_id),
        name: Set(format_bundle_name(
            &new_bundle.base_name,
            new_bundle.raw_number,
        )),
        base_name: Set(new_bundle.base_name),
        raw_number: Set(new_bundle.raw_number),
        sheets: Set(new_bundle.sheets),
        status: Set(new_bundle.status.as_str().to_string()),
        num_bobina: Set(new_bundle.num_bobina),
        sscc: Set(identifiers.sscc),
        luid: Set(identifiers.luid),
        location_id: Set(location.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let created = model.insert(&txn).await?;
    append_history(&txn, created.id, ACTION_CREATED, &location.codigo).await?;

    txn.commit().await?;
    Ok(created)
}

/// Gets a bundle by its id.
pub async fn get_bundle_by_id(
    db: &DatabaseConnection,
    bundle_id: i64,
) -> Result<Option<bundle::Model>> {
    Bundle::find_by_id(bundle_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists an order's bundles ordered by running number.
pub async fn list_bundles_for_order(
    db: &DatabaseConnection,
    cut_order_id: i64,
) -> Result<Vec<bundle::Model>> {
    Bundle::find()
        .filter(bundle::Column::CutOrderId.eq(cut_order_id))
        .order_by_asc(bundle::Column::RawNumber)
        .order_by_asc(bundle::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Moves a bundle to another storage location, recording the move.
///
/// # Errors
/// * `Error::BundleNotFound` - No bundle with that id
/// * `Error::LocationNotFound` - The destination code is unknown
pub async fn move_bundle(
    db: &DatabaseConnection,
    bundle_id: i64,
    location_code: &str,
) -> Result<bundle::Model> {
    let txn = db.begin().await?;

    let existing = Bundle::find_by_id(bundle_id)
        .one(&txn)
        .await?
        .ok_or(Error::BundleNotFound { id: bundle_id })?;
    let destination = crate::core::location::get_location_by_code(&txn, location_code).await?;

    let mut updated: bundle::ActiveModel = existing.into();
    updated.location_id = Set(destination.id);
    let moved = updated.update(&txn).await?;

    append_history(&txn, moved.id, ACTION_MOVED, &destination.codigo).await?;

    txn.commit().await?;
    Ok(moved)
}

/// Sets a bundle's lifecycle status.
///
/// `used` is terminal: once a bundle is consumed its sheets are gone, so any
/// further status change is refused.
///
/// # Errors
/// * `Error::BundleNotFound` - No bundle with that id
/// * `Error::BundleUsed` - The bundle was already consumed
/// * `Error::InvalidStatus` - The stored status label is not recognized
pub async fn set_bundle_status(
    db: &DatabaseConnection,
    bundle_id: i64,
    status: BundleStatus,
) -> Result<bundle::Model> {
    let existing = Bundle::find_by_id(bundle_id)
        .one(db)
        .await?
        .ok_or(Error::BundleNotFound { id: bundle_id })?;

    if BundleStatus::parse(&existing.status)? == BundleStatus::Used {
        return Err(Error::BundleUsed { id: bundle_id });
    }

    let mut updated: bundle::ActiveModel = existing.into();
    updated.status = Set(status.as_str().to_string());
    updated.update(db).await.map_err(Into::into)
}

/// Lists a bundle's history entries, oldest first.
pub async fn list_history(
    db: &DatabaseConnection,
    bundle_id: i64,
) -> Result<Vec<bundle_history::Model>> {
    BundleHistory::find()
        .filter(bundle_history::Column::BundleId.eq(bundle_id))
        .order_by_asc(bundle_history::Column::RecordedAt)
        .order_by_asc(bundle_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Appends one history entry for a bundle.
///
/// Works within transactions by accepting any connection type. The location
/// code is stored as text so the entry survives later catalog changes.
pub async fn append_history<C>(
    db: &C,
    bundle_id: i64,
    action: &str,
    location_code: &str,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let entry = bundle_history::ActiveModel {
        bundle_id: Set(bundle_id),
        action: Set(action.to_string()),
        location: Set(location_code.to_string()),
        recorded_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    entry.insert(db).await?;
    Ok(())
}

/// Next free running number within an order.
///
/// Returns one past the highest assigned number, or `1` when no bundle of
/// the order has a number yet.
pub async fn next_raw_number<C>(db: &C, cut_order_id: i64) -> Result<i32>
where
    C: ConnectionTrait,
{
    let highest = Bundle::find()
        .filter(bundle::Column::CutOrderId.eq(cut_order_id))
        .order_by_desc(bundle::Column::RawNumber)
        .one(db)
        .await?;

    Ok(highest.and_then(|b| b.raw_number).map_or(1, |n| n + 1))
}
