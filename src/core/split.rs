//! Bundle split engine - divides one bundle's sheets into two bundles.
//!
//! Validation and the shape of the outcome live in [`plan_split`], which is
//! pure: it never touches the database and never mutates its inputs. The
//! database is only touched by [`split_bundle`], which persists both halves
//! of a plan inside one transaction. A half-applied split is a
//! data-corruption state, so either the original shrinks and the new bundle
//! exists, or nothing changed.

use crate::{
    core::{
        bundle::{ACTION_CREATED, ACTION_SPLIT},
        identifier::LogisticsIds,
    },
    entities::{Bundle, Location, bundle},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};

/// Parses a sheet quantity from form input.
///
/// # Errors
/// Returns `Error::InvalidQuantity` when the input is not an integer or is
/// zero or negative.
pub fn parse_sheet_count(input: &str) -> Result<i32> {
    let parsed: i32 = input.trim().parse().map_err(|_| Error::InvalidQuantity {
        input: input.to_string(),
    })?;

    if parsed <= 0 {
        return Err(Error::InvalidQuantity {
            input: input.to_string(),
        });
    }

    Ok(parsed)
}

/// The two records a split produces. Nothing has been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    /// The original bundle with its sheet count reduced and its identifiers
    /// replaced by the re-labelled pair
    pub updated_original: bundle::Model,
    /// Contents of the bundle to be created
    pub new_bundle: PlannedBundle,
}

/// The not-yet-persisted half of a split plan. The store assigns id, running
/// number, and display name at commit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedBundle {
    /// Id of the cut order both bundles belong to
    pub cut_order_id: i64,
    /// Name stem inherited from the original bundle
    pub base_name: String,
    /// Sheets moved out of the original
    pub sheets: i32,
    /// Status label inherited from the original
    pub status: String,
    /// Coil lineage inherited from the original
    pub num_bobina: Option<String>,
    /// Trimmed SSCC supplied for the new bundle
    pub sscc: String,
    /// Trimmed LUID supplied for the new bundle
    pub luid: String,
    /// Storage location inherited from the original
    pub location_id: i64,
}

/// The persisted outcome of a split.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// The original bundle as stored after the split
    pub updated_original: bundle::Model,
    /// The created bundle as stored, id and name assigned
    pub new_bundle: bundle::Model,
}

/// Plans moving `requested_sheets` sheets out of `original` into a new
/// bundle.
///
/// Both bundles end up with positive sheet counts and together hold exactly
/// the original's sheets. The new bundle stays in the original's storage
/// location and keeps its status and coil lineage; both bundles get freshly
/// supplied identifier pairs, trimmed.
///
/// Rules are checked in a fixed order and the first failing rule decides
/// the error:
///
/// 1. `requested_sheets` must be positive
/// 2. `requested_sheets` must be strictly below the original's sheet count
/// 3. both identifier pairs must be non-empty after trimming
///
/// # Errors
/// * `Error::InvalidQuantity` - Rule 1 failed
/// * `Error::QuantityTooLarge` - Rule 2 failed
/// * `Error::MissingIdentifiers` - Rule 3 failed
pub fn plan_split(
    original: &bundle::Model,
    requested_sheets: i32,
    original_ids: &LogisticsIds,
    new_ids: &LogisticsIds,
) -> Result<SplitPlan> {
    if requested_sheets <= 0 {
        return Err(Error::InvalidQuantity {
            input: requested_sheets.to_string(),
        });
    }
    if requested_sheets >= original.sheets {
        return Err(Error::QuantityTooLarge {
            requested: requested_sheets,
            available: original.sheets,
        });
    }
    let original_ids = original_ids.normalized().ok_or(Error::MissingIdentifiers)?;
    let new_ids = new_ids.normalized().ok_or(Error::MissingIdentifiers)?;

    let mut updated_original = original.clone();
    updated_original.sheets = original.sheets - requested_sheets;
    updated_original.sscc = original_ids.sscc;
    updated_original.luid = original_ids.luid;

    let new_bundle = PlannedBundle {
        cut_order_id: original.cut_order_id,
        base_name: original.base_name.clone(),
        sheets: requested_sheets,
        status: original.status.clone(),
        num_bobina: original.num_bobina.clone(),
        sscc: new_ids.sscc,
        luid: new_ids.luid,
        location_id: original.location_id,
    };

    Ok(SplitPlan {
        updated_original,
        new_bundle,
    })
}

/// Splits a stored bundle, committing both halves atomically.
///
/// Fetches the bundle, runs [`plan_split`], then inside one transaction:
/// updates the original, inserts the new bundle with the order's next
/// running number and derived display name, and appends a `split` history
/// entry for the original and a `created` one for the new bundle. On any
/// failure the transaction rolls back and the store is untouched.
///
/// # Arguments
/// * `db` - Database connection
/// * `bundle_id` - Id of the bundle to split
/// * `requested_sheets` - Sheets to move into the new bundle
/// * `original_ids` - Re-labelled identifier pair for the original
/// * `new_ids` - Identifier pair for the new bundle
///
/// # Errors
/// * `Error::BundleNotFound` - No bundle with that id
/// * Any [`plan_split`] error
/// * `Error::Database` - Commit failed, e.g. on a duplicate identifier
pub async fn split_bundle(
    db: &DatabaseConnection,
    bundle_id: i64,
    requested_sheets: i32,
    original_ids: &LogisticsIds,
    new_ids: &LogisticsIds,
) -> Result<SplitOutcome> {
    let txn = db.begin().await?;

    let original = Bundle::find_by_id(bundle_id)
        .one(&txn)
        .await?
        .ok_or(Error::BundleNotFound { id: bundle_id })?;

    let plan = plan_split(&original, requested_sheets, original_ids, new_ids)?;

    let mut updated: bundle::ActiveModel = original.into();
    updated.sheets = Set(plan.updated_original.sheets);
    updated.sscc = Set(plan.updated_original.sscc.clone());
    updated.luid = Set(plan.updated_original.luid.clone());
    let updated_original = updated.update(&txn).await?;

    // Running number and display name are assigned here, not by the plan
    let planned = plan.new_bundle;
    let raw_number =
        crate::core::bundle::next_raw_number(&txn, planned.cut_order_id).await?;
    let location = Location::find_by_id(planned.location_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::LocationNotFound {
            code: planned.location_id.to_string(),
        })?;

    let new_model = bundle::ActiveModel {
        cut_order_id: Set(planned.cut_order_id),
        name: Set(crate::core::bundle::format_bundle_name(
            &planned.base_name,
            Some(raw_number),
        )),
        base_name: Set(planned.base_name),
        raw_number: Set(Some(raw_number)),
        sheets: Set(planned.sheets),
        status: Set(planned.status),
        num_bobina: Set(planned.num_bobina),
        sscc: Set(planned.sscc),
        luid: Set(planned.luid),
        location_id: Set(planned.location_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let new_bundle = new_model.insert(&txn).await?;

    crate::core::bundle::append_history(&txn, updated_original.id, ACTION_SPLIT, &location.codigo)
        .await?;
    crate::core::bundle::append_history(&txn, new_bundle.id, ACTION_CREATED, &location.codigo)
        .await?;

    txn.commit().await?;

    Ok(SplitOutcome {
        updated_original,
        new_bundle,
    })
}
