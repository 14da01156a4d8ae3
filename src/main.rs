use bundle_control::{
    config,
    core::{dashboard, location, report},
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the storage location catalog
    let location_config = config::locations::load_default_config()
        .inspect_err(|e| error!("Failed to load the location catalog: {}", e))?;
    info!(
        "Loaded location catalog with {} locations.",
        location_config.locations.len()
    );

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed storage locations (if necessary)
    let seeded = location::seed_locations(&db, &location_config)
        .await
        .inspect_err(|e| error!("Failed to seed storage locations: {}", e))?;
    if seeded > 0 {
        info!("Seeded {} missing storage locations.", seeded);
    }

    // 6. Log an inventory snapshot
    let bundles = dashboard::fetch_dashboard_bundles(&db, &dashboard::DashboardFilter::default())
        .await
        .inspect_err(|e| error!("Failed to fetch the dashboard: {}", e))?;
    let totals = report::dashboard_totals(&bundles);
    info!(
        "Inventory: {} bundles, {} sheets in total.",
        totals.bundles, totals.sheets
    );
    for summary in report::summarize_by_location(&bundles) {
        info!(
            "  {}: {} bundles, {} sheets",
            summary.location, summary.bundle_count, summary.total_sheets
        );
    }
    for summary in report::summarize_by_material(&bundles) {
        info!(
            "  {}: {} bundles, {} sheets",
            summary.material_nombre, summary.bundle_count, summary.total_sheets
        );
    }

    Ok(())
}
