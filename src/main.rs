//! DeckMatch organizer backend
//!
//! Main application entry point

use std::time::Duration;

use tracing::{error, info, warn};

use DeckMatch::{
    config::Settings,
    database::{connection, DatabaseService},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting DeckMatch organizer backend...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: Duration::from_secs(30),
        idle_timeout: Some(Duration::from_secs(600)),
        max_lifetime: Some(Duration::from_secs(1800)),
    };
    let db_pool = connection::create_pool(&db_config).await?;

    // Run database migrations
    connection::run_migrations(&db_pool).await?;

    // Initialize database service and business services
    let database = DatabaseService::new(db_pool);
    let services = ServiceFactory::new(database.clone(), settings.clone());

    info!("DeckMatch is ready");

    // Initial pass, then the periodic fallback bounds the staleness of
    // any timer that was skipped or lost.
    run_lifecycle_pass(&database, &services).await;

    let mut ticker = tokio::time::interval(Duration::from_secs(settings.scheduler.fallback_interval_secs));
    ticker.tick().await; // first tick completes immediately

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_lifecycle_pass(&database, &services).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("DeckMatch has been shut down.");
    Ok(())
}

/// Reconcile statuses and re-arm timers for every organizer that still
/// has open events. Failures are per-organizer; one bad pass never stops
/// the others.
async fn run_lifecycle_pass(database: &DatabaseService, services: &ServiceFactory) {
    let organizers = match database.events.organizers_with_open_events().await {
        Ok(organizers) => organizers,
        Err(e) => {
            error!(error = %e, "Failed to list organizers with open events");
            return;
        }
    };

    info!(organizers = organizers.len(), "Running lifecycle fallback pass");

    for organizer_id in organizers {
        match services.lifecycle.fallback_pass(organizer_id).await {
            Ok((updated, armed)) => {
                if updated > 0 || armed > 0 {
                    info!(
                        organizer_id = %organizer_id,
                        updated = updated,
                        armed = armed,
                        "Lifecycle pass applied changes"
                    );
                }
            }
            Err(e) => {
                warn!(organizer_id = %organizer_id, error = %e, "Lifecycle pass failed for organizer");
            }
        }
    }
}
