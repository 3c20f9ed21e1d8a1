use std::sync::Arc;

use tracing::info;

use pitchdesk::web::AppState;
use pitchdesk::Config;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = pitchdesk::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        pitchdesk::logging::init_console_only(&config.logging.level);
    }

    info!("PitchDesk messaging backend");

    let pool = match pitchdesk::db::open(&config.database.path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to open database {}: {e}", config.database.path);
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(AppState::new(pool, config.messaging.clone()));

    if let Err(e) = pitchdesk::web::serve(&config, app_state).await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
