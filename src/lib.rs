pub mod config;
pub mod db;
pub mod models;
pub mod safety; // Contraindication detection, safety gate, red-flag referrals

use tracing_subscriber::EnvFilter;

pub use safety::SafetyEngine;

/// Install the global tracing subscriber. `RUST_LOG` wins over the default
/// filter. Calling this more than once is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("{} safety engine v{}", config::APP_NAME, config::APP_VERSION);
}

/// Open the alert database at the default location and load the engine over it.
pub fn open_default_engine() -> Result<SafetyEngine<db::SqliteAlertRepository>, safety::SafetyError> {
    let path = config::database_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(db::DatabaseError::from)?;
    }
    let repository = db::SqliteAlertRepository::open(&path)?;
    SafetyEngine::load(repository)
}
