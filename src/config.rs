use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MassageSafety";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the alert database inside the data directory.
pub const DATABASE_FILE: &str = "safety_alerts.db";

/// Get the application data directory.
/// ~/MassageSafety/ on all platforms; falls back to the working directory
/// when no home directory can be resolved.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the SQLite alert database.
pub fn database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE)
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    "info,massage_safety=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("MassageSafety"));
    }

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with(DATABASE_FILE));
    }

    #[test]
    fn default_filter_enables_crate_debug() {
        assert!(default_log_filter().contains("massage_safety=debug"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
