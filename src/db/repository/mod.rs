//! Repository layer: persistence boundary for safety alerts.
//!
//! The engine only ever talks to [`AlertRepository`]; `SqliteAlertRepository`
//! is the bundled implementation.

mod alert;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use super::{open_database, open_memory_database, DatabaseError};
use crate::models::{ContraindicationAlert, RedFlagAlert};

pub use alert::*;

/// Persistence contract the alert store calls through.
pub trait AlertRepository {
    fn get_all_contraindications(&self) -> Result<Vec<ContraindicationAlert>, DatabaseError>;
    fn get_all_red_flags(&self) -> Result<Vec<RedFlagAlert>, DatabaseError>;
    fn save_contraindication(&self, alert: &ContraindicationAlert) -> Result<(), DatabaseError>;
    fn update_contraindication(&self, alert: &ContraindicationAlert) -> Result<(), DatabaseError>;
    fn save_red_flag(&self, alert: &RedFlagAlert) -> Result<(), DatabaseError>;
    fn update_red_flag(&self, alert: &RedFlagAlert) -> Result<(), DatabaseError>;
}

/// SQLite-backed alert repository. The connection is serialised behind a mutex
/// so the repository can be shared between threads.
pub struct SqliteAlertRepository {
    conn: Mutex<Connection>,
}

impl SqliteAlertRepository {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Open (creating and migrating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self::new(open_database(path)?))
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::new(open_memory_database()?))
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        let conn = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&conn)
    }
}

impl AlertRepository for SqliteAlertRepository {
    fn get_all_contraindications(&self) -> Result<Vec<ContraindicationAlert>, DatabaseError> {
        self.with_conn(load_contraindication_alerts)
    }

    fn get_all_red_flags(&self) -> Result<Vec<RedFlagAlert>, DatabaseError> {
        self.with_conn(load_red_flag_alerts)
    }

    fn save_contraindication(&self, alert: &ContraindicationAlert) -> Result<(), DatabaseError> {
        self.with_conn(|conn| insert_contraindication_alert(conn, alert))
    }

    fn update_contraindication(&self, alert: &ContraindicationAlert) -> Result<(), DatabaseError> {
        self.with_conn(|conn| update_contraindication_alert(conn, alert))
    }

    fn save_red_flag(&self, alert: &RedFlagAlert) -> Result<(), DatabaseError> {
        self.with_conn(|conn| insert_red_flag_alert(conn, alert))
    }

    fn update_red_flag(&self, alert: &RedFlagAlert) -> Result<(), DatabaseError> {
        self.with_conn(|conn| update_red_flag_alert(conn, alert))
    }
}
