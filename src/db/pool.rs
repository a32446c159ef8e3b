//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! Besides the connection it carries the rolling-window configuration, so a
//! `DbPool` is the whole context the attendance engine needs.

use crate::config::Config;
use crate::core::rolling::RollingWindow;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;
use rusqlite::{Connection, Result};

pub struct DbPool {
    pub conn: Connection,
    pub window: RollingWindow,
}

impl DbPool {
    /// Open without touching the schema, default window.
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(expand_tilde(path))?;
        Ok(Self {
            conn,
            window: RollingWindow::default(),
        })
    }

    /// Open the configured database, apply pending migrations and take the
    /// window definition from the config.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let pool = Self::new(&cfg.database)?.with_window(RollingWindow::from_config(cfg));
        init_db(&pool.conn)?;
        Ok(pool)
    }

    /// Migrated in-memory database, mostly for tests.
    pub fn in_memory(window: RollingWindow) -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn, window })
    }

    pub fn with_window(mut self, window: RollingWindow) -> Self {
        self.window = window;
        self
    }
}
