use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, trace};

use crate::error::{Result, StoreError};

/// Default on-disk location of the store.
pub const DEFAULT_DB_PATH: &str = "student_management.db";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const POOL_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Text,
    Real,
}

impl DataType {
    fn sql(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
            DataType::Real => "REAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    AutoIncrement,
    Unique,
    NotNull,
}

impl ColumnConstraint {
    fn sql(self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::AutoIncrement => "AUTOINCREMENT",
            ColumnConstraint::Unique => "UNIQUE",
            ColumnConstraint::NotNull => "NOT NULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn sql(&self) -> String {
        let mut parts = vec![self.name.clone(), self.data_type.sql().to_string()];
        parts.extend(self.constraints.iter().map(|c| c.sql().to_string()));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    /// Idempotent DDL for this table.
    pub fn create_statement(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDefinition::sql).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            self.name,
            columns.join(", ")
        )
    }
}

/// Schema definition for the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// The single `students` table.
    pub fn students() -> Self {
        use ColumnConstraint::*;
        Self::new().add_table(
            TableDefinition::new("students")
                .with_column(
                    ColumnDefinition::new("id", DataType::Integer)
                        .with_constraint(PrimaryKey)
                        .with_constraint(AutoIncrement),
                )
                .with_column(
                    ColumnDefinition::new("roll_number", DataType::Text)
                        .with_constraint(Unique)
                        .with_constraint(NotNull),
                )
                .with_column(ColumnDefinition::new("name", DataType::Text).with_constraint(NotNull))
                .with_column(
                    ColumnDefinition::new("course", DataType::Text).with_constraint(NotNull),
                )
                .with_column(ColumnDefinition::new("gpa", DataType::Real).with_constraint(NotNull)),
        )
    }

    fn batch(&self) -> String {
        self.tables
            .iter()
            .map(TableDefinition::create_statement)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// How connections are handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConnectionMode {
    /// Open a fresh connection for every operation and close it afterwards.
    #[default]
    PerOperation,
    /// Check connections out of a bounded `r2d2` pool.
    Pooled { max_size: u32 },
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    #[serde(default)]
    pub connection_mode: ConnectionMode,
}

impl StorageConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            connection_mode: ConnectionMode::PerOperation,
        }
    }

    pub fn with_connection_mode(mut self, mode: ConnectionMode) -> Self {
        self.connection_mode = mode;
        self
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

/// A connection scoped to one operation.
///
/// Dropping it closes the connection (per-operation mode) or returns it to
/// the pool, on every exit path.
pub enum StoreConnection {
    Direct(Connection),
    Pooled(PooledConnection<SqliteConnectionManager>),
}

impl Deref for StoreConnection {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        match self {
            StoreConnection::Direct(conn) => conn,
            StoreConnection::Pooled(conn) => &**conn,
        }
    }
}

impl Drop for StoreConnection {
    fn drop(&mut self) {
        match self {
            StoreConnection::Direct(_) => trace!("closing connection"),
            StoreConnection::Pooled(_) => trace!("returning connection to pool"),
        }
    }
}

/// Owns the on-disk store and hands out connections.
///
/// Constructed explicitly and passed to whoever needs it; there is no
/// process-wide instance.
pub struct StorageManager {
    config: StorageConfig,
    schema: Schema,
    pool: Option<Pool<SqliteConnectionManager>>,
}

impl StorageManager {
    /// Build a manager for the `students` schema.
    ///
    /// Never touches the database file. In pooled mode connections are
    /// opened lazily, so an unreachable store surfaces as
    /// `StoreError::Unavailable` from `acquire_connection`.
    pub fn open(config: StorageConfig) -> Result<Self> {
        let pool = match config.connection_mode {
            ConnectionMode::PerOperation => None,
            ConnectionMode::Pooled { max_size } => {
                let manager = SqliteConnectionManager::file(&config.db_path)
                    .with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT));
                let pool = Pool::builder()
                    .max_size(max_size.max(1))
                    .connection_timeout(POOL_CHECKOUT_TIMEOUT)
                    .build_unchecked(manager);
                debug!(path = %config.db_path.display(), max_size, "connection pool ready");
                Some(pool)
            }
        };

        Ok(Self {
            config,
            schema: Schema::students(),
            pool,
        })
    }

    pub fn path(&self) -> &Path {
        &self.config.db_path
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Create the schema if it is absent. Safe to call on every startup.
    ///
    /// Failures are logged and reported as `false`; callers keep going and
    /// individual operations fail on their own.
    pub fn ensure_schema(&self) -> bool {
        match self.try_ensure_schema() {
            Ok(()) => {
                info!(path = %self.path().display(), "database tables ready");
                true
            }
            Err(err) => {
                error!(path = %self.path().display(), error = %err, code = err.code(), "error creating database tables");
                false
            }
        }
    }

    fn try_ensure_schema(&self) -> Result<()> {
        let conn = self.acquire_connection()?;
        conn.execute_batch(&self.schema.batch())?;
        Ok(())
    }

    /// Hand out a connection for a single operation.
    pub fn acquire_connection(&self) -> Result<StoreConnection> {
        match &self.pool {
            Some(pool) => Ok(StoreConnection::Pooled(pool.get()?)),
            None => {
                let conn = Connection::open(&self.config.db_path).map_err(|err| {
                    StoreError::Unavailable(format!(
                        "open {}: {}",
                        self.config.db_path.display(),
                        err
                    ))
                })?;
                conn.busy_timeout(BUSY_TIMEOUT)?;
                Ok(StoreConnection::Direct(conn))
            }
        }
    }
}
