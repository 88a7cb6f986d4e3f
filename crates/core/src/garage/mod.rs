//! Garage database: previously identified vehicles.
//!
//! The larger system remembers which platform each vehicle was identified
//! as, so a controller can skip re-fingerprinting on the next drive. This
//! module wraps a SQLite database storing those records.
//!
//! The `platform` column holds whatever string was current at record time
//! (in old databases that may be a retired display name), so reads go
//! through `migration::resolve_persisted` before the value is used as a
//! `PlatformId` anywhere else.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

/// Minimum schema version we know how to handle.
///
/// `0` means "no schema yet" (fresh DB).
const MIN_SUPPORTED_SCHEMA_VERSION: i32 = 0;

/// Latest schema version this crate knows about.
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Error type for garage database operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Underlying SQLite error.
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The database was created with a newer schema version than we support.
    #[error(
        "Unsupported schema version {found}; supported range is {min_supported}..={max_supported}"
    )]
    UnsupportedSchemaVersion { found: i32, min_supported: i32, max_supported: i32 },
}

/// Convenience result type for DB operations.
pub type DbResult<T> = Result<T, DbError>;

/// Record describing one identified vehicle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VehicleRecord {
    /// Caller-chosen vehicle name (unique per garage).
    pub name: String,
    /// Platform string as persisted; resolve before use.
    pub platform: String,
    /// RFC 3339 timestamp of the identification.
    pub identified_at: String,
    /// SHA-256 digest of the capture the identification ran on, if any.
    pub capture_hash: Option<String>,
}

impl VehicleRecord {
    /// Build a record stamped with the current time.
    pub fn new(name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            identified_at: Utc::now().to_rfc3339(),
            capture_hash: None,
        }
    }

    pub fn with_capture_hash(mut self, capture_hash: Option<String>) -> Self {
        self.capture_hash = capture_hash;
        self
    }
}

/// SQLite-backed garage database.
///
/// A thin wrapper around `rusqlite::Connection` that is responsible for:
/// - Opening/creating the DB file.
/// - Applying schema migrations.
/// - Small, testable helpers for recording and listing vehicles.
#[derive(Debug)]
pub struct GarageDb {
    conn: Connection,
}

impl GarageDb {
    /// Open (or create) a garage database at the given path and ensure the
    /// schema exists.
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        apply_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Expose a reference to the underlying connection for advanced callers.
    /// For most code, prefer higher-level helpers.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Insert a vehicle record, replacing any previous record for the same
    /// name. Returns the row id.
    pub fn upsert_vehicle(&self, record: &VehicleRecord) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO vehicles (name, platform, identified_at, capture_hash)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(name) DO UPDATE SET
                platform = excluded.platform,
                identified_at = excluded.identified_at,
                capture_hash = excluded.capture_hash
            "#,
            params![record.name, record.platform, record.identified_at, record.capture_hash],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List all vehicles (ordered by id).
    pub fn list_vehicles(&self) -> DbResult<Vec<VehicleRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT name, platform, identified_at, capture_hash
            FROM vehicles
            ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(VehicleRecord {
                name: row.get(0)?,
                platform: row.get(1)?,
                identified_at: row.get(2)?,
                capture_hash: row.get(3)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Look up one vehicle by name.
    pub fn find_vehicle(&self, name: &str) -> DbResult<Option<VehicleRecord>> {
        let record = self
            .conn
            .query_row(
                r#"
                SELECT name, platform, identified_at, capture_hash
                FROM vehicles
                WHERE name = ?1
                "#,
                params![name],
                |row| {
                    Ok(VehicleRecord {
                        name: row.get(0)?,
                        platform: row.get(1)?,
                        identified_at: row.get(2)?,
                        capture_hash: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }
}

/// Open a garage database with path context attached, for frontends that
/// report errors via `anyhow`.
pub fn open_garage(path: impl AsRef<Path>) -> anyhow::Result<GarageDb> {
    let path = path.as_ref();
    GarageDb::open(path)
        .with_context(|| format!("Failed to open garage database at {}", path.display()))
}

/// Apply schema migrations to bring the database to the latest version.
///
/// We use `PRAGMA user_version` as the schema version indicator.
///
/// Version map:
/// - 0: no schema
/// - 1: initial schema (vehicles)
fn apply_migrations(conn: &Connection) -> DbResult<()> {
    let current_version = current_schema_version(conn)?;

    // Reject DBs created with a newer schema than we support.
    if current_version > CURRENT_SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            found: current_version,
            min_supported: MIN_SUPPORTED_SCHEMA_VERSION,
            max_supported: CURRENT_SCHEMA_VERSION,
        });
    }

    if current_version == 0 {
        conn.execute_batch(
            r#"
            BEGIN;
            CREATE TABLE IF NOT EXISTS vehicles (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                name          TEXT NOT NULL UNIQUE,
                platform      TEXT NOT NULL,
                identified_at TEXT NOT NULL,
                capture_hash  TEXT
            );

            PRAGMA user_version = 1;
            COMMIT;
            "#,
        )?;
    }

    Ok(())
}

/// Read the SQLite schema version from `PRAGMA user_version`.
fn current_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}
