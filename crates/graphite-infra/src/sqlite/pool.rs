//! Quest store handle: SQLite in WAL mode behind two sqlx pools.
//!
//! Reads (listing, lookups) share a small read-only pool; every insert goes
//! through a single writer connection, so SQLite never sees competing
//! writers and claim uniqueness is decided by one connection in order.
//!
//! Acquired once at startup, cloned into every repository, closed on
//! shutdown.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Concurrent read connections.
const READER_CONNECTIONS: u32 = 8;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Split read/write pool.
#[derive(Clone)]
pub struct DatabasePool {
    /// Read-only connections for SELECTs.
    pub reader: SqlitePool,
    /// The one connection that writes.
    pub writer: SqlitePool,
}

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT)
        .create_if_missing(true))
}

impl DatabasePool {
    /// Open the database, apply pending migrations, then open the readers.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = connect_options(database_url)?;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await?;
        Self::migrate(&writer).await?;

        // Readers open after migrations so they never see a partial schema.
        let reader = SqlitePoolOptions::new()
            .max_connections(READER_CONNECTIONS)
            .connect_with(options.read_only(true))
            .await?;

        tracing::debug!(readers = READER_CONNECTIONS, "database pool ready");
        Ok(Self { reader, writer })
    }

    async fn migrate(writer: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("../../migrations").run(writer).await?;
        Ok(())
    }

    /// Close both pools, waiting for checked-out connections to come back.
    pub async fn close(&self) {
        self.reader.close().await;
        self.writer.close().await;
    }
}
