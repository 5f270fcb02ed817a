use crate::config::Config;
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::Path;

const SYSTEM_MIGRATIONS: &[(&str, &str)] =
    &[("system/000_migrations_table.sql", include_str!("migrations/system/000_migrations_table.sql"))];

/// Milliseconds a connection waits on a locked database before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Shared handle to the on-disk database. Connections are opened per request
/// with [`Database::connect`] and dropped when the request ends.
pub struct Database {
    db: LibsqlDatabase,
}

impl Database {
    pub async fn new(cfg: &Config, data_dir: &Path) -> Result<Self> {
        Self::open(&data_dir.join(cfg.app.get_db())).await
    }

    pub async fn open(path: &Path) -> Result<Self> {
        let db = Builder::new_local(path).build().await?;
        let database = Database { db };

        let conn = database.connect().await?;
        let mut rows = conn.query("PRAGMA journal_mode = WAL", ()).await?;
        while rows.next().await?.is_some() {}

        for (filename, sql) in SYSTEM_MIGRATIONS {
            Self::run_migration(&conn, filename, sql).await?;
        }

        for (filename, sql) in crate::marks::migrations() {
            Self::run_migration(&conn, filename, sql).await?;
        }

        Ok(database)
    }

    pub async fn connect(&self) -> Result<Connection> {
        let conn = self.db.connect()?;
        let mut rows = conn
            .query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"), ())
            .await?;
        while rows.next().await?.is_some() {}
        Ok(conn)
    }

    async fn is_migration_applied(conn: &Connection, name: &str) -> Result<bool> {
        let query = "SELECT 1 FROM _migrations WHERE name = ?";
        match conn.query(query, libsql::params![name]).await {
            Ok(mut rows) => Ok(rows.next().await?.is_some()),
            Err(e) if e.to_string().contains("no such table") => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn record_migration(conn: &Connection, name: &str) -> Result<()> {
        let query = r#"
            INSERT INTO _migrations (name, applied_at)
            VALUES (?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#;
        conn.execute(query, libsql::params![name]).await?;
        Ok(())
    }

    async fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
        if Self::is_migration_applied(conn, name).await? {
            tracing::debug!("migration {} already applied, skipping", name);
            return Ok(());
        }

        tracing::info!("applying migration: {}", name);
        conn.execute_batch(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to execute migration {name}: {e}"))?;

        Self::record_migration(conn, name).await?;
        Ok(())
    }
}
