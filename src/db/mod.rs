pub mod migrations;
pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open client storage")?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")
        .context("failed to set storage pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}
