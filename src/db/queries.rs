use rusqlite::{params, Connection, OptionalExtension};

// ── Key/value client storage ──

pub fn get_item(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM client_storage WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

pub fn set_item(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO client_storage (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET
           value = excluded.value,
           updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

pub fn remove_items(conn: &Connection, keys: &[&str]) -> rusqlite::Result<usize> {
    let mut removed = 0;
    for key in keys {
        removed += conn.execute("DELETE FROM client_storage WHERE key = ?1", params![key])?;
    }
    Ok(removed)
}

/// Writes several keys atomically so a crash never leaves half a session behind.
pub fn set_items(conn: &mut Connection, items: &[(&str, &str)]) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    for (key, value) in items {
        set_item(&tx, key, value)?;
    }
    tx.commit()
}
