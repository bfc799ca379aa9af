use rusqlite::Connection;

use crate::error::CircleResult;

/// Initialize the database schema. Creates all tables if they don't exist
/// and seeds the circle counter. `registry_meta` also holds the chain's
/// `block_height` once a block has been mined.
pub fn initialize(conn: &Connection) -> CircleResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS registry_meta (
            key TEXT PRIMARY KEY NOT NULL,
            value INTEGER NOT NULL
        );

        INSERT OR IGNORE INTO registry_meta (key, value) VALUES ('next_circle_id', 1);

        CREATE TABLE IF NOT EXISTS circles (
            id INTEGER PRIMARY KEY NOT NULL CHECK (id > 0),
            name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 50),
            creator TEXT NOT NULL,
            created_at INTEGER NOT NULL CHECK (created_at >= 0),
            member_count INTEGER NOT NULL DEFAULT 0 CHECK (member_count >= 0),
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS circle_members (
            circle_id INTEGER NOT NULL REFERENCES circles(id),
            position INTEGER NOT NULL,
            member TEXT NOT NULL,
            PRIMARY KEY (circle_id, member),
            UNIQUE (circle_id, position)
        );

        CREATE INDEX IF NOT EXISTS idx_circle_members_member ON circle_members(member);

        CREATE TABLE IF NOT EXISTS transactions (
            tx_id TEXT PRIMARY KEY NOT NULL,
            seq INTEGER NOT NULL UNIQUE,
            block_height INTEGER NOT NULL CHECK (block_height >= 0),
            sender TEXT NOT NULL,
            function TEXT NOT NULL,
            args TEXT NOT NULL,
            ok_value INTEGER,
            error_code TEXT,
            submitted_at TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
