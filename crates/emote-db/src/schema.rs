//! Database schema definitions and migrations.

use rusqlite::Connection;

use crate::DbError;

pub fn run_migrations(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS added_emotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    guild_id TEXT NOT NULL,
    url TEXT NOT NULL,
    alias TEXT NOT NULL,
    added_at INTEGER NOT NULL,
    UNIQUE(guild_id, alias)
);

CREATE INDEX IF NOT EXISTS idx_added_emotes_guild_id
    ON added_emotes(guild_id);

CREATE TABLE IF NOT EXISTS guild_emote_settings (
    guild_id TEXT PRIMARY KEY,
    seventv_set_id TEXT,
    bttv_broadcaster_id TEXT,
    ffz_room_id TEXT,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;
