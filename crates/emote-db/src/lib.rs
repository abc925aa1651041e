//! SQLite persistence for per-guild emote state.
//!
//! Stores the emotes users registered at runtime and which personal
//! emote-set endpoints apply to each guild.

pub mod added_emotes;
pub mod guild_settings;
pub mod schema;

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

/// Thread-safe database handle wrapping a single SQLite connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.configure()?;
        db.migrate()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.configure()?;
        db.migrate()?;
        Ok(db)
    }

    /// Access the underlying connection with a closure.
    pub fn with_conn<F, R>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&Connection) -> Result<R, DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    fn configure(&self) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA busy_timeout=5000;
                 PRAGMA foreign_keys=ON;",
            )?;
            Ok(())
        })
    }

    fn migrate(&self) -> Result<(), DbError> {
        self.with_conn(|conn| {
            schema::run_migrations(conn)?;
            Ok(())
        })
    }
}

/// Database error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::added_emotes::AddedEmote;
    use crate::guild_settings::GuildEmoteSettings;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test DB")
    }

    #[test]
    fn test_open_and_migrate() {
        let db = test_db();
        assert!(db.get_added_emotes("g1").unwrap().is_empty());
    }

    #[test]
    fn test_added_emotes_crud() {
        let db = test_db();
        let emote = AddedEmote {
            url: "https://7tv.app/emotes/abc".into(),
            alias: "myEmote".into(),
        };
        db.insert_added_emote("g1", &emote).unwrap();
        db.insert_added_emote(
            "g1",
            &AddedEmote {
                url: "https://7tv.app/emotes/def".into(),
                alias: "other".into(),
            },
        )
        .unwrap();

        let all = db.get_added_emotes("g1").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].alias, "myEmote");

        // Scoped per guild.
        assert!(db.get_added_emotes("g2").unwrap().is_empty());

        // Re-inserting the same alias replaces the url instead of piling up.
        db.insert_added_emote(
            "g1",
            &AddedEmote {
                url: "https://7tv.app/emotes/xyz".into(),
                alias: "myEmote".into(),
            },
        )
        .unwrap();
        let all = db.get_added_emotes("g1").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].url, "https://7tv.app/emotes/xyz");

        assert!(db.delete_added_emote("g1", "myEmote").unwrap());
        assert!(!db.delete_added_emote("g1", "myEmote").unwrap());
        assert_eq!(db.get_added_emotes("g1").unwrap().len(), 1);
    }

    #[test]
    fn test_guild_settings_upsert() {
        let db = test_db();
        assert!(db.get_guild_emote_settings("g1").unwrap().is_none());

        let mut settings = GuildEmoteSettings {
            guild_id: "g1".into(),
            seventv_set_id: Some("01FANSET".into()),
            bttv_broadcaster_id: None,
            ffz_room_id: Some("123".into()),
        };
        db.upsert_guild_emote_settings(&settings).unwrap();

        let got = db.get_guild_emote_settings("g1").unwrap().unwrap();
        assert_eq!(got, settings);

        settings.bttv_broadcaster_id = Some("456".into());
        settings.ffz_room_id = None;
        db.upsert_guild_emote_settings(&settings).unwrap();

        let got = db.get_guild_emote_settings("g1").unwrap().unwrap();
        assert_eq!(got.bttv_broadcaster_id.as_deref(), Some("456"));
        assert!(got.ffz_room_id.is_none());
    }
}
