//! Per-guild records of emotes users registered at runtime.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

/// One user-registered emote: the provider link it came from and the alias
/// it is indexed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedEmote {
    pub url: String,
    pub alias: String,
}

impl Database {
    /// All added emotes for a guild, oldest first.
    pub fn get_added_emotes(&self, guild_id: &str) -> Result<Vec<AddedEmote>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT url, alias FROM added_emotes WHERE guild_id = ?1 ORDER BY added_at, id",
            )?;
            let rows = stmt.query_map([guild_id], |row| {
                Ok(AddedEmote {
                    url: row.get(0)?,
                    alias: row.get(1)?,
                })
            })?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    pub fn insert_added_emote(&self, guild_id: &str, emote: &AddedEmote) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO added_emotes (guild_id, url, alias, added_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(guild_id, alias) DO UPDATE SET url = ?2",
                rusqlite::params![guild_id, emote.url, emote.alias, Utc::now().timestamp()],
            )?;
            Ok(())
        })
    }

    /// Delete by alias; true when a row was removed.
    pub fn delete_added_emote(&self, guild_id: &str, alias: &str) -> Result<bool, DbError> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM added_emotes WHERE guild_id = ?1 AND alias = ?2",
                rusqlite::params![guild_id, alias],
            )?;
            Ok(affected > 0)
        })
    }
}
