//! Which personal emote-set endpoints apply to a guild.

use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildEmoteSettings {
    pub guild_id: String,
    pub seventv_set_id: Option<String>,
    pub bttv_broadcaster_id: Option<String>,
    pub ffz_room_id: Option<String>,
}

impl Database {
    pub fn get_guild_emote_settings(
        &self,
        guild_id: &str,
    ) -> Result<Option<GuildEmoteSettings>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT guild_id, seventv_set_id, bttv_broadcaster_id, ffz_room_id
                 FROM guild_emote_settings WHERE guild_id = ?1",
            )?;
            let settings = stmt
                .query_row([guild_id], |row| {
                    Ok(GuildEmoteSettings {
                        guild_id: row.get(0)?,
                        seventv_set_id: row.get(1)?,
                        bttv_broadcaster_id: row.get(2)?,
                        ffz_room_id: row.get(3)?,
                    })
                })
                .optional()?;
            Ok(settings)
        })
    }

    pub fn upsert_guild_emote_settings(
        &self,
        settings: &GuildEmoteSettings,
    ) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO guild_emote_settings
                     (guild_id, seventv_set_id, bttv_broadcaster_id, ffz_room_id, updated_at)
                 VALUES (?1, ?2, ?3, ?4, CURRENT_TIMESTAMP)
                 ON CONFLICT(guild_id) DO UPDATE SET
                     seventv_set_id = ?2,
                     bttv_broadcaster_id = ?3,
                     ffz_room_id = ?4,
                     updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![
                    settings.guild_id,
                    settings.seventv_set_id,
                    settings.bttv_broadcaster_id,
                    settings.ffz_room_id
                ],
            )?;
            Ok(())
        })
    }
}
