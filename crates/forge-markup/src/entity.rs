// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use forge_utils::id_string;
use serde::{Deserialize, Serialize};

use crate::timestamp::TimestampStyle;

id_string!(UserId);
id_string!(RoleId);
id_string!(ChannelId);
id_string!(EmojiId);

/// Platform specific inline syntax, i.e. everything that isn't generic Markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InlineEntity {
    /// `<:name:id>` or `<a:name:id>`
    CustomEmoji {
        name: String,
        id: EmojiId,
        animated: bool,
    },
    /// `<@id>` or `<@!id>`
    UserMention { id: UserId },
    /// `<@&id>`
    RoleMention { id: RoleId },
    /// `<#id>`
    ChannelMention { id: ChannelId },
    /// `<t:seconds>` or `<t:seconds:style>`
    Timestamp {
        unix_seconds: i64,
        style: TimestampStyle,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "id")]
pub enum Mention {
    User(UserId),
    Role(RoleId),
    Channel(ChannelId),
}

impl InlineEntity {
    pub fn emoji_url(&self, cdn_url: &str, size: u32) -> Option<String> {
        let InlineEntity::CustomEmoji { id, animated, .. } = self else {
            return None;
        };
        let extension = if *animated { "gif" } else { "webp" };
        Some(format!(
            "{}/{id}.{extension}?size={size}",
            cdn_url.trim_end_matches('/')
        ))
    }

    pub fn as_mention(&self) -> Option<Mention> {
        match self {
            InlineEntity::UserMention { id } => Some(Mention::User(id.clone())),
            InlineEntity::RoleMention { id } => Some(Mention::Role(id.clone())),
            InlineEntity::ChannelMention { id } => Some(Mention::Channel(id.clone())),
            InlineEntity::CustomEmoji { .. } | InlineEntity::Timestamp { .. } => None,
        }
    }
}
