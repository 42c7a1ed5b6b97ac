// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActionRow, Attachment, Embed};

/// A complete message payload: text content, embeds, attachments and button rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub components: Vec<ActionRow>,
}

impl Document {
    /// The document an editing session starts with.
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self {
            content: String::new(),
            embeds: vec![Embed::example(now)],
            attachments: vec![],
            components: vec![ActionRow::example()],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
