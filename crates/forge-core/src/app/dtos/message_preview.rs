// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::Serialize;
use url::Url;

use forge_markup::{Mention, RenderNode};

use crate::domain::message::limits::LimitWarning;
use crate::domain::message::models::{AttachmentKind, ButtonStyle, EmbedAuthor};

/// Everything needed to display a document the way the chat client would.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePreview {
    pub content: Vec<RenderNode>,
    pub embeds: Vec<EmbedPreview>,
    pub attachments: Vec<AttachmentPreview>,
    pub button_rows: Vec<Vec<ButtonPreview>>,
    pub character_count: usize,
    pub warnings: Vec<LimitWarning>,
    /// Users, roles and channels mentioned anywhere in the message.
    pub mentions: Vec<Mention>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedPreview {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Vec<RenderNode>,
    /// `#rrggbb`
    pub color: Option<String>,
    pub author: Option<EmbedAuthor>,
    pub fields: Vec<FieldPreview>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub footer_text: Option<String>,
    pub footer_icon_url: Option<String>,
    /// The formatted timestamp, or the raw value if it couldn't be parsed.
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPreview {
    pub name: String,
    pub value: Vec<RenderNode>,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentPreview {
    pub filename: String,
    pub url: Url,
    pub kind: AttachmentKind,
    pub size: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonPreview {
    pub label: String,
    pub style: ButtonStyle,
    pub url: Option<String>,
    pub disabled: bool,
}
