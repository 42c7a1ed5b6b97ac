// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use forge_markup::{InlineEntity, Mention, RenderNode, Tag};

pub use crate::domain::message::limits::{LimitTarget, LimitWarning};
pub use crate::domain::message::models::*;
pub use crate::domain::message::mutations::{
    ButtonUpdate, EmbedUpdate, FieldUpdate, MoveDirection,
};

pub use message_preview::{
    AttachmentPreview, ButtonPreview, EmbedPreview, FieldPreview, MessagePreview,
};

mod message_preview;
