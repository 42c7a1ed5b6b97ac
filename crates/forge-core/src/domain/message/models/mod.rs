// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use attachment::{Attachment, AttachmentId, AttachmentKind};
pub use component::{
    ActionRow, Button, ButtonAction, ButtonStyle, ComponentType, UnknownButtonStyle,
    UnknownComponentType,
};
pub use document::Document;
pub use embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia};

mod attachment;
mod component;
mod document;
mod embed;
