// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use forge_utils::id_string;
use mime::Mime;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::util::mime_serde_shim;

id_string!(AttachmentId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub filename: String,
    pub size: u64,
    pub url: Url,
    #[serde(with = "mime_serde_shim")]
    pub content_type: Mime,
    /// Only known for images that could be decoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Video,
    File,
}

impl Attachment {
    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::from(&self.content_type)
    }
}

impl From<&Mime> for AttachmentKind {
    fn from(value: &Mime) -> Self {
        let type_ = value.type_();
        if type_ == mime::IMAGE {
            AttachmentKind::Image
        } else if type_ == mime::VIDEO {
            AttachmentKind::Video
        } else {
            AttachmentKind::File
        }
    }
}
