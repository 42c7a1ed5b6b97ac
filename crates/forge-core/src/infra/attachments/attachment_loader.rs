// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::io::Cursor;
use std::path::Path;

use anyhow::{format_err, Context, Result};
use image::{guess_format, ImageError, ImageFormat};
use mime::Mime;
use tracing::{info, warn};
use url::Url;

use crate::app::deps::{AppDependencies, DynIDProvider};
use crate::domain::message::models::Attachment;
use crate::util::PathExt;

/// Turns files into `Attachment`s, decoding images to learn their dimensions.
///
/// Only resolved attachments should be added to the document.
pub struct AttachmentLoader {
    id_provider: DynIDProvider,
}

impl From<&AppDependencies> for AttachmentLoader {
    fn from(deps: &AppDependencies) -> Self {
        Self::new(deps.id_provider.clone())
    }
}

impl AttachmentLoader {
    pub fn new(id_provider: DynIDProvider) -> Self {
        Self { id_provider }
    }

    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Attachment> {
        let path = tokio::fs::canonicalize(path.as_ref())
            .await
            .with_context(|| format!("Could not resolve {}", path.as_ref().display()))?;
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Could not read {}", path.display()))?;
        let url = Url::from_file_path(&path)
            .map_err(|_| format_err!("Could not build a file URL for {}", path.display()))?;

        info!("Loaded attachment {} ({} bytes)", path.display(), bytes.len());
        self.resolve(path.display_file_name(), bytes, url, path.media_type())
            .await
    }

    /// Like `load` for data that is already in memory, e.g. an upload.
    pub async fn load_bytes(
        &self,
        filename: impl Into<String>,
        bytes: Vec<u8>,
        url: Url,
    ) -> Result<Attachment> {
        let filename = filename.into();
        let media_type = Path::new(&filename).media_type();
        self.resolve(filename, bytes, url, media_type).await
    }

    async fn resolve(
        &self,
        filename: String,
        bytes: Vec<u8>,
        url: Url,
        content_type: Mime,
    ) -> Result<Attachment> {
        let size = bytes.len() as u64;

        let dimensions = if content_type.type_() == mime::IMAGE {
            let media_type = content_type.clone();
            match tokio::task::spawn_blocking(move || decode_dimensions(&bytes, &media_type)).await
            {
                Ok(Ok(dimensions)) => Some(dimensions),
                Ok(Err(err)) => {
                    warn!("Could not decode image {}: {}", filename, err);
                    None
                }
                Err(err) => {
                    warn!("Image decoding of {} did not finish: {}", filename, err);
                    None
                }
            }
        } else {
            None
        };

        Ok(Attachment {
            id: self.id_provider.new_id().into(),
            filename,
            size,
            url,
            content_type,
            width: dimensions.map(|(width, _)| width),
            height: dimensions.map(|(_, height)| height),
        })
    }
}

fn decode_dimensions(bytes: &[u8], media_type: &Mime) -> Result<(u32, u32), ImageError> {
    let format = match ImageFormat::from_mime_type(media_type.essence_str()) {
        Some(format) => format,
        None => guess_format(bytes)?,
    };
    image::io::Reader::with_format(Cursor::new(bytes), format).into_dimensions()
}
