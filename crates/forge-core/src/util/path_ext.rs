// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::path::Path;

use mime::Mime;

pub trait PathExt {
    /// Guesses the media type from the file extension.
    fn media_type(&self) -> Mime;
    /// The last path component, or `"file"` if there is none.
    fn display_file_name(&self) -> String;
}

impl PathExt for Path {
    // https://github.com/abonander/mime_guess/issues/88
    fn media_type(&self) -> Mime {
        let media_type = mime_guess::from_path(self).first_or(mime::APPLICATION_OCTET_STREAM);

        if media_type.type_() == mime::AUDIO && media_type.subtype() == "m4a" {
            if let Ok(mp4) = "audio/mp4".parse() {
                return mp4;
            }
        }

        media_type
    }

    fn display_file_name(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string())
    }
}
