// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, FixedOffset, Offset, Utc};

use forge_markup::{HtmlOptions, MarkupOptions, DEFAULT_EMOJI_CDN_URL, DEFAULT_EMOJI_SIZE};

use crate::util::FALLBACK_COLOR;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL custom emoji images are resolved against.
    pub emoji_cdn_url: String,
    pub emoji_size: u32,
    /// Used when a color can't be parsed.
    pub fallback_color: u32,
    /// Offset timestamps are displayed in.
    pub utc_offset: FixedOffset,
    pub scan_inline_code: bool,
    pub autolink: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            emoji_cdn_url: DEFAULT_EMOJI_CDN_URL.to_string(),
            emoji_size: DEFAULT_EMOJI_SIZE,
            fallback_color: FALLBACK_COLOR,
            utc_offset: Utc.fix(),
            scan_inline_code: true,
            autolink: true,
        }
    }
}

impl AppConfig {
    pub fn markup_options(&self) -> MarkupOptions {
        MarkupOptions {
            scan_inline_code: self.scan_inline_code,
            autolink: self.autolink,
        }
    }

    pub fn html_options(&self, now: DateTime<Utc>) -> HtmlOptions {
        HtmlOptions {
            emoji_cdn_url: self.emoji_cdn_url.clone(),
            emoji_size: self.emoji_size,
            now,
            utc_offset: self.utc_offset,
        }
    }
}
