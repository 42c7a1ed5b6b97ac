// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::error;

/// Used whenever a color picker hands us something that isn't a color.
pub const FALLBACK_COLOR: u32 = 0x0099FF;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ColorParseError {
    #[error("Expected 3 or 6 hex digits in color '{0}'")]
    InvalidLength(String),
    #[error("Invalid hex digits in color '{0}'")]
    InvalidDigits(String),
}

/// Parses `#rrggbb`, `rrggbb` or the shorthand `#rgb` into a 24-bit integer.
pub fn try_parse_hex_color(color: &str) -> Result<u32, ColorParseError> {
    let hex = color.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidDigits(color.to_string()));
    }

    let expanded = match hex.len() {
        6 => hex.to_string(),
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => return Err(ColorParseError::InvalidLength(color.to_string())),
    };

    u32::from_str_radix(&expanded, 16).map_err(|_| ColorParseError::InvalidDigits(color.to_string()))
}

/// Like `try_parse_hex_color` but logs malformed input and returns `FALLBACK_COLOR` instead.
pub fn parse_hex_color(color: &str) -> u32 {
    parse_hex_color_or(color, FALLBACK_COLOR)
}

pub fn parse_hex_color_or(color: &str, fallback: u32) -> u32 {
    match try_parse_hex_color(color) {
        Ok(value) => value,
        Err(err) => {
            error!("{}. Using {} instead.", err, format_hex_color(fallback));
            fallback
        }
    }
}

pub fn format_hex_color(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FF_FF)
}
