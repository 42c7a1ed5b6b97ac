// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use color::{
    format_hex_color, parse_hex_color, parse_hex_color_or, try_parse_hex_color, ColorParseError,
    FALLBACK_COLOR,
};
pub use path_ext::PathExt;

mod color;
pub(crate) mod mime_serde_shim;
mod path_ext;
