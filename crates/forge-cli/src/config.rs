// embed-forge/forge-cli
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::env;

use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use tracing::info;
use url::Url;

use forge_core::util::try_parse_hex_color;
use forge_core::AppConfig;

/// Loads `.env` from the current directory if there is one and builds the `AppConfig` from the
/// `FORGE_*` variables. Unset variables keep their defaults.
pub fn load_config() -> Result<AppConfig> {
    let path = env::current_dir()?.join(".env");
    match dotenvy::from_path(&path) {
        Ok(()) => info!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => (),
        Err(err) => return Err(err).with_context(|| format!("Invalid {}", path.display())),
    }
    config_from_vars(|key| env::var(key).ok())
}

pub fn config_from_vars(var: impl Fn(&str) -> Option<String>) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(url) = var("FORGE_EMOJI_CDN_URL") {
        Url::parse(&url).with_context(|| format!("Invalid FORGE_EMOJI_CDN_URL '{url}'"))?;
        config.emoji_cdn_url = url;
    }
    if let Some(size) = var("FORGE_EMOJI_SIZE") {
        config.emoji_size = size
            .parse()
            .with_context(|| format!("Invalid FORGE_EMOJI_SIZE '{size}'"))?;
    }
    if let Some(color) = var("FORGE_FALLBACK_COLOR") {
        config.fallback_color = try_parse_hex_color(&color)
            .with_context(|| format!("Invalid FORGE_FALLBACK_COLOR '{color}'"))?;
    }
    if let Some(offset) = var("FORGE_UTC_OFFSET") {
        config.utc_offset = offset
            .parse::<FixedOffset>()
            .with_context(|| format!("Invalid FORGE_UTC_OFFSET '{offset}'"))?;
    }
    if let Some(flag) = var("FORGE_AUTOLINK") {
        config.autolink = parse_flag("FORGE_AUTOLINK", &flag)?;
    }
    if let Some(flag) = var("FORGE_SCAN_INLINE_CODE") {
        config.scan_inline_code = parse_flag("FORGE_SCAN_INLINE_CODE", &flag)?;
    }

    Ok(config)
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("Invalid {key} '{value}', expected true or false"),
    }
}
