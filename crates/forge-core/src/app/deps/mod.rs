// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use app_config::AppConfig;
pub use app_dependencies::*;
pub use id_provider::{IDProvider, UUIDProvider};
pub use time_provider::{SystemTimeProvider, TimeProvider};

mod app_config;
mod app_dependencies;
mod id_provider;
mod time_provider;
