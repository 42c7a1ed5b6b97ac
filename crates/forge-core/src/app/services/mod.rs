// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use message_service::MessageService;
pub use preview_service::PreviewService;

mod message_service;
mod preview_service;
