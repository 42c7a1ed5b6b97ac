// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use app::deps::{AppConfig, AppDependencies};
pub use app::services::{MessageService, PreviewService};
pub use domain::message::repos::{DocumentStore, Subscription};
pub use infra::attachments::AttachmentLoader;
pub use infra::message::MessageStore;

pub mod app;
pub mod domain;
pub mod infra;
pub mod util;

#[cfg(test)]
mod test;
