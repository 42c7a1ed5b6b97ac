// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::deps::{AppDependencies, DynAppConfig, DynDocumentStore, DynTimeProvider};
use crate::domain::message::limits::{calculate_message_length, validate_limits, LimitWarning};
use crate::domain::message::models::{Attachment, Document, Embed};
use crate::domain::message::mutations::{
    self, ButtonUpdate, EmbedUpdate, FieldUpdate, MoveDirection,
};
use crate::domain::message::repos::Subscription;
use crate::util::parse_hex_color_or;

/// Applies edits to the document held by the `DocumentStore`.
///
/// Edits that don't apply are ignored and leave the store untouched. Every method returns
/// whether the document changed.
pub struct MessageService {
    config: DynAppConfig,
    document_store: DynDocumentStore,
    time_provider: DynTimeProvider,
}

impl From<&AppDependencies> for MessageService {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            config: deps.config.clone(),
            document_store: deps.document_store.clone(),
            time_provider: deps.time_provider.clone(),
        }
    }
}

impl MessageService {
    pub fn document(&self) -> Arc<Document> {
        self.document_store.get()
    }

    pub fn subscribe(
        &self,
        subscriber: impl Fn(&Arc<Document>) + Send + Sync + 'static,
    ) -> Subscription {
        self.document_store.subscribe(Box::new(subscriber))
    }

    /// Replaces the whole document, e.g. with an imported one.
    pub fn replace_document(&self, document: Document) -> Arc<Document> {
        self.document_store.set(document)
    }

    /// Starts over with the example document.
    pub fn reset(&self) -> Arc<Document> {
        info!("Resetting document.");
        self.document_store
            .set(Document::seed(self.time_provider.now()))
    }

    pub fn set_content(&self, content: impl Into<String>) -> bool {
        let content = content.into();
        self.apply("set_content", |doc| mutations::set_content(doc, content))
    }

    /// Appends a copy of the example embed.
    pub fn add_embed(&self) -> bool {
        let embed = Embed::example(self.time_provider.now());
        self.apply("add_embed", |doc| mutations::add_embed(doc, embed))
    }

    pub fn remove_embed(&self, index: usize) -> bool {
        self.apply("remove_embed", |doc| mutations::remove_embed(doc, index))
    }

    pub fn update_embed(&self, index: usize, update: EmbedUpdate) -> bool {
        self.apply("update_embed", |doc| {
            mutations::update_embed(doc, index, update)
        })
    }

    /// Sets the embed color from a `#rrggbb` string as handed out by color pickers.
    pub fn set_embed_color(&self, index: usize, hex_color: &str) -> bool {
        let color = parse_hex_color_or(hex_color, self.config.fallback_color);
        self.update_embed(index, EmbedUpdate::Color(Some(color)))
    }

    pub fn move_embed(&self, index: usize, direction: MoveDirection) -> bool {
        self.apply("move_embed", |doc| {
            mutations::move_embed(doc, index, direction)
        })
    }

    pub fn add_field(&self, embed_index: usize) -> bool {
        self.apply("add_field", |doc| mutations::add_field(doc, embed_index))
    }

    pub fn update_field(&self, embed_index: usize, field_index: usize, update: FieldUpdate) -> bool {
        self.apply("update_field", |doc| {
            mutations::update_field(doc, embed_index, field_index, update)
        })
    }

    pub fn remove_field(&self, embed_index: usize, field_index: usize) -> bool {
        self.apply("remove_field", |doc| {
            mutations::remove_field(doc, embed_index, field_index)
        })
    }

    /// Expects an attachment whose dimensions have already been resolved,
    /// see `AttachmentLoader`.
    pub fn add_attachment(&self, attachment: Attachment) -> bool {
        self.apply("add_attachment", |doc| {
            mutations::add_attachment(doc, attachment)
        })
    }

    pub fn remove_attachment(&self, index: usize) -> bool {
        self.apply("remove_attachment", |doc| {
            mutations::remove_attachment(doc, index)
        })
    }

    pub fn add_action_row(&self) -> bool {
        self.apply("add_action_row", mutations::add_action_row)
    }

    /// Adds a "New Button" with a custom id derived from the current time.
    pub fn add_button(&self, row_index: usize) -> bool {
        let custom_id = format!("button_{}", self.time_provider.now().timestamp_millis());
        self.apply("add_button", |doc| {
            mutations::add_button(doc, row_index, custom_id)
        })
    }

    pub fn update_button(&self, row_index: usize, button_index: usize, update: ButtonUpdate) -> bool {
        self.apply("update_button", |doc| {
            mutations::update_button(doc, row_index, button_index, update)
        })
    }

    pub fn remove_button(&self, row_index: usize, button_index: usize) -> bool {
        self.apply("remove_button", |doc| {
            mutations::remove_button(doc, row_index, button_index)
        })
    }

    pub fn message_length(&self) -> usize {
        calculate_message_length(&self.document())
    }

    pub fn limit_warnings(&self) -> Vec<LimitWarning> {
        validate_limits(&self.document())
    }

    pub fn export_json(&self) -> serde_json::Result<String> {
        self.document().to_json()
    }
}

impl MessageService {
    fn apply<'a>(
        &self,
        name: &str,
        mutation: impl FnOnce(&Document) -> Option<Document> + 'a,
    ) -> bool {
        if self.document_store.update(Box::new(mutation)).is_none() {
            debug!("Ignoring {} since it doesn't apply to the current document.", name);
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use crate::app::deps::{AppConfig, UUIDProvider};
    use crate::domain::message::models::ButtonStyle;
    use crate::test::ConstantTimeProvider;

    use super::*;

    fn service() -> (MessageService, Arc<ConstantTimeProvider>) {
        let time_provider = Arc::new(ConstantTimeProvider::ymd_hms(2024, 3, 1, 9, 0, 0));
        let deps = AppDependencies::with_providers(
            AppConfig::default(),
            time_provider.clone(),
            Arc::new(UUIDProvider::new()),
        );
        (MessageService::from(&deps), time_provider)
    }

    #[test]
    fn test_starts_with_seed_document() {
        let (service, _) = service();
        let document = service.document();

        assert_eq!(
            *document,
            Document::seed(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
        );
        assert_eq!(
            document.embeds[0].timestamp.as_deref(),
            Some("2024-03-01T09:00:00.000Z")
        );
    }

    #[test]
    fn test_add_embed_clones_example_with_current_time() {
        let (service, time_provider) = service();
        time_provider.advance(Duration::hours(25));

        assert!(service.add_embed());
        let document = service.document();
        assert_eq!(document.embeds.len(), 2);
        assert_eq!(document.embeds[1].title.as_deref(), Some("Test"));
        assert_eq!(
            document.embeds[1].timestamp.as_deref(),
            Some("2024-03-02T10:00:00.000Z")
        );
    }

    #[test]
    fn test_add_button_generates_custom_id() {
        let (service, _) = service();

        assert!(service.add_button(0));
        let document = service.document();
        let button = &document.components[0].buttons[1];
        assert_eq!(button.custom_id(), Some("button_1709283600000"));
        assert_eq!(button.style, ButtonStyle::Primary);
    }

    #[test]
    fn test_ignored_edits_do_not_notify() {
        let (service, _) = service();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let _subscription = service.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let before = service.document();
        assert!(!service.remove_embed(3));
        assert!(!service.move_embed(0, MoveDirection::Up));
        assert!(!service.remove_button(0, 1));
        assert!(Arc::ptr_eq(&before, &service.document()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(service.set_content("Hi"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_set_embed_color() {
        let (service, _) = service();

        assert!(service.set_embed_color(0, "#ff0000"));
        assert_eq!(service.document().embeds[0].color, Some(0xFF0000));

        assert!(service.set_embed_color(0, "red"));
        assert_eq!(service.document().embeds[0].color, Some(0x0099FF));
    }

    #[test]
    fn test_reset() {
        let (service, _) = service();
        service.set_content("Hello");
        service.remove_embed(0);

        let document = service.reset();
        assert_eq!(document.content, "");
        assert_eq!(document.embeds.len(), 1);
        assert_eq!(service.message_length(), 4 + 24 + 14 + 7 + 7);
    }
}
