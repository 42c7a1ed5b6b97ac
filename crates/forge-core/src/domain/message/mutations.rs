// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

//! Structural edits of a `Document`.
//!
//! Every function takes the current document and returns the next one. `None` means the edit
//! doesn't apply (an index out of bounds or a ceiling reached) and nothing should be published.

use strum_macros::{Display, EnumIter};

use super::limits::{MAX_ACTION_ROWS, MAX_BUTTONS_PER_ROW, MAX_EMBEDS, MAX_FIELDS};
use super::models::{
    ActionRow, Attachment, Button, ButtonAction, ButtonStyle, Document, Embed, EmbedAuthor,
    EmbedField, EmbedFooter, EmbedMedia,
};

pub const NEW_BUTTON_LABEL: &str = "New Button";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmbedUpdate {
    Title(Option<String>),
    Description(Option<String>),
    Url(Option<String>),
    Color(Option<u32>),
    Timestamp(Option<String>),
    Author(Option<EmbedAuthor>),
    Footer(Option<EmbedFooter>),
    Image(Option<EmbedMedia>),
    Thumbnail(Option<EmbedMedia>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Name(String),
    Value(String),
    Inline(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonUpdate {
    Label(Option<String>),
    /// Switching to `Link` replaces the custom id with an empty url, switching away from `Link`
    /// assigns a custom id derived from the button's position.
    Style(ButtonStyle),
    /// Makes the button interactive. A link button becomes `Primary`.
    CustomId(String),
    /// Makes the button a link button.
    Url(String),
    Disabled(bool),
}

pub fn set_content(document: &Document, content: impl Into<String>) -> Option<Document> {
    let mut next = document.clone();
    next.content = content.into();
    Some(next)
}

pub fn add_embed(document: &Document, embed: Embed) -> Option<Document> {
    if document.embeds.len() >= MAX_EMBEDS {
        return None;
    }
    let mut next = document.clone();
    next.embeds.push(embed);
    Some(next)
}

pub fn remove_embed(document: &Document, index: usize) -> Option<Document> {
    if index >= document.embeds.len() {
        return None;
    }
    let mut next = document.clone();
    next.embeds.remove(index);
    Some(next)
}

pub fn update_embed(document: &Document, index: usize, update: EmbedUpdate) -> Option<Document> {
    let mut next = document.clone();
    let embed = next.embeds.get_mut(index)?;

    match update {
        EmbedUpdate::Title(title) => embed.title = title,
        EmbedUpdate::Description(description) => embed.description = description,
        EmbedUpdate::Url(url) => embed.url = url,
        EmbedUpdate::Color(color) => embed.color = color,
        EmbedUpdate::Timestamp(timestamp) => embed.timestamp = timestamp,
        EmbedUpdate::Author(author) => embed.author = author,
        EmbedUpdate::Footer(footer) => embed.footer = footer,
        EmbedUpdate::Image(image) => embed.image = image,
        EmbedUpdate::Thumbnail(thumbnail) => embed.thumbnail = thumbnail,
    }

    Some(next)
}

/// Swaps the embed with its neighbour. Moving the first embed up or the last one down
/// doesn't apply.
pub fn move_embed(document: &Document, index: usize, direction: MoveDirection) -> Option<Document> {
    if index >= document.embeds.len() {
        return None;
    }
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1)?,
        MoveDirection::Down => index + 1,
    };
    if target >= document.embeds.len() {
        return None;
    }

    let mut next = document.clone();
    next.embeds.swap(index, target);
    Some(next)
}

pub fn add_field(document: &Document, embed_index: usize) -> Option<Document> {
    let mut next = document.clone();
    let embed = next.embeds.get_mut(embed_index)?;
    if embed.fields.len() >= MAX_FIELDS {
        return None;
    }
    embed.fields.push(EmbedField::default());
    Some(next)
}

pub fn update_field(
    document: &Document,
    embed_index: usize,
    field_index: usize,
    update: FieldUpdate,
) -> Option<Document> {
    let mut next = document.clone();
    let field = next
        .embeds
        .get_mut(embed_index)?
        .fields
        .get_mut(field_index)?;

    match update {
        FieldUpdate::Name(name) => field.name = name,
        FieldUpdate::Value(value) => field.value = value,
        FieldUpdate::Inline(inline) => field.inline = inline,
    }

    Some(next)
}

pub fn remove_field(document: &Document, embed_index: usize, field_index: usize) -> Option<Document> {
    let mut next = document.clone();
    let fields = &mut next.embeds.get_mut(embed_index)?.fields;
    if field_index >= fields.len() {
        return None;
    }
    fields.remove(field_index);
    Some(next)
}

pub fn add_attachment(document: &Document, attachment: Attachment) -> Option<Document> {
    let mut next = document.clone();
    next.attachments.push(attachment);
    Some(next)
}

pub fn remove_attachment(document: &Document, index: usize) -> Option<Document> {
    if index >= document.attachments.len() {
        return None;
    }
    let mut next = document.clone();
    next.attachments.remove(index);
    Some(next)
}

pub fn add_action_row(document: &Document) -> Option<Document> {
    if document.components.len() >= MAX_ACTION_ROWS {
        return None;
    }
    let mut next = document.clone();
    next.components.push(ActionRow::default());
    Some(next)
}

pub fn add_button(
    document: &Document,
    row_index: usize,
    custom_id: impl Into<String>,
) -> Option<Document> {
    let mut next = document.clone();
    let row = next.components.get_mut(row_index)?;
    if row.buttons.len() >= MAX_BUTTONS_PER_ROW {
        return None;
    }
    row.buttons.push(Button::interactive(
        ButtonStyle::Primary,
        NEW_BUTTON_LABEL,
        custom_id,
    ));
    Some(next)
}

pub fn update_button(
    document: &Document,
    row_index: usize,
    button_index: usize,
    update: ButtonUpdate,
) -> Option<Document> {
    let mut next = document.clone();
    let button = next
        .components
        .get_mut(row_index)?
        .buttons
        .get_mut(button_index)?;

    match update {
        ButtonUpdate::Label(label) => button.label = label,
        ButtonUpdate::Style(style) => {
            let has_url = matches!(button.action, ButtonAction::Link { .. });
            if style == ButtonStyle::Link && !has_url {
                button.action = ButtonAction::Link { url: String::new() };
            } else if style != ButtonStyle::Link && has_url {
                button.action = ButtonAction::Interactive {
                    custom_id: format!("button_{row_index}_{button_index}"),
                };
            }
            button.style = style;
        }
        ButtonUpdate::CustomId(custom_id) => {
            button.action = ButtonAction::Interactive { custom_id };
            if button.style == ButtonStyle::Link {
                button.style = ButtonStyle::Primary;
            }
        }
        ButtonUpdate::Url(url) => {
            button.action = ButtonAction::Link { url };
            button.style = ButtonStyle::Link;
        }
        ButtonUpdate::Disabled(disabled) => button.disabled = disabled,
    }

    Some(next)
}

/// Removes the button. A row left without buttons is removed as well.
pub fn remove_button(document: &Document, row_index: usize, button_index: usize) -> Option<Document> {
    let mut next = document.clone();
    let row = next.components.get_mut(row_index)?;
    if button_index >= row.buttons.len() {
        return None;
    }
    row.buttons.remove(button_index);
    if row.buttons.is_empty() {
        next.components.remove(row_index);
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn seed() -> Document {
        Document::seed(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    fn titles(document: &Document) -> Vec<Option<&str>> {
        document
            .embeds
            .iter()
            .map(|embed| embed.title.as_deref())
            .collect()
    }

    fn document_with_titled_embeds(count: usize) -> Document {
        let mut document = seed();
        document.embeds = (0..count)
            .map(|idx| Embed {
                title: Some(idx.to_string()),
                ..Default::default()
            })
            .collect();
        document
    }

    #[test]
    fn test_embed_ceiling() {
        let document = document_with_titled_embeds(9);
        let document = add_embed(&document, Embed::default()).unwrap();
        assert_eq!(document.embeds.len(), 10);
        assert_eq!(add_embed(&document, Embed::default()), None);
    }

    #[test]
    fn test_field_ceiling() {
        let mut document = seed();
        document.embeds[0].fields = vec![EmbedField::default(); 24];

        let document = add_field(&document, 0).unwrap();
        assert_eq!(document.embeds[0].fields.len(), 25);
        assert_eq!(document.embeds[0].fields[24], EmbedField::new("", "", false));
        assert_eq!(add_field(&document, 0), None);
        assert_eq!(add_field(&document, 1), None);
    }

    #[test]
    fn test_row_and_button_ceilings() {
        let mut document = seed();
        for _ in 0..4 {
            document = add_action_row(&document).unwrap();
        }
        assert_eq!(document.components.len(), 5);
        assert_eq!(add_action_row(&document), None);

        for idx in 0..4 {
            document = add_button(&document, 0, format!("b{idx}")).unwrap();
        }
        assert_eq!(document.components[0].buttons.len(), 5);
        assert_eq!(add_button(&document, 0, "b5"), None);
        assert_eq!(add_button(&document, 5, "b5"), None);

        let added = &document.components[0].buttons[1];
        assert_eq!(added.label.as_deref(), Some("New Button"));
        assert_eq!(added.custom_id(), Some("b0"));
        assert_eq!(added.style, ButtonStyle::Primary);
    }

    #[test]
    fn test_removing_last_button_removes_row() {
        let document = add_action_row(&seed()).unwrap();
        let document = add_button(&document, 1, "second_row").unwrap();

        let document = remove_button(&document, 0, 0).unwrap();
        assert_eq!(document.components.len(), 1);
        assert_eq!(
            document.components[0].buttons[0].custom_id(),
            Some("second_row")
        );
        assert_eq!(remove_button(&document, 0, 1), None);
        assert_eq!(remove_button(&document, 1, 0), None);
    }

    #[test]
    fn test_move_embed() {
        let document = document_with_titled_embeds(3);

        assert_eq!(move_embed(&document, 0, MoveDirection::Up), None);
        assert_eq!(move_embed(&document, 2, MoveDirection::Down), None);
        assert_eq!(move_embed(&document, 3, MoveDirection::Up), None);

        let moved = move_embed(&document, 0, MoveDirection::Down).unwrap();
        assert_eq!(titles(&moved), vec![Some("1"), Some("0"), Some("2")]);
        let moved = move_embed(&moved, 2, MoveDirection::Up).unwrap();
        assert_eq!(titles(&moved), vec![Some("1"), Some("2"), Some("0")]);
    }

    #[test]
    fn test_out_of_bounds_indices_do_not_apply() {
        let document = seed();

        assert_eq!(remove_embed(&document, 1), None);
        assert_eq!(
            update_embed(&document, 1, EmbedUpdate::Title(None)),
            None
        );
        assert_eq!(
            update_field(&document, 0, 1, FieldUpdate::Inline(true)),
            None
        );
        assert_eq!(
            update_field(&document, 1, 0, FieldUpdate::Inline(true)),
            None
        );
        assert_eq!(remove_field(&document, 0, 1), None);
        assert_eq!(remove_attachment(&document, 0), None);
        assert_eq!(
            update_button(&document, 0, 1, ButtonUpdate::Disabled(true)),
            None
        );
    }

    #[test]
    fn test_updates() {
        let document = seed();

        let document = set_content(&document, "Hello").unwrap();
        let document = update_embed(&document, 0, EmbedUpdate::Color(Some(0xFF0000))).unwrap();
        let document = update_field(&document, 0, 0, FieldUpdate::Value("42".into())).unwrap();
        let document = remove_field(&document, 0, 0)
            .and_then(|document| add_field(&document, 0))
            .and_then(|document| {
                update_field(&document, 0, 0, FieldUpdate::Name("Renamed".into()))
            })
            .unwrap();

        assert_eq!(document.content, "Hello");
        assert_eq!(document.embeds[0].color, Some(0xFF0000));
        assert_eq!(document.embeds[0].fields, vec![EmbedField::new("Renamed", "", false)]);

        let document = remove_embed(&document, 0).unwrap();
        assert!(document.embeds.is_empty());
    }

    #[test]
    fn test_button_consistency() {
        let document = seed();

        let link = update_button(&document, 0, 0, ButtonUpdate::Style(ButtonStyle::Link)).unwrap();
        let button = &link.components[0].buttons[0];
        assert_eq!(button.style, ButtonStyle::Link);
        assert_eq!(button.url(), Some(""));
        assert_eq!(button.custom_id(), None);

        let back = update_button(&link, 0, 0, ButtonUpdate::Style(ButtonStyle::Danger)).unwrap();
        let button = &back.components[0].buttons[0];
        assert_eq!(button.style, ButtonStyle::Danger);
        assert_eq!(button.custom_id(), Some("button_0_0"));

        let link = update_button(&back, 0, 0, ButtonUpdate::Url("https://example.com".into()))
            .unwrap();
        let button = &link.components[0].buttons[0];
        assert_eq!(button.style, ButtonStyle::Link);
        assert_eq!(button.url(), Some("https://example.com"));

        let interactive =
            update_button(&link, 0, 0, ButtonUpdate::CustomId("again".into())).unwrap();
        let button = &interactive.components[0].buttons[0];
        assert_eq!(button.style, ButtonStyle::Primary);
        assert_eq!(button.custom_id(), Some("again"));

        let restyled =
            update_button(&interactive, 0, 0, ButtonUpdate::Style(ButtonStyle::Success)).unwrap();
        assert_eq!(
            restyled.components[0].buttons[0].custom_id(),
            Some("again")
        );
    }

    #[test]
    fn test_mutations_leave_input_untouched() {
        let document = seed();
        let snapshot = document.clone();

        _ = add_embed(&document, Embed::default());
        _ = remove_button(&document, 0, 0);
        _ = add_field(&document, 0);

        assert_eq!(document, snapshot);
    }
}
