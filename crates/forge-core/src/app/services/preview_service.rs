// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::iter;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use pulldown_cmark_escape::{escape_href, escape_html, escape_html_body_text, StrWrite};
use tracing::error;

use forge_markup::{
    collect_mentions, HtmlOptions, HtmlWriter, MarkupRenderer, RenderNode, TimestampStyle,
};

use crate::app::deps::{AppDependencies, DynAppConfig, DynTimeProvider};
use crate::app::dtos::{
    AttachmentPreview, ButtonPreview, EmbedPreview, FieldPreview, MessagePreview,
};
use crate::domain::message::limits::{
    calculate_message_length, validate_limits, MAX_TOTAL_EMBED_LENGTH,
};
use crate::domain::message::models::{Attachment, AttachmentKind, Button, Document, Embed};
use crate::util::format_hex_color;

/// Renders documents for display.
pub struct PreviewService {
    config: DynAppConfig,
    time_provider: DynTimeProvider,
    renderer: MarkupRenderer,
}

impl From<&AppDependencies> for PreviewService {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            config: deps.config.clone(),
            time_provider: deps.time_provider.clone(),
            renderer: MarkupRenderer::new(deps.config.markup_options()),
        }
    }
}

impl PreviewService {
    /// Replaces the renderer, e.g. to install a `Highlighter`.
    pub fn with_renderer(mut self, renderer: MarkupRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn preview(&self, document: &Document) -> MessagePreview {
        let content = self.renderer.render(&document.content);
        let embeds = document
            .embeds
            .iter()
            .map(|embed| self.preview_embed(embed))
            .collect::<Vec<_>>();

        let mentions = iter::once(content.as_slice())
            .chain(embeds.iter().flat_map(|embed| {
                iter::once(embed.description.as_slice())
                    .chain(embed.fields.iter().map(|field| field.value.as_slice()))
            }))
            .flat_map(collect_mentions)
            .unique()
            .collect();

        MessagePreview {
            content,
            embeds,
            attachments: document.attachments.iter().map(preview_attachment).collect(),
            button_rows: document
                .components
                .iter()
                .map(|row| row.buttons.iter().map(preview_button).collect())
                .collect(),
            character_count: calculate_message_length(document),
            warnings: validate_limits(document),
            mentions,
        }
    }

    pub fn preview_html(&self, document: &Document) -> String {
        let preview = self.preview(document);
        let options = self.html_options();
        let mut html = String::new();
        let writer = PreviewHtmlWriter::new(&mut html, &options);
        if let Err(err) = writer.run(&preview) {
            error!("Failed to write preview HTML. {}", err);
        }
        html
    }

    /// Renders a single text, e.g. while it is being typed.
    pub fn preview_markdown(&self, markdown: impl AsRef<str>) -> String {
        self.renderer
            .render_html(markdown.as_ref(), &self.html_options())
    }
}

impl PreviewService {
    fn html_options(&self) -> HtmlOptions {
        self.config.html_options(self.time_provider.now())
    }

    fn preview_embed(&self, embed: &Embed) -> EmbedPreview {
        EmbedPreview {
            title: non_empty(embed.title.as_deref()),
            url: non_empty(embed.url.as_deref()),
            description: embed
                .description
                .as_deref()
                .map(|description| self.renderer.render(description))
                .unwrap_or_default(),
            color: embed
                .color
                .filter(|color| *color != 0)
                .map(format_hex_color),
            author: embed
                .author
                .clone()
                .filter(|author| !author.name.is_empty()),
            fields: embed
                .fields
                .iter()
                .map(|field| FieldPreview {
                    name: field.name.clone(),
                    value: self.renderer.render(&field.value),
                    inline: field.inline,
                })
                .collect(),
            image_url: non_empty(embed.image.as_ref().map(|image| image.url.as_str())),
            thumbnail_url: non_empty(
                embed
                    .thumbnail
                    .as_ref()
                    .map(|thumbnail| thumbnail.url.as_str()),
            ),
            footer_text: non_empty(embed.footer.as_ref().map(|footer| footer.text.as_str())),
            footer_icon_url: non_empty(
                embed
                    .footer
                    .as_ref()
                    .and_then(|footer| footer.icon_url.as_deref()),
            ),
            timestamp: non_empty(embed.timestamp.as_deref())
                .map(|timestamp| self.format_timestamp(&timestamp)),
        }
    }

    fn format_timestamp(&self, timestamp: &str) -> String {
        match DateTime::parse_from_rfc3339(timestamp) {
            Ok(instant) => TimestampStyle::ShortDateTime.format(
                instant.with_timezone(&Utc),
                self.time_provider.now(),
                &self.config.utc_offset,
            ),
            Err(_) => timestamp.to_string(),
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|text| !text.is_empty()).map(ToString::to_string)
}

fn preview_attachment(attachment: &Attachment) -> AttachmentPreview {
    AttachmentPreview {
        filename: attachment.filename.clone(),
        url: attachment.url.clone(),
        kind: attachment.kind(),
        size: attachment.size,
        width: attachment.width,
        height: attachment.height,
    }
}

fn preview_button(button: &Button) -> ButtonPreview {
    ButtonPreview {
        label: button.display_label(),
        style: button.style,
        url: button.url().map(ToString::to_string),
        disabled: button.disabled,
    }
}

struct PreviewHtmlWriter<'o, W> {
    writer: W,
    options: &'o HtmlOptions,
}

impl<'o, W> PreviewHtmlWriter<'o, W>
where
    W: StrWrite,
{
    fn new(writer: W, options: &'o HtmlOptions) -> Self {
        Self { writer, options }
    }

    fn run(mut self, preview: &MessagePreview) -> Result<(), W::Error> {
        self.write("<div class=\"message\">\n")?;

        if !preview.content.is_empty() {
            self.write("<div class=\"message-content\">\n")?;
            self.write_nodes(&preview.content)?;
            self.write("</div>\n")?;
        }
        for embed in &preview.embeds {
            self.write_embed(embed)?;
        }
        for attachment in &preview.attachments {
            self.write_attachment(attachment)?;
        }
        for row in &preview.button_rows {
            self.write("<div class=\"action-row\">")?;
            for button in row {
                self.write_button(button)?;
            }
            self.write("</div>\n")?;
        }

        self.write(&format!(
            "<div class=\"character-count\">{} / {}</div>\n",
            preview.character_count, MAX_TOTAL_EMBED_LENGTH
        ))?;
        if !preview.warnings.is_empty() {
            self.write("<ul class=\"limit-warnings\">\n")?;
            for warning in &preview.warnings {
                self.write("<li>")?;
                escape_html_body_text(&mut self.writer, &warning.to_string())?;
                self.write("</li>\n")?;
            }
            self.write("</ul>\n")?;
        }

        self.write("</div>\n")
    }

    fn write_embed(&mut self, embed: &EmbedPreview) -> Result<(), W::Error> {
        match &embed.color {
            Some(color) => {
                self.write("<div class=\"embed\" style=\"border-left-color: ")?;
                escape_html(&mut self.writer, color)?;
                self.write("\">\n")?;
            }
            None => self.write("<div class=\"embed\">\n")?,
        }

        if let Some(author) = &embed.author {
            self.write("<div class=\"embed-author\">")?;
            if let Some(icon_url) = author.icon_url.as_deref().filter(|url| !url.is_empty()) {
                self.write_img("embed-author-icon", icon_url, "")?;
            }
            self.write_text_or_link(&author.name, author.url.as_deref())?;
            self.write("</div>\n")?;
        }
        if let Some(title) = &embed.title {
            self.write("<div class=\"embed-title\">")?;
            self.write_text_or_link(title, embed.url.as_deref())?;
            self.write("</div>\n")?;
        }
        if !embed.description.is_empty() {
            self.write("<div class=\"embed-description\">\n")?;
            self.write_nodes(&embed.description)?;
            self.write("</div>\n")?;
        }
        if !embed.fields.is_empty() {
            self.write("<div class=\"embed-fields\">\n")?;
            for field in &embed.fields {
                self.write_field(field)?;
            }
            self.write("</div>\n")?;
        }
        if let Some(url) = &embed.thumbnail_url {
            self.write_img("embed-thumbnail", url, "")?;
            self.write("\n")?;
        }
        if let Some(url) = &embed.image_url {
            self.write_img("embed-image", url, "")?;
            self.write("\n")?;
        }
        if embed.footer_text.is_some() || embed.timestamp.is_some() {
            self.write("<div class=\"embed-footer\">")?;
            if let Some(icon_url) = &embed.footer_icon_url {
                self.write_img("embed-footer-icon", icon_url, "")?;
            }
            let footer = [embed.footer_text.as_deref(), embed.timestamp.as_deref()]
                .into_iter()
                .flatten()
                .join(" • ");
            escape_html_body_text(&mut self.writer, &footer)?;
            self.write("</div>\n")?;
        }

        self.write("</div>\n")
    }

    fn write_field(&mut self, field: &FieldPreview) -> Result<(), W::Error> {
        if field.inline {
            self.write("<div class=\"embed-field embed-field-inline\">\n")?;
        } else {
            self.write("<div class=\"embed-field\">\n")?;
        }
        self.write("<div class=\"embed-field-name\">")?;
        escape_html_body_text(&mut self.writer, &field.name)?;
        self.write("</div>\n<div class=\"embed-field-value\">\n")?;
        self.write_nodes(&field.value)?;
        self.write("</div>\n</div>\n")
    }

    fn write_attachment(&mut self, attachment: &AttachmentPreview) -> Result<(), W::Error> {
        match attachment.kind {
            AttachmentKind::Image => {
                self.write_img(
                    "attachment attachment-image",
                    attachment.url.as_str(),
                    &attachment.filename,
                )?;
            }
            AttachmentKind::Video => {
                self.write("<video class=\"attachment attachment-video\" controls src=\"")?;
                escape_href(&mut self.writer, attachment.url.as_str())?;
                self.write("\"></video>")?;
            }
            AttachmentKind::File => {
                self.write("<a class=\"attachment attachment-file\" href=\"")?;
                escape_href(&mut self.writer, attachment.url.as_str())?;
                self.write("\">")?;
                escape_html_body_text(&mut self.writer, &attachment.filename)?;
                self.write(&format!(" ({} bytes)</a>", attachment.size))?;
            }
        }
        self.write("\n")
    }

    fn write_button(&mut self, button: &ButtonPreview) -> Result<(), W::Error> {
        let class = format!("button button-{}", button.style.to_string().to_lowercase());
        match &button.url {
            Some(url) => {
                self.write(&format!("<a class=\"{class}\" href=\""))?;
                escape_href(&mut self.writer, url)?;
                self.write("\">")?;
                escape_html_body_text(&mut self.writer, &button.label)?;
                self.write("</a>")
            }
            None => {
                let disabled = if button.disabled { " disabled" } else { "" };
                self.write(&format!("<button class=\"{class}\"{disabled}>"))?;
                escape_html_body_text(&mut self.writer, &button.label)?;
                self.write("</button>")
            }
        }
    }

    fn write_text_or_link(&mut self, text: &str, url: Option<&str>) -> Result<(), W::Error> {
        let Some(url) = url.filter(|url| !url.is_empty()) else {
            return escape_html_body_text(&mut self.writer, text);
        };
        self.write("<a href=\"")?;
        escape_href(&mut self.writer, url)?;
        self.write("\">")?;
        escape_html_body_text(&mut self.writer, text)?;
        self.write("</a>")
    }

    fn write_img(&mut self, class: &str, src: &str, alt: &str) -> Result<(), W::Error> {
        self.write(&format!("<img class=\"{class}\" src=\""))?;
        escape_href(&mut self.writer, src)?;
        self.write("\" alt=\"")?;
        escape_html(&mut self.writer, alt)?;
        self.write("\" />")
    }

    fn write_nodes(&mut self, nodes: &[RenderNode]) -> Result<(), W::Error> {
        HtmlWriter::new(nodes.iter(), &mut self.writer, self.options).run()
    }

    fn write(&mut self, s: &str) -> Result<(), W::Error> {
        self.writer.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use forge_markup::{InlineEntity, Mention};

    use crate::app::deps::{AppConfig, UUIDProvider};
    use crate::domain::message::models::{
        ActionRow, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia,
    };
    use crate::test::ConstantTimeProvider;

    use super::*;

    fn service() -> PreviewService {
        let deps = AppDependencies::with_providers(
            AppConfig::default(),
            Arc::new(ConstantTimeProvider::ymd_hms(2024, 3, 1, 9, 0, 0)),
            Arc::new(UUIDProvider::new()),
        );
        PreviewService::from(&deps)
    }

    #[test]
    fn test_preview_renders_free_text() {
        let document = Document {
            content: "Hey <@1>".to_string(),
            embeds: vec![Embed {
                title: Some("**not markdown**".to_string()),
                description: Some("Ask <@&2>".to_string()),
                color: Some(0),
                timestamp: Some("2024-03-01T08:00:00.000Z".to_string()),
                fields: vec![EmbedField::new("<#3>", "See <#3> and <@1>", true)],
                ..Default::default()
            }],
            ..Default::default()
        };

        let preview = service().preview(&document);

        assert_eq!(
            preview.content,
            vec![RenderNode::element(
                forge_markup::Tag::Paragraph,
                vec![
                    RenderNode::text("Hey "),
                    RenderNode::entity(InlineEntity::UserMention { id: "1".into() })
                ]
            )]
        );

        let embed = &preview.embeds[0];
        assert_eq!(embed.title.as_deref(), Some("**not markdown**"));
        assert_eq!(embed.color, None);
        assert_eq!(embed.timestamp.as_deref(), Some("March 1, 2024 8:00 AM"));
        assert_eq!(embed.fields[0].name, "<#3>");
        assert!(embed.fields[0].inline);

        assert_eq!(
            preview.mentions,
            vec![
                Mention::User("1".into()),
                Mention::Role("2".into()),
                Mention::Channel("3".into()),
            ]
        );
    }

    #[test]
    fn test_preview_keeps_unparsable_timestamps() {
        let document = Document {
            embeds: vec![Embed {
                timestamp: Some("03/01/2024".to_string()),
                color: Some(0x0F52BA),
                ..Default::default()
            }],
            ..Default::default()
        };

        let embed = &service().preview(&document).embeds[0];
        assert_eq!(embed.timestamp.as_deref(), Some("03/01/2024"));
        assert_eq!(embed.color.as_deref(), Some("#0f52ba"));
    }

    #[test]
    fn test_preview_buttons() {
        let mut link = Button::link("", "https://example.com");
        link.disabled = true;
        let mut unlabeled = Button::interactive(Default::default(), "", "do_it");
        unlabeled.label = None;

        let document = Document {
            components: vec![ActionRow::new(vec![link, unlabeled])],
            ..Default::default()
        };

        let rows = service().preview(&document).button_rows;
        assert_eq!(rows[0][0].label, "Link");
        assert_eq!(rows[0][0].url.as_deref(), Some("https://example.com"));
        assert_eq!(rows[0][1].label, "do_it");
        assert_eq!(rows[0][1].url, None);
    }

    #[test]
    fn test_preview_html() {
        let document = Document {
            content: "Hi **there**".to_string(),
            embeds: vec![Embed {
                title: Some("Title".to_string()),
                url: Some("https://example.com".to_string()),
                description: Some("<@5>".to_string()),
                color: Some(0xFF0000),
                author: Some(EmbedAuthor {
                    name: "Me & you".to_string(),
                    ..Default::default()
                }),
                footer: Some(EmbedFooter {
                    text: "Footer".to_string(),
                    icon_url: None,
                }),
                timestamp: Some("2024-03-01T08:00:00Z".to_string()),
                image: Some(EmbedMedia::new("https://example.com/a.png")),
                ..Default::default()
            }],
            components: vec![ActionRow::example()],
            ..Default::default()
        };

        assert_eq!(
            service().preview_html(&document),
            "<div class=\"message\">\n\
             <div class=\"message-content\">\n\
             <p>Hi <strong>there</strong></p>\n\
             </div>\n\
             <div class=\"embed\" style=\"border-left-color: #ff0000\">\n\
             <div class=\"embed-author\">Me &amp; you</div>\n\
             <div class=\"embed-title\"><a href=\"https://example.com\">Title</a></div>\n\
             <div class=\"embed-description\">\n\
             <p><span class=\"mention mention-user\">@5</span></p>\n\
             </div>\n\
             <img class=\"embed-image\" src=\"https://example.com/a.png\" alt=\"\" />\n\
             <div class=\"embed-footer\">Footer • March 1, 2024 8:00 AM</div>\n\
             </div>\n\
             <div class=\"action-row\"><button class=\"button button-primary\">Click me!</button></div>\n\
             <div class=\"character-count\">35 / 6000</div>\n\
             </div>\n"
        );
    }

    #[test]
    fn test_preview_markdown() {
        assert_eq!(
            service().preview_markdown("<t:1709283600:R> ||<:blob:9>||"),
            "<p><time datetime=\"2024-03-01T09:00:00+00:00\">0 seconds ago</time> \
             <span class=\"spoiler\"><img class=\"emoji\" alt=\":blob:\" src=\"https://cdn.discordapp.com/emojis/9.webp?size=48\" /></span></p>"
        );
    }
}
