// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, FixedOffset, Offset, Utc};
use pulldown_cmark_escape::{escape_href, escape_html, escape_html_body_text, StrWrite};

use crate::entity::InlineEntity;
use crate::node::{RenderNode, Tag};
use crate::timestamp::instant_from_unix_seconds;

pub const DEFAULT_EMOJI_CDN_URL: &str = "https://cdn.discordapp.com/emojis";
pub const DEFAULT_EMOJI_SIZE: u32 = 48;

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    pub emoji_cdn_url: String,
    pub emoji_size: u32,
    /// Reference point for relative timestamps.
    pub now: DateTime<Utc>,
    pub utc_offset: FixedOffset,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            emoji_cdn_url: DEFAULT_EMOJI_CDN_URL.to_string(),
            emoji_size: DEFAULT_EMOJI_SIZE,
            now: Utc::now(),
            utc_offset: Utc.fix(),
        }
    }
}

pub struct HtmlWriter<'o, I, W> {
    /// Iterator supplying the top-level nodes.
    iter: I,

    /// Writer to write to.
    writer: W,

    options: &'o HtmlOptions,
    in_table_head: bool,
}

impl<'o, 'n, I, W> HtmlWriter<'o, I, W>
where
    I: Iterator<Item = &'n RenderNode>,
    W: StrWrite,
{
    pub fn new(iter: I, writer: W, options: &'o HtmlOptions) -> Self {
        Self {
            iter,
            writer,
            options,
            in_table_head: false,
        }
    }

    pub fn run(mut self) -> Result<(), W::Error> {
        while let Some(node) = self.iter.next() {
            self.write_node(node)?;
        }
        Ok(())
    }
}

impl<'o, 'n, I, W> HtmlWriter<'o, I, W>
where
    I: Iterator<Item = &'n RenderNode>,
    W: StrWrite,
{
    fn write_node(&mut self, node: &RenderNode) -> Result<(), W::Error> {
        match node {
            RenderNode::Text { text } => escape_html_body_text(&mut self.writer, text),
            RenderNode::Entity { entity } => self.write_entity(entity),
            RenderNode::Element(element) => {
                self.start_tag(&element.tag)?;
                for child in &element.children {
                    self.write_node(child)?;
                }
                self.end_tag(&element.tag)
            }
        }
    }

    fn write_entity(&mut self, entity: &InlineEntity) -> Result<(), W::Error> {
        match entity {
            InlineEntity::CustomEmoji { name, .. } => {
                let url = entity
                    .emoji_url(&self.options.emoji_cdn_url, self.options.emoji_size)
                    .unwrap_or_default();
                self.write("<img class=\"emoji\" alt=\":")?;
                escape_html(&mut self.writer, name)?;
                self.write(":\" src=\"")?;
                escape_href(&mut self.writer, &url)?;
                self.write("\" />")
            }
            InlineEntity::UserMention { id } => self.write_mention("user", "@", id.as_ref()),
            InlineEntity::RoleMention { id } => self.write_mention("role", "@", id.as_ref()),
            InlineEntity::ChannelMention { id } => {
                self.write_mention("channel", "#", id.as_ref())
            }
            InlineEntity::Timestamp {
                unix_seconds,
                style,
            } => {
                let Some(instant) = instant_from_unix_seconds(*unix_seconds) else {
                    return escape_html_body_text(
                        &mut self.writer,
                        &format!("<t:{unix_seconds}:{style}>"),
                    );
                };
                let local = instant.with_timezone(&self.options.utc_offset);
                self.write("<time datetime=\"")?;
                self.write(&local.to_rfc3339())?;
                self.write("\">")?;
                escape_html_body_text(
                    &mut self.writer,
                    &style.format(instant, self.options.now, &self.options.utc_offset),
                )?;
                self.write("</time>")
            }
        }
    }

    fn write_mention(&mut self, kind: &str, sigil: &str, id: &str) -> Result<(), W::Error> {
        self.write(&format!("<span class=\"mention mention-{kind}\">{sigil}"))?;
        escape_html_body_text(&mut self.writer, id)?;
        self.write("</span>")
    }

    fn start_tag(&mut self, tag: &Tag) -> Result<(), W::Error> {
        match tag {
            Tag::Paragraph => self.write("<p>"),
            Tag::Heading { level } => self.write(&format!("<h{level}>")),
            Tag::Bold => self.write("<strong>"),
            Tag::Italic => self.write("<em>"),
            Tag::Underline => self.write("<u>"),
            Tag::Strikethrough => self.write("<del>"),
            Tag::Spoiler => self.write("<span class=\"spoiler\">"),
            Tag::BlockQuote => self.write("<blockquote>\n"),
            Tag::OrderedList { start: 1 } => self.write("<ol>\n"),
            Tag::OrderedList { start } => self.write(&format!("<ol start=\"{start}\">\n")),
            Tag::UnorderedList => self.write("<ul>\n"),
            Tag::ListItem => self.write("<li>"),
            Tag::Link { url } => {
                self.write("<a href=\"")?;
                escape_href(&mut self.writer, url)?;
                self.write("\">")
            }
            Tag::InlineCode => self.write("<code>"),
            Tag::CodeBlock {
                language: Some(language),
            } => {
                self.write("<pre><code class=\"language-")?;
                escape_html(&mut self.writer, language)?;
                self.write("\">")
            }
            Tag::CodeBlock { language: None } => self.write("<pre><code>"),
            Tag::LineBreak => self.write("<br />\n"),
            Tag::Table => self.write("<table>\n"),
            Tag::TableHead => {
                self.in_table_head = true;
                self.write("<thead><tr>")
            }
            Tag::TableRow => self.write("<tr>"),
            Tag::TableCell if self.in_table_head => self.write("<th>"),
            Tag::TableCell => self.write("<td>"),
            Tag::Token { scope } => {
                self.write("<span class=\"")?;
                escape_html(&mut self.writer, scope)?;
                self.write("\">")
            }
        }
    }

    fn end_tag(&mut self, tag: &Tag) -> Result<(), W::Error> {
        match tag {
            Tag::Paragraph => self.write("</p>\n"),
            Tag::Heading { level } => self.write(&format!("</h{level}>\n")),
            Tag::Bold => self.write("</strong>"),
            Tag::Italic => self.write("</em>"),
            Tag::Underline => self.write("</u>"),
            Tag::Strikethrough => self.write("</del>"),
            Tag::Spoiler | Tag::Token { .. } => self.write("</span>"),
            Tag::BlockQuote => self.write("</blockquote>\n"),
            Tag::OrderedList { .. } => self.write("</ol>\n"),
            Tag::UnorderedList => self.write("</ul>\n"),
            Tag::ListItem => self.write("</li>\n"),
            Tag::Link { .. } => self.write("</a>"),
            Tag::InlineCode => self.write("</code>"),
            Tag::CodeBlock { .. } => self.write("</code></pre>\n"),
            Tag::LineBreak => Ok(()),
            Tag::Table => self.write("</table>\n"),
            Tag::TableHead => {
                self.in_table_head = false;
                self.write("</tr></thead>\n")
            }
            Tag::TableRow => self.write("</tr>\n"),
            Tag::TableCell if self.in_table_head => self.write("</th>"),
            Tag::TableCell => self.write("</td>"),
        }
    }

    #[inline]
    fn write(&mut self, s: &str) -> Result<(), W::Error> {
        self.writer.write_str(s)
    }
}
