// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Range;
use std::sync::Arc;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag as MdTag};
use tracing::{error, trace};

use crate::highlighter::{Highlighter, PlainHighlighter};
use crate::html_writer::{HtmlOptions, HtmlWriter};
use crate::inline::{group_spoilers, push_raw, resolve, Inline};
use crate::node::{RenderNode, Tag};
use crate::pattern::EntityPattern;
use crate::scanner::EntityScanner;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkupOptions {
    /// Whether entities inside `inline code` are resolved. Code blocks are never scanned.
    pub scan_inline_code: bool,
    /// Whether bare URLs outside of links become links.
    pub autolink: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            scan_inline_code: true,
            autolink: true,
        }
    }
}

/// Renders Markdown with inline entities into a tree of `RenderNode`s.
///
/// Markdown is parsed first. Every text leaf left over is then passed through the
/// `EntityScanner`, so entity syntax can never leak into code blocks or link destinations.
#[derive(Clone)]
pub struct MarkupRenderer {
    entities: EntityScanner,
    links: EntityScanner,
    highlighter: Arc<dyn Highlighter>,
    options: MarkupOptions,
}

impl Default for MarkupRenderer {
    fn default() -> Self {
        Self::new(MarkupOptions::default())
    }
}

impl MarkupRenderer {
    pub fn new(options: MarkupOptions) -> Self {
        Self {
            entities: EntityScanner::default(),
            links: EntityScanner::new(vec![EntityPattern::autolink()]),
            highlighter: Arc::new(PlainHighlighter),
            options,
        }
    }

    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Arc::new(highlighter);
        self
    }

    pub fn with_scanner(mut self, scanner: EntityScanner) -> Self {
        self.entities = scanner;
        self
    }

    pub fn scanner(&self) -> &EntityScanner {
        &self.entities
    }

    pub fn options(&self) -> &MarkupOptions {
        &self.options
    }

    pub fn render(&self, text: &str) -> Vec<RenderNode> {
        if text.is_empty() {
            return vec![];
        }

        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);

        let mut builder = TreeBuilder::new(self, text);
        for (event, range) in Parser::new_ext(text, options).into_offset_iter() {
            builder.handle_event(event, range);
        }
        builder.finish()
    }

    pub fn render_html(&self, text: &str, options: &HtmlOptions) -> String {
        let nodes = self.render(text);
        render_nodes_html(&nodes, options)
    }

    fn scan(&self, text: &str, in_link: bool) -> Vec<RenderNode> {
        let mut fragments = self.entities.scan_fragments(text);
        if self.options.autolink && !in_link {
            fragments = self.links.rescan(text, fragments);
        }
        fragments
            .into_iter()
            .map(|fragment| fragment.into_node(text))
            .collect()
    }
}

/// Renders already built nodes to HTML.
pub fn render_nodes_html(nodes: &[RenderNode], options: &HtmlOptions) -> String {
    let mut html = String::new();
    let writer = HtmlWriter::new(nodes.iter(), &mut html, options);
    if let Err(err) = writer.run() {
        error!("Failed to write HTML. {}", err);
    }
    html.trim_end().to_string()
}

struct Frame {
    /// `None` for the root and for containers without a counterpart, whose children are
    /// spliced into the parent.
    tag: Option<Tag>,
    children: Vec<Inline>,
}

struct TreeBuilder<'r, 's> {
    renderer: &'r MarkupRenderer,
    source: &'s str,
    stack: Vec<Frame>,
}

impl<'r, 's> TreeBuilder<'r, 's> {
    fn new(renderer: &'r MarkupRenderer, source: &'s str) -> Self {
        Self {
            renderer,
            source,
            stack: vec![Frame {
                tag: None,
                children: vec![],
            }],
        }
    }

    fn handle_event(&mut self, event: Event<'s>, range: Range<usize>) {
        match event {
            Event::Start(tag) => {
                let tag = self.map_tag(tag, &range);
                self.stack.push(Frame {
                    tag,
                    children: vec![],
                });
            }
            Event::End(_) => self.close_frame(),
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                push_raw(&mut self.current().children, &text);
            }
            Event::InlineMath(text) | Event::DisplayMath(text) => {
                push_raw(&mut self.current().children, &text);
            }
            Event::Code(code) => {
                let children = if self.renderer.options.scan_inline_code {
                    self.renderer.entities.scan(&code)
                } else {
                    vec![RenderNode::text(code.to_string())]
                };
                self.push_node(RenderNode::element(Tag::InlineCode, children));
            }
            Event::SoftBreak | Event::HardBreak => {
                self.push_node(RenderNode::element(Tag::LineBreak, vec![]));
            }
            Event::Rule => {
                let rule = self.source[range].trim_end().to_string();
                self.push_node(RenderNode::element(
                    Tag::Paragraph,
                    vec![RenderNode::text(rule)],
                ));
            }
            Event::FootnoteReference(_) | Event::TaskListMarker(_) => {}
        }
    }

    fn finish(mut self) -> Vec<RenderNode> {
        while self.stack.len() > 1 {
            self.close_frame();
        }
        let Some(root) = self.stack.pop() else {
            return vec![];
        };
        self.resolve_children(root.children, false)
    }

    fn map_tag(&self, tag: MdTag<'s>, range: &Range<usize>) -> Option<Tag> {
        let tag = match tag {
            MdTag::Paragraph | MdTag::HtmlBlock => Tag::Paragraph,
            MdTag::Heading { level, .. } => Tag::Heading {
                level: heading_level(level),
            },
            MdTag::BlockQuote(_) => Tag::BlockQuote,
            MdTag::CodeBlock(CodeBlockKind::Fenced(info)) => Tag::CodeBlock {
                language: info
                    .split_whitespace()
                    .next()
                    .map(|language| language.to_string()),
            },
            MdTag::CodeBlock(CodeBlockKind::Indented) => Tag::CodeBlock { language: None },
            MdTag::List(Some(start)) => Tag::OrderedList { start },
            MdTag::List(None) => Tag::UnorderedList,
            MdTag::Item => Tag::ListItem,
            MdTag::Emphasis => Tag::Italic,
            // `__x__` and `**x**` are both "strong" in CommonMark.
            MdTag::Strong if self.source[range.start..].starts_with("__") => Tag::Underline,
            MdTag::Strong => Tag::Bold,
            MdTag::Strikethrough => Tag::Strikethrough,
            MdTag::Link { dest_url, .. } | MdTag::Image { dest_url, .. } => Tag::Link {
                url: dest_url.to_string(),
            },
            MdTag::Table(_) => Tag::Table,
            MdTag::TableHead => Tag::TableHead,
            MdTag::TableRow => Tag::TableRow,
            MdTag::TableCell => Tag::TableCell,
            _ => return None,
        };
        Some(tag)
    }

    fn current(&mut self) -> &mut Frame {
        let idx = self.stack.len() - 1;
        &mut self.stack[idx]
    }

    fn push_node(&mut self, node: RenderNode) {
        self.current().children.push(Inline::Node(node));
    }

    fn is_in_link(&self) -> bool {
        self.stack
            .iter()
            .any(|frame| matches!(frame.tag, Some(Tag::Link { .. })))
    }

    fn close_frame(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let in_link = self.is_in_link();
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame.tag {
            Some(Tag::CodeBlock { language }) => {
                let code = self.code_block_children(frame.children, language.as_deref());
                self.push_node(RenderNode::element(Tag::CodeBlock { language }, code));
            }
            Some(tag) => {
                let children = self.resolve_children(frame.children, in_link);
                self.push_node(RenderNode::element(tag, children));
            }
            None => {
                let children = self.resolve_children(frame.children, in_link);
                self.current()
                    .children
                    .extend(children.into_iter().map(Inline::Node));
            }
        }
    }

    fn resolve_children(&self, children: Vec<Inline>, in_link: bool) -> Vec<RenderNode> {
        let renderer = self.renderer;
        resolve(group_spoilers(children), &mut |text| {
            renderer.scan(text, in_link)
        })
    }

    fn code_block_children(&self, children: Vec<Inline>, language: Option<&str>) -> Vec<RenderNode> {
        let mut code = String::new();
        for child in children {
            if let Inline::Raw(text) = child {
                code.push_str(&text);
            }
        }
        if code.ends_with('\n') {
            code.pop();
        }

        if let Some(language) = language {
            if let Some(nodes) = self.renderer.highlighter.highlight(&code, language) {
                return nodes;
            }
            trace!("No highlighting available for language '{}'", language);
        }

        if code.is_empty() {
            return vec![];
        }
        vec![RenderNode::text(code)]
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::entity::InlineEntity;

    use super::*;

    fn text(s: &str) -> RenderNode {
        RenderNode::text(s)
    }

    fn el(tag: Tag, children: Vec<RenderNode>) -> RenderNode {
        RenderNode::element(tag, children)
    }

    fn user(id: &str) -> RenderNode {
        RenderNode::entity(InlineEntity::UserMention { id: id.into() })
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            MarkupRenderer::default().render("Hello World"),
            vec![el(Tag::Paragraph, vec![text("Hello World")])]
        );
        assert!(MarkupRenderer::default().render("").is_empty());
    }

    #[test]
    fn test_distinguishes_bold_and_underline() {
        assert_eq!(
            MarkupRenderer::default().render("**a** __b__ *c* _d_ ~~e~~"),
            vec![el(
                Tag::Paragraph,
                vec![
                    el(Tag::Bold, vec![text("a")]),
                    text(" "),
                    el(Tag::Underline, vec![text("b")]),
                    text(" "),
                    el(Tag::Italic, vec![text("c")]),
                    text(" "),
                    el(Tag::Italic, vec![text("d")]),
                    text(" "),
                    el(Tag::Strikethrough, vec![text("e")]),
                ]
            )]
        );
    }

    #[test]
    fn test_scans_entities_inside_formatting() {
        assert_eq!(
            MarkupRenderer::default().render("Hi **<@1>** ||<@&2>||"),
            vec![el(
                Tag::Paragraph,
                vec![
                    text("Hi "),
                    el(Tag::Bold, vec![user("1")]),
                    text(" "),
                    el(
                        Tag::Spoiler,
                        vec![RenderNode::entity(InlineEntity::RoleMention {
                            id: "2".into()
                        })]
                    ),
                ]
            )]
        );
    }

    #[test]
    fn test_emphasis_applies_before_entity_scanning() {
        assert_eq!(
            MarkupRenderer::default().render("<:_x_:1>"),
            vec![el(
                Tag::Paragraph,
                vec![
                    text("<:"),
                    el(Tag::Italic, vec![text("x")]),
                    text(":1>"),
                ]
            )]
        );
        assert_eq!(
            MarkupRenderer::default().render("<:snake_case_name:1>"),
            vec![el(
                Tag::Paragraph,
                vec![RenderNode::entity(InlineEntity::CustomEmoji {
                    name: "snake_case_name".to_string(),
                    id: "1".into(),
                    animated: false
                })]
            )]
        );
    }

    #[test]
    fn test_code_blocks_are_not_scanned() {
        assert_eq!(
            MarkupRenderer::default().render("```rust\nlet a = \"<@1>\";\n```"),
            vec![el(
                Tag::CodeBlock {
                    language: Some("rust".to_string())
                },
                vec![text("let a = \"<@1>\";")]
            )]
        );
        assert_eq!(
            MarkupRenderer::default().render("```\n<#5>\n```"),
            vec![el(Tag::CodeBlock { language: None }, vec![text("<#5>")])]
        );
    }

    #[test]
    fn test_inline_code_scanning_is_configurable() {
        let scanning = MarkupRenderer::default();
        assert_eq!(
            scanning.render("`<@1>`"),
            vec![el(
                Tag::Paragraph,
                vec![el(Tag::InlineCode, vec![user("1")])]
            )]
        );

        let verbatim = MarkupRenderer::new(MarkupOptions {
            scan_inline_code: false,
            ..Default::default()
        });
        assert_eq!(
            verbatim.render("`<@1>`"),
            vec![el(
                Tag::Paragraph,
                vec![el(Tag::InlineCode, vec![text("<@1>")])]
            )]
        );
    }

    #[test]
    fn test_uses_highlighter_for_known_languages() {
        struct Upper;

        impl Highlighter for Upper {
            fn highlight(&self, code: &str, language: &str) -> Option<Vec<RenderNode>> {
                (language == "shout").then(|| {
                    vec![el(
                        Tag::Token {
                            scope: "keyword".to_string(),
                        },
                        vec![text(&code.to_uppercase())],
                    )]
                })
            }
        }

        let renderer = MarkupRenderer::default().with_highlighter(Upper);
        assert_eq!(
            renderer.render("```shout\nhey\n```"),
            vec![el(
                Tag::CodeBlock {
                    language: Some("shout".to_string())
                },
                vec![el(
                    Tag::Token {
                        scope: "keyword".to_string()
                    },
                    vec![text("HEY")]
                )]
            )]
        );
        assert_eq!(
            renderer.render("```whisper\nhey\n```"),
            vec![el(
                Tag::CodeBlock {
                    language: Some("whisper".to_string())
                },
                vec![text("hey")]
            )]
        );
    }

    #[test]
    fn test_links_and_autolinks() {
        assert_eq!(
            MarkupRenderer::default().render("[<@1>](https://example.com/<@2>) see https://example.org."),
            vec![el(
                Tag::Paragraph,
                vec![
                    el(
                        Tag::Link {
                            url: "https://example.com/<@2>".to_string()
                        },
                        vec![user("1")]
                    ),
                    text(" see "),
                    el(
                        Tag::Link {
                            url: "https://example.org".to_string()
                        },
                        vec![text("https://example.org")]
                    ),
                    text("."),
                ]
            )]
        );
    }

    #[test]
    fn test_line_breaks_and_headings() {
        assert_eq!(
            MarkupRenderer::default().render("# Title\nline one\nline <#3>"),
            vec![
                el(Tag::Heading { level: 1 }, vec![text("Title")]),
                el(
                    Tag::Paragraph,
                    vec![
                        text("line one"),
                        el(Tag::LineBreak, vec![]),
                        text("line "),
                        RenderNode::entity(InlineEntity::ChannelMention { id: "3".into() }),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn test_lists_and_quotes() {
        assert_eq!(
            MarkupRenderer::default().render("> quoted\n\n3. a\n4. b\n\n- c"),
            vec![
                el(Tag::BlockQuote, vec![el(Tag::Paragraph, vec![text("quoted")])]),
                el(
                    Tag::OrderedList { start: 3 },
                    vec![
                        el(Tag::ListItem, vec![text("a")]),
                        el(Tag::ListItem, vec![text("b")]),
                    ]
                ),
                el(
                    Tag::UnorderedList,
                    vec![el(Tag::ListItem, vec![text("c")])]
                ),
            ]
        );
    }
}
