// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

use crate::entity::InlineEntity;

/// A node of a rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RenderNode {
    Text { text: String },
    Entity { entity: InlineEntity },
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: Tag,
    pub children: Vec<RenderNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "name")]
pub enum Tag {
    Paragraph,
    Heading { level: u8 },
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    BlockQuote,
    OrderedList { start: u64 },
    UnorderedList,
    ListItem,
    Link { url: String },
    InlineCode,
    CodeBlock { language: Option<String> },
    LineBreak,
    Table,
    TableHead,
    TableRow,
    TableCell,
    /// A highlighted span inside a code block.
    Token { scope: String },
}

impl RenderNode {
    pub fn text(text: impl Into<String>) -> Self {
        RenderNode::Text { text: text.into() }
    }

    pub fn entity(entity: InlineEntity) -> Self {
        RenderNode::Entity { entity }
    }

    pub fn element(tag: Tag, children: Vec<RenderNode>) -> Self {
        RenderNode::Element(Element { tag, children })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderNode::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Visits this node and all of its descendants depth-first.
    pub fn walk<'a>(&'a self, visitor: &mut impl FnMut(&'a RenderNode)) {
        visitor(self);
        if let RenderNode::Element(element) = self {
            for child in &element.children {
                child.walk(visitor);
            }
        }
    }

    /// The concatenated text content, entities excluded.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        self.walk(&mut |node| {
            if let RenderNode::Text { text: t } = node {
                text.push_str(t)
            }
        });
        text
    }
}

impl Tag {
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Tag::Paragraph
                | Tag::Heading { .. }
                | Tag::BlockQuote
                | Tag::OrderedList { .. }
                | Tag::UnorderedList
                | Tag::ListItem
                | Tag::CodeBlock { .. }
                | Tag::Table
                | Tag::TableHead
                | Tag::TableRow
        )
    }
}
