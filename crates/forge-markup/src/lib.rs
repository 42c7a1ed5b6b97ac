// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use itertools::Itertools;

pub use entity::{ChannelId, EmojiId, InlineEntity, Mention, RoleId, UserId};
pub use highlighter::{Highlighter, PlainHighlighter};
pub use html_writer::{HtmlOptions, HtmlWriter, DEFAULT_EMOJI_CDN_URL, DEFAULT_EMOJI_SIZE};
pub use node::{Element, RenderNode, Tag};
pub use pattern::{EntityPattern, NodeGenerator};
pub use renderer::{render_nodes_html, MarkupOptions, MarkupRenderer};
pub use scanner::{EntityScanner, Fragment, FragmentKind};
pub use timestamp::{
    format_relative, instant_from_unix_seconds, TimestampStyle, UnknownTimestampStyle,
};

mod entity;
mod highlighter;
mod html_writer;
mod inline;
mod node;
mod pattern;
mod renderer;
mod scanner;
mod timestamp;

/// Returns the users, roles and channels mentioned in `nodes` in order of first appearance.
pub fn collect_mentions(nodes: &[RenderNode]) -> Vec<Mention> {
    let mut mentions = vec![];
    for node in nodes {
        node.walk(&mut |node| {
            if let RenderNode::Entity { entity } = node {
                mentions.extend(entity.as_mention());
            }
        });
    }
    mentions.into_iter().unique().collect()
}
