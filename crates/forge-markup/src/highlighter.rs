// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::node::RenderNode;

/// Decorates the contents of a fenced code block.
pub trait Highlighter: Send + Sync {
    /// Returns `None` if `language` isn't supported, in which case the code is rendered as-is.
    fn highlight(&self, code: &str, language: &str) -> Option<Vec<RenderNode>>;
}

/// Doesn't know any language.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, _code: &str, _language: &str) -> Option<Vec<RenderNode>> {
        None
    }
}
