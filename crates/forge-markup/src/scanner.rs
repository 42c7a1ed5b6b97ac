// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Range;

use crate::node::RenderNode;
use crate::pattern::EntityPattern;

/// A piece of the scanner's working sequence. `span` is the byte range of the source text the
/// fragment was produced from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentKind {
    /// Unprocessed text, still eligible for scanning.
    Text,
    /// A resolved node. Never scanned again.
    Node(RenderNode),
}

impl Fragment {
    pub fn text(span: Range<usize>) -> Self {
        Self {
            kind: FragmentKind::Text,
            span,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, FragmentKind::Text)
    }

    pub fn into_node(self, source: &str) -> RenderNode {
        match self.kind {
            FragmentKind::Text => RenderNode::text(&source[self.span]),
            FragmentKind::Node(node) => node,
        }
    }
}

/// Replaces inline entity syntax in text with nodes by applying an ordered list of patterns.
///
/// Each pattern only ever sees the `Text` fragments left over by the patterns before it, so a
/// span claimed by one pattern is never matched by another.
#[derive(Debug, Clone)]
pub struct EntityScanner {
    patterns: Vec<EntityPattern>,
}

impl Default for EntityScanner {
    fn default() -> Self {
        Self::new(EntityPattern::defaults())
    }
}

impl EntityScanner {
    pub fn new(patterns: Vec<EntityPattern>) -> Self {
        Self { patterns }
    }

    /// Appends a pattern. It runs after all patterns registered before it.
    pub fn push_pattern(&mut self, pattern: EntityPattern) {
        self.patterns.push(pattern);
    }

    pub fn patterns(&self) -> &[EntityPattern] {
        &self.patterns
    }

    pub fn scan(&self, text: &str) -> Vec<RenderNode> {
        self.scan_fragments(text)
            .into_iter()
            .map(|fragment| fragment.into_node(text))
            .collect()
    }

    pub fn scan_fragments(&self, text: &str) -> Vec<Fragment> {
        if text.is_empty() {
            return vec![];
        }
        self.rescan(text, vec![Fragment::text(0..text.len())])
    }

    /// Continues scanning an existing fragment sequence of `source`.
    pub fn rescan(&self, source: &str, fragments: Vec<Fragment>) -> Vec<Fragment> {
        self.patterns
            .iter()
            .fold(fragments, |fragments, pattern| {
                apply_pattern(source, fragments, pattern)
            })
    }
}

fn apply_pattern(source: &str, fragments: Vec<Fragment>, pattern: &EntityPattern) -> Vec<Fragment> {
    let mut result = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        if !fragment.is_text() {
            result.push(fragment);
            continue;
        }

        let start = fragment.span.start;
        let text = &source[fragment.span.clone()];
        let mut last_index = 0;

        for captures in pattern.regex().captures_iter(text) {
            let Some(full_match) = captures.get(0) else {
                continue;
            };
            let Some(node) = pattern.generate(&captures, start + full_match.start()) else {
                continue;
            };

            if full_match.start() > last_index {
                result.push(Fragment::text(start + last_index..start + full_match.start()));
            }
            result.push(Fragment {
                kind: FragmentKind::Node(node),
                span: start + full_match.start()..start + full_match.end(),
            });
            last_index = full_match.end();
        }

        if last_index < text.len() {
            result.push(Fragment::text(start + last_index..fragment.span.end));
        }
    }

    result
}
