// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::node::{RenderNode, Tag};

const SPOILER_DELIMITER: &str = "||";

/// Children of an open element while the Markdown events are being consumed.
#[derive(Debug, PartialEq)]
pub(crate) enum Inline {
    /// Text that still needs to be entity scanned.
    Raw(String),
    /// A finished node.
    Node(RenderNode),
    Spoiler(Vec<Inline>),
}

pub(crate) fn push_raw(inlines: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Raw(last)) = inlines.last_mut() {
        last.push_str(text);
        return;
    }
    inlines.push(Inline::Raw(text.to_string()));
}

fn push_inline(inlines: &mut Vec<Inline>, inline: Inline) {
    match inline {
        Inline::Raw(text) => push_raw(inlines, &text),
        inline => inlines.push(inline),
    }
}

enum Token {
    Inline(Inline),
    Delimiter,
}

/// Pairs `||` delimiters from left to right and wraps everything between a pair into a spoiler.
/// A trailing unpaired delimiter stays text.
pub(crate) fn group_spoilers(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut tokens = vec![];

    for inline in inlines {
        let Inline::Raw(text) = inline else {
            tokens.push(Token::Inline(inline));
            continue;
        };

        for (idx, piece) in text.split(SPOILER_DELIMITER).enumerate() {
            if idx > 0 {
                tokens.push(Token::Delimiter);
            }
            if !piece.is_empty() {
                tokens.push(Token::Inline(Inline::Raw(piece.to_string())));
            }
        }
    }

    let delimiter_count = tokens
        .iter()
        .filter(|token| matches!(token, Token::Delimiter))
        .count();
    let mut pairable = delimiter_count - delimiter_count % 2;

    let mut result = vec![];
    let mut spoiler: Option<Vec<Inline>> = None;

    for token in tokens {
        match token {
            Token::Delimiter if pairable > 0 => {
                pairable -= 1;
                match spoiler.take() {
                    None => spoiler = Some(vec![]),
                    Some(inner) if inner.is_empty() => {
                        push_raw(&mut result, &SPOILER_DELIMITER.repeat(2))
                    }
                    Some(inner) => result.push(Inline::Spoiler(inner)),
                }
            }
            Token::Delimiter => push_raw(&mut result, SPOILER_DELIMITER),
            Token::Inline(inline) => push_inline(spoiler.as_mut().unwrap_or(&mut result), inline),
        }
    }

    result
}

/// Turns the inlines into nodes, passing every raw text through `scan`.
pub(crate) fn resolve(
    inlines: Vec<Inline>,
    scan: &mut impl FnMut(&str) -> Vec<RenderNode>,
) -> Vec<RenderNode> {
    let mut nodes = vec![];
    for inline in inlines {
        match inline {
            Inline::Raw(text) => nodes.extend(scan(&text)),
            Inline::Node(node) => nodes.push(node),
            Inline::Spoiler(inner) => {
                nodes.push(RenderNode::element(Tag::Spoiler, resolve(inner, scan)))
            }
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn raw(s: &str) -> Inline {
        Inline::Raw(s.to_string())
    }

    #[test]
    fn test_groups_spoilers() {
        assert_eq!(
            group_spoilers(vec![raw("a ||b|| c")]),
            vec![raw("a "), Inline::Spoiler(vec![raw("b")]), raw(" c")]
        );
    }

    #[test]
    fn test_spoiler_spans_nodes() {
        let bold = RenderNode::element(Tag::Bold, vec![RenderNode::text("x")]);
        assert_eq!(
            group_spoilers(vec![raw("||"), Inline::Node(bold.clone()), raw(" y||z")]),
            vec![
                Inline::Spoiler(vec![Inline::Node(bold), raw(" y")]),
                raw("z")
            ]
        );
    }

    #[test]
    fn test_unpaired_and_empty_delimiters_stay_text() {
        assert_eq!(
            group_spoilers(vec![raw("a ||b|| c || d")]),
            vec![raw("a "), Inline::Spoiler(vec![raw("b")]), raw(" c || d")]
        );
        assert_eq!(group_spoilers(vec![raw("||||")]), vec![raw("||||")]);
    }
}
