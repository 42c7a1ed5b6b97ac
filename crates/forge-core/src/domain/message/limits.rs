// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::models::{Document, Embed};

pub const MAX_EMBEDS: usize = 10;
pub const MAX_FIELDS: usize = 25;
pub const MAX_ACTION_ROWS: usize = 5;
pub const MAX_BUTTONS_PER_ROW: usize = 5;

pub const MAX_CONTENT_LENGTH: usize = 2000;
pub const MAX_TITLE_LENGTH: usize = 256;
pub const MAX_DESCRIPTION_LENGTH: usize = 4096;
pub const MAX_FIELD_NAME_LENGTH: usize = 256;
pub const MAX_FIELD_VALUE_LENGTH: usize = 1024;
pub const MAX_FOOTER_TEXT_LENGTH: usize = 2048;
pub const MAX_AUTHOR_NAME_LENGTH: usize = 256;
pub const MAX_TOTAL_EMBED_LENGTH: usize = 6000;

/// The part of a document a `LimitWarning` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "target")]
pub enum LimitTarget {
    Content,
    EmbedTitle { embed: usize },
    EmbedDescription { embed: usize },
    FieldName { embed: usize, field: usize },
    FieldValue { embed: usize, field: usize },
    FooterText { embed: usize },
    AuthorName { embed: usize },
    /// All embeds combined.
    EmbedTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitWarning {
    pub target: LimitTarget,
    pub length: usize,
    pub max: usize,
}

/// Platform limits are measured in UTF-16 code units, so characters outside the Basic
/// Multilingual Plane (most emoji) count twice.
fn len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn opt_len(text: Option<&str>) -> usize {
    text.map(len).unwrap_or(0)
}

/// The characters of an embed that count towards the combined embed limit.
pub fn embed_length(embed: &Embed) -> usize {
    opt_len(embed.title.as_deref())
        + opt_len(embed.description.as_deref())
        + opt_len(embed.footer.as_ref().map(|footer| footer.text.as_str()))
        + opt_len(embed.author.as_ref().map(|author| author.name.as_str()))
        + embed
            .fields
            .iter()
            .map(|field| len(&field.name) + len(&field.value))
            .sum::<usize>()
}

/// The message content plus the text of all embeds, counted in UTF-16 code units.
pub fn calculate_message_length(document: &Document) -> usize {
    len(&document.content) + document.embeds.iter().map(embed_length).sum::<usize>()
}

/// Reports every exceeded length limit. Nothing is truncated, the limits are advisory.
pub fn validate_limits(document: &Document) -> Vec<LimitWarning> {
    let mut warnings = vec![];
    let mut check = |target: LimitTarget, length: usize, max: usize| {
        if length > max {
            warnings.push(LimitWarning {
                target,
                length,
                max,
            })
        }
    };

    check(LimitTarget::Content, len(&document.content), MAX_CONTENT_LENGTH);

    for (embed_idx, embed) in document.embeds.iter().enumerate() {
        check(
            LimitTarget::EmbedTitle { embed: embed_idx },
            opt_len(embed.title.as_deref()),
            MAX_TITLE_LENGTH,
        );
        check(
            LimitTarget::EmbedDescription { embed: embed_idx },
            opt_len(embed.description.as_deref()),
            MAX_DESCRIPTION_LENGTH,
        );
        if let Some(author) = &embed.author {
            check(
                LimitTarget::AuthorName { embed: embed_idx },
                len(&author.name),
                MAX_AUTHOR_NAME_LENGTH,
            );
        }
        if let Some(footer) = &embed.footer {
            check(
                LimitTarget::FooterText { embed: embed_idx },
                len(&footer.text),
                MAX_FOOTER_TEXT_LENGTH,
            );
        }
        for (field_idx, field) in embed.fields.iter().enumerate() {
            check(
                LimitTarget::FieldName {
                    embed: embed_idx,
                    field: field_idx,
                },
                len(&field.name),
                MAX_FIELD_NAME_LENGTH,
            );
            check(
                LimitTarget::FieldValue {
                    embed: embed_idx,
                    field: field_idx,
                },
                len(&field.value),
                MAX_FIELD_VALUE_LENGTH,
            );
        }
    }

    check(
        LimitTarget::EmbedTotal,
        document.embeds.iter().map(embed_length).sum(),
        MAX_TOTAL_EMBED_LENGTH,
    );

    warnings
}

impl Display for LimitTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitTarget::Content => write!(f, "Message content"),
            LimitTarget::EmbedTitle { embed } => write!(f, "Title of embed {}", embed + 1),
            LimitTarget::EmbedDescription { embed } => {
                write!(f, "Description of embed {}", embed + 1)
            }
            LimitTarget::FieldName { embed, field } => {
                write!(f, "Name of field {} in embed {}", field + 1, embed + 1)
            }
            LimitTarget::FieldValue { embed, field } => {
                write!(f, "Value of field {} in embed {}", field + 1, embed + 1)
            }
            LimitTarget::FooterText { embed } => write!(f, "Footer of embed {}", embed + 1),
            LimitTarget::AuthorName { embed } => write!(f, "Author of embed {}", embed + 1),
            LimitTarget::EmbedTotal => write!(f, "All embeds combined"),
        }
    }
}

impl Display for LimitWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has {} characters (max. {})",
            self.target, self.length, self.max
        )
    }
}
