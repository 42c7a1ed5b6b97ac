// embed-forge/forge-markup
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::entity::InlineEntity;
use crate::node::{RenderNode, Tag};
use crate::timestamp::{instant_from_unix_seconds, TimestampStyle};

static CUSTOM_EMOJI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(a?):([^:<>\s]+):(\d+)>").expect("Invalid emoji pattern"));
static ROLE_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<@&(\d+)>").expect("Invalid role mention pattern"));
static CHANNEL_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<#(\d+)>").expect("Invalid channel mention pattern"));
static USER_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(?:@!?)?(\d+)>").expect("Invalid user mention pattern"));
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<t:(\d+)(?::([tTdDfFR]))?>").expect("Invalid timestamp pattern")
});
static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s<]*[^\s<.,:;"')\]!?]"#).expect("Invalid URL pattern")
});

/// Maps a match to a node. `offset` is the byte offset of the match in the scanned input.
/// Returning `None` rejects the match and leaves its text untouched.
pub type NodeGenerator = dyn Fn(&Captures<'_>, usize) -> Option<RenderNode> + Send + Sync;

/// A match-and-replace rule applied by the `EntityScanner`.
#[derive(Clone)]
pub struct EntityPattern {
    name: &'static str,
    regex: Regex,
    generator: Arc<NodeGenerator>,
}

impl EntityPattern {
    pub fn new(
        name: &'static str,
        regex: Regex,
        generator: impl Fn(&Captures<'_>, usize) -> Option<RenderNode> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            regex,
            generator: Arc::new(generator),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn generate(&self, captures: &Captures<'_>, offset: usize) -> Option<RenderNode> {
        (self.generator)(captures, offset)
    }
}

impl Debug for EntityPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityPattern")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

impl EntityPattern {
    pub fn custom_emoji() -> Self {
        Self::new("custom_emoji", CUSTOM_EMOJI.clone(), |captures, _| {
            Some(RenderNode::entity(InlineEntity::CustomEmoji {
                name: captures[2].to_string(),
                id: captures[3].into(),
                animated: !captures[1].is_empty(),
            }))
        })
    }

    pub fn role_mention() -> Self {
        Self::new("role_mention", ROLE_MENTION.clone(), |captures, _| {
            Some(RenderNode::entity(InlineEntity::RoleMention {
                id: captures[1].into(),
            }))
        })
    }

    pub fn channel_mention() -> Self {
        Self::new("channel_mention", CHANNEL_MENTION.clone(), |captures, _| {
            Some(RenderNode::entity(InlineEntity::ChannelMention {
                id: captures[1].into(),
            }))
        })
    }

    /// Matches `<@id>`, `<@!id>` and the bare `<id>` form. Must run after the role and channel
    /// patterns.
    pub fn user_mention() -> Self {
        Self::new("user_mention", USER_MENTION.clone(), |captures, _| {
            Some(RenderNode::entity(InlineEntity::UserMention {
                id: captures[1].into(),
            }))
        })
    }

    pub fn timestamp() -> Self {
        Self::new("timestamp", TIMESTAMP.clone(), |captures, _| {
            let unix_seconds = captures[1].parse::<i64>().ok()?;
            instant_from_unix_seconds(unix_seconds)?;

            let style = match captures.get(2) {
                Some(code) => code.as_str().parse().ok()?,
                None => TimestampStyle::default(),
            };

            Some(RenderNode::entity(InlineEntity::Timestamp {
                unix_seconds,
                style,
            }))
        })
    }

    /// Turns bare `http(s)://` URLs into links.
    pub fn autolink() -> Self {
        Self::new("autolink", BARE_URL.clone(), |captures, _| {
            let url = captures[0].to_string();
            Some(RenderNode::element(
                Tag::Link { url: url.clone() },
                vec![RenderNode::text(url)],
            ))
        })
    }

    /// The entity patterns in the order they're applied.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::custom_emoji(),
            Self::role_mention(),
            Self::channel_mention(),
            Self::user_mention(),
            Self::timestamp(),
        ]
    }
}
