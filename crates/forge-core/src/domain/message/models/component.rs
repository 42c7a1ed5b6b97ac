// embed-forge/forge-core
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ComponentType {
    ActionRow,
    Button,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Unknown component type {0}")]
pub struct UnknownComponentType(pub u8);

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Link,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Unknown button style {0}")]
pub struct UnknownButtonStyle(pub u8);

/// A row of up to five buttons. Serialized as `{"type":1,"components":[…]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub r#type: ComponentType,
    #[serde(rename = "components", default)]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub r#type: ComponentType,
    pub style: ButtonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub action: ButtonAction,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// A button either opens a URL or sends an interaction carrying its `custom_id`, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ButtonAction {
    Link { url: String },
    Interactive { custom_id: String },
}

impl Default for ActionRow {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl ActionRow {
    pub fn new(buttons: Vec<Button>) -> Self {
        Self {
            r#type: ComponentType::ActionRow,
            buttons,
        }
    }

    /// The row a new document starts with.
    pub fn example() -> Self {
        Self::new(vec![Button::interactive(
            ButtonStyle::Primary,
            "Click me!",
            "example_button",
        )])
    }
}

impl Button {
    pub fn interactive(
        style: ButtonStyle,
        label: impl Into<String>,
        custom_id: impl Into<String>,
    ) -> Self {
        Self {
            r#type: ComponentType::Button,
            style,
            label: Some(label.into()),
            action: ButtonAction::Interactive {
                custom_id: custom_id.into(),
            },
            disabled: false,
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            r#type: ComponentType::Button,
            style: ButtonStyle::Link,
            label: Some(label.into()),
            action: ButtonAction::Link { url: url.into() },
            disabled: false,
        }
    }

    pub fn custom_id(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Interactive { custom_id } => Some(custom_id),
            ButtonAction::Link { .. } => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Link { url } => Some(url),
            ButtonAction::Interactive { .. } => None,
        }
    }

    pub fn is_link(&self) -> bool {
        self.style == ButtonStyle::Link
    }

    /// The text shown on the button. Falls back to "Link" for link buttons and to the
    /// `custom_id` for everything else.
    pub fn display_label(&self) -> String {
        if let Some(label) = self.label.as_ref().filter(|label| !label.is_empty()) {
            return label.clone();
        }
        match &self.action {
            ButtonAction::Link { .. } => "Link".to_string(),
            ButtonAction::Interactive { custom_id } => custom_id.clone(),
        }
    }
}

impl From<ComponentType> for u8 {
    fn from(value: ComponentType) -> Self {
        match value {
            ComponentType::ActionRow => 1,
            ComponentType::Button => 2,
        }
    }
}

impl TryFrom<u8> for ComponentType {
    type Error = UnknownComponentType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ComponentType::ActionRow),
            2 => Ok(ComponentType::Button),
            _ => Err(UnknownComponentType(value)),
        }
    }
}

impl From<ButtonStyle> for u8 {
    fn from(value: ButtonStyle) -> Self {
        match value {
            ButtonStyle::Primary => 1,
            ButtonStyle::Secondary => 2,
            ButtonStyle::Success => 3,
            ButtonStyle::Danger => 4,
            ButtonStyle::Link => 5,
        }
    }
}

impl TryFrom<u8> for ButtonStyle {
    type Error = UnknownButtonStyle;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ButtonStyle::Primary),
            2 => Ok(ButtonStyle::Secondary),
            3 => Ok(ButtonStyle::Success),
            4 => Ok(ButtonStyle::Danger),
            5 => Ok(ButtonStyle::Link),
            _ => Err(UnknownButtonStyle(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_serializes_payload_shape() {
        let row = ActionRow::new(vec![
            Button::interactive(ButtonStyle::Danger, "Delete", "delete"),
            Button::link("Docs", "https://example.com"),
        ]);

        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "type": 1,
                "components": [
                    { "type": 2, "style": 4, "label": "Delete", "custom_id": "delete" },
                    { "type": 2, "style": 5, "label": "Docs", "url": "https://example.com" }
                ]
            })
        );
    }

    #[test]
    fn test_deserializes_payload() {
        let button: Button = serde_json::from_value(json!({
            "type": 2, "style": 2, "custom_id": "x", "disabled": true
        }))
        .unwrap();

        assert_eq!(button.style, ButtonStyle::Secondary);
        assert_eq!(button.custom_id(), Some("x"));
        assert!(button.disabled);
        assert_eq!(button.display_label(), "x");
    }

    #[test]
    fn test_rejects_unknown_styles() {
        let result = serde_json::from_value::<Button>(json!({
            "type": 2, "style": 9, "custom_id": "x"
        }));
        assert!(result.is_err());
        assert_eq!(ButtonStyle::try_from(0), Err(UnknownButtonStyle(0)));
    }

    #[test]
    fn test_style_numbers() {
        let numbers = ButtonStyle::iter().map(u8::from).collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

        for style in ButtonStyle::iter() {
            assert_eq!(ButtonStyle::try_from(u8::from(style)), Ok(style));
        }
    }

    #[test]
    fn test_display_label() {
        let mut link = Button::link("", "https://example.com");
        assert_eq!(link.display_label(), "Link");
        link.label = Some("Open".to_string());
        assert_eq!(link.display_label(), "Open");
    }
}
