// embed-forge/forge-cli
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use strum_macros::{Display, EnumIter};
use tracing::{error, info};

use forge_core::app::dtos::{
    ButtonStyle, ButtonUpdate, Document, EmbedAuthor, EmbedFooter, EmbedMedia, EmbedUpdate,
    FieldUpdate, MoveDirection,
};
use forge_core::domain::message::limits::calculate_message_length;
use forge_core::{AppDependencies, AttachmentLoader, MessageService, PreviewService};

use crate::config::load_config;
use crate::logging::enable_logging;
use crate::prompts::{
    prompt_bool, prompt_opt_string, prompt_string, select_index, select_variant,
};

mod config;
mod logging;
mod prompts;

#[derive(Debug, Clone, Copy, Display, EnumIter)]
enum Selection {
    #[strum(serialize = "Show preview")]
    ShowPreview,
    #[strum(serialize = "Show JSON")]
    ShowJson,
    #[strum(serialize = "Edit content")]
    EditContent,
    #[strum(serialize = "Add embed")]
    AddEmbed,
    #[strum(serialize = "Edit embed")]
    EditEmbed,
    #[strum(serialize = "Move embed")]
    MoveEmbed,
    #[strum(serialize = "Remove embed")]
    RemoveEmbed,
    #[strum(serialize = "Add field")]
    AddField,
    #[strum(serialize = "Edit field")]
    EditField,
    #[strum(serialize = "Remove field")]
    RemoveField,
    #[strum(serialize = "Add attachment")]
    AddAttachment,
    #[strum(serialize = "Remove attachment")]
    RemoveAttachment,
    #[strum(serialize = "Add action row")]
    AddActionRow,
    #[strum(serialize = "Add button")]
    AddButton,
    #[strum(serialize = "Edit button")]
    EditButton,
    #[strum(serialize = "Remove button")]
    RemoveButton,
    #[strum(serialize = "Import JSON")]
    ImportJson,
    #[strum(serialize = "Export JSON")]
    ExportJson,
    Reset,
    Exit,
}

#[derive(Debug, Clone, Copy, Display, EnumIter)]
enum EmbedProperty {
    Title,
    Description,
    #[strum(serialize = "URL")]
    Url,
    Color,
    Timestamp,
    Author,
    Footer,
    Image,
    Thumbnail,
}

#[derive(Debug, Clone, Copy, Display, EnumIter)]
enum FieldProperty {
    Name,
    Value,
    Inline,
}

#[derive(Debug, Clone, Copy, Display, EnumIter)]
enum ButtonProperty {
    Label,
    Style,
    #[strum(serialize = "Custom id")]
    CustomId,
    #[strum(serialize = "URL")]
    Url,
    Disabled,
}

struct App {
    messages: MessageService,
    previews: PreviewService,
    attachments: AttachmentLoader,
}

impl From<&AppDependencies> for App {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            messages: MessageService::from(deps),
            previews: PreviewService::from(deps),
            attachments: AttachmentLoader::from(deps),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let work_dir = env::current_dir()?;
    enable_logging(&work_dir.join("logs"))?;

    let config = load_config()?;
    info!("Starting with {:?}", config);

    let app = App::from(&AppDependencies::new(config));

    let subscription = app.messages.subscribe(|document| {
        println!(
            "Document changed, {} characters.",
            calculate_message_length(document)
        );
    });

    loop {
        println!();

        let Some(selection) = select_variant::<Selection>("What do you want to do?")? else {
            continue;
        };
        if let Selection::Exit = selection {
            break;
        }
        if let Err(err) = app.run(selection).await {
            error!("{} failed: {:?}", selection, err);
            println!("{} failed: {:#}", selection, err);
        }
    }

    subscription.unsubscribe();
    Ok(())
}

impl App {
    async fn run(&self, selection: Selection) -> Result<()> {
        let applied = match selection {
            Selection::ShowPreview => {
                println!("{}", self.previews.preview_html(&self.messages.document()));
                for warning in self.messages.limit_warnings() {
                    println!("⚠ {}", warning);
                }
                return Ok(());
            }
            Selection::ShowJson => {
                println!("{}", self.messages.export_json()?);
                return Ok(());
            }
            Selection::EditContent => {
                let content = prompt_string("Content", &self.messages.document().content)?;
                println!("{}", self.previews.preview_markdown(&content));
                self.messages.set_content(content)
            }
            Selection::AddEmbed => self.messages.add_embed(),
            Selection::EditEmbed => self.edit_embed()?,
            Selection::MoveEmbed => {
                let Some(index) = self.select_embed()? else {
                    return Ok(());
                };
                let Some(direction) = select_variant::<MoveDirection>("Direction")? else {
                    return Ok(());
                };
                self.messages.move_embed(index, direction)
            }
            Selection::RemoveEmbed => match self.select_embed()? {
                Some(index) => self.messages.remove_embed(index),
                None => return Ok(()),
            },
            Selection::AddField => match self.select_embed()? {
                Some(index) => self.messages.add_field(index),
                None => return Ok(()),
            },
            Selection::EditField => self.edit_field()?,
            Selection::RemoveField => match self.select_field()? {
                Some((embed, field)) => self.messages.remove_field(embed, field),
                None => return Ok(()),
            },
            Selection::AddAttachment => {
                let path = PathBuf::from(prompt_string("Path of the file", "")?);
                let attachment = self.attachments.load(&path).await?;
                self.messages.add_attachment(attachment)
            }
            Selection::RemoveAttachment => {
                let filenames = self
                    .messages
                    .document()
                    .attachments
                    .iter()
                    .map(|attachment| attachment.filename.clone())
                    .collect::<Vec<_>>();
                match select_index("Select an attachment", &filenames)? {
                    Some(index) => self.messages.remove_attachment(index),
                    None => return Ok(()),
                }
            }
            Selection::AddActionRow => self.messages.add_action_row(),
            Selection::AddButton => match self.select_row()? {
                Some(index) => self.messages.add_button(index),
                None => return Ok(()),
            },
            Selection::EditButton => self.edit_button()?,
            Selection::RemoveButton => match self.select_button()? {
                Some((row, button)) => self.messages.remove_button(row, button),
                None => return Ok(()),
            },
            Selection::ImportJson => {
                let path = PathBuf::from(prompt_string("Path of the JSON file", "")?);
                let document = Document::from_json(&fs::read_to_string(&path)?)?;
                self.messages.replace_document(document);
                true
            }
            Selection::ExportJson => {
                let path = PathBuf::from(prompt_string("Save to", "message.json")?);
                fs::write(&path, self.messages.export_json()?)?;
                println!("Saved to {}.", path.display());
                return Ok(());
            }
            Selection::Reset => {
                if prompt_bool("Discard all changes?", false)? {
                    self.messages.reset();
                }
                return Ok(());
            }
            Selection::Exit => return Ok(()),
        };

        if !applied {
            println!("Nothing changed.");
        }
        Ok(())
    }

    fn edit_embed(&self) -> Result<bool> {
        let Some(index) = self.select_embed()? else {
            return Ok(false);
        };
        let Some(property) = select_variant::<EmbedProperty>("Property")? else {
            return Ok(false);
        };

        let document = self.messages.document();
        let embed = &document.embeds[index];

        let update = match property {
            EmbedProperty::Title => {
                EmbedUpdate::Title(prompt_opt_string("Title", embed.title.as_deref())?)
            }
            EmbedProperty::Description => EmbedUpdate::Description(prompt_opt_string(
                "Description",
                embed.description.as_deref(),
            )?),
            EmbedProperty::Url => {
                EmbedUpdate::Url(prompt_opt_string("URL", embed.url.as_deref())?)
            }
            EmbedProperty::Color => {
                let color = prompt_string("Color (#rrggbb)", "")?;
                return Ok(self.messages.set_embed_color(index, &color));
            }
            EmbedProperty::Timestamp => EmbedUpdate::Timestamp(prompt_opt_string(
                "Timestamp (RFC 3339)",
                embed.timestamp.as_deref(),
            )?),
            EmbedProperty::Author => {
                let author = embed.author.clone().unwrap_or_default();
                EmbedUpdate::Author(
                    prompt_opt_string("Author name", Some(&author.name))?.map(|name| {
                        EmbedAuthor { name, ..author }
                    }),
                )
            }
            EmbedProperty::Footer => {
                let footer = embed.footer.clone().unwrap_or_default();
                EmbedUpdate::Footer(
                    prompt_opt_string("Footer text", Some(&footer.text))?.map(|text| {
                        EmbedFooter { text, ..footer }
                    }),
                )
            }
            EmbedProperty::Image => EmbedUpdate::Image(
                prompt_opt_string(
                    "Image URL",
                    embed.image.as_ref().map(|image| image.url.as_str()),
                )?
                .map(EmbedMedia::new),
            ),
            EmbedProperty::Thumbnail => EmbedUpdate::Thumbnail(
                prompt_opt_string(
                    "Thumbnail URL",
                    embed.thumbnail.as_ref().map(|thumbnail| thumbnail.url.as_str()),
                )?
                .map(EmbedMedia::new),
            ),
        };

        Ok(self.messages.update_embed(index, update))
    }

    fn edit_field(&self) -> Result<bool> {
        let Some((embed_index, field_index)) = self.select_field()? else {
            return Ok(false);
        };
        let Some(property) = select_variant::<FieldProperty>("Property")? else {
            return Ok(false);
        };

        let document = self.messages.document();
        let field = &document.embeds[embed_index].fields[field_index];

        let update = match property {
            FieldProperty::Name => FieldUpdate::Name(prompt_string("Name", &field.name)?),
            FieldProperty::Value => {
                let value = prompt_string("Value", &field.value)?;
                println!("{}", self.previews.preview_markdown(&value));
                FieldUpdate::Value(value)
            }
            FieldProperty::Inline => FieldUpdate::Inline(prompt_bool("Inline?", field.inline)?),
        };

        Ok(self
            .messages
            .update_field(embed_index, field_index, update))
    }

    fn edit_button(&self) -> Result<bool> {
        let Some((row_index, button_index)) = self.select_button()? else {
            return Ok(false);
        };
        let Some(property) = select_variant::<ButtonProperty>("Property")? else {
            return Ok(false);
        };

        let document = self.messages.document();
        let button = &document.components[row_index].buttons[button_index];

        let update = match property {
            ButtonProperty::Label => {
                ButtonUpdate::Label(prompt_opt_string("Label", button.label.as_deref())?)
            }
            ButtonProperty::Style => {
                let Some(style) = select_variant::<ButtonStyle>("Style")? else {
                    return Ok(false);
                };
                ButtonUpdate::Style(style)
            }
            ButtonProperty::CustomId => ButtonUpdate::CustomId(prompt_string(
                "Custom id",
                button.custom_id().unwrap_or_default(),
            )?),
            ButtonProperty::Url => {
                ButtonUpdate::Url(prompt_string("URL", button.url().unwrap_or_default())?)
            }
            ButtonProperty::Disabled => {
                ButtonUpdate::Disabled(prompt_bool("Disabled?", button.disabled)?)
            }
        };

        Ok(self
            .messages
            .update_button(row_index, button_index, update))
    }

    fn select_embed(&self) -> Result<Option<usize>> {
        let titles = self
            .messages
            .document()
            .embeds
            .iter()
            .enumerate()
            .map(|(idx, embed)| {
                format!(
                    "{}. {}",
                    idx + 1,
                    embed.title.as_deref().unwrap_or("(untitled)")
                )
            })
            .collect::<Vec<_>>();
        select_index("Select an embed", &titles)
    }

    fn select_field(&self) -> Result<Option<(usize, usize)>> {
        let Some(embed_index) = self.select_embed()? else {
            return Ok(None);
        };
        let names = self.messages.document().embeds[embed_index]
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| format!("{}. {}", idx + 1, field.name))
            .collect::<Vec<_>>();
        Ok(select_index("Select a field", &names)?.map(|field_index| (embed_index, field_index)))
    }

    fn select_row(&self) -> Result<Option<usize>> {
        let rows = self
            .messages
            .document()
            .components
            .iter()
            .enumerate()
            .map(|(idx, row)| format!("Row {} ({} buttons)", idx + 1, row.buttons.len()))
            .collect::<Vec<_>>();
        select_index("Select a row", &rows)
    }

    fn select_button(&self) -> Result<Option<(usize, usize)>> {
        let Some(row_index) = self.select_row()? else {
            return Ok(None);
        };
        let labels = self.messages.document().components[row_index]
            .buttons
            .iter()
            .map(|button| format!("{} [{}]", button.display_label(), button.style))
            .collect::<Vec<_>>();
        Ok(select_index("Select a button", &labels)?.map(|button_index| (row_index, button_index)))
    }
}
