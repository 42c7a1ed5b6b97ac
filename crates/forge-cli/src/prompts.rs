// embed-forge/forge-cli
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::Display;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use strum::IntoEnumIterator;

pub fn prompt_string(prompt: impl Into<String>, initial: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

/// Like `prompt_string`, but an empty answer yields `None`.
pub fn prompt_opt_string(prompt: impl Into<String>, initial: Option<&str>) -> Result<Option<String>> {
    let value = prompt_string(prompt, initial.unwrap_or_default())?;
    Ok(Some(value).filter(|value| !value.is_empty()))
}

pub fn prompt_bool(prompt: impl Into<String>, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Lets the user pick one of `items` and returns its index. `None` if there is nothing to
/// pick from or the selection was cancelled.
pub fn select_index<T: Display>(prompt: &str, items: &[T]) -> Result<Option<usize>> {
    if items.is_empty() {
        println!("Nothing to select.");
        return Ok(None);
    }
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()?;
    println!();
    Ok(selection)
}

pub fn select_variant<T>(prompt: &str) -> Result<Option<T>>
where
    T: IntoEnumIterator + Display + Clone,
{
    let options = T::iter().collect::<Vec<_>>();
    Ok(select_index(prompt, &options)?.map(|idx| options[idx].clone()))
}
