use dialoguer::{Confirm, Input, MultiSelect, Password, Select};

use crate::error::{Result, StoreError};
use crate::models::cart::{missing_required_options, toggle_choice};
use crate::models::{DeliveryDetails, MenuItem, MenuOption, SelectedOption, User, UserUpdate};
use crate::pricing::{format_price, Tip, DEFAULT_TIP_PERCENT, TIP_PRESETS};

fn choice_label(name: &str, price: f64) -> String {
    if price > 0.0 {
        format!("{} (+{})", name, format_price(price))
    } else {
        name.to_string()
    }
}

/// Ask for the choices of one option, updating `selected`.
fn prompt_option(option: &MenuOption, selected: &mut Vec<SelectedOption>) -> Result<()> {
    let labels: Vec<String> = option
        .choices
        .iter()
        .map(|c| choice_label(&c.name, c.price))
        .collect();
    let suffix = if option.required { " (required)" } else { "" };

    if option.multiple {
        let picked = MultiSelect::new()
            .with_prompt(format!("{}{}", option.name, suffix))
            .items(&labels)
            .interact()?;

        for idx in picked {
            toggle_choice(selected, option, &option.choices[idx]);
        }
        return Ok(());
    }

    let mut items = labels;
    if !option.required {
        items.push("No thanks".to_string());
    }

    let idx = Select::new()
        .with_prompt(format!("{}{}", option.name, suffix))
        .items(&items)
        .default(0)
        .interact()?;

    if let Some(choice) = option.choices.get(idx) {
        toggle_choice(selected, option, choice);
    }
    Ok(())
}

/// Walk through every option of `item` until all required ones are answered.
pub fn prompt_item_options(item: &MenuItem) -> Result<Vec<SelectedOption>> {
    let mut selected = Vec::new();
    for option in &item.options {
        prompt_option(option, &mut selected)?;
    }

    loop {
        let missing: Vec<String> = missing_required_options(item, &selected)
            .into_iter()
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            return Ok(selected);
        }

        println!("Please select all required options: {}", missing.join(", "));
        for name in &missing {
            if let Some(option) = item.option(name) {
                prompt_option(option, &mut selected)?;
            }
        }
    }
}

/// Ask for a tip: one of the presets or a custom amount.
pub fn prompt_tip(subtotal: f64) -> Result<Tip> {
    let mut items: Vec<String> = TIP_PRESETS
        .iter()
        .map(|p| {
            format!(
                "{:.0}% ({})",
                p,
                format_price(Tip::Percent(*p).amount(subtotal))
            )
        })
        .collect();
    items.push("Custom".to_string());

    let default = TIP_PRESETS
        .iter()
        .position(|p| *p == DEFAULT_TIP_PERCENT)
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Add a tip for your delivery partner")
        .items(&items)
        .default(default)
        .interact()?;

    match TIP_PRESETS.get(idx) {
        Some(percent) => Ok(Tip::Percent(*percent)),
        None => {
            let input: String = Input::new()
                .with_prompt("Tip amount")
                .default("0".to_string())
                .interact_text()?;
            Ok(Tip::custom(&input))
        }
    }
}

fn prompt_text(label: &str, default: &str) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(label);
    if !default.is_empty() {
        input = input.default(default.to_string());
    }
    let value = input.interact_text()?;

    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(StoreError::InvalidInput(format!("{} is required", label)));
    }
    Ok(value)
}

/// Confirm or edit the delivery details, prefilled from `defaults`.
pub fn prompt_delivery_details(defaults: &DeliveryDetails) -> Result<DeliveryDetails> {
    let name = prompt_text("Full name", &defaults.name)?;
    let phone = prompt_text("Phone number", &defaults.phone)?;
    let address = prompt_text("Delivery address", &defaults.address)?;
    let note: String = Input::new()
        .with_prompt("Delivery instructions (optional)")
        .allow_empty(true)
        .interact_text()?;

    Ok(DeliveryDetails {
        name,
        phone,
        address,
        special_instructions: Some(note.trim().to_string()).filter(|n| !n.is_empty()),
    })
}

pub fn prompt_password() -> Result<String> {
    Ok(Password::new().with_prompt("Password").interact()?)
}

/// Collect name, email, and password for a new account.
pub fn prompt_registration() -> Result<(String, String, String)> {
    let name = prompt_text("Name", "")?;
    let email = prompt_text("Email", "")?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    Ok((name, email, password))
}

/// Edit the profile fields, prefilled from the current user.
///
/// Only fields that changed end up in the update.
pub fn prompt_profile(user: &User) -> Result<UserUpdate> {
    let changed = |old: &str, new: String| Some(new).filter(|n| n != old);

    let name = prompt_text("Name", &user.name)?;
    let email = prompt_text("Email", &user.email)?;
    let phone: String = Input::new()
        .with_prompt("Phone number")
        .with_initial_text(user.phone.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let address: String = Input::new()
        .with_prompt("Address")
        .with_initial_text(user.address.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    Ok(UserUpdate {
        name: changed(&user.name, name),
        email: changed(&user.email, email),
        phone: changed(user.phone.as_deref().unwrap_or(""), phone.trim().to_string()),
        address: changed(user.address.as_deref().unwrap_or(""), address.trim().to_string()),
    })
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
