use serde::{Deserialize, Serialize};

use crate::models::catalog::{Choice, MenuItem, MenuOption};

/// A chosen value for one option of a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Name of the [`MenuOption`] this choice belongs to.
    pub name: String,
    pub choice: Choice,
}

impl SelectedOption {
    pub fn new(option_name: &str, choice: Choice) -> Self {
        Self {
            name: option_name.to_string(),
            choice,
        }
    }
}

/// One purchasable entry in the cart.
///
/// Holds a snapshot of the menu item taken when the line was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub menu_item: MenuItem,
    pub quantity: u32,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl CartLine {
    /// Display string for the selected choices, e.g. `"Large, Extra cheese"`.
    pub fn options_summary(&self) -> String {
        self.selected_options
            .iter()
            .map(|o| o.choice.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Apply a user's click on `choice` of `option` to a selection list.
///
/// Single-select options replace any previous choice for the same option.
/// Multi-select options toggle the choice on or off.
pub fn toggle_choice(selected: &mut Vec<SelectedOption>, option: &MenuOption, choice: &Choice) {
    if !option.multiple {
        selected.retain(|s| s.name != option.name);
        selected.push(SelectedOption::new(&option.name, choice.clone()));
        return;
    }

    let before = selected.len();
    selected.retain(|s| !(s.name == option.name && s.choice.id == choice.id));
    if selected.len() == before {
        selected.push(SelectedOption::new(&option.name, choice.clone()));
    }
}

pub fn is_choice_selected(selected: &[SelectedOption], option_name: &str, choice_id: &str) -> bool {
    selected
        .iter()
        .any(|s| s.name == option_name && s.choice.id == choice_id)
}

/// Names of required options that have no selection yet.
pub fn missing_required_options<'a>(item: &'a MenuItem, selected: &[SelectedOption]) -> Vec<&'a str> {
    item.options
        .iter()
        .filter(|o| o.required)
        .filter(|o| !selected.iter().any(|s| s.name == o.name))
        .map(|o| o.name.as_str())
        .collect()
}
