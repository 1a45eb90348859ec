//! Settings form state
//!
//! A draft copy of the configuration that the settings modal edits. Nothing
//! touches the live configuration until [`SettingsForm::save`].

use crate::catalog::{self, ANIMALS, DEFAULT_ANIMAL, FOOD_TYPES};
use crate::config::Configuration;
use crate::randomizer;
use rand::Rng;

/// Shown when the form is saved with no animal ticked
pub const NO_ANIMAL_NOTICE: &str = "PICK AT LEAST ONE ANIMAL!";

/// One line of the settings modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Animal(usize),
    Food,
    Random,
    Save,
}

/// Result of saving the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsResult {
    pub config: Configuration,
    /// One-time message for the player, if the selection had to be corrected
    pub notice: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct SettingsForm {
    /// One checkbox per catalog animal, in catalog order
    checked: Vec<bool>,
    food_index: usize,
    random: bool,
    cursor: usize,
}

impl SettingsForm {
    /// Fills the form from the current configuration
    pub fn from_config(config: &Configuration) -> Self {
        let checked = ANIMALS
            .iter()
            .map(|animal| config.active_animals.iter().any(|id| id == animal.id))
            .collect();
        let food_index = FOOD_TYPES
            .iter()
            .position(|food| food.id == config.food_type)
            .unwrap_or(0);

        SettingsForm {
            checked,
            food_index,
            random: config.is_random,
            cursor: 0,
        }
    }

    /// Every row, top to bottom
    pub fn rows() -> Vec<SettingsRow> {
        let mut rows: Vec<SettingsRow> = (0..ANIMALS.len()).map(SettingsRow::Animal).collect();
        rows.extend([SettingsRow::Food, SettingsRow::Random, SettingsRow::Save]);
        rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_row(&self) -> SettingsRow {
        let rows = Self::rows();
        rows[self.cursor.min(rows.len() - 1)]
    }

    /// Move selection up (wraps to bottom)
    pub fn select_previous(&mut self) {
        let count = Self::rows().len();
        self.cursor = if self.cursor == 0 { count - 1 } else { self.cursor - 1 };
    }

    /// Move selection down (wraps to top)
    pub fn select_next(&mut self) {
        self.cursor = (self.cursor + 1) % Self::rows().len();
    }

    pub fn select_row(&mut self, row: SettingsRow) {
        if let Some(index) = Self::rows().iter().position(|r| *r == row) {
            self.cursor = index;
        }
    }

    pub fn is_checked(&self, animal: usize) -> bool {
        self.checked.get(animal).copied().unwrap_or(false)
    }

    /// Animal checkboxes are greyed out while random mode is on
    pub fn animals_enabled(&self) -> bool {
        !self.random
    }

    pub fn is_random(&self) -> bool {
        self.random
    }

    pub fn food(&self) -> &'static catalog::FoodType {
        &FOOD_TYPES[self.food_index]
    }

    /// Flips an animal checkbox; ignored while random mode is on
    pub fn toggle_animal(&mut self, animal: usize) {
        if !self.animals_enabled() {
            return;
        }
        if let Some(checked) = self.checked.get_mut(animal) {
            *checked = !*checked;
        }
    }

    pub fn toggle_random(&mut self) {
        self.random = !self.random;
    }

    /// Steps through the food types; `forward == false` goes backwards
    pub fn cycle_food(&mut self, forward: bool) {
        let count = FOOD_TYPES.len();
        self.food_index = if forward {
            (self.food_index + 1) % count
        } else {
            (self.food_index + count - 1) % count
        };
    }

    /// Applies the selected row's action (toggle / cycle). Returns true
    /// when the row is `Save`, so the caller should save the form.
    pub fn activate_selected(&mut self) -> bool {
        match self.selected_row() {
            SettingsRow::Animal(index) => self.toggle_animal(index),
            SettingsRow::Food => self.cycle_food(true),
            SettingsRow::Random => self.toggle_random(),
            SettingsRow::Save => return true,
        }
        false
    }

    /// Builds the configuration this form describes
    ///
    /// Random mode replaces the ticked animals with a fresh draw. Otherwise
    /// an empty selection becomes the default animal plus a notice.
    pub fn save<R: Rng + ?Sized>(&self, rng: &mut R) -> SettingsResult {
        let mut config = Configuration {
            active_animals: ANIMALS
                .iter()
                .zip(&self.checked)
                .filter(|(_, checked)| **checked)
                .map(|(animal, _)| animal.id.to_string())
                .collect(),
            is_random: self.random,
            food_type: self.food().id.to_string(),
        };

        let mut notice = None;
        if config.is_random {
            randomizer::apply_random_config(&mut config, rng);
        } else if config.active_animals.is_empty() {
            config.active_animals = vec![DEFAULT_ANIMAL.to_string()];
            notice = Some(NO_ANIMAL_NOTICE);
        }

        SettingsResult { config, notice }
    }
}
