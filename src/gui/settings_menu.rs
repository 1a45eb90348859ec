//! Settings Menu Component
//!
//! Draws a [`SettingsForm`] as a modal list: one checkbox per animal, the
//! food selector, the random toggle and SAVE. The animal rows are greyed out
//! while random mode is on.

use super::menu::{draw_modal, MenuStyle};
use crate::catalog::ANIMALS;
use crate::game::layout::{settings_panel, settings_row};
use crate::settings::{SettingsForm, SettingsRow};
use crate::text::{draw_text, draw_text_centered, text_height};
use sdl2::render::Canvas;
use sdl2::video::Window;

const TEXT_SCALE: u32 = 2;

pub struct SettingsMenu {
    style: MenuStyle,
}

impl SettingsMenu {
    pub fn new() -> Self {
        SettingsMenu {
            style: MenuStyle::default(),
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, form: &SettingsForm) -> Result<(), String> {
        draw_modal(canvas, settings_panel(), "SETTINGS", &self.style)?;

        for (index, row) in SettingsForm::rows().into_iter().enumerate() {
            let bounds = settings_row(index);
            let selected = index == form.cursor();

            if selected {
                canvas.set_draw_color(self.style.highlight_color);
                canvas.fill_rect(bounds)?;
            }

            let color = if selected {
                self.style.selected_item_color
            } else if !row_enabled(form, row) {
                self.style.disabled_item_color
            } else {
                self.style.item_color
            };

            let label = row_label(form, row);
            if row == SettingsRow::Save {
                draw_text_centered(canvas, &label, bounds.center(), color, TEXT_SCALE)?;
            } else {
                let y = bounds.center().y() - text_height(TEXT_SCALE) as i32 / 2;
                draw_text(canvas, &label, bounds.x() + 8, y, color, TEXT_SCALE)?;
            }
        }
        Ok(())
    }
}

impl Default for SettingsMenu {
    fn default() -> Self {
        Self::new()
    }
}

fn row_enabled(form: &SettingsForm, row: SettingsRow) -> bool {
    match row {
        SettingsRow::Animal(_) => form.animals_enabled(),
        _ => true,
    }
}

/// Text for one settings row
fn row_label(form: &SettingsForm, row: SettingsRow) -> String {
    let checkbox = |on: bool| if on { "[X]" } else { "[ ]" };
    match row {
        SettingsRow::Animal(index) => {
            let name = ANIMALS.get(index).map_or("?", |animal| animal.name);
            format!("{} {}", checkbox(form.is_checked(index)), name)
        }
        SettingsRow::Food => format!("FOOD: < {} >", form.food().name),
        SettingsRow::Random => format!("{} RANDOM ANIMALS", checkbox(form.is_random())),
        SettingsRow::Save => "SAVE".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;

    #[test]
    fn test_row_labels() {
        let mut form = SettingsForm::from_config(&Configuration::default());
        assert_eq!(row_label(&form, SettingsRow::Animal(0)), "[X] BEAR");
        assert_eq!(row_label(&form, SettingsRow::Animal(4)), "[ ] PANDA");
        assert_eq!(row_label(&form, SettingsRow::Food), "FOOD: < DONUT >");
        assert_eq!(row_label(&form, SettingsRow::Random), "[ ] RANDOM ANIMALS");

        form.toggle_random();
        assert_eq!(row_label(&form, SettingsRow::Random), "[X] RANDOM ANIMALS");
    }

    #[test]
    fn test_animal_rows_disabled_in_random_mode() {
        let mut form = SettingsForm::from_config(&Configuration::default());
        assert!(row_enabled(&form, SettingsRow::Animal(1)));
        form.toggle_random();
        assert!(!row_enabled(&form, SettingsRow::Animal(1)));
        assert!(row_enabled(&form, SettingsRow::Save));
    }
}
