// Input handling and event processing
//
// Routes GameActions from the InputSystem to the SceneController. Both drag
// paths end in the same handle_drop() call.

use super::layout;
use super::SceneController;
use crate::audio::AudioAdapter;
use crate::config::KeyValueStore;
use crate::input_system::GameAction;
use crate::settings::{SettingsForm, SettingsRow};
use rand::Rng;
use sdl2::rect::Point;
use std::time::Instant;

/// Whether the game loop should keep running after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

impl<S: KeyValueStore, A: AudioAdapter, R: Rng> SceneController<S, A, R> {
    /// Applies one input action
    pub fn handle_action(&mut self, action: GameAction, now: Instant) -> LoopControl {
        match action {
            GameAction::Quit => return LoopControl::Quit,

            GameAction::PointerDown(x, y) => {
                if !self.press_button(x, y) {
                    self.interaction.pointer_down(&mut self.scene, Point::new(x, y));
                }
            }
            GameAction::PointerMove(x, y) => {
                self.interaction.pointer_move(&mut self.scene, Point::new(x, y));
            }
            GameAction::PointerUp(x, y) => {
                if let Some(request) = self.interaction.pointer_up(&mut self.scene, Point::new(x, y)) {
                    self.handle_drop(request, now);
                }
            }

            GameAction::TouchStart(finger, x, y) => {
                if !self.press_button(x, y) {
                    self.interaction.touch_start(&mut self.scene, finger, Point::new(x, y));
                }
            }
            GameAction::TouchMove(finger, x, y) => {
                self.interaction.touch_move(&mut self.scene, finger, Point::new(x, y));
            }
            GameAction::TouchEnd(finger, x, y) => {
                if let Some(request) = self.interaction.touch_end(&mut self.scene, finger, Point::new(x, y)) {
                    self.handle_drop(request, now);
                }
            }

            GameAction::Reset => self.reset(),
            GameAction::OpenSettings => self.open_settings(),

            GameAction::MenuUp => self.with_form(|form| form.select_previous()),
            GameAction::MenuDown => self.with_form(|form| form.select_next()),
            GameAction::MenuLeft => self.with_form(|form| {
                if form.selected_row() == SettingsRow::Food {
                    form.cycle_food(false);
                }
            }),
            GameAction::MenuRight => self.with_form(|form| {
                if form.selected_row() == SettingsRow::Food {
                    form.cycle_food(true);
                }
            }),
            GameAction::MenuConfirm => self.activate_settings_row(),
            GameAction::MenuClick(x, y) => {
                if let Some(index) = layout::settings_row_at(x, y) {
                    self.with_form(|form| form.select_row(SettingsForm::rows()[index]));
                    self.activate_settings_row();
                }
            }
            GameAction::CloseSettings => self.cancel_settings(),

            GameAction::DismissNotice => self.dismiss_notice(),
        }
        LoopControl::Continue
    }

    /// On-screen buttons; returns true when one was hit
    fn press_button(&mut self, x: i32, y: i32) -> bool {
        if layout::reset_button().contains_point((x, y)) {
            self.reset();
            true
        } else if layout::settings_button().contains_point((x, y)) {
            self.open_settings();
            true
        } else {
            false
        }
    }

    fn activate_settings_row(&mut self) {
        let save = self
            .settings
            .as_mut()
            .is_some_and(|form| form.activate_selected());
        if save {
            self.save_settings();
        }
    }

    fn with_form(&mut self, edit: impl FnOnce(&mut SettingsForm)) {
        if let Some(form) = self.settings.as_mut() {
            edit(form);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::config::{ConfigStore, MemoryStore, STORAGE_KEY};
    use crate::input_system::{InputContext, InputSystem};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn controller(json: &str) -> SceneController<MemoryStore, RecordingAudio, ChaCha8Rng> {
        let mut controller = SceneController::new(
            ConfigStore::new(MemoryStore::with_entry(STORAGE_KEY, json)),
            RecordingAudio::default(),
            ChaCha8Rng::seed_from_u64(3),
        );
        controller.load();
        controller
    }

    #[test]
    fn test_mouse_drag_feeds() {
        let mut game = controller(r#"{"activeAnimals":["bear","cat"]}"#);
        let now = Instant::now();
        let item = game.scene().items[0].home.center();
        let target = game.scene().targets[1].bounds.center();

        game.handle_action(GameAction::PointerDown(item.x(), item.y()), now);
        game.handle_action(GameAction::PointerMove(target.x(), target.y()), now);
        assert!(game.scene().targets[1].drop_candidate);
        game.handle_action(GameAction::PointerUp(target.x(), target.y()), now);

        assert!(game.scene().items[0].consumed);
        assert!(game.scene().targets[1].is_fed());
        assert_eq!(game.audio().cues, vec!["cat"]);
    }

    #[test]
    fn test_touch_drag_feeds() {
        let mut game = controller(r#"{"activeAnimals":["bear","cat"]}"#);
        let now = Instant::now();
        let item = game.scene().items[1].home.center();
        let target = game.scene().targets[0].bounds.center();

        game.handle_action(GameAction::TouchStart(1, item.x(), item.y()), now);
        game.handle_action(GameAction::TouchMove(1, target.x(), target.y()), now);
        game.handle_action(GameAction::TouchEnd(1, target.x(), target.y()), now);

        assert!(game.scene().items[1].consumed);
        assert!(game.scene().targets[0].is_fed());
        assert_eq!(game.audio().cues, vec!["bear"]);
    }

    #[test]
    fn test_second_finger_cannot_take_over_a_drag() {
        let mut game = controller(r#"{"activeAnimals":["bear","cat"]}"#);
        let now = Instant::now();
        let first = game.scene().items[0].home.center();
        let second = game.scene().items[1].home.center();
        let target = game.scene().targets[1].bounds.center();

        game.handle_action(GameAction::TouchStart(1, first.x(), first.y()), now);
        game.handle_action(GameAction::TouchMove(1, first.x() + 40, first.y() - 120), now);
        game.handle_action(GameAction::TouchStart(2, second.x(), second.y()), now);
        game.handle_action(GameAction::TouchEnd(2, second.x(), second.y()), now);
        assert_eq!(game.scene().items[0].touch_offset, Some((40, -120)));
        assert_eq!(game.scene().items[1].touch_offset, None);

        game.handle_action(GameAction::TouchEnd(1, target.x(), target.y()), now);
        assert!(game.scene().items[0].consumed);
        assert!(!game.scene().items[1].consumed);
        assert!(game.scene().items.iter().all(|item| item.touch_offset.is_none() && !item.drag_active));
    }

    #[test]
    fn test_drop_on_fed_target_is_noop() {
        let mut game = controller(r#"{"activeAnimals":["bear","cat"]}"#);
        let now = Instant::now();
        let target = game.scene().targets[0].bounds.center();
        for index in 0..2 {
            let item = game.scene().items[index].home.center();
            game.handle_action(GameAction::PointerDown(item.x(), item.y()), now);
            game.handle_action(GameAction::PointerUp(target.x(), target.y()), now);
        }
        assert!(game.scene().items[0].consumed);
        assert!(!game.scene().items[1].consumed);
        assert_eq!(game.audio().cues, vec!["bear"]);
    }

    #[test]
    fn test_buttons() {
        let mut game = controller(r#"{"activeAnimals":["bear"]}"#);
        let now = Instant::now();
        let settings = layout::settings_button().center();
        game.handle_action(GameAction::PointerDown(settings.x(), settings.y()), now);
        assert!(game.settings().is_some());
        game.handle_action(GameAction::CloseSettings, now);
        assert!(game.settings().is_none());

        let item = game.scene().items[0].home.center();
        let target = game.scene().targets[0].bounds.center();
        game.handle_action(GameAction::PointerDown(item.x(), item.y()), now);
        game.handle_action(GameAction::PointerUp(target.x(), target.y()), now);
        assert!(game.scene().items[0].consumed);

        let reset = layout::reset_button().center();
        game.handle_action(GameAction::TouchStart(1, reset.x(), reset.y()), now);
        assert!(!game.scene().items[0].consumed);
    }

    #[test]
    fn test_settings_keyboard_flow_with_notice() {
        let mut game = controller(r#"{"activeAnimals":["bear"]}"#);
        let now = Instant::now();
        let mut input = InputSystem::new();

        game.handle_action(GameAction::OpenSettings, now);
        input.update_context(&game.ui_state());
        assert_eq!(input.context, InputContext::Settings);

        // Untick bear, then jump to SAVE and confirm
        game.handle_action(GameAction::MenuConfirm, now);
        game.handle_action(GameAction::MenuUp, now);
        game.handle_action(GameAction::MenuConfirm, now);

        assert!(game.settings().is_none());
        assert_eq!(game.config().active_animals, vec!["bear"]);
        assert!(game.notice().is_some());
        input.update_context(&game.ui_state());
        assert_eq!(input.context, InputContext::Notice);

        game.handle_action(GameAction::DismissNotice, now);
        input.update_context(&game.ui_state());
        assert_eq!(input.context, InputContext::Playing);
    }

    #[test]
    fn test_settings_click_rows() {
        let mut game = controller(r#"{"activeAnimals":["bear"]}"#);
        let now = Instant::now();
        game.handle_action(GameAction::OpenSettings, now);

        let rows = SettingsForm::rows();
        let cat_row = layout::settings_row(1).center();
        game.handle_action(GameAction::MenuClick(cat_row.x(), cat_row.y()), now);
        assert!(game.settings().unwrap().is_checked(1));

        let food_row = rows.iter().position(|r| *r == SettingsRow::Food).unwrap();
        game.handle_action(GameAction::MenuDown, now);
        let food = layout::settings_row(food_row).center();
        game.handle_action(GameAction::MenuClick(food.x(), food.y()), now);
        game.handle_action(GameAction::MenuRight, now);
        assert_eq!(game.settings().unwrap().food().id, "banana");

        let save = layout::settings_row(rows.len() - 1).center();
        game.handle_action(GameAction::MenuClick(save.x(), save.y()), now);
        assert!(game.settings().is_none());
        assert_eq!(game.config().active_animals, vec!["bear", "cat"]);
        assert_eq!(game.config().food_type, "banana");
        assert_eq!(game.scene().targets.len(), 2);

        game.update(now + Duration::from_millis(16));
        assert!(game.notice().is_none());
    }

    #[test]
    fn test_quit() {
        let mut game = controller("{}");
        assert_eq!(game.handle_action(GameAction::Quit, Instant::now()), LoopControl::Quit);
        assert_eq!(
            game.handle_action(GameAction::Reset, Instant::now()),
            LoopControl::Continue
        );
    }
}
