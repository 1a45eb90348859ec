use crate::scene::{GAME_HEIGHT, GAME_WIDTH};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

/// `which` value SDL uses for mouse events it synthesizes from touches
const TOUCH_MOUSE_ID: u32 = u32::MAX;

/// Actions the player can perform in the game
///
/// This enum represents all possible high-level game actions that can be
/// triggered by input. It decouples input handling from action execution.
/// Coordinates are logical screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    // === Mouse drag ===
    PointerDown(i32, i32),
    PointerMove(i32, i32),
    PointerUp(i32, i32),

    // === Touch drag (finger id, x, y) ===
    TouchStart(i64, i32, i32),
    TouchMove(i64, i32, i32),
    TouchEnd(i64, i32, i32),

    // === Scene ===
    Reset,
    OpenSettings,

    // === Settings Navigation ===
    MenuUp,
    MenuDown,
    MenuLeft,
    MenuRight,
    MenuConfirm,
    MenuClick(i32, i32),
    CloseSettings,

    // === Notice ===
    DismissNotice,

    // === System ===
    Quit,
}

/// Input context determines which actions are available
///
/// Different game states require different input handling. This enum
/// represents the current input mode to filter irrelevant inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Normal play - dragging food, reset and settings buttons
    Playing,
    /// Settings modal is open
    Settings,
    /// A notice is waiting to be acknowledged
    Notice,
}

/// Helper struct to pass UI state without borrowing the controller
pub struct UIState {
    pub settings_open: bool,
    pub notice_active: bool,
}

/// InputSystem processes SDL2 events and produces GameActions
///
/// # Architecture
///
/// Input processing happens in phases:
/// 1. Determine current InputContext (Playing, Settings, Notice)
/// 2. Poll SDL2 events
/// 3. Filter events based on context
/// 4. Translate events to GameActions
/// 5. Return actions to game loop for execution
pub struct InputSystem {
    /// Current input context
    pub context: InputContext,
}

impl InputSystem {
    /// Creates a new InputSystem starting in Playing context
    pub fn new() -> Self {
        InputSystem {
            context: InputContext::Playing,
        }
    }

    /// Update the input context based on current UI state
    ///
    /// Priority order (highest to lowest):
    /// 1. Notice - must be acknowledged first
    /// 2. Settings - settings modal
    /// 3. Playing - normal play
    pub fn update_context(&mut self, ui_state: &UIState) {
        self.context = if ui_state.notice_active {
            InputContext::Notice
        } else if ui_state.settings_open {
            InputContext::Settings
        } else {
            InputContext::Playing
        };
    }

    /// Process SDL2 events and return list of actions to handle
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<GameAction> {
        event_pump
            .poll_iter()
            .filter_map(|event| self.translate(event))
            .collect()
    }

    /// Translates one SDL2 event for the current context
    pub fn translate(&self, event: Event) -> Option<GameAction> {
        match event {
            Event::Quit { .. } => Some(GameAction::Quit),
            Event::KeyDown {
                keycode: Some(key), ..
            } => self.handle_keydown(key),
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                which,
                x,
                y,
                ..
            } if which != TOUCH_MOUSE_ID => self.handle_mouse_down(x, y),
            Event::MouseMotion { which, x, y, .. } if which != TOUCH_MOUSE_ID => {
                (self.context == InputContext::Playing).then_some(GameAction::PointerMove(x, y))
            }
            Event::MouseButtonUp {
                mouse_btn: MouseButton::Left,
                which,
                x,
                y,
                ..
            } if which != TOUCH_MOUSE_ID => {
                (self.context == InputContext::Playing).then_some(GameAction::PointerUp(x, y))
            }
            Event::FingerDown { finger_id, x, y, .. } => {
                let (x, y) = finger_to_logical(x, y);
                match self.context {
                    InputContext::Playing => Some(GameAction::TouchStart(finger_id, x, y)),
                    InputContext::Settings => Some(GameAction::MenuClick(x, y)),
                    InputContext::Notice => Some(GameAction::DismissNotice),
                }
            }
            Event::FingerMotion { finger_id, x, y, .. } => {
                let (x, y) = finger_to_logical(x, y);
                (self.context == InputContext::Playing).then_some(GameAction::TouchMove(finger_id, x, y))
            }
            Event::FingerUp { finger_id, x, y, .. } => {
                let (x, y) = finger_to_logical(x, y);
                (self.context == InputContext::Playing).then_some(GameAction::TouchEnd(finger_id, x, y))
            }
            _ => None,
        }
    }

    /// Handle keyboard key press events
    fn handle_keydown(&self, key: Keycode) -> Option<GameAction> {
        match self.context {
            InputContext::Playing => match key {
                Keycode::R => Some(GameAction::Reset),
                Keycode::S => Some(GameAction::OpenSettings),
                Keycode::Escape => Some(GameAction::Quit),
                _ => None,
            },
            InputContext::Settings => match key {
                Keycode::Escape => Some(GameAction::CloseSettings),
                Keycode::Up => Some(GameAction::MenuUp),
                Keycode::Down => Some(GameAction::MenuDown),
                Keycode::Left => Some(GameAction::MenuLeft),
                Keycode::Right => Some(GameAction::MenuRight),
                Keycode::Return | Keycode::Space => Some(GameAction::MenuConfirm),
                _ => None,
            },
            InputContext::Notice => Some(GameAction::DismissNotice),
        }
    }

    /// Handle left mouse button press events
    fn handle_mouse_down(&self, x: i32, y: i32) -> Option<GameAction> {
        match self.context {
            InputContext::Playing => Some(GameAction::PointerDown(x, y)),
            InputContext::Settings => Some(GameAction::MenuClick(x, y)),
            InputContext::Notice => Some(GameAction::DismissNotice),
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// SDL reports finger positions normalized to 0..1 of the window
fn finger_to_logical(x: f32, y: f32) -> (i32, i32) {
    (
        (x.clamp(0.0, 1.0) * GAME_WIDTH as f32) as i32,
        (y.clamp(0.0, 1.0) * GAME_HEIGHT as f32) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::Mod;
    use sdl2::mouse::MouseState;

    fn key(keycode: Keycode) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    fn mouse_down(which: u32, x: i32, y: i32) -> Event {
        Event::MouseButtonDown {
            timestamp: 0,
            window_id: 1,
            which,
            mouse_btn: MouseButton::Left,
            clicks: 1,
            x,
            y,
        }
    }

    fn finger_down(x: f32, y: f32) -> Event {
        Event::FingerDown {
            timestamp: 0,
            touch_id: 1,
            finger_id: 1,
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            pressure: 1.0,
        }
    }

    fn input_in(context: InputContext) -> InputSystem {
        InputSystem { context }
    }

    #[test]
    fn test_input_system_creation() {
        let input = InputSystem::new();
        assert_eq!(input.context, InputContext::Playing);
    }

    #[test]
    fn test_context_priority() {
        let mut input = InputSystem::new();

        input.update_context(&UIState {
            settings_open: true,
            notice_active: false,
        });
        assert_eq!(input.context, InputContext::Settings);

        // A notice raised by saving settings wins over the settings modal
        input.update_context(&UIState {
            settings_open: true,
            notice_active: true,
        });
        assert_eq!(input.context, InputContext::Notice);

        input.update_context(&UIState {
            settings_open: false,
            notice_active: false,
        });
        assert_eq!(input.context, InputContext::Playing);
    }

    #[test]
    fn test_mouse_translation_per_context() {
        let event = || mouse_down(0, 40, 50);
        assert_eq!(
            input_in(InputContext::Playing).translate(event()),
            Some(GameAction::PointerDown(40, 50))
        );
        assert_eq!(
            input_in(InputContext::Settings).translate(event()),
            Some(GameAction::MenuClick(40, 50))
        );
        assert_eq!(
            input_in(InputContext::Notice).translate(event()),
            Some(GameAction::DismissNotice)
        );
    }

    #[test]
    fn test_synthesized_mouse_events_are_ignored() {
        let input = InputSystem::new();
        assert_eq!(input.translate(mouse_down(TOUCH_MOUSE_ID, 40, 50)), None);

        let motion = Event::MouseMotion {
            timestamp: 0,
            window_id: 1,
            which: TOUCH_MOUSE_ID,
            mousestate: MouseState::from_sdl_state(0),
            x: 1,
            y: 1,
            xrel: 0,
            yrel: 0,
        };
        assert_eq!(input.translate(motion), None);
    }

    #[test]
    fn test_finger_coordinates_are_scaled() {
        let input = InputSystem::new();
        assert_eq!(
            input.translate(finger_down(0.5, 0.5)),
            Some(GameAction::TouchStart(1, 320, 180))
        );
        assert_eq!(
            input.translate(finger_down(1.5, -0.2)),
            Some(GameAction::TouchStart(1, 640, 0))
        );
    }

    #[test]
    fn test_finger_id_is_carried_through() {
        let input = InputSystem::new();
        let lift = Event::FingerUp {
            timestamp: 0,
            touch_id: 1,
            finger_id: 7,
            x: 0.25,
            y: 0.5,
            dx: 0.0,
            dy: 0.0,
            pressure: 0.0,
        };
        assert_eq!(input.translate(lift), Some(GameAction::TouchEnd(7, 160, 180)));
    }

    #[test]
    fn test_keys_per_context() {
        let playing = input_in(InputContext::Playing);
        assert_eq!(playing.translate(key(Keycode::R)), Some(GameAction::Reset));
        assert_eq!(playing.translate(key(Keycode::S)), Some(GameAction::OpenSettings));
        assert_eq!(playing.translate(key(Keycode::Up)), None);

        let settings = input_in(InputContext::Settings);
        assert_eq!(settings.translate(key(Keycode::Escape)), Some(GameAction::CloseSettings));
        assert_eq!(settings.translate(key(Keycode::Space)), Some(GameAction::MenuConfirm));
        assert_eq!(settings.translate(key(Keycode::R)), None);

        let notice = input_in(InputContext::Notice);
        assert_eq!(notice.translate(key(Keycode::A)), Some(GameAction::DismissNotice));
    }
}
