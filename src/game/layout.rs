// Screen-space layout shared by rendering and input hit-testing
//
// All values are in logical pixels (640x360); SDL scales them to the window.

use crate::scene::{GAME_HEIGHT, GAME_WIDTH};
use crate::settings::SettingsForm;
use sdl2::rect::Rect;

pub const BUTTON_WIDTH: u32 = 110;
pub const BUTTON_HEIGHT: u32 = 28;

/// "RESET" button, top-left corner
pub fn reset_button() -> Rect {
    Rect::new(12, 12, BUTTON_WIDTH, BUTTON_HEIGHT)
}

/// "SETTINGS" button, top-right corner
pub fn settings_button() -> Rect {
    Rect::new(
        GAME_WIDTH as i32 - BUTTON_WIDTH as i32 - 12,
        12,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

pub const SETTINGS_WIDTH: u32 = 400;
pub const SETTINGS_HEIGHT: u32 = 320;
const SETTINGS_ROW_HEIGHT: u32 = 28;
const SETTINGS_FIRST_ROW_Y: i32 = 42;

/// The settings modal box, centred on screen
pub fn settings_panel() -> Rect {
    Rect::new(
        (GAME_WIDTH - SETTINGS_WIDTH) as i32 / 2,
        (GAME_HEIGHT - SETTINGS_HEIGHT) as i32 / 2,
        SETTINGS_WIDTH,
        SETTINGS_HEIGHT,
    )
}

/// Clickable rectangle of the settings row at `index`
pub fn settings_row(index: usize) -> Rect {
    let panel = settings_panel();
    Rect::new(
        panel.x() + 16,
        panel.y() + SETTINGS_FIRST_ROW_Y + (index as u32 * SETTINGS_ROW_HEIGHT) as i32,
        SETTINGS_WIDTH - 32,
        SETTINGS_ROW_HEIGHT - 4,
    )
}

/// Index of the settings row under a point
pub fn settings_row_at(x: i32, y: i32) -> Option<usize> {
    (0..SettingsForm::rows().len()).find(|&index| settings_row(index).contains_point((x, y)))
}
