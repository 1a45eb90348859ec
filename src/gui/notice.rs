//! Notice Dialog Component
//!
//! A one-time message box shown over the scene, for example when the
//! settings were saved with no animal selected. Any click, touch or key
//! dismisses it.

use super::menu::{draw_box, draw_overlay, MenuStyle};
use crate::scene::{GAME_HEIGHT, GAME_WIDTH};
use crate::text::{draw_text_centered, text_width};
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;

const DISMISS_HINT: &str = "CLICK TO CONTINUE";
const MESSAGE_SCALE: u32 = 2;
const PADDING: u32 = 24;

/// Configuration for notice appearance
#[derive(Debug, Clone)]
pub struct NoticeStyle {
    pub menu: MenuStyle,

    /// Message text color
    pub message_color: Color,

    /// Instruction text color
    pub instruction_color: Color,
}

impl Default for NoticeStyle {
    fn default() -> Self {
        NoticeStyle {
            menu: MenuStyle::default(),
            message_color: Color::RGB(200, 60, 40),
            instruction_color: Color::RGB(150, 140, 130),
        }
    }
}

pub struct NoticeDialog {
    style: NoticeStyle,
}

impl NoticeDialog {
    pub fn new() -> Self {
        NoticeDialog {
            style: NoticeStyle::default(),
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, message: &str) -> Result<(), String> {
        draw_overlay(canvas, self.style.menu.overlay_alpha)?;

        let bounds = dialog_bounds(message);
        draw_box(canvas, bounds, &self.style.menu)?;

        let center_x = bounds.center().x();
        draw_text_centered(
            canvas,
            message,
            Point::new(center_x, bounds.y() + 30),
            self.style.message_color,
            MESSAGE_SCALE,
        )?;
        draw_text_centered(
            canvas,
            DISMISS_HINT,
            Point::new(center_x, bounds.bottom() - 20),
            self.style.instruction_color,
            1,
        )
    }
}

impl Default for NoticeDialog {
    fn default() -> Self {
        Self::new()
    }
}

/// Box sized to the message, centred on screen
fn dialog_bounds(message: &str) -> Rect {
    let width = (text_width(message, MESSAGE_SCALE) + PADDING * 2).min(GAME_WIDTH - 20);
    let mut bounds = Rect::new(0, 0, width, 90);
    bounds.center_on(((GAME_WIDTH / 2) as i32, (GAME_HEIGHT / 2) as i32));
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::NO_ANIMAL_NOTICE;

    #[test]
    fn test_dialog_fits_message() {
        let bounds = dialog_bounds(NO_ANIMAL_NOTICE);
        assert!(bounds.width() >= text_width(NO_ANIMAL_NOTICE, MESSAGE_SCALE));
        assert!(Rect::new(0, 0, GAME_WIDTH, GAME_HEIGHT).contains_rect(bounds));
    }
}
