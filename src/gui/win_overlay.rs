//! Win Overlay Component
//!
//! Dims the finished scene and shows the count-up: one food icon per count,
//! the running message, and after the reveal the completion mark fading and
//! scaling in over the last icon.

use super::menu::draw_overlay;
use crate::render::{draw_food, fill_disc};
use crate::scene::GAME_WIDTH;
use crate::text::draw_text_centered;
use crate::textures::TextureBank;
use crate::win_sequence::WinSequence;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use std::time::Instant;

const MESSAGE_Y: i32 = 235;

/// Configuration for win overlay appearance
#[derive(Debug, Clone)]
pub struct WinOverlayStyle {
    /// Overlay darkness (0-255, higher = darker)
    pub overlay_alpha: u8,

    pub message_color: Color,

    /// Completion mark fill, drawn at full alpha once faded in
    pub mark_color: Color,

    pub mark_outline_color: Color,
}

impl Default for WinOverlayStyle {
    fn default() -> Self {
        WinOverlayStyle {
            overlay_alpha: 120,
            message_color: Color::RGB(255, 235, 120),
            mark_color: Color::RGB(90, 200, 90),
            mark_outline_color: Color::RGB(255, 255, 255),
        }
    }
}

pub struct WinOverlay {
    style: WinOverlayStyle,
}

impl WinOverlay {
    pub fn new() -> Self {
        WinOverlay {
            style: WinOverlayStyle::default(),
        }
    }

    /// Draws nothing while the sequence is idle
    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        textures: &mut TextureBank,
        win: &WinSequence,
        now: Instant,
    ) -> Result<(), String> {
        if !win.is_active() {
            return Ok(());
        }
        draw_overlay(canvas, self.style.overlay_alpha)?;

        if let Some(food) = win.food() {
            for icon in win.icons() {
                draw_food(canvas, textures, food, *icon, 255)?;
            }
        }

        draw_text_centered(
            canvas,
            win.message(),
            Point::new((GAME_WIDTH / 2) as i32, MESSAGE_Y),
            self.style.message_color,
            3,
        )?;

        if let Some(mark) = win.mark() {
            let progress = mark.progress(now);
            let bounds = mark.bounds_at(progress);
            let alpha = mark_alpha(progress);

            canvas.set_blend_mode(BlendMode::Blend);
            let outline = self.style.mark_outline_color;
            fill_disc(canvas, bounds, Color::RGBA(outline.r, outline.g, outline.b, alpha))?;
            let inner = bounds.width().saturating_sub(6).max(1);
            let mut inner_bounds = Rect::new(0, 0, inner, inner);
            inner_bounds.center_on(bounds.center());
            let fill = self.style.mark_color;
            fill_disc(canvas, inner_bounds, Color::RGBA(fill.r, fill.g, fill.b, alpha))?;
            canvas.set_blend_mode(BlendMode::None);
        }
        Ok(())
    }
}

impl Default for WinOverlay {
    fn default() -> Self {
        Self::new()
    }
}

fn mark_alpha(progress: f32) -> u8 {
    (progress.clamp(0.0, 1.0) * 255.0).round() as u8
}
