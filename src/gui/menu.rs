//! Base Modal Drawing
//!
//! Shared styling and primitives for screen-space overlays: the dimming
//! layer, the bordered box and the selection highlight. The settings menu
//! and the notice dialog are both built from these.

use crate::text::draw_text_centered;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

/// Configuration for modal appearance
#[derive(Debug, Clone)]
pub struct MenuStyle {
    /// Background color
    pub background_color: Color,

    /// Border color
    pub border_color: Color,

    /// Border thickness (draws double border if > 1)
    pub border_thickness: u32,

    /// Overlay darkness (0-255, higher = darker)
    pub overlay_alpha: u8,

    /// Title text color
    pub title_color: Color,

    /// Normal item text color
    pub item_color: Color,

    /// Item text color while the item is unavailable
    pub disabled_item_color: Color,

    /// Selected item text color
    pub selected_item_color: Color,

    /// Selection highlight color
    pub highlight_color: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            background_color: Color::RGB(250, 244, 228),
            border_color: Color::RGB(120, 90, 60),
            border_thickness: 2,
            overlay_alpha: 160,
            title_color: Color::RGB(90, 60, 30),
            item_color: Color::RGB(70, 60, 50),
            disabled_item_color: Color::RGB(180, 170, 160),
            selected_item_color: Color::RGB(255, 255, 255),
            highlight_color: Color::RGB(240, 150, 60),
        }
    }
}

/// Darkens the whole screen
pub fn draw_overlay(canvas: &mut Canvas<Window>, alpha: u8) -> Result<(), String> {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(0, 0, 0, alpha));
    canvas.fill_rect(None)?;
    canvas.set_blend_mode(BlendMode::None);
    Ok(())
}

/// Filled box with a (double) border
pub fn draw_box(canvas: &mut Canvas<Window>, bounds: Rect, style: &MenuStyle) -> Result<(), String> {
    canvas.set_draw_color(style.background_color);
    canvas.fill_rect(bounds)?;

    canvas.set_draw_color(style.border_color);
    canvas.draw_rect(bounds)?;
    if style.border_thickness > 1 && bounds.width() > 4 && bounds.height() > 4 {
        canvas.draw_rect(Rect::new(
            bounds.x() + 2,
            bounds.y() + 2,
            bounds.width() - 4,
            bounds.height() - 4,
        ))?;
    }
    Ok(())
}

/// Box with a centred caption, used for the on-screen buttons
pub fn draw_button(
    canvas: &mut Canvas<Window>,
    bounds: Rect,
    caption: &str,
    style: &MenuStyle,
) -> Result<(), String> {
    draw_box(canvas, bounds, style)?;
    draw_text_centered(canvas, caption, bounds.center(), style.item_color, 2)
}

/// Dimmed full-screen layer plus a centred box with a title strip
pub fn draw_modal(
    canvas: &mut Canvas<Window>,
    bounds: Rect,
    title: &str,
    style: &MenuStyle,
) -> Result<(), String> {
    draw_overlay(canvas, style.overlay_alpha)?;
    draw_box(canvas, bounds, style)?;
    draw_text_centered(
        canvas,
        title,
        Point::new(bounds.center().x(), bounds.y() + 20),
        style.title_color,
        2,
    )
}
