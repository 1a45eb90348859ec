/// Scene rendering
///
/// Draws one frame from the controller's state, back to front:
///
/// 1. Background
/// 2. Animal targets (with drop highlight and eating bounce)
/// 3. Food items resting in the tray
/// 4. The item being dragged (touch) or the pointer ghost (mouse)
/// 5. RESET / SETTINGS buttons
/// 6. Screen-space overlays: win sequence, settings modal, notice
///
/// Nothing here mutates game state; the only mutable input is the texture
/// bank, whose alpha modulation is changed and restored around each draw.
use crate::audio::AudioAdapter;
use crate::catalog::FoodType;
use crate::config::KeyValueStore;
use crate::game::layout::{reset_button, settings_button};
use crate::game::SceneController;
use crate::gui::{draw_button, MenuStyle, NoticeDialog, SettingsMenu, WinOverlay};
use crate::scene::{AnimalTarget, FoodItem, GAME_WIDTH};
use crate::text::draw_text_centered;
use crate::textures::TextureBank;
use rand::Rng;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use std::time::{Duration, Instant};

const BACKGROUND_COLOR: Color = Color::RGB(200, 235, 200);
const TRAY_COLOR: Color = Color::RGB(230, 210, 170);
const HIGHLIGHT_COLOR: Color = Color::RGB(255, 210, 40);
const PLACEHOLDER_TEXT_COLOR: Color = Color::RGB(40, 30, 20);

/// Alpha of a tray item while the mouse drags its ghost around
const DRAGGED_ITEM_ALPHA: u8 = 128;

const BOUNCE_DURATION: Duration = Duration::from_millis(300);
const BOUNCE_HEIGHT: f32 = 10.0;

/// Owns the screen-space GUI components and draws whole frames
pub struct Renderer {
    button_style: MenuStyle,
    settings_menu: SettingsMenu,
    notice: NoticeDialog,
    win_overlay: WinOverlay,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            button_style: MenuStyle::default(),
            settings_menu: SettingsMenu::new(),
            notice: NoticeDialog::new(),
            win_overlay: WinOverlay::new(),
        }
    }

    pub fn render<S: KeyValueStore, A: AudioAdapter, R: Rng>(
        &self,
        canvas: &mut Canvas<Window>,
        textures: &mut TextureBank,
        game: &SceneController<S, A, R>,
        now: Instant,
    ) -> Result<(), String> {
        canvas.set_draw_color(BACKGROUND_COLOR);
        canvas.clear();

        let scene = game.scene();
        if let Some(first) = scene.items.first() {
            let tray = Rect::new(0, first.home.y() - 12, GAME_WIDTH, first.home.height() + 24);
            canvas.set_draw_color(TRAY_COLOR);
            canvas.fill_rect(tray)?;
        }

        for target in &scene.targets {
            draw_target(canvas, textures, target, now)?;
        }

        let ghost = game.interaction().pointer_ghost();
        for item in scene.items.iter().filter(|item| item.touch_offset.is_none()) {
            if item.consumed {
                continue;
            }
            let alpha = if item.drag_active { DRAGGED_ITEM_ALPHA } else { 255 };
            draw_food(canvas, textures, item.food, item.home, alpha)?;
        }

        // Touch-dragged item travels on top of everything else in the scene
        for item in scene.items.iter().filter(|item| item.touch_offset.is_some()) {
            draw_food(canvas, textures, item.food, item.current_bounds(), 255)?;
        }

        if let Some((index, position)) = ghost {
            if let Some(item) = scene.items.get(index) {
                draw_food(canvas, textures, item.food, ghost_bounds(item, position), 255)?;
            }
        }

        draw_button(canvas, reset_button(), "RESET", &self.button_style)?;
        draw_button(canvas, settings_button(), "SETTINGS", &self.button_style)?;

        self.win_overlay.render(canvas, textures, game.win(), now)?;

        if let Some(form) = game.settings() {
            self.settings_menu.render(canvas, form)?;
        }
        if let Some(message) = game.notice() {
            self.notice.render(canvas, message)?;
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_target(
    canvas: &mut Canvas<Window>,
    textures: &mut TextureBank,
    target: &AnimalTarget,
    now: Instant,
) -> Result<(), String> {
    let lift = target.fed_at.map_or(0, |fed_at| bounce_offset(fed_at, now));
    let mut bounds = target.bounds;
    bounds.offset(0, -lift);

    if target.drop_candidate {
        canvas.set_draw_color(HIGHLIGHT_COLOR);
        for grow in 1..=3 {
            canvas.draw_rect(Rect::new(
                bounds.x() - grow,
                bounds.y() - grow,
                bounds.width() + 2 * grow as u32,
                bounds.height() + 2 * grow as u32,
            ))?;
        }
    }

    match textures.get(target.image()) {
        Some(texture) => canvas.copy(texture, None, bounds)?,
        None => {
            canvas.set_draw_color(target.animal.placeholder);
            fill_rounded(canvas, bounds, 12)?;
            let label = if target.shows_happy() {
                format!("{}!", target.animal.name)
            } else {
                target.animal.name.to_string()
            };
            draw_text_centered(canvas, &label, bounds.center(), PLACEHOLDER_TEXT_COLOR, 2)?;
        }
    }
    Ok(())
}

/// Draws one food icon with the texture, or a placeholder disc
pub fn draw_food(
    canvas: &mut Canvas<Window>,
    textures: &mut TextureBank,
    food: &FoodType,
    bounds: Rect,
    alpha: u8,
) -> Result<(), String> {
    match textures.get_mut(food.image) {
        Some(texture) => {
            texture.set_alpha_mod(alpha);
            let result = canvas.copy(texture, None, bounds);
            texture.set_alpha_mod(255);
            result
        }
        None => {
            canvas.set_blend_mode(BlendMode::Blend);
            let color = food.placeholder;
            let result = fill_disc(canvas, bounds, Color::RGBA(color.r, color.g, color.b, alpha));
            canvas.set_blend_mode(BlendMode::None);
            result
        }
    }
}

/// Fills the ellipse inscribed in `bounds` one scanline at a time
pub fn fill_disc(canvas: &mut Canvas<Window>, bounds: Rect, color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    let rx = bounds.width() as f32 / 2.0;
    let ry = bounds.height() as f32 / 2.0;
    let center = bounds.center();

    for row in 0..bounds.height() as i32 {
        let dy = (row as f32 + 0.5 - ry) / ry;
        let half = (rx * (1.0 - dy * dy).max(0.0).sqrt()).round() as i32;
        if half > 0 {
            let y = bounds.y() + row;
            canvas.fill_rect(Rect::new(center.x() - half, y, (half * 2) as u32, 1))?;
        }
    }
    Ok(())
}

/// Box with its corners cut off in `radius` steps
fn fill_rounded(canvas: &mut Canvas<Window>, bounds: Rect, radius: u32) -> Result<(), String> {
    let radius = radius.min(bounds.width() / 2).min(bounds.height() / 2);
    for row in 0..bounds.height() {
        let from_edge = row.min(bounds.height() - 1 - row);
        let inset = if from_edge < radius {
            let d = (radius - from_edge) as f32;
            (radius as f32 - (radius as f32 * radius as f32 - d * d).max(0.0).sqrt()).round() as u32
        } else {
            0
        };
        let width = bounds.width().saturating_sub(inset * 2);
        if width > 0 {
            canvas.fill_rect(Rect::new(bounds.x() + inset as i32, bounds.y() + row as i32, width, 1))?;
        }
    }
    Ok(())
}

/// Upward offset of a target that has just been fed (half-sine hop)
fn bounce_offset(fed_at: Instant, now: Instant) -> i32 {
    let elapsed = now.saturating_duration_since(fed_at);
    if elapsed >= BOUNCE_DURATION {
        return 0;
    }
    let t = elapsed.as_secs_f32() / BOUNCE_DURATION.as_secs_f32();
    (BOUNCE_HEIGHT * (t * std::f32::consts::PI).sin()).round() as i32
}

/// Ghost icon follows the pointer, centred on it
fn ghost_bounds(item: &FoodItem, position: Point) -> Rect {
    let mut bounds = item.home;
    bounds.center_on(position);
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::food_type_or_default;

    #[test]
    fn test_bounce_starts_and_ends_on_the_ground() {
        let fed_at = Instant::now();
        assert_eq!(bounce_offset(fed_at, fed_at), 0);
        assert_eq!(bounce_offset(fed_at, fed_at + BOUNCE_DURATION), 0);
        assert_eq!(bounce_offset(fed_at, fed_at + Duration::from_secs(5)), 0);

        let peak = bounce_offset(fed_at, fed_at + BOUNCE_DURATION / 2);
        assert_eq!(peak, BOUNCE_HEIGHT as i32);
    }

    #[test]
    fn test_ghost_is_centred_on_pointer() {
        let item = FoodItem {
            food: food_type_or_default("apple"),
            consumed: false,
            drag_active: true,
            touch_offset: None,
            home: Rect::new(100, 270, 56, 56),
        };
        let ghost = ghost_bounds(&item, Point::new(300, 120));
        assert_eq!(ghost.center(), Point::new(300, 120));
        assert_eq!(ghost.size(), item.home.size());
    }
}
