//! Win sequence: count-up, final message and completion mark
//!
//! ```text
//! Idle --start()--> Counting --tick() x total--> (reveal delay) --reveal()--> Revealing --update()--> Complete
//! ```
//!
//! This type only holds presentation state. The controller schedules the
//! ticks and the reveal, and plays the speech and fanfare that go with them.

use crate::catalog::FoodType;
use crate::scene::GAME_WIDTH;
use sdl2::rect::Rect;
use std::time::{Duration, Instant};

/// Time between count-up steps
pub const COUNT_TICK_INTERVAL: Duration = Duration::from_millis(600);
/// Pause between the last count-up step and the reveal
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);
/// Length of the completion mark's fade/scale-in
pub const MARK_FADE_DURATION: Duration = Duration::from_millis(400);

const ICON_SIZE: u32 = 40;
const ICON_GAP: u32 = 8;
const ICON_ROW_Y: i32 = 150;
const MARK_SIZE: u32 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinPhase {
    #[default]
    Idle,
    Counting,
    Revealing,
    Complete,
}

/// What a count-up step produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Counter advanced to this number; more steps follow
    Counted(u32),
    /// Counter advanced to this number and reached the total
    Finished(u32),
    /// Not counting (stale or out-of-order tick)
    Ignored,
}

/// Decorative mark anchored to the last food icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionMark {
    pub anchor: Rect,
    pub shown_at: Instant,
}

impl CompletionMark {
    /// Fade/scale progress in `0.0..=1.0`
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.shown_at).as_secs_f32();
        (elapsed / MARK_FADE_DURATION.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Mark bounds at `progress` (scales up from the anchor's top-right corner)
    pub fn bounds_at(&self, progress: f32) -> Rect {
        let size = ((MARK_SIZE as f32) * (0.3 + 0.7 * progress)).max(1.0) as u32;
        let mut bounds = Rect::new(0, 0, size, size);
        bounds.center_on((self.anchor.right() - 4, self.anchor.top() + 4));
        bounds
    }
}

#[derive(Debug, Default)]
pub struct WinSequence {
    phase: WinPhase,
    total: u32,
    counter: u32,
    food: Option<&'static FoodType>,
    icons: Vec<Rect>,
    message: String,
    mark: Option<CompletionMark>,
}

impl WinSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears any result display and returns to `Idle`
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Enters `Counting` for `total` fed animals
    pub fn start(&mut self, total: u32, food: &'static FoodType) {
        self.reset();
        self.phase = WinPhase::Counting;
        self.total = total;
        self.food = Some(food);
        tracing::info!("All fed! Counting up to {}", total);
    }

    /// Advances the count-up by one
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != WinPhase::Counting || self.counter >= self.total {
            return TickOutcome::Ignored;
        }

        self.counter += 1;
        self.icons = icon_row(self.counter as usize);
        self.message = format!("{} {}", self.counter, self.food_label());

        if self.counter >= self.total {
            TickOutcome::Finished(self.counter)
        } else {
            TickOutcome::Counted(self.counter)
        }
    }

    /// Shows the final message and the completion mark
    ///
    /// Returns false when the count-up has not finished (nothing changes).
    pub fn reveal(&mut self, now: Instant) -> bool {
        if self.phase != WinPhase::Counting || self.counter < self.total {
            return false;
        }

        self.phase = WinPhase::Revealing;
        self.message = format!("{} {} GIVEN!", self.total, self.food_label());
        self.mark = self.icons.last().map(|&anchor| CompletionMark {
            anchor,
            shown_at: now,
        });
        true
    }

    /// Moves `Revealing` to `Complete` once the mark has faded in
    pub fn update(&mut self, now: Instant) {
        if self.phase != WinPhase::Revealing {
            return;
        }
        let faded_in = self.mark.map_or(true, |mark| mark.progress(now) >= 1.0);
        if faded_in {
            self.phase = WinPhase::Complete;
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> WinPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != WinPhase::Idle
    }

    #[cfg(test)]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    #[cfg(test)]
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn food(&self) -> Option<&'static FoodType> {
        self.food
    }

    pub fn icons(&self) -> &[Rect] {
        &self.icons
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn mark(&self) -> Option<&CompletionMark> {
        self.mark.as_ref()
    }

    fn food_label(&self) -> &'static str {
        self.food.map_or("", |food| food.name)
    }
}

/// Icon positions for `count` icons, centred on the overlay
fn icon_row(count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let total = count as u32 * ICON_SIZE + (count as u32 - 1) * ICON_GAP;
    let start_x = (GAME_WIDTH as i32 - total as i32) / 2;
    (0..count)
        .map(|i| {
            Rect::new(
                start_x + (i as u32 * (ICON_SIZE + ICON_GAP)) as i32,
                ICON_ROW_Y,
                ICON_SIZE,
                ICON_SIZE,
            )
        })
        .collect()
}
