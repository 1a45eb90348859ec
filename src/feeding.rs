//! Feeding state machine
//!
//! Every drop, whether it came from a mouse drag or a finger, ends up in
//! [`Scene::feed`]. That function holds the only copy of the guard
//! "item not consumed and target not fed", so the two input paths can't
//! drift apart.
//!
//! # Phases
//!
//! ```text
//! Idle --feed()--> Feeding --complete_feeding()--> Fed
//! ```
//!
//! `feed` flips the consumed/fed flags immediately. The happy image and the
//! win check wait for `complete_feeding`, which the controller schedules
//! [`FEED_SETTLE_DELAY`] later.

use crate::catalog::Animal;
use crate::scene::Scene;
use std::time::{Duration, Instant};

/// Time between accepting food and showing the happy image
pub const FEED_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Feeding progress of one animal target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    #[default]
    Idle,
    /// Food accepted, waiting for the settle delay
    Feeding,
    /// Happy image showing
    Fed,
}

/// Why a drop did not feed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedRejection {
    TargetAlreadyFed,
    ItemAlreadyConsumed,
    UnknownTarget,
    UnknownItem,
}

/// Result of a feeding attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedOutcome {
    /// The animal accepted the food; play its cue and schedule the settle
    Fed { target: usize, animal: &'static Animal },
    Rejected(FeedRejection),
}

/// Result of a settle step: whether the scene was won by it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Other items are still in the tray (or the target was not feeding)
    Pending,
    /// Every item is consumed; start the win sequence with this total
    AllFed { total: u32 },
}

impl Scene {
    /// Pairs one food item with one animal target
    ///
    /// Marks the item consumed and the target fed, both right away.
    pub fn feed(&mut self, target: usize, item: usize, now: Instant) -> FeedOutcome {
        let Some(target_state) = self.targets.get(target) else {
            return FeedOutcome::Rejected(FeedRejection::UnknownTarget);
        };
        let Some(item_state) = self.items.get(item) else {
            return FeedOutcome::Rejected(FeedRejection::UnknownItem);
        };

        if item_state.consumed {
            return FeedOutcome::Rejected(FeedRejection::ItemAlreadyConsumed);
        }
        if target_state.is_fed() {
            return FeedOutcome::Rejected(FeedRejection::TargetAlreadyFed);
        }

        let item_state = &mut self.items[item];
        item_state.consumed = true;
        item_state.drag_active = false;
        item_state.touch_offset = None;

        let target_state = &mut self.targets[target];
        target_state.phase = FeedPhase::Feeding;
        target_state.drop_candidate = false;
        target_state.fed_at = Some(now);

        tracing::info!("{} ate a {}", target_state.animal.name, self.food.name);

        FeedOutcome::Fed {
            target,
            animal: target_state.animal,
        }
    }

    /// Finishes a feeding after the settle delay and checks for the win
    ///
    /// The win is reported at most once per scene, by whichever settle
    /// observes every item consumed first.
    pub fn complete_feeding(&mut self, target: usize) -> SettleOutcome {
        match self.targets.get_mut(target) {
            Some(target_state) if target_state.phase == FeedPhase::Feeding => {
                target_state.phase = FeedPhase::Fed;
            }
            _ => return SettleOutcome::Pending,
        }

        if self.win_triggered || !self.all_consumed() {
            return SettleOutcome::Pending;
        }

        self.win_triggered = true;
        SettleOutcome::AllFed {
            total: self.fed_count(),
        }
    }
}
