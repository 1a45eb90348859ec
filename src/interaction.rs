//! Pointer and touch drag handling
//!
//! Two gesture paths, one outcome: both end with an optional
//! [`DropRequest`] that the controller hands to [`Scene::feed`]. Neither
//! path checks whether the target is already fed; that guard belongs to the
//! feeding state machine alone.

use crate::scene::Scene;
use sdl2::rect::Point;

/// "Feed this target with this item", produced at the end of a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropRequest {
    pub target: usize,
    pub item: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    /// Mouse drag; the item stays in the tray and a ghost follows the pointer
    Pointer { item: usize, position: Point },
    /// Finger drag; the item itself follows the finger that picked it up
    Touch { item: usize, finger: i64, start: Point },
}

impl Gesture {
    fn is_finger(&self, id: i64) -> bool {
        matches!(self, Gesture::Touch { finger, .. } if *finger == id)
    }
}

/// Tracks the one gesture in progress, if any
///
/// Only one item can be carried at a time. While a gesture is active, further
/// pick-ups from the mouse or another finger are ignored.
#[derive(Debug, Default)]
pub struct InteractionController {
    active: Option<Gesture>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Item currently being dragged
    #[cfg(test)]
    pub fn active_item(&self) -> Option<usize> {
        match self.active {
            Some(Gesture::Pointer { item, .. }) | Some(Gesture::Touch { item, .. }) => Some(item),
            None => None,
        }
    }

    /// Pointer position of an active mouse drag (where the ghost is drawn)
    pub fn pointer_ghost(&self) -> Option<(usize, Point)> {
        match self.active {
            Some(Gesture::Pointer { item, position }) => Some((item, position)),
            _ => None,
        }
    }

    /// Forgets any gesture (used when the scene is replaced)
    pub fn cancel(&mut self) {
        self.active = None;
    }

    // === Pointer-drag path ===

    /// Mouse button pressed; picks up the food item under the pointer
    pub fn pointer_down(&mut self, scene: &mut Scene, position: Point) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(item) = scene.item_at(position) else {
            return false;
        };
        scene.items[item].drag_active = true;
        self.active = Some(Gesture::Pointer { item, position });
        tracing::trace!("Picked up item {} with pointer", item);
        true
    }

    /// Mouse moved; highlights the target under the pointer while dragging
    pub fn pointer_move(&mut self, scene: &mut Scene, position: Point) {
        let Some(Gesture::Pointer { item, .. }) = self.active else {
            return;
        };
        self.active = Some(Gesture::Pointer { item, position });

        let hovered = scene.target_at(position);
        for (index, target) in scene.targets.iter_mut().enumerate() {
            target.drop_candidate = Some(index) == hovered;
        }
    }

    /// Mouse released; requests a feed when released over a target
    pub fn pointer_up(&mut self, scene: &mut Scene, position: Point) -> Option<DropRequest> {
        let gesture = self.active.take();
        scene.clear_drop_candidates();

        let Some(Gesture::Pointer { item, .. }) = gesture else {
            // A touch gesture is not ended by the mouse; put it back
            self.active = gesture;
            return None;
        };
        if let Some(state) = scene.items.get_mut(item) {
            state.drag_active = false;
        }

        scene
            .target_at(position)
            .map(|target| DropRequest { target, item })
    }

    // === Touch path ===

    /// Finger down; picks up the food item under it
    pub fn touch_start(&mut self, scene: &mut Scene, finger: i64, position: Point) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(item) = scene.item_at(position) else {
            return false;
        };
        let state = &mut scene.items[item];
        state.drag_active = true;
        state.touch_offset = Some((0, 0));
        self.active = Some(Gesture::Touch {
            item,
            finger,
            start: position,
        });
        tracing::trace!("Picked up item {} with touch", item);
        true
    }

    /// Finger moved; translates the item by the distance from the start point
    pub fn touch_move(&mut self, scene: &mut Scene, finger: i64, position: Point) {
        let Some(Gesture::Touch { item, start, .. }) = self.active.filter(|g| g.is_finger(finger)) else {
            return;
        };
        if let Some(state) = scene.items.get_mut(item) {
            state.touch_offset = Some((position.x() - start.x(), position.y() - start.y()));
        }
    }

    /// Finger lifted; requests a feed when lifted over a target
    ///
    /// The dragged item itself is left out of the hit test, otherwise it
    /// would always be the topmost thing under the finger. The item goes back
    /// to the tray either way; if it gets eaten it simply disappears there.
    pub fn touch_end(&mut self, scene: &mut Scene, finger: i64, position: Point) -> Option<DropRequest> {
        let Some(Gesture::Touch { item, .. }) = self.active.filter(|g| g.is_finger(finger)) else {
            return None;
        };
        self.active = None;

        let target = scene
            .element_at(position, Some(item))
            .and_then(|element| element.enclosing_target());

        if let Some(state) = scene.items.get_mut(item) {
            state.touch_offset = None;
            state.drag_active = false;
        }

        target.map(|target| DropRequest { target, item })
    }
}
