//! Scene rendering: animal targets and food items for one configuration
//!
//! A `Scene` is rebuilt from scratch on every render. Nothing carries over
//! from the previous scene except the generation counter, which only grows.
//! Timers remember the generation they were scheduled for, so a callback
//! left over from an older scene can recognise that it is stale.

use crate::catalog::{self, Animal, FoodType};
use crate::config::Configuration;
use crate::feeding::FeedPhase;
use sdl2::rect::{Point, Rect};
use std::time::Instant;

// Logical screen layout (640x360, scaled to the window by SDL)
pub const GAME_WIDTH: u32 = 640;
pub const GAME_HEIGHT: u32 = 360;

const TARGET_SIZE: u32 = 100;
const TARGET_GAP: u32 = 16;
const TARGET_ROW_Y: i32 = 70;

const ITEM_SIZE: u32 = 56;
const ITEM_GAP: u32 = 24;
const ITEM_ROW_Y: i32 = 270;

/// Visual scale applied to a food item while a finger is dragging it
pub const TOUCH_DRAG_SCALE: f32 = 1.2;

/// A rendered drop zone for one active animal
#[derive(Debug)]
pub struct AnimalTarget {
    pub animal: &'static Animal,
    pub phase: FeedPhase,
    /// Pointer drag is hovering over this target
    pub drop_candidate: bool,
    /// When the current feeding started (drives the eating bounce)
    pub fed_at: Option<Instant>,
    pub bounds: Rect,
}

impl AnimalTarget {
    /// True from the moment food is accepted, before the happy image shows
    pub fn is_fed(&self) -> bool {
        self.phase != FeedPhase::Idle
    }

    /// Whether the happy image should be displayed
    pub fn shows_happy(&self) -> bool {
        self.phase == FeedPhase::Fed
    }

    pub fn image(&self) -> &'static str {
        if self.shows_happy() {
            self.animal.happy_image
        } else {
            self.animal.neutral_image
        }
    }
}

/// A rendered draggable piece of food
#[derive(Debug)]
pub struct FoodItem {
    pub food: &'static FoodType,
    pub consumed: bool,
    /// A pointer or finger is currently holding this item
    pub drag_active: bool,
    /// Touch drags move the item itself; pointer drags leave it in the tray
    pub touch_offset: Option<(i32, i32)>,
    pub home: Rect,
}

impl FoodItem {
    /// Where the item is drawn right now (home plus any touch translation/scale)
    pub fn current_bounds(&self) -> Rect {
        match self.touch_offset {
            Some((dx, dy)) => {
                let width = (self.home.width() as f32 * TOUCH_DRAG_SCALE) as u32;
                let height = (self.home.height() as f32 * TOUCH_DRAG_SCALE) as u32;
                let mut bounds = Rect::new(0, 0, width, height);
                bounds.center_on(self.home.center().offset(dx, dy));
                bounds
            }
            None => self.home,
        }
    }

    /// Whether the item can still be picked up
    pub fn is_available(&self) -> bool {
        !self.consumed
    }
}

/// The topmost thing under a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneElement {
    FoodItem(usize),
    AnimalTarget(usize),
}

impl SceneElement {
    /// The animal target this element belongs to, if any
    pub fn enclosing_target(self) -> Option<usize> {
        match self {
            SceneElement::AnimalTarget(index) => Some(index),
            SceneElement::FoodItem(_) => None,
        }
    }
}

/// Everything on screen for one render of the configuration
#[derive(Debug)]
pub struct Scene {
    generation: u64,
    pub food: &'static FoodType,
    pub targets: Vec<AnimalTarget>,
    pub items: Vec<FoodItem>,
    /// Set once the win sequence has been started for this render
    pub(crate) win_triggered: bool,
}

impl Scene {
    /// Builds targets and items for `config`
    ///
    /// One target per active animal (in configuration order) and the same
    /// number of food items. Unknown identifiers are skipped.
    pub fn render(config: &Configuration, generation: u64) -> Self {
        let food = catalog::food_type_or_default(&config.food_type);

        let animals: Vec<&'static Animal> = config
            .active_animals
            .iter()
            .filter_map(|id| {
                let found = catalog::animal(id);
                if found.is_none() {
                    tracing::warn!("Skipping unknown animal '{}'", id);
                }
                found
            })
            .collect();

        let targets = row_layout(animals.len(), TARGET_SIZE, TARGET_GAP, TARGET_ROW_Y)
            .into_iter()
            .zip(animals)
            .map(|(bounds, animal)| AnimalTarget {
                animal,
                phase: FeedPhase::Idle,
                drop_candidate: false,
                fed_at: None,
                bounds,
            })
            .collect::<Vec<_>>();

        let items = row_layout(targets.len(), ITEM_SIZE, ITEM_GAP, ITEM_ROW_Y)
            .into_iter()
            .map(|home| FoodItem {
                food,
                consumed: false,
                drag_active: false,
                touch_offset: None,
                home,
            })
            .collect();

        tracing::debug!(
            "Rendered scene {} with {} animal(s) and {} {}",
            generation,
            targets.len(),
            targets.len(),
            food.id
        );

        Scene {
            generation,
            food,
            targets,
            items,
            win_triggered: false,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Topmost element under `point`, ignoring the item at `exclude`
    ///
    /// Food items draw above animal targets, and later items above earlier ones.
    /// Consumed items are invisible and never hit.
    pub fn element_at(&self, point: Point, exclude: Option<usize>) -> Option<SceneElement> {
        let item = self
            .items
            .iter()
            .enumerate()
            .rev()
            .filter(|(index, item)| Some(*index) != exclude && item.is_available())
            .find(|(_, item)| item.current_bounds().contains_point(point))
            .map(|(index, _)| SceneElement::FoodItem(index));

        item.or_else(|| self.target_at(point).map(SceneElement::AnimalTarget))
    }

    /// Animal target under `point`
    pub fn target_at(&self, point: Point) -> Option<usize> {
        self.targets
            .iter()
            .position(|target| target.bounds.contains_point(point))
    }

    /// Available (not consumed) food item under `point`
    pub fn item_at(&self, point: Point) -> Option<usize> {
        match self.element_at(point, None) {
            Some(SceneElement::FoodItem(index)) => Some(index),
            _ => None,
        }
    }

    pub fn all_consumed(&self) -> bool {
        self.items.iter().all(|item| item.consumed)
    }

    pub fn fed_count(&self) -> u32 {
        self.targets.iter().filter(|t| t.is_fed()).count() as u32
    }

    pub fn clear_drop_candidates(&mut self) {
        for target in &mut self.targets {
            target.drop_candidate = false;
        }
    }
}

/// Centres `count` squares of `size` in a horizontal row
fn row_layout(count: usize, size: u32, gap: u32, y: i32) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let total = count as u32 * size + (count as u32 - 1) * gap;
    let start_x = (GAME_WIDTH as i32 - total as i32) / 2;
    (0..count)
        .map(|i| Rect::new(start_x + (i as u32 * (size + gap)) as i32, y, size, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(animals: &[&str], food: &str) -> Configuration {
        Configuration {
            active_animals: animals.iter().map(|s| s.to_string()).collect(),
            is_random: false,
            food_type: food.to_string(),
        }
    }

    #[test]
    fn test_counts_match_active_animals() {
        let sets: [&[&str]; 5] = [
            &["bear"],
            &["bear", "cat"],
            &["dog", "lion", "panda"],
            &["bear", "cat", "dog", "lion"],
            &["bear", "cat", "dog", "lion", "panda"],
        ];
        for animals in sets {
            let scene = Scene::render(&config(animals, "donut"), 1);
            assert_eq!(scene.targets.len(), animals.len());
            assert_eq!(scene.items.len(), animals.len());
        }
    }

    #[test]
    fn test_render_keeps_configuration_order_and_food() {
        let scene = Scene::render(&config(&["lion", "bear"], "apple"), 1);
        let ids: Vec<_> = scene.targets.iter().map(|t| t.animal.id).collect();
        assert_eq!(ids, vec!["lion", "bear"]);
        assert!(scene.items.iter().all(|i| i.food.id == "apple"));
        assert!(scene.targets.iter().all(|t| t.image() == t.animal.neutral_image));
        assert!(!scene.all_consumed());
    }

    #[test]
    fn test_layout_fits_on_screen_without_overlap() {
        let scene = Scene::render(&config(&["bear", "cat", "dog", "lion", "panda"], "donut"), 1);
        let screen = Rect::new(0, 0, GAME_WIDTH, GAME_HEIGHT);
        for target in &scene.targets {
            assert!(screen.contains_rect(target.bounds));
            for item in &scene.items {
                assert!(!target.bounds.has_intersection(item.home));
            }
        }
        for pair in scene.targets.windows(2) {
            assert!(!pair[0].bounds.has_intersection(pair[1].bounds));
        }
    }

    #[test]
    fn test_hit_testing() {
        let mut scene = Scene::render(&config(&["bear", "cat"], "donut"), 1);
        let target_center = scene.targets[1].bounds.center();
        let item_center = scene.items[0].home.center();

        assert_eq!(scene.target_at(target_center), Some(1));
        assert_eq!(scene.item_at(item_center), Some(0));
        assert_eq!(scene.element_at(Point::new(2, 2), None), None);

        // An item dragged over a target occludes it unless excluded
        let (dx, dy) = (
            target_center.x() - item_center.x(),
            target_center.y() - item_center.y(),
        );
        scene.items[0].touch_offset = Some((dx, dy));
        assert_eq!(scene.element_at(target_center, None), Some(SceneElement::FoodItem(0)));
        assert_eq!(
            scene.element_at(target_center, Some(0)),
            Some(SceneElement::AnimalTarget(1))
        );

        scene.items[0].consumed = true;
        scene.items[0].touch_offset = None;
        assert!(!scene.items[0].is_available());
        assert_eq!(scene.item_at(item_center), None);
        assert_eq!(scene.element_at(item_center, None), None);
    }

    #[test]
    fn test_touch_offset_scales_item() {
        let mut scene = Scene::render(&config(&["bear"], "donut"), 1);
        let home = scene.items[0].home;
        scene.items[0].touch_offset = Some((10, -20));
        let moved = scene.items[0].current_bounds();
        assert_eq!(moved.center(), home.center().offset(10, -20));
        assert!(moved.width() > home.width());
    }

    #[test]
    fn test_enclosing_target() {
        assert_eq!(SceneElement::AnimalTarget(3).enclosing_target(), Some(3));
        assert_eq!(SceneElement::FoodItem(0).enclosing_target(), None);
    }
}
