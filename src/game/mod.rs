// Game module - Scene controller and everything that drives it
//
// This module contains:
// - controller.rs: SceneController, the single owner of all game state
// - events.rs: Input action handling (routes GameActions to the controller)
// - layout.rs: Screen-space rectangles for buttons and the settings modal

pub mod controller;
pub mod events;
pub mod layout;

pub use controller::SceneController;
pub use events::LoopControl;
