//! Screen-Space GUI System
//!
//! UI elements that render at fixed screen positions on top of the scene.
//! All of them use procedural rendering (SDL2 primitives and the bitmap font).
//!
//! # Available Components
//!
//! - [`SettingsMenu`] - Animal checklist, food selector, random toggle, SAVE
//! - [`NoticeDialog`] - One-time message box, dismissed by any input
//! - [`WinOverlay`] - Count-up icons, message and completion mark
//!
//! Shared drawing helpers and [`MenuStyle`] live in [`menu`].

pub mod menu;
pub mod notice;
pub mod settings_menu;
pub mod win_overlay;

pub use menu::{draw_button, MenuStyle};
pub use notice::NoticeDialog;
pub use settings_menu::SettingsMenu;
pub use win_overlay::WinOverlay;
