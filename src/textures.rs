//! Texture bank
//!
//! Loads every animal and food image named by the catalog once at startup.
//! A file that fails to load is logged and left out; renderers then fall
//! back to a coloured placeholder.

use crate::catalog::{ANIMALS, FOOD_TYPES};
use sdl2::image::LoadTexture;
use sdl2::render::{Texture, TextureCreator};
use sdl2::video::WindowContext;
use std::collections::HashMap;

pub struct TextureBank<'a> {
    textures: HashMap<&'static str, Texture<'a>>,
}

impl<'a> TextureBank<'a> {
    /// Loads all catalog images; never fails as a whole
    pub fn load(texture_creator: &'a TextureCreator<WindowContext>) -> Self {
        let mut textures = HashMap::new();
        for path in catalog_images() {
            match load_texture(texture_creator, path) {
                Ok(texture) => {
                    textures.insert(path, texture);
                }
                Err(e) => tracing::warn!("{}; drawing a placeholder instead", e),
            }
        }
        tracing::info!("Loaded {} textures", textures.len());
        TextureBank { textures }
    }

    pub fn get(&self, path: &str) -> Option<&Texture<'a>> {
        self.textures.get(path)
    }

    /// Mutable access, for per-draw alpha changes
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Texture<'a>> {
        self.textures.get_mut(path)
    }
}

/// Loads a texture from the given path with consistent error handling
fn load_texture<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    path: &str,
) -> Result<Texture<'a>, String> {
    texture_creator
        .load_texture(path)
        .map_err(|e| format!("Failed to load {}: {}", path, e))
}

/// Every image path the catalog refers to, without duplicates
fn catalog_images() -> Vec<&'static str> {
    let mut paths: Vec<&'static str> = ANIMALS
        .iter()
        .flat_map(|animal| [animal.neutral_image, animal.happy_image])
        .chain(FOOD_TYPES.iter().map(|food| food.image))
        .collect();
    paths.sort_unstable();
    paths.dedup();
    paths
}
