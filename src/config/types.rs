//! Configuration record for the feeding game
//!
//! The record is stored as JSON with camelCase keys:
//! `{ "activeAnimals": ["bear"], "isRandom": false, "foodType": "donut" }`.

use crate::catalog::{self, DEFAULT_ANIMAL, DEFAULT_FOOD};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which animals appear, which food they get, and whether the set is rolled randomly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    pub active_animals: Vec<String>,
    pub is_random: bool,
    pub food_type: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            active_animals: vec![DEFAULT_ANIMAL.to_string()],
            is_random: false,
            food_type: DEFAULT_FOOD.to_string(),
        }
    }
}

impl Configuration {
    /// Parses a persisted record, merging each field onto the defaults
    ///
    /// A field that is missing or has the wrong shape keeps its default value.
    /// A payload that is not a JSON object yields the defaults. Never fails.
    pub fn from_json_lossy(json: &str) -> Self {
        let mut config = Configuration::default();

        let value: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Discarding malformed configuration: {}", e);
                return config;
            }
        };

        let Some(fields) = value.as_object() else {
            tracing::warn!("Discarding configuration that is not an object");
            return config;
        };

        if let Some(active) = field::<Vec<String>>(fields, "activeAnimals") {
            config.active_animals = active;
        }
        if let Some(is_random) = field::<bool>(fields, "isRandom") {
            config.is_random = is_random;
        }
        if let Some(food) = field::<String>(fields, "foodType") {
            config.food_type = food;
        }

        config.normalized()
    }

    /// Serializes the record for the key-value store
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Drops unknown and repeated animals, replaces an unknown food, and
    /// restores the default animal when nothing valid is left
    pub fn normalized(mut self) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(self.active_animals.len());
        for id in self.active_animals.drain(..) {
            if catalog::animal(&id).is_some() && !seen.contains(&id) {
                seen.push(id);
            }
        }
        if seen.is_empty() {
            seen.push(DEFAULT_ANIMAL.to_string());
        }
        self.active_animals = seen;

        if catalog::food_type(&self.food_type).is_none() {
            self.food_type = DEFAULT_FOOD.to_string();
        }

        self
    }
}

fn field<T: DeserializeOwned>(fields: &serde_json::Map<String, Value>, key: &str) -> Option<T> {
    let raw = fields.get(key)?;
    match serde_json::from_value(raw.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!("Ignoring field '{}': {}", key, e);
            None
        }
    }
}
