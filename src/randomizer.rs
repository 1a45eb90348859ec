//! Random animal selection for random mode

use crate::catalog::{self, DEFAULT_ANIMAL};
use crate::config::Configuration;
use rand::seq::SliceRandom;
use rand::Rng;

/// Upper bound on how many animals a random draw can contain
pub const MAX_RANDOM_ANIMALS: usize = 5;

/// Draws a random non-empty subset of `ids`
///
/// The size is uniform in `1..=min(5, ids.len())`. The identifiers are
/// fair-shuffled first, so every ordering of the chosen subset is equally likely.
pub fn random_subset<R: Rng + ?Sized>(ids: &[String], rng: &mut R) -> Vec<String> {
    if ids.is_empty() {
        return vec![DEFAULT_ANIMAL.to_string()];
    }

    let max = ids.len().min(MAX_RANDOM_ANIMALS);
    let count = rng.gen_range(1..=max);

    let mut shuffled = ids.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

/// Replaces the active animal set with a fresh draw from the whole catalog
pub fn apply_random_config<R: Rng + ?Sized>(config: &mut Configuration, rng: &mut R) {
    config.active_animals = random_subset(&catalog::animal_ids(), rng);
    tracing::debug!("Random animals: {:?}", config.active_animals);
}
