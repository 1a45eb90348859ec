//! Sound effects, fanfare and speech
//!
//! Everything here is best-effort. Playback can fail for many reasons
//! (no audio device, missing file, no speech engine) and none of them
//! matter to the game: failures are logged at `debug` and dropped.
//!
//! # Available Components
//!
//! - [`AudioAdapter`] - the trait the controller talks to
//! - [`SdlAudio`] - SDL2 audio queues plus the platform speech engine
//! - [`synth`] - the procedurally generated fanfare

pub mod sdl_audio;
pub mod speech;
pub mod synth;

pub use sdl_audio::SdlAudio;

use crate::catalog::Animal;

/// Fire-and-forget audio output
///
/// None of these return errors. An implementation that cannot play
/// something just doesn't.
pub trait AudioAdapter {
    /// Plays the short cue for an animal that has just been fed
    fn play_animal_cue(&mut self, animal: &Animal);

    /// Plays the synthesized celebration arpeggio
    fn play_fanfare(&mut self);

    /// Speaks a short phrase, cancelling anything still being spoken
    fn speak(&mut self, phrase: &str);

    /// Called once per frame to release finished playback
    fn update(&mut self) {}
}

/// Records every request instead of playing it
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub cues: Vec<String>,
    pub fanfares: u32,
    pub phrases: Vec<String>,
}

#[cfg(test)]
impl AudioAdapter for RecordingAudio {
    fn play_animal_cue(&mut self, animal: &Animal) {
        self.cues.push(animal.id.to_string());
    }

    fn play_fanfare(&mut self) {
        self.fanfares += 1;
    }

    fn speak(&mut self, phrase: &str) {
        self.phrases.push(phrase.to_string());
    }
}
