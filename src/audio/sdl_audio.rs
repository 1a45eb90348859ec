//! SDL2 audio backend
//!
//! Every sound gets its own `AudioQueue` so cues overlap instead of
//! waiting for each other. Queues are dropped once they have drained.
//! WAV files are converted once to mono f32 at [`SAMPLE_RATE`] and cached.

use super::speech::Speaker;
use super::synth::{self, SAMPLE_RATE};
use super::AudioAdapter;
use crate::catalog::Animal;
use sdl2::audio::{AudioCVT, AudioFormat, AudioQueue, AudioSpecDesired, AudioSpecWAV};
use sdl2::AudioSubsystem;
use std::collections::HashMap;

/// Volume for animal cues
const CUE_VOLUME: f32 = 0.6;
/// Volume for the fanfare
const FANFARE_VOLUME: f32 = 0.4;

pub struct SdlAudio {
    subsystem: Option<AudioSubsystem>,
    playing: Vec<AudioQueue<f32>>,
    cue_cache: HashMap<&'static str, Vec<f32>>,
    fanfare: Vec<f32>,
    speaker: Speaker,
}

impl SdlAudio {
    /// Creates the backend; `None` means "no audio device", and every
    /// sound request becomes a no-op
    pub fn new(subsystem: Option<AudioSubsystem>) -> Self {
        let mut fanfare = synth::render_arpeggio(SAMPLE_RATE);
        synth::apply_volume(&mut fanfare, FANFARE_VOLUME);

        SdlAudio {
            subsystem,
            playing: Vec::new(),
            cue_cache: HashMap::new(),
            fanfare,
            speaker: Speaker::new(),
        }
    }

    fn play_samples(&mut self, samples: &[f32]) -> Result<(), String> {
        let Some(subsystem) = self.subsystem.as_ref() else {
            return Ok(());
        };

        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let queue = subsystem.open_queue::<f32, _>(None, &desired)?;
        queue.queue_audio(samples)?;
        queue.resume();
        self.playing.push(queue);
        Ok(())
    }

    fn cue_samples(&mut self, animal: &Animal) -> Result<&[f32], String> {
        if !self.cue_cache.contains_key(animal.sound) {
            let samples = load_wav_mono_f32(animal.sound)?;
            self.cue_cache.insert(animal.sound, samples);
        }
        Ok(self
            .cue_cache
            .get(animal.sound)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }
}

impl AudioAdapter for SdlAudio {
    fn play_animal_cue(&mut self, animal: &Animal) {
        if self.subsystem.is_none() {
            return;
        }
        let samples = match self.cue_samples(animal) {
            Ok(samples) => samples.to_vec(),
            Err(e) => {
                tracing::debug!("No sound for {}: {}", animal.name, e);
                return;
            }
        };
        if let Err(e) = self.play_samples(&samples) {
            tracing::debug!("Could not play sound for {}: {}", animal.name, e);
        }
    }

    fn play_fanfare(&mut self) {
        let fanfare = std::mem::take(&mut self.fanfare);
        if let Err(e) = self.play_samples(&fanfare) {
            tracing::debug!("Could not play fanfare: {}", e);
        }
        self.fanfare = fanfare;
    }

    fn speak(&mut self, phrase: &str) {
        self.speaker.speak(phrase);
    }

    fn update(&mut self) {
        self.playing.retain(|queue| queue.size() > 0);
    }
}

/// Loads a WAV file and converts it to mono f32 samples at `SAMPLE_RATE`
fn load_wav_mono_f32(path: &str) -> Result<Vec<f32>, String> {
    let wav = AudioSpecWAV::load_wav(path)?;
    let cvt = AudioCVT::new(
        wav.format,
        wav.channels,
        wav.freq,
        AudioFormat::F32LSB,
        1,
        SAMPLE_RATE,
    )?;
    let bytes = cvt.convert(wav.buffer().to_vec());

    let mut samples: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    synth::apply_volume(&mut samples, CUE_VOLUME);
    Ok(samples)
}
