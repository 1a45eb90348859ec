//! Procedural fanfare
//!
//! Four ascending notes (C5 E5 G5 C6), each a sine with an exponential
//! decay, started a fixed offset apart and mixed into one mono buffer. No
//! audio file is needed.

use std::f32::consts::TAU;
use std::time::Duration;

pub const SAMPLE_RATE: i32 = 44_100;

/// Note frequencies in Hz, lowest first
pub const ARPEGGIO_HZ: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];
/// Start-to-start spacing between notes
pub const NOTE_STAGGER: Duration = Duration::from_millis(120);
/// How long each note rings
pub const NOTE_LENGTH: Duration = Duration::from_millis(450);

/// Peak amplitude of a single note
const NOTE_GAIN: f32 = 0.25;
/// Envelope reaches e^-DECAY_RATE at the end of the note
const DECAY_RATE: f32 = 6.0;

/// Renders the whole arpeggio at `sample_rate`
pub fn render_arpeggio(sample_rate: i32) -> Vec<f32> {
    let rate = sample_rate.max(1) as f32;
    let stagger = (NOTE_STAGGER.as_secs_f32() * rate) as usize;
    let note_len = (NOTE_LENGTH.as_secs_f32() * rate) as usize;
    let total = stagger * (ARPEGGIO_HZ.len() - 1) + note_len;

    let mut buffer = vec![0.0f32; total];
    for (index, &frequency) in ARPEGGIO_HZ.iter().enumerate() {
        let offset = index * stagger;
        for (n, sample) in buffer[offset..offset + note_len].iter_mut().enumerate() {
            let t = n as f32 / rate;
            let envelope = (-DECAY_RATE * t / NOTE_LENGTH.as_secs_f32()).exp();
            *sample += NOTE_GAIN * envelope * (TAU * frequency * t).sin();
        }
    }
    buffer
}

/// Scales samples in place
pub fn apply_volume(samples: &mut [f32], volume: f32) {
    for sample in samples {
        *sample *= volume;
    }
}
