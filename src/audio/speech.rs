//! Spoken feedback
//!
//! Uses the platform speech engine through `tts` where the crate is built
//! (not on Linux, where it would need speech-dispatcher at build time).
//! Each new phrase interrupts the previous one, so at most one utterance
//! is ever queued.

/// Language the phrases are written for
#[cfg(not(target_os = "linux"))]
pub const SPEECH_LANGUAGE: &str = "ja";

#[cfg(not(target_os = "linux"))]
pub struct Speaker {
    engine: Option<tts::Tts>,
}

#[cfg(not(target_os = "linux"))]
impl Speaker {
    pub fn new() -> Self {
        let engine = match tts::Tts::default() {
            Ok(mut engine) => {
                select_voice(&mut engine);
                Some(engine)
            }
            Err(e) => {
                tracing::debug!("Speech unavailable: {}", e);
                None
            }
        };
        Speaker { engine }
    }

    pub fn speak(&mut self, phrase: &str) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        // interrupt = true cancels whatever is still being spoken
        if let Err(e) = engine.speak(phrase, true) {
            tracing::debug!("Speech failed: {}", e);
        }
    }
}

#[cfg(not(target_os = "linux"))]
fn select_voice(engine: &mut tts::Tts) {
    let voices = match engine.voices() {
        Ok(voices) => voices,
        Err(e) => {
            tracing::debug!("Could not list voices: {}", e);
            return;
        }
    };
    let preferred = voices
        .iter()
        .find(|voice| voice.language().to_string().starts_with(SPEECH_LANGUAGE));
    if let Some(voice) = preferred {
        if let Err(e) = engine.set_voice(voice) {
            tracing::debug!("Could not select voice: {}", e);
        }
    }
}

#[cfg(target_os = "linux")]
pub struct Speaker;

#[cfg(target_os = "linux")]
impl Speaker {
    pub fn new() -> Self {
        tracing::debug!("No speech engine on this platform; phrases will be skipped");
        Speaker
    }

    /// No engine on Linux, so the win count-up is silent here; the phrase
    /// only reaches the trace log
    pub fn speak(&mut self, phrase: &str) {
        tracing::trace!("(speech) {}", phrase);
    }
}

impl Default for Speaker {
    fn default() -> Self {
        Self::new()
    }
}

/// Phrase spoken for a count-up step ("いっこ", "にこ", ...)
pub fn count_phrase(count: u32) -> String {
    const NUMERALS: [&str; 10] = [
        "ぜろ", "いち", "に", "さん", "よん", "ご", "ろく", "なな", "はち", "きゅう",
    ];
    match count {
        1 => "いっこ".to_string(),
        6 => "ろっこ".to_string(),
        8 => "はっこ".to_string(),
        10 => "じゅっこ".to_string(),
        n if (n as usize) < NUMERALS.len() => format!("{}こ", NUMERALS[n as usize]),
        n => format!("{}こ", n),
    }
}
