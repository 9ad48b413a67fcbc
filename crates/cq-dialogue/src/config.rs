//! Tunables for conversation playback.

use std::fmt;
use std::str::FromStr;

/// What the typewriter asks the audio sink to play while skipping a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkipAudio {
    /// One cue per skipped character, exactly like a normal reveal.
    #[default]
    PerLetter,
    /// A single cue for the whole skipped remainder.
    Once,
    /// No cues for skipped characters.
    Silent,
}

impl fmt::Display for SkipAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerLetter => write!(f, "per-letter"),
            Self::Once => write!(f, "once"),
            Self::Silent => write!(f, "silent"),
        }
    }
}

impl FromStr for SkipAudio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-letter" | "per_letter" | "letter" => Ok(Self::PerLetter),
            "once" => Ok(Self::Once),
            "silent" | "none" => Ok(Self::Silent),
            other => Err(format!(
                "unknown skip audio policy '{other}' (expected per-letter, once, or silent)"
            )),
        }
    }
}

/// Playback configuration shared by every conversation on a stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogueConfig {
    /// Start the next line as soon as the previous one finishes (or a branch
    /// is taken) instead of waiting for another interact trigger.
    pub auto_continue: bool,
    /// Audio policy while skipping.
    pub skip_audio: SkipAudio,
}

impl DialogueConfig {
    /// Enable or disable automatic continuation between lines.
    pub fn with_auto_continue(mut self, auto_continue: bool) -> Self {
        self.auto_continue = auto_continue;
        self
    }

    /// Set the skip audio policy.
    pub fn with_skip_audio(mut self, skip_audio: SkipAudio) -> Self {
        self.skip_audio = skip_audio;
        self
    }
}
