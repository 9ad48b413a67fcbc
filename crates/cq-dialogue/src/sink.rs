//! Output interfaces for audio and text.
//!
//! The engine never talks to an audio device or a screen directly. Every
//! interactable call receives a [`Sinks`] bundle and reports through it;
//! the presentation layer decides what to do with the requests.

use cq_core::VoiceClip;

/// Fire-and-forget audio playback requests.
pub trait AudioSink {
    /// Request that `clip` be played once.
    fn play(&mut self, clip: &VoiceClip);
}

/// Text output from conversations and inspectable objects.
///
/// Every method defaults to doing nothing so implementors only override
/// what they display.
pub trait TextSink {
    /// A new line starts; `speaker` is the dialogue's speaker name.
    fn line_started(&mut self, _speaker: &str) {}

    /// One more character of the current line became visible.
    fn letter_revealed(&mut self, _letter: char) {}

    /// A question is displayed with these option labels.
    fn options_shown(&mut self, _labels: &[String]) {}

    /// The player came into range of an inspectable object.
    fn item_named(&mut self, _name: &str) {}

    /// The player inspected an object.
    fn item_described(&mut self, _description: &str) {}

    /// The player answered an object's yes/no question.
    fn answered(&mut self, _accepted: bool) {}
}

/// Borrowed audio and text sinks for one call into an interactable.
pub struct Sinks<'a> {
    /// Audio playback requests.
    pub audio: &'a mut dyn AudioSink,
    /// Text output.
    pub text: &'a mut dyn TextSink,
}

impl<'a> Sinks<'a> {
    /// Bundle an audio and a text sink.
    pub fn new(audio: &'a mut dyn AudioSink, text: &'a mut dyn TextSink) -> Self {
        Self { audio, text }
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _clip: &VoiceClip) {}
}

impl TextSink for NullSink {}

/// One recorded output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    /// A clip was requested.
    Audio(VoiceClip),
    /// A line started for a speaker.
    Line(String),
    /// A character was revealed.
    Letter(char),
    /// Question options were displayed.
    Options(Vec<String>),
    /// An object's name was shown.
    ItemName(String),
    /// An object's description was shown.
    ItemDescription(String),
    /// A yes/no question was answered.
    Answer(bool),
}

/// A sink that records every request in order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries in order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Take all recorded entries, leaving the transcript empty.
    pub fn drain(&mut self) -> Vec<TranscriptEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Number of audio requests recorded.
    pub fn audio_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, TranscriptEntry::Audio(_)))
            .count()
    }

    /// Every revealed character concatenated.
    pub fn letters(&self) -> String {
        self.entries
            .iter()
            .filter_map(|e| match e {
                TranscriptEntry::Letter(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Speakers of every started line, in order.
    pub fn speakers(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                TranscriptEntry::Line(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AudioSink for Transcript {
    fn play(&mut self, clip: &VoiceClip) {
        self.entries.push(TranscriptEntry::Audio(clip.clone()));
    }
}

impl TextSink for Transcript {
    fn line_started(&mut self, speaker: &str) {
        self.entries.push(TranscriptEntry::Line(speaker.to_string()));
    }

    fn letter_revealed(&mut self, letter: char) {
        self.entries.push(TranscriptEntry::Letter(letter));
    }

    fn options_shown(&mut self, labels: &[String]) {
        self.entries.push(TranscriptEntry::Options(labels.to_vec()));
    }

    fn item_named(&mut self, name: &str) {
        self.entries.push(TranscriptEntry::ItemName(name.to_string()));
    }

    fn item_described(&mut self, description: &str) {
        self.entries
            .push(TranscriptEntry::ItemDescription(description.to_string()));
    }

    fn answered(&mut self, accepted: bool) {
        self.entries.push(TranscriptEntry::Answer(accepted));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_records_in_order() {
        let mut t = Transcript::new();
        t.line_started("Guide");
        t.letter_revealed('H');
        t.play(&VoiceClip::new("blip"));
        t.letter_revealed('i');

        assert_eq!(t.entries().len(), 4);
        assert_eq!(t.letters(), "Hi");
        assert_eq!(t.speakers(), ["Guide"]);
        assert_eq!(t.audio_count(), 1);
    }

    #[test]
    fn drain_empties() {
        let mut t = Transcript::new();
        t.answered(true);
        assert_eq!(t.drain(), vec![TranscriptEntry::Answer(true)]);
        assert!(t.is_empty());
    }

    #[test]
    fn sinks_bundle_routes_to_both() {
        let mut audio = Transcript::new();
        let mut text = Transcript::new();
        {
            let mut sinks = Sinks::new(&mut audio, &mut text);
            sinks.audio.play(&VoiceClip::new("a"));
            sinks.text.item_named("Sign");
        }
        assert_eq!(audio.audio_count(), 1);
        assert_eq!(text.entries(), &[TranscriptEntry::ItemName("Sign".into())]);
    }
}
