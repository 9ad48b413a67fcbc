use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a voice clip, played once per revealed character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceClip(pub String);

impl VoiceClip {
    /// Create a clip reference from an asset name or path.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The asset name or path of this clip.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoiceClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `(conversation, dialogue, subtitle)` index triple into a script.
///
/// Positions are plain indices. Nothing guarantees that a position is in
/// range for a given script; lookups return `None` instead.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Index of the conversation within the script.
    pub conversation: usize,
    /// Index of the dialogue within the conversation.
    pub dialogue: usize,
    /// Index of the subtitle within the dialogue.
    pub subtitle: usize,
}

impl Position {
    /// The first subtitle of the first conversation.
    pub const START: Self = Self::new(0, 0, 0);

    /// Create a position from its three indices.
    pub const fn new(conversation: usize, dialogue: usize, subtitle: usize) -> Self {
        Self {
            conversation,
            dialogue,
            subtitle,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.conversation, self.dialogue, self.subtitle
        )
    }
}

/// One line of text with a reveal duration and an optional question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleNode {
    /// Authored identifier, unique within the parent dialogue.
    pub id: u32,
    /// The text revealed by the typewriter.
    pub text: String,
    /// Seconds taken to reveal the full text.
    #[serde(default)]
    pub duration: f64,
    /// Whether the line ends in a question that branches the conversation.
    #[serde(default)]
    pub has_question: bool,
    /// Clip requested once per revealed character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceClip>,
}

impl SubtitleNode {
    /// Create a subtitle with no duration, question, or voice.
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            duration: 0.0,
            has_question: false,
            voice: None,
        }
    }

    /// Set the full reveal duration in seconds.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Mark this line as asking a question.
    pub fn with_question(mut self) -> Self {
        self.has_question = true;
        self
    }

    /// Attach a voice clip.
    pub fn with_voice(mut self, clip: impl Into<String>) -> Self {
        self.voice = Some(VoiceClip::new(clip));
        self
    }

    /// Number of characters the typewriter reveals for this line.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// One speaker's block of subtitles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    /// Authored identifier, unique within the parent conversation.
    pub id: u32,
    /// Name shown alongside every line in this block.
    pub speaker: String,
    /// Lines in reveal order.
    #[serde(default)]
    pub subtitles: Vec<SubtitleNode>,
}

impl DialogueNode {
    /// Create an empty dialogue for a speaker.
    pub fn new(id: u32, speaker: impl Into<String>) -> Self {
        Self {
            id,
            speaker: speaker.into(),
            subtitles: Vec::new(),
        }
    }

    /// Append a subtitle.
    pub fn with_subtitle(mut self, subtitle: SubtitleNode) -> Self {
        self.subtitles.push(subtitle);
        self
    }
}

/// Root of one conversation: an ordered list of dialogues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationNode {
    /// Authored identifier, unique within the script.
    pub id: u32,
    /// Dialogues in traversal order.
    #[serde(default)]
    pub dialogues: Vec<DialogueNode>,
}

impl ConversationNode {
    /// Create an empty conversation.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            dialogues: Vec::new(),
        }
    }

    /// Append a dialogue.
    pub fn with_dialogue(mut self, dialogue: DialogueNode) -> Self {
        self.dialogues.push(dialogue);
        self
    }
}

/// A labelled branch answering one subtitle.
///
/// Selecting `option` while the cursor sits on the referenced subtitle jumps
/// to the start of conversation `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionNode {
    /// Label shown to the player.
    pub label: String,
    /// Choice code the player selects (`0` means "no selection").
    pub option: u8,
    /// Conversation index of the subtitle this answers.
    pub conversation: usize,
    /// Dialogue index of the subtitle this answers.
    pub dialogue: usize,
    /// Subtitle index of the subtitle this answers.
    pub subtitle: usize,
    /// Conversation to jump to when selected.
    pub target: usize,
}

impl QuestionNode {
    /// Create a question answering the subtitle at `at`.
    pub fn new(label: impl Into<String>, option: u8, at: Position, target: usize) -> Self {
        Self {
            label: label.into(),
            option,
            conversation: at.conversation,
            dialogue: at.dialogue,
            subtitle: at.subtitle,
            target,
        }
    }

    /// The subtitle this question answers.
    pub fn reference(&self) -> Position {
        Position::new(self.conversation, self.dialogue, self.subtitle)
    }

    /// Whether this question is offered at `position`.
    pub fn is_offered_at(&self, position: Position) -> bool {
        self.reference() == position
    }

    /// Whether choosing `option` at `position` selects this question.
    pub fn matches(&self, position: Position, option: u8) -> bool {
        self.option == option && self.is_offered_at(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtitle_builder() {
        let sub = SubtitleNode::new(3, "Héllo")
            .with_duration(1.5)
            .with_question()
            .with_voice("blip.wav");

        assert_eq!(sub.id, 3);
        assert_eq!(sub.char_count(), 5);
        assert!(sub.has_question);
        assert_eq!(sub.voice.as_ref().map(VoiceClip::as_str), Some("blip.wav"));
    }

    #[test]
    fn question_matching_needs_all_four_fields() {
        let q = QuestionNode::new("Sure", 1, Position::new(0, 2, 1), 3);

        assert!(q.matches(Position::new(0, 2, 1), 1));
        assert!(!q.matches(Position::new(0, 2, 1), 2));
        assert!(!q.matches(Position::new(1, 2, 1), 1));
        assert!(!q.matches(Position::new(0, 1, 1), 1));
        assert!(!q.matches(Position::new(0, 2, 0), 1));
        assert_eq!(q.reference(), Position::new(0, 2, 1));
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(1, 2, 3).to_string(), "(1, 2, 3)");
        assert_eq!(Position::START, Position::default());
    }

    #[test]
    fn subtitle_defaults_from_json() {
        let sub: SubtitleNode = serde_json::from_str(r#"{"id": 0, "text": "Hi"}"#).unwrap();
        assert_eq!(sub.duration, 0.0);
        assert!(!sub.has_question);
        assert!(sub.voice.is_none());
    }
}
