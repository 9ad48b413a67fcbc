use std::fmt;
use std::str::FromStr;

use cq_dialogue::DialogueConfig;

/// How the stage picks which overlapping instance receives input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusPolicy {
    /// The instance whose overlap began last.
    #[default]
    MostRecent,
    /// The instance with the smallest reported distance; ties go to the
    /// most recent overlap.
    Nearest,
}

impl fmt::Display for FocusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MostRecent => write!(f, "most-recent"),
            Self::Nearest => write!(f, "nearest"),
        }
    }
}

impl FromStr for FocusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "most-recent" | "most_recent" | "recent" => Ok(Self::MostRecent),
            "nearest" | "closest" => Ok(Self::Nearest),
            other => Err(format!(
                "unknown focus policy '{other}' (expected most-recent or nearest)"
            )),
        }
    }
}

/// Configuration for a stage.
#[derive(Debug, Clone, Default)]
pub struct StageConfig {
    /// Focus selection among overlapping instances.
    pub focus: FocusPolicy,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Playback settings handed to every conversation.
    pub dialogue: DialogueConfig,
}

impl StageConfig {
    /// Set the focus policy.
    pub fn with_focus(mut self, focus: FocusPolicy) -> Self {
        self.focus = focus;
        self
    }

    /// Set the maximum number of events to retain.
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the conversation playback settings.
    pub fn with_dialogue(mut self, dialogue: DialogueConfig) -> Self {
        self.dialogue = dialogue;
        self
    }
}
