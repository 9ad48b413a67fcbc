use std::collections::VecDeque;

use cq_core::{ItemType, Position};
use cq_dialogue::Phase;

use crate::stage::InstanceId;

/// What kind of stage event occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum StageEventKind {
    /// An instance changed phase.
    PhaseChanged {
        /// Previous phase.
        from: Phase,
        /// New phase.
        to: Phase,
    },
    /// A line began revealing.
    LineStarted {
        /// Position of the line.
        position: Position,
        /// Speaker of the line.
        speaker: String,
    },
    /// A question was displayed.
    QuestionShown {
        /// Option labels in order.
        options: Vec<String>,
    },
    /// A conversation branched.
    Branched {
        /// Position of the asking line.
        from: Position,
        /// Start of the target conversation.
        to: Position,
        /// Option that matched.
        option: u8,
    },
    /// An item's question was answered.
    Answered {
        /// `true` for yes.
        accepted: bool,
        /// Type of the item.
        item_type: ItemType,
    },
    /// A save item was accepted.
    SaveRequested,
    /// An instance was exhausted.
    Finished,
    /// An instance reset for a repeat.
    Reset,
}

/// A record of something that happened on the stage.
#[derive(Debug, Clone)]
pub struct StageEvent {
    /// The stage tick when this event occurred.
    pub tick: u64,
    /// The instance involved.
    pub instance: InstanceId,
    /// The specific kind of event that occurred.
    pub kind: StageEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl StageEvent {
    /// Create a new event.
    pub fn new(
        tick: u64,
        instance: InstanceId,
        kind: StageEventKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            tick,
            instance,
            kind,
            description: description.into(),
        }
    }
}

/// Recent stage events, oldest first.
///
/// With a nonzero limit only the latest `limit` events are kept; the rest
/// are counted in [`EventLog::dropped`].
#[derive(Debug, Default)]
pub struct EventLog {
    events: VecDeque<StageEvent>,
    limit: usize,
    dropped: usize,
}

impl EventLog {
    /// An empty log keeping at most `limit` events (0 = unlimited).
    pub fn new(limit: usize) -> Self {
        Self {
            events: VecDeque::new(),
            limit,
            dropped: 0,
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: StageEvent) {
        if self.limit > 0 && self.events.len() == self.limit {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    /// Retained events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &StageEvent> + '_ {
        self.events.iter()
    }

    /// Retained events involving one instance.
    pub fn events_for(&self, instance: InstanceId) -> impl Iterator<Item = &StageEvent> + '_ {
        self.iter().filter(move |e| e.instance == instance)
    }

    /// How many events were pushed out by the limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are retained.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
