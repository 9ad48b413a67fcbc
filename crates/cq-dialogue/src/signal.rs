//! Notifications emitted by interactables.

use cq_core::{ItemType, Position};

use crate::phase::Phase;

/// Something observable that happened during one call into an interactable.
///
/// Every event method returns the signals it produced, in order. The stage
/// turns them into log events; tests assert on them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// The phase changed.
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
        /// Speaker of the enclosing dialogue.
        speaker: String,
        /// Full text of the line.
        text: String,
    },
    /// A line finished revealing.
    LineCompleted {
        /// Position of the line.
        position: Position,
    },
    /// A question was displayed.
    QuestionShown {
        /// Position of the asking line; `None` for items.
        position: Option<Position>,
        /// Option labels in order.
        options: Vec<String>,
    },
    /// An option matched a question and the cursor jumped.
    Branched {
        /// Position of the asking line.
        from: Position,
        /// Start of the target conversation.
        to: Position,
        /// Option that matched.
        option: u8,
    },
    /// An item's yes/no question was answered.
    Answered {
        /// `true` for yes.
        accepted: bool,
        /// Type of the answered item.
        item_type: ItemType,
    },
    /// The instance has nothing more to show.
    Finished,
    /// The instance went back to its initial state for a repeat.
    Reset,
}
