//! Traversal cursor over a dialogue script.
//!
//! A cursor is the only mutable state a conversation keeps about the tree:
//! where it is, how far the current line has been revealed, which option the
//! player picked last, and three progress flags. It never wraps around; once
//! the last line is passed it stays `finished` until [`Cursor::reset`].

use cq_core::{DialogueScript, Position};

/// Option code meaning "nothing selected yet".
pub const NO_SELECTION: u8 = 0;

/// What [`Cursor::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next subtitle of the same dialogue.
    NextSubtitle,
    /// Moved to the first subtitle of a later dialogue.
    NextDialogue,
    /// No line left; the cursor is now finished.
    Finished,
    /// Not allowed right now (waiting on a line or a question).
    Held,
}

/// Mutable position and progress flags for one conversation instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    letter: usize,
    choice: u8,
    finished: bool,
    proceed: bool,
    in_question: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    /// A cursor at `(0, 0, 0)`, ready to show its first line.
    pub fn new() -> Self {
        Self {
            position: Position::START,
            letter: 0,
            choice: NO_SELECTION,
            finished: false,
            proceed: true,
            in_question: false,
        }
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Characters revealed so far on the current line.
    pub fn letter(&self) -> usize {
        self.letter
    }

    /// Latest option chosen by the player.
    pub fn choice(&self) -> u8 {
        self.choice
    }

    /// Whether the tree has been exhausted.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Whether the next interact trigger may show the line at the cursor.
    pub fn proceed(&self) -> bool {
        self.proceed
    }

    /// Whether a question is waiting for an answer.
    pub fn in_question(&self) -> bool {
        self.in_question
    }

    /// Jump unconditionally. Bounds are not checked here; readers of the
    /// script check them before dereferencing.
    pub fn set_position(&mut self, conversation: usize, dialogue: usize, subtitle: usize) {
        self.position = Position::new(conversation, dialogue, subtitle);
    }

    /// Move past the current line.
    ///
    /// Only effective when `proceed && !in_question`. Skips dialogues that
    /// have no subtitles so the cursor never lands outside the tree.
    pub fn advance(&mut self, script: &DialogueScript) -> Advance {
        if !self.proceed || self.in_question {
            return Advance::Held;
        }

        let Position {
            conversation,
            dialogue,
            subtitle,
        } = self.position;

        if subtitle + 1 < script.subtitle_count(conversation, dialogue) {
            self.position.subtitle += 1;
            self.letter = 0;
            return Advance::NextSubtitle;
        }

        let next_dialogue = (dialogue + 1..script.dialogue_count(conversation))
            .find(|&d| script.subtitle_count(conversation, d) > 0);

        match next_dialogue {
            Some(d) => {
                self.position = Position::new(conversation, d, 0);
                self.letter = 0;
                Advance::NextDialogue
            }
            None => {
                self.finished = true;
                Advance::Finished
            }
        }
    }

    /// Clear the per-line counters and get ready to proceed. Used after a
    /// branch jump.
    pub fn reset_iteration(&mut self) {
        self.letter = 0;
        self.choice = NO_SELECTION;
        self.in_question = false;
        self.proceed = true;
    }

    /// Return to `(0, 0, 0)` with every flag at its initial value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record the player's latest option.
    pub fn choose(&mut self, option: u8) {
        self.choice = option;
    }

    /// A line starts revealing: hold progress until it completes.
    pub fn begin_line(&mut self) {
        self.letter = 0;
        self.proceed = false;
    }

    /// One more character of the current line is visible.
    pub fn note_letter(&mut self) {
        self.letter += 1;
    }

    /// The current line finished revealing and asks a question.
    pub fn enter_question(&mut self) {
        self.proceed = false;
        self.in_question = true;
        self.letter = 0;
    }

    /// The current line finished revealing without a question.
    pub fn complete_line(&mut self) {
        self.proceed = true;
        self.in_question = false;
        self.letter = 0;
        self.choice = NO_SELECTION;
    }
}
