//! Leaf capability: simple inspectable objects.
//!
//! An item shows its name when the player comes into range, its description
//! on interact, and optionally asks a yes/no question answered with option
//! `1` (yes) or `2` (no).

use cq_core::InteractableInfo;

use crate::cursor::NO_SELECTION;
use crate::phase::Phase;
use crate::signal::Signal;
use crate::sink::Sinks;

/// Option code for "yes".
pub const ACCEPT: u8 = 1;
/// Option code for "no".
pub const DECLINE: u8 = 2;

/// State of one inspectable object.
#[derive(Debug, Clone)]
pub struct Leaf {
    info: InteractableInfo,
    choice: u8,
    answer: Option<bool>,
    exhausted: bool,
    options: Vec<String>,
}

impl Leaf {
    /// Wrap an item descriptor.
    pub fn new(info: InteractableInfo) -> Self {
        Self {
            info,
            choice: NO_SELECTION,
            answer: None,
            exhausted: false,
            options: vec!["Yes".to_string(), "No".to_string()],
        }
    }

    /// The item descriptor.
    pub fn info(&self) -> &InteractableInfo {
        &self.info
    }

    /// Last answer given, if any.
    pub fn answer(&self) -> Option<bool> {
        self.answer
    }

    /// Pending option code.
    pub fn choice(&self) -> u8 {
        self.choice
    }

    /// Labels of the yes/no question.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Whether the item has reached its exit and not been reset.
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub(crate) fn overlapped(&self, sinks: &mut Sinks<'_>) {
        sinks.text.item_named(&self.info.name);
    }

    pub(crate) fn activated(&self, sinks: &mut Sinks<'_>) {
        sinks.text.item_described(&self.info.description);
    }

    /// Interact while engaged. Returns the phase to move to, if any.
    pub(crate) fn interact(
        &mut self,
        phase: Phase,
        sinks: &mut Sinks<'_>,
        signals: &mut Vec<Signal>,
    ) -> Option<Phase> {
        match phase {
            Phase::Active if self.info.has_question => {
                sinks.text.options_shown(&self.options);
                signals.push(Signal::QuestionShown {
                    position: None,
                    options: self.options.clone(),
                });
                Some(Phase::Question)
            }
            Phase::Active => Some(Phase::Exit),
            Phase::Question => self.apply_choice(sinks, signals),
            _ => None,
        }
    }

    /// Record an option. Applied at once while the question is up.
    pub(crate) fn choose(
        &mut self,
        phase: Phase,
        option: u8,
        sinks: &mut Sinks<'_>,
        signals: &mut Vec<Signal>,
    ) -> Option<Phase> {
        match phase {
            Phase::Active => {
                self.choice = option;
                None
            }
            Phase::Question => {
                self.choice = option;
                self.apply_choice(sinks, signals)
            }
            _ => None,
        }
    }

    fn apply_choice(&mut self, sinks: &mut Sinks<'_>, signals: &mut Vec<Signal>) -> Option<Phase> {
        let accepted = match self.choice {
            ACCEPT => true,
            DECLINE => false,
            _ => {
                self.choice = NO_SELECTION;
                return None;
            }
        };
        log::debug!("'{}' answered {}", self.info.name, if accepted { "yes" } else { "no" });
        self.answer = Some(accepted);
        sinks.text.answered(accepted);
        signals.push(Signal::Answered {
            accepted,
            item_type: self.info.item_type,
        });
        Some(Phase::Exit)
    }

    pub(crate) fn exit(&mut self) {
        self.exhausted = true;
    }

    pub(crate) fn reset(&mut self) {
        self.choice = NO_SELECTION;
        self.answer = None;
        self.exhausted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{NullSink, Transcript, TranscriptEntry};
    use cq_core::ItemType;

    fn crystal() -> Leaf {
        Leaf::new(
            InteractableInfo::new(1, "Crystal")
                .with_description("It hums.")
                .with_type(ItemType::Save)
                .with_question(),
        )
    }

    #[test]
    fn question_then_accept() {
        let mut leaf = crystal();
        let (mut audio, mut text) = (Transcript::new(), Transcript::new());
        let mut signals = Vec::new();
        {
            let mut sinks = Sinks::new(&mut audio, &mut text);
            let next = leaf.interact(Phase::Active, &mut sinks, &mut signals);
            assert_eq!(next, Some(Phase::Question));

            let next = leaf.choose(Phase::Question, ACCEPT, &mut sinks, &mut signals);
            assert_eq!(next, Some(Phase::Exit));
        }
        assert_eq!(leaf.answer(), Some(true));
        assert!(signals.contains(&Signal::Answered {
            accepted: true,
            item_type: ItemType::Save
        }));
        assert!(text.entries().contains(&TranscriptEntry::Answer(true)));
    }

    #[test]
    fn invalid_option_clears_choice() {
        let mut leaf = crystal();
        let mut null = NullSink;
        let mut null_text = NullSink;
        let mut sinks = Sinks::new(&mut null, &mut null_text);
        let mut signals = Vec::new();

        let next = leaf.choose(Phase::Question, 3, &mut sinks, &mut signals);
        assert_eq!(next, None);
        assert_eq!(leaf.choice(), NO_SELECTION);
        assert!(signals.is_empty());
    }

    #[test]
    fn choice_stored_early_applies_on_interact() {
        let mut leaf = crystal();
        let mut null = NullSink;
        let mut null_text = NullSink;
        let mut sinks = Sinks::new(&mut null, &mut null_text);
        let mut signals = Vec::new();

        assert_eq!(leaf.choose(Phase::Active, DECLINE, &mut sinks, &mut signals), None);
        leaf.interact(Phase::Active, &mut sinks, &mut signals);
        let next = leaf.interact(Phase::Question, &mut sinks, &mut signals);
        assert_eq!(next, Some(Phase::Exit));
        assert_eq!(leaf.answer(), Some(false));
    }

    #[test]
    fn without_question_goes_straight_to_exit() {
        let mut leaf = Leaf::new(InteractableInfo::new(2, "Sign"));
        let mut null = NullSink;
        let mut null_text = NullSink;
        let mut sinks = Sinks::new(&mut null, &mut null_text);
        let mut signals = Vec::new();

        assert_eq!(
            leaf.interact(Phase::Active, &mut sinks, &mut signals),
            Some(Phase::Exit)
        );
        assert_eq!(leaf.interact(Phase::Overlapping, &mut sinks, &mut signals), None);
    }
}
