//! Interactable instances and their capabilities.
//!
//! Every instance runs the same phase lifecycle. What happens inside the
//! engaged phases depends on its [`Capability`]: a [`Leaf`] shows a
//! description and an optional yes/no question, a [`Conversation`] walks a
//! dialogue tree.

use std::sync::Arc;

use cq_core::{DialogueScript, InteractableInfo, Position};

use crate::config::DialogueConfig;
use crate::conversation::Conversation;
use crate::leaf::Leaf;
use crate::phase::Phase;
use crate::signal::Signal;
use crate::sink::Sinks;

/// What an interactable does once engaged.
#[derive(Debug, Clone)]
pub enum Capability {
    /// A simple inspectable object.
    Leaf(Leaf),
    /// A dialogue tree.
    Tree(Box<Conversation>),
}

/// One interactable instance: phase lifecycle plus capability.
#[derive(Debug, Clone)]
pub struct Interactable {
    name: String,
    phase: Phase,
    allow_repeat: bool,
    capability: Capability,
}

impl Interactable {
    /// A conversation instance over a shared script. Repeats by default.
    pub fn conversation(
        name: impl Into<String>,
        script: Arc<DialogueScript>,
        config: DialogueConfig,
    ) -> Self {
        Self {
            name: name.into(),
            phase: Phase::NotOverlapping,
            allow_repeat: true,
            capability: Capability::Tree(Box::new(Conversation::new(script, config))),
        }
    }

    /// An inspectable object. Repeats unless it asks a question.
    pub fn item(info: InteractableInfo) -> Self {
        Self {
            name: info.name.clone(),
            phase: Phase::NotOverlapping,
            allow_repeat: !info.has_question,
            capability: Capability::Leaf(Leaf::new(info)),
        }
    }

    /// Override whether the instance resets after it is exhausted.
    pub fn with_repeat(mut self, allow_repeat: bool) -> Self {
        self.allow_repeat = allow_repeat;
        self
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the instance resets after it is exhausted.
    pub fn allow_repeat(&self) -> bool {
        self.allow_repeat
    }

    /// The capability variant.
    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// The conversation, if this is a tree.
    pub fn as_conversation(&self) -> Option<&Conversation> {
        match &self.capability {
            Capability::Tree(conversation) => Some(conversation),
            Capability::Leaf(_) => None,
        }
    }

    /// The item, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match &self.capability {
            Capability::Leaf(leaf) => Some(leaf),
            Capability::Tree(_) => None,
        }
    }

    /// Speaker of the current line, or the item's name.
    pub fn speaker(&self) -> &str {
        match &self.capability {
            Capability::Tree(conversation) => conversation.speaker(),
            Capability::Leaf(leaf) => &leaf.info().name,
        }
    }

    /// Revealed text of the current line, or the item's description while
    /// engaged.
    pub fn visible_text(&self) -> &str {
        match &self.capability {
            Capability::Tree(conversation) => conversation.visible_text(),
            Capability::Leaf(leaf) if self.phase.is_engaged() => &leaf.info().description,
            Capability::Leaf(_) => "",
        }
    }

    /// Whether the instance is exhausted.
    pub fn finished(&self) -> bool {
        match &self.capability {
            Capability::Tree(conversation) => conversation.finished(),
            Capability::Leaf(leaf) => leaf.exhausted(),
        }
    }

    /// Whether the next interact moves forward rather than skipping or
    /// answering.
    pub fn proceed(&self) -> bool {
        match &self.capability {
            Capability::Tree(conversation) => conversation.proceed(),
            Capability::Leaf(_) => self.phase != Phase::Question,
        }
    }

    /// Whether a question is waiting for an option.
    pub fn in_question(&self) -> bool {
        match &self.capability {
            Capability::Tree(conversation) => conversation.in_question(),
            Capability::Leaf(_) => self.phase == Phase::Question,
        }
    }

    /// Labels of the question on screen.
    pub fn question_options(&self) -> &[String] {
        match &self.capability {
            Capability::Tree(conversation) => conversation.question_options(),
            Capability::Leaf(leaf) if self.phase == Phase::Question => leaf.options(),
            Capability::Leaf(_) => &[],
        }
    }

    /// Cursor position; `None` for items.
    pub fn position(&self) -> Option<Position> {
        self.as_conversation().map(Conversation::position)
    }

    /// The player came into range.
    pub fn overlap_begin(&mut self, sinks: &mut Sinks<'_>) -> Vec<Signal> {
        let mut signals = Vec::new();
        if self.phase != Phase::NotOverlapping {
            return signals;
        }
        self.set_phase(Phase::Overlapping, &mut signals);
        if let Capability::Leaf(leaf) = &self.capability {
            leaf.overlapped(sinks);
        }
        signals
    }

    /// The player left range.
    pub fn overlap_end(&mut self) -> Vec<Signal> {
        let mut signals = Vec::new();
        if self.phase == Phase::Overlapping {
            self.set_phase(Phase::NotOverlapping, &mut signals);
        }
        signals
    }

    /// The interact trigger was pressed.
    pub fn interact(&mut self, sinks: &mut Sinks<'_>) -> Vec<Signal> {
        let mut signals = Vec::new();
        match self.phase {
            Phase::Overlapping => {
                if self.finished() {
                    log::debug!("'{}' is exhausted; interact ignored", self.name);
                    return signals;
                }
                self.set_phase(Phase::Active, &mut signals);
                match &mut self.capability {
                    Capability::Leaf(leaf) => leaf.activated(sinks),
                    Capability::Tree(conversation) => conversation.dispatch(sinks, &mut signals),
                }
                self.sync_tree_phase(&mut signals);
            }
            Phase::Active | Phase::Question => {
                let next = match &mut self.capability {
                    Capability::Leaf(leaf) => leaf.interact(self.phase, sinks, &mut signals),
                    Capability::Tree(conversation) => {
                        conversation.dispatch(sinks, &mut signals);
                        None
                    }
                };
                if let Some(next) = next {
                    self.set_phase(next, &mut signals);
                }
                self.sync_tree_phase(&mut signals);
            }
            Phase::NotOverlapping | Phase::Exit => {}
        }
        signals
    }

    /// The interact trigger was released.
    ///
    /// In `Exit`, a repeatable instance resets completely; any other
    /// instance just leaves the engaged phases and stays exhausted.
    pub fn finish(&mut self) -> Vec<Signal> {
        let mut signals = Vec::new();
        if self.phase != Phase::Exit {
            return signals;
        }
        if self.allow_repeat {
            log::debug!("'{}' resets for another run", self.name);
            match &mut self.capability {
                Capability::Leaf(leaf) => leaf.reset(),
                Capability::Tree(conversation) => conversation.reset(),
            }
            signals.push(Signal::Reset);
        }
        self.set_phase(Phase::NotOverlapping, &mut signals);
        signals
    }

    /// The player picked an option (`0` means none).
    pub fn choose_option(&mut self, option: u8, sinks: &mut Sinks<'_>) -> Vec<Signal> {
        let mut signals = Vec::new();
        if !matches!(self.phase, Phase::Active | Phase::Question) {
            return signals;
        }
        let next = match &mut self.capability {
            Capability::Leaf(leaf) => leaf.choose(self.phase, option, sinks, &mut signals),
            Capability::Tree(conversation) => {
                conversation.choose(option, sinks, &mut signals);
                None
            }
        };
        if let Some(next) = next {
            self.set_phase(next, &mut signals);
        }
        self.sync_tree_phase(&mut signals);
        signals
    }

    /// Advance time by `dt` seconds.
    pub fn tick(&mut self, dt: f64, sinks: &mut Sinks<'_>) -> Vec<Signal> {
        let mut signals = Vec::new();
        if let Capability::Tree(conversation) = &mut self.capability {
            conversation.tick(dt, sinks, &mut signals);
            self.sync_tree_phase(&mut signals);
        }
        signals
    }

    /// Derive the engaged phase of a tree from its cursor flags.
    fn sync_tree_phase(&mut self, signals: &mut Vec<Signal>) {
        let Capability::Tree(conversation) = &self.capability else {
            return;
        };
        if !matches!(self.phase, Phase::Active | Phase::Question) {
            return;
        }
        let target = if conversation.finished() {
            Phase::Exit
        } else if conversation.in_question() {
            Phase::Question
        } else {
            Phase::Active
        };
        self.set_phase(target, signals);
    }

    fn set_phase(&mut self, to: Phase, signals: &mut Vec<Signal>) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::debug!("'{}': {from} -> {to}", self.name);
        self.phase = to;
        signals.push(Signal::PhaseChanged { from, to });
        if to == Phase::Exit {
            if let Capability::Leaf(leaf) = &mut self.capability {
                leaf.exit();
            }
            signals.push(Signal::Finished);
        }
    }
}
