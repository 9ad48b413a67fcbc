//! Conversation capability: tree traversal under the active phase.
//!
//! A conversation owns a [`Cursor`] and a [`Typewriter`] over a shared,
//! read-only script. Each interact trigger is dispatched on the cursor's
//! flags:
//!
//! | `proceed` | `in_question` | meaning                           |
//! |-----------|---------------|-----------------------------------|
//! | true      | false         | show the line at the cursor       |
//! | false     | true          | re-run the resolver               |
//! | false     | false         | skip the line being revealed      |
//!
//! Completing a line never recurses into the next one. Each step reports
//! whether another line should start right away and the caller loops.

use std::sync::Arc;

use cq_core::{DialogueScript, Position, VoiceClip};

use crate::config::{DialogueConfig, SkipAudio};
use crate::cursor::{Advance, Cursor};
use crate::resolver;
use crate::signal::Signal;
use crate::sink::Sinks;
use crate::typewriter::{Reveal, Typewriter};

/// Whether another line should start immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Stop,
    Continue,
}

/// Traversal state of one conversation instance.
#[derive(Debug, Clone)]
pub struct Conversation {
    script: Arc<DialogueScript>,
    cursor: Cursor,
    typewriter: Typewriter,
    speaker: String,
    voice: Option<VoiceClip>,
    options: Vec<String>,
    config: DialogueConfig,
}

impl Conversation {
    /// Start a conversation at the beginning of `script`.
    pub fn new(script: Arc<DialogueScript>, config: DialogueConfig) -> Self {
        Self {
            script,
            cursor: Cursor::new(),
            typewriter: Typewriter::new(),
            speaker: String::new(),
            voice: None,
            options: Vec::new(),
            config,
        }
    }

    /// The script being walked.
    pub fn script(&self) -> &DialogueScript {
        &self.script
    }

    /// The traversal cursor.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Playback configuration.
    pub fn config(&self) -> DialogueConfig {
        self.config
    }

    /// Speaker of the line being shown.
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    /// Text revealed so far on the current line.
    pub fn visible_text(&self) -> &str {
        self.typewriter.visible()
    }

    /// Labels of the question on screen, empty when there is none.
    pub fn question_options(&self) -> &[String] {
        &self.options
    }

    /// Current cursor position.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Whether the tree is exhausted.
    pub fn finished(&self) -> bool {
        self.cursor.finished()
    }

    /// Whether the next interact shows the line at the cursor.
    pub fn proceed(&self) -> bool {
        self.cursor.proceed()
    }

    /// Whether a question is waiting for an answer.
    pub fn in_question(&self) -> bool {
        self.cursor.in_question()
    }

    /// Whether a line is still being revealed.
    pub fn revealing(&self) -> bool {
        self.typewriter.is_active()
    }

    /// Handle an interact trigger.
    pub fn dispatch(&mut self, sinks: &mut Sinks<'_>, signals: &mut Vec<Signal>) {
        if self.cursor.finished() {
            return;
        }
        match (self.cursor.proceed(), self.cursor.in_question()) {
            (true, false) => self.follow(Flow::Continue, sinks, signals),
            (false, true) => {
                let flow = self.resolve_choice(signals);
                self.follow(flow, sinks, signals);
            }
            (false, false) => self.skip(sinks, signals),
            (true, true) => {}
        }
    }

    /// Record the player's option; resolved at once while a question is up.
    pub fn choose(&mut self, option: u8, sinks: &mut Sinks<'_>, signals: &mut Vec<Signal>) {
        self.cursor.choose(option);
        if self.cursor.in_question() {
            let flow = self.resolve_choice(signals);
            self.follow(flow, sinks, signals);
        }
    }

    /// Advance the typewriter by `dt` seconds.
    pub fn tick(&mut self, dt: f64, sinks: &mut Sinks<'_>, signals: &mut Vec<Signal>) {
        if !self.typewriter.is_active() {
            return;
        }
        let flow = self.pump(dt, sinks, signals);
        self.follow(flow, sinks, signals);
    }

    /// Return to the first line with every flag cleared.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.typewriter = Typewriter::new();
        self.speaker.clear();
        self.voice = None;
        self.options.clear();
    }

    fn skip(&mut self, sinks: &mut Sinks<'_>, signals: &mut Vec<Signal>) {
        if !self.typewriter.skip() {
            return;
        }
        log::debug!("skipping line at {}", self.cursor.position());
        let flow = self.pump(0.0, sinks, signals);
        self.follow(flow, sinks, signals);
    }

    fn follow(&mut self, mut flow: Flow, sinks: &mut Sinks<'_>, signals: &mut Vec<Signal>) {
        while flow == Flow::Continue && !self.cursor.finished() {
            flow = self.show_line(sinks, signals);
        }
    }

    fn show_line(&mut self, sinks: &mut Sinks<'_>, signals: &mut Vec<Signal>) -> Flow {
        let position = self.cursor.position();
        let script = Arc::clone(&self.script);
        let (Some(dialogue), Some(subtitle)) = (script.dialogue(position), script.subtitle(position))
        else {
            log::debug!("no line at {position}; interact ignored");
            return Flow::Stop;
        };

        self.speaker.clone_from(&dialogue.speaker);
        self.voice.clone_from(&subtitle.voice);
        self.options.clear();
        self.cursor.begin_line();
        self.typewriter.start(&subtitle.text, subtitle.duration);

        sinks.text.line_started(&self.speaker);
        signals.push(Signal::LineStarted {
            position,
            speaker: self.speaker.clone(),
            text: subtitle.text.clone(),
        });

        self.pump(0.0, sinks, signals)
    }

    fn pump(&mut self, dt: f64, sinks: &mut Sinks<'_>, signals: &mut Vec<Signal>) -> Flow {
        let skip_audio = self.config.skip_audio;
        let voice = &self.voice;
        let cursor = &mut self.cursor;

        let reveal = self.typewriter.tick(dt, |letter| {
            let play = match (letter.skipped, skip_audio) {
                (false, _) | (true, SkipAudio::PerLetter) => true,
                (true, SkipAudio::Once) => letter.first_skipped,
                (true, SkipAudio::Silent) => false,
            };
            if let (true, Some(clip)) = (play, voice) {
                sinks.audio.play(clip);
            }
            log::trace!("letter {} '{}'", letter.index, letter.ch);
            cursor.note_letter();
            sinks.text.letter_revealed(letter.ch);
        });

        match reveal {
            Reveal::Completed => self.complete_line(sinks, signals),
            Reveal::Pending | Reveal::Idle => Flow::Stop,
        }
    }

    fn complete_line(&mut self, sinks: &mut Sinks<'_>, signals: &mut Vec<Signal>) -> Flow {
        let position = self.cursor.position();
        signals.push(Signal::LineCompleted { position });

        let asks = self
            .script
            .subtitle(position)
            .is_some_and(|subtitle| subtitle.has_question);

        if asks {
            if !self.cursor.in_question() {
                self.options = resolver::options_for(&self.script.questions, position);
                sinks.text.options_shown(&self.options);
                signals.push(Signal::QuestionShown {
                    position: Some(position),
                    options: self.options.clone(),
                });
                self.cursor.enter_question();
            }
            return self.resolve_choice(signals);
        }

        self.cursor.complete_line();
        match self.cursor.advance(&self.script) {
            Advance::Finished => {
                log::debug!("conversation finished at {position}");
                Flow::Stop
            }
            Advance::Held => Flow::Stop,
            Advance::NextSubtitle | Advance::NextDialogue => self.continue_flow(),
        }
    }

    fn resolve_choice(&mut self, signals: &mut Vec<Signal>) -> Flow {
        let from = self.cursor.position();
        let option = self.cursor.choice();
        let Some(to) = resolver::resolve(&self.script.questions, from, option) else {
            return Flow::Stop;
        };

        log::debug!("option {option} at {from} branches to {to}");
        self.cursor
            .set_position(to.conversation, to.dialogue, to.subtitle);
        self.cursor.reset_iteration();
        self.options.clear();
        signals.push(Signal::Branched { from, to, option });
        self.continue_flow()
    }

    fn continue_flow(&self) -> Flow {
        if self.config.auto_continue {
            Flow::Continue
        } else {
            Flow::Stop
        }
    }
}
