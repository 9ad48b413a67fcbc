//! Timed character-by-character text reveal.
//!
//! The typewriter holds a single pending-reveal record instead of scheduling
//! callbacks. The owner drives it with [`Typewriter::tick`]; a large `dt`
//! reveals several characters, in order, within one call.

/// Remaining wait at or below this counts as elapsed.
const EPSILON: f64 = 1e-9;

/// One character made visible by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealedLetter {
    /// The character.
    pub ch: char,
    /// Index of the character within the line.
    pub index: usize,
    /// Whether it was revealed by a skip rather than by elapsed time.
    pub skipped: bool,
    /// Whether it is the first character of a skip.
    pub first_skipped: bool,
}

/// Outcome of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// No line is being revealed.
    Idle,
    /// Characters remain; waiting on the next delay.
    Pending,
    /// The last character was revealed during this tick.
    Completed,
}

/// Reveals one line of text over its authored duration.
#[derive(Debug, Clone, Default)]
pub struct Typewriter {
    letters: Vec<char>,
    visible: String,
    revealed: usize,
    delay: f64,
    pending: f64,
    skipping: bool,
    active: bool,
}

impl Typewriter {
    /// An idle typewriter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin revealing `text` over `duration` seconds.
    ///
    /// The per-letter delay is `duration / char_count`, and the first letter
    /// appears after one delay. Non-finite or negative durations reveal
    /// instantly. Call [`tick`](Self::tick) with `0.0` afterwards to flush
    /// lines that need no waiting.
    pub fn start(&mut self, text: &str, duration: f64) {
        self.letters = text.chars().collect();
        self.visible.clear();
        self.revealed = 0;
        self.delay = if self.letters.is_empty() || !duration.is_finite() || duration <= 0.0 {
            0.0
        } else {
            duration / self.letters.len() as f64
        };
        self.pending = self.delay;
        self.skipping = false;
        self.active = true;
    }

    /// Switch to skip mode: the next tick reveals the rest with no delay.
    ///
    /// Returns `false` (and does nothing) when idle, already complete or
    /// already skipping.
    pub fn skip(&mut self) -> bool {
        if !self.active || self.skipping || self.revealed >= self.letters.len() {
            return false;
        }
        self.skipping = true;
        self.pending = 0.0;
        true
    }

    /// Advance time by `dt` seconds, calling `on_letter` once per revealed
    /// character in index order.
    pub fn tick(&mut self, dt: f64, mut on_letter: impl FnMut(RevealedLetter)) -> Reveal {
        if !self.active {
            return Reveal::Idle;
        }

        if self.skipping {
            let first = self.revealed;
            while self.revealed < self.letters.len() {
                let index = self.revealed;
                self.reveal_next();
                on_letter(RevealedLetter {
                    ch: self.letters[index],
                    index,
                    skipped: true,
                    first_skipped: index == first,
                });
            }
        } else {
            self.pending -= dt.max(0.0);
            while self.pending <= EPSILON && self.revealed < self.letters.len() {
                let index = self.revealed;
                self.reveal_next();
                on_letter(RevealedLetter {
                    ch: self.letters[index],
                    index,
                    skipped: false,
                    first_skipped: false,
                });
                self.pending += self.delay;
            }
        }

        if self.revealed >= self.letters.len() {
            self.active = false;
            self.skipping = false;
            Reveal::Completed
        } else {
            Reveal::Pending
        }
    }

    fn reveal_next(&mut self) {
        self.visible.push(self.letters[self.revealed]);
        self.revealed += 1;
    }

    /// Text revealed so far.
    pub fn visible(&self) -> &str {
        &self.visible
    }

    /// Number of characters revealed so far.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Total characters in the current line.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Whether the current line has no characters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Whether a line is still being revealed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether skip mode is on.
    pub fn is_skipping(&self) -> bool {
        self.skipping
    }

    /// Seconds between consecutive letters of the current line.
    pub fn delay(&self) -> f64 {
        self.delay
    }
}
