//! Dialogue traversal engine for Colloquy.
//!
//! Walks the authored tree from `cq-core` with a per-instance [`Cursor`],
//! reveals each line through a tick-driven [`Typewriter`], resolves question
//! branches, and wraps it all in the five-phase interaction lifecycle shared
//! by conversations and simple inspectable objects.
//!
//! Nothing here reports runtime errors. Triggers that do not fit the current
//! state, out-of-range positions and unmatched options are ignored.

pub mod config;
pub mod conversation;
pub mod cursor;
pub mod interactable;
pub mod leaf;
pub mod phase;
pub mod resolver;
pub mod signal;
pub mod sink;
pub mod typewriter;

pub use config::{DialogueConfig, SkipAudio};
pub use conversation::Conversation;
pub use cursor::{Advance, Cursor};
pub use interactable::{Capability, Interactable};
pub use leaf::Leaf;
pub use phase::Phase;
pub use signal::Signal;
pub use sink::{AudioSink, NullSink, Sinks, TextSink, Transcript, TranscriptEntry};
pub use typewriter::{Reveal, RevealedLetter, Typewriter};
