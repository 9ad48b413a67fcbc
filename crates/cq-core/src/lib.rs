//! Core types for Colloquy: dialogue trees, question branches, and interactables.
//!
//! This crate holds the authored, read-only side of the engine. A [`Library`]
//! is loaded once (usually from JSON) and then shared by every interactable
//! instance; nothing in here mutates after load.

/// Error types used throughout the crate.
pub mod error;
/// Simple interactable descriptors (inspectable objects, save points).
pub mod interactable;
pub mod library;
/// Conversation, dialogue, subtitle and question nodes.
pub mod node;
/// A single instance's dialogue script and its lookups.
pub mod script;
pub mod validate;

/// Re-export error types.
pub use error::{CqError, CqResult};
/// Re-export interactable types.
pub use interactable::{InteractableInfo, ItemType};
/// Re-export library types.
pub use library::{Library, Placement};
/// Re-export node types.
pub use node::{ConversationNode, DialogueNode, Position, QuestionNode, SubtitleNode, VoiceClip};
/// Re-export the script type.
pub use script::DialogueScript;
/// Re-export validation types.
pub use validate::{Severity, ValidationIssue, validate_library, validate_script};
