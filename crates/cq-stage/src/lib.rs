//! Tick-driven stage for Colloquy interactables.
//!
//! A [`Stage`] owns every instance spawned from a [`cq_core::Library`],
//! decides which one has focus when the player overlaps several, routes
//! overlap, interact, option and tick input, and records what happened in
//! an [`EventLog`].

/// Stage clock for tracking ticks and elapsed seconds.
pub mod clock;
/// Configuration types for a stage.
pub mod config;
/// Error types for the stage crate.
pub mod error;
/// Stage event types and the event log.
pub mod event;
pub mod focus;
/// Top-level stage orchestrator.
pub mod stage;

/// Re-export of [`clock::StageClock`].
pub use clock::StageClock;
/// Re-exports of [`config::FocusPolicy`] and [`config::StageConfig`].
pub use config::{FocusPolicy, StageConfig};
/// Re-exports of [`error::StageError`] and [`error::StageResult`].
pub use error::{StageError, StageResult};
/// Re-exports of [`event::EventLog`], [`event::StageEvent`], and [`event::StageEventKind`].
pub use event::{EventLog, StageEvent, StageEventKind};
/// Re-export of [`focus::Overlaps`].
pub use focus::Overlaps;
/// Re-exports of [`stage::InstanceId`] and [`stage::Stage`].
pub use stage::{InstanceId, Stage};
