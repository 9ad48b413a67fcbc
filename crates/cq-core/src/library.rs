//! The static library of dialogue scripts and placements.
//!
//! A library is the only configuration the engine reads. It is loaded once,
//! before any interactable exists, and never changes afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CqError, CqResult};
use crate::interactable::InteractableInfo;
use crate::script::DialogueScript;

fn default_allow_repeat() -> bool {
    true
}

/// An interactable to spawn when a stage is built from the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// A conversation instance walking a named script.
    Conversation {
        /// Instance name, used by tools to address it.
        name: String,
        /// Key of the script in [`Library::scripts`].
        script: String,
        /// Whether the conversation restarts after it is exhausted.
        #[serde(default = "default_allow_repeat")]
        allow_repeat: bool,
    },
    /// A simple inspectable object.
    Item {
        /// What the object shows and asks.
        info: InteractableInfo,
    },
}

impl Placement {
    /// Build a conversation placement that allows repeats.
    pub fn conversation(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self::Conversation {
            name: name.into(),
            script: script.into(),
            allow_repeat: true,
        }
    }

    /// Build an item placement.
    pub fn item(info: InteractableInfo) -> Self {
        Self::Item { info }
    }

    /// Instance name of the placement.
    pub fn name(&self) -> &str {
        match self {
            Self::Conversation { name, .. } => name,
            Self::Item { info } => &info.name,
        }
    }
}

/// Named scripts plus the placements that use them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    /// Scripts keyed by name.
    #[serde(default)]
    pub scripts: BTreeMap<String, DialogueScript>,
    /// Interactables to spawn, in order.
    #[serde(default)]
    pub placements: Vec<Placement>,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a library from JSON text.
    pub fn from_json(json: &str) -> CqResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a library file.
    pub fn from_path(path: &Path) -> CqResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Add a script under `name`, replacing any script already there.
    pub fn with_script(mut self, name: impl Into<String>, script: DialogueScript) -> Self {
        self.scripts.insert(name.into(), script);
        self
    }

    /// Append a placement.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placements.push(placement);
        self
    }

    /// Look up a script by name.
    pub fn script(&self, name: &str) -> Option<&DialogueScript> {
        self.scripts.get(name)
    }

    /// Look up a script by name, failing if it is missing.
    pub fn require_script(&self, name: &str) -> CqResult<&DialogueScript> {
        self.script(name)
            .ok_or_else(|| CqError::ScriptNotFound(name.to_string()))
    }
}
