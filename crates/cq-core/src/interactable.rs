use std::fmt;

use serde::{Deserialize, Serialize};

/// What an inspectable object does beyond showing its description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// A save point: accepting its question requests a save.
    Save,
    /// A plain information box.
    #[default]
    Info,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Save => write!(f, "save"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Descriptor for a simple interactable with no dialogue tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractableInfo {
    /// Identifier of the trigger volume.
    pub interactable_id: u32,
    /// Identifier of the item it represents.
    #[serde(default)]
    pub item_id: u32,
    /// Name shown when the player comes into range.
    pub name: String,
    /// Description shown when the player interacts.
    #[serde(default)]
    pub description: String,
    /// Special behaviour tied to the item.
    #[serde(default)]
    pub item_type: ItemType,
    /// Whether a yes/no question follows the description.
    #[serde(default)]
    pub has_question: bool,
}

impl InteractableInfo {
    /// Create an info item with an empty description and no question.
    pub fn new(interactable_id: u32, name: impl Into<String>) -> Self {
        Self {
            interactable_id,
            item_id: 0,
            name: name.into(),
            description: String::new(),
            item_type: ItemType::Info,
            has_question: false,
        }
    }

    /// Set the item identifier.
    pub fn with_item_id(mut self, item_id: u32) -> Self {
        self.item_id = item_id;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the item type.
    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = item_type;
        self
    }

    /// Ask a yes/no question after the description.
    pub fn with_question(mut self) -> Self {
        self.has_question = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let info = InteractableInfo::new(4, "Crystal")
            .with_item_id(12)
            .with_description("It hums softly.")
            .with_type(ItemType::Save)
            .with_question();

        assert_eq!(info.interactable_id, 4);
        assert_eq!(info.item_id, 12);
        assert_eq!(info.item_type, ItemType::Save);
        assert!(info.has_question);
    }

    #[test]
    fn item_type_from_json() {
        let info: InteractableInfo =
            serde_json::from_str(r#"{"interactable_id": 1, "name": "Sign", "item_type": "save"}"#)
                .unwrap();
        assert_eq!(info.item_type, ItemType::Save);
        assert!(info.description.is_empty());
        assert_eq!(ItemType::default().to_string(), "info");
    }
}
