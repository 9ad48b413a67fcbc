//! The interaction phase lifecycle.

use std::fmt;

/// Where an interactable is in its lifecycle.
///
/// `NotOverlapping` → `Overlapping` → `Active` → `Question` | `Exit`, with
/// `Question` → `Exit` for items and `Question` ⇄ `Active` for
/// conversations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The player is out of range.
    #[default]
    NotOverlapping,
    /// The player is in range but has not interacted.
    Overlapping,
    /// Lines are showing or the description is up.
    Active,
    /// A question is waiting for an option.
    Question,
    /// Exhausted; waiting for the interact release.
    Exit,
}

impl Phase {
    /// Whether the player is engaged with the instance: `Active`,
    /// `Question` or `Exit`. Overlap changes are ignored while engaged.
    pub fn is_engaged(self) -> bool {
        matches!(self, Self::Active | Self::Question | Self::Exit)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOverlapping => write!(f, "not overlapping"),
            Self::Overlapping => write!(f, "overlapping"),
            Self::Active => write!(f, "active"),
            Self::Question => write!(f, "question"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engaged_phases() {
        assert!(!Phase::NotOverlapping.is_engaged());
        assert!(!Phase::Overlapping.is_engaged());
        assert!(Phase::Active.is_engaged());
        assert!(Phase::Question.is_engaged());
        assert!(Phase::Exit.is_engaged());
        assert_eq!(Phase::default(), Phase::NotOverlapping);
        assert_eq!(Phase::Exit.to_string(), "exit");
    }
}
