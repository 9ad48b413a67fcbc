//! Question branch resolution.
//!
//! Questions are a flat list scanned in order. The first question whose
//! subtitle triple and option both match wins; later duplicates are never
//! reachable.

use cq_core::{Position, QuestionNode};

use crate::cursor::NO_SELECTION;

/// Find the branch taken by choosing `option` at `position`.
///
/// Returns the start of the target conversation, or `None` when nothing
/// matches. Option `0` never matches.
pub fn resolve(questions: &[QuestionNode], position: Position, option: u8) -> Option<Position> {
    if option == NO_SELECTION {
        return None;
    }
    questions
        .iter()
        .find(|q| q.matches(position, option))
        .map(|q| Position::new(q.target, 0, 0))
}

/// Labels of every question offered at `position`, in list order.
pub fn options_for(questions: &[QuestionNode], position: Position) -> Vec<String> {
    questions
        .iter()
        .filter(|q| q.is_offered_at(position))
        .map(|q| q.label.clone())
        .collect()
}
