//! Overlap bookkeeping and focus selection.

use std::collections::HashMap;

use crate::config::FocusPolicy;
use crate::stage::InstanceId;

/// Instances the player is physically inside, in overlap order.
#[derive(Debug, Clone, Default)]
pub struct Overlaps {
    order: Vec<InstanceId>,
    distances: HashMap<InstanceId, f64>,
}

impl Overlaps {
    /// No overlaps.
    pub fn new() -> Self {
        Self::default()
    }

    /// The player entered `id`. Re-entering moves it to the most recent slot.
    pub fn begin(&mut self, id: InstanceId) {
        self.order.retain(|&o| o != id);
        self.order.push(id);
    }

    /// The player left `id`.
    pub fn end(&mut self, id: InstanceId) {
        self.order.retain(|&o| o != id);
        self.distances.remove(&id);
    }

    /// Record the player's distance to `id`. Non-finite values are dropped.
    pub fn report_distance(&mut self, id: InstanceId, distance: f64) {
        if distance.is_finite() {
            self.distances.insert(id, distance);
        } else {
            self.distances.remove(&id);
        }
    }

    /// Whether the player is inside `id`.
    pub fn contains(&self, id: InstanceId) -> bool {
        self.order.contains(&id)
    }

    /// Overlapped instances, oldest overlap first.
    pub fn ids(&self) -> &[InstanceId] {
        &self.order
    }

    /// Last reported distance to `id`.
    pub fn distance(&self, id: InstanceId) -> Option<f64> {
        self.distances.get(&id).copied()
    }

    /// Pick the focused instance among those accepted by `eligible`.
    ///
    /// Instances with no reported distance rank behind every measured one
    /// under [`FocusPolicy::Nearest`].
    pub fn pick(
        &self,
        policy: FocusPolicy,
        eligible: impl Fn(InstanceId) -> bool,
    ) -> Option<InstanceId> {
        let mut candidates = self.order.iter().rev().copied().filter(|&id| eligible(id));
        match policy {
            FocusPolicy::MostRecent => candidates.next(),
            FocusPolicy::Nearest => {
                let mut best: Option<(InstanceId, f64)> = None;
                for id in candidates {
                    let d = self.distance(id).unwrap_or(f64::INFINITY);
                    // Strict comparison keeps the most recent on ties.
                    if best.is_none_or(|(_, bd)| d < bd) {
                        best = Some((id, d));
                    }
                }
                best.map(|(id, _)| id)
            }
        }
    }
}
