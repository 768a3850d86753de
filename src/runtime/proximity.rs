//! Proximity detection between the player and dialogue events

use crate::types::{DialogueEvent, Position};
use std::collections::BTreeSet;

/// Outcome of a proximity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Index of the event that should be open, if any
    pub active: Option<usize>,
    /// Suppressed events the player is out of range of again
    pub released: Vec<usize>,
}

/// Find the first event, in catalog order, within `radius` of `position`
///
/// Suppressed events are skipped while the player is still inside their
/// radius. Ties are resolved by order, not by distance.
pub fn detect(
    position: Position,
    events: &[DialogueEvent],
    suppressed: &BTreeSet<usize>,
    radius: f32,
) -> Detection {
    let in_range = |event: &DialogueEvent| position.distance_to(&event.pos) < radius;

    let released: Vec<usize> = suppressed
        .iter()
        .copied()
        .filter(|&index| events.get(index).is_none_or(|event| !in_range(event)))
        .collect();

    let active = events
        .iter()
        .enumerate()
        .find(|(index, event)| !suppressed.contains(index) && in_range(event))
        .map(|(index, _)| index);

    log::trace!(
        target: super::debug::PROXIMITY,
        "[Proximity] at ({:.1}, {:.1}): active={:?} released={:?}",
        position.x,
        position.y,
        active,
        released
    );

    Detection { active, released }
}
