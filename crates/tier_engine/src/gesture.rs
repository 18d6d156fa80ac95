//! Drag-and-drop gesture resolution.
//!
//! A `DragSession` freezes what is being dragged and where it came from at
//! drag-start. The drop is resolved against whatever the coordinator holds at
//! drop time; nothing is locked in between.

use shared::{
    domain::{ContainerId, EntryId, Orientation, Point, TierId},
    protocol::{DragKind, DragPayload},
};
use tracing::debug;

use crate::{
    coordinator::{AssignmentCoordinator, NoOpReason, Outcome},
    placement::{insertion_index, Candidate},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    payload: DragPayload,
}

impl DragSession {
    pub fn start(payload: DragPayload) -> Self {
        Self { payload }
    }

    pub fn entry(id: &EntryId, source: ContainerId) -> Self {
        Self::start(DragPayload::entry(id, source))
    }

    pub fn tier(id: &TierId) -> Self {
        Self::start(DragPayload::tier(id))
    }

    /// Parses the JSON the rendering layer attached to the drag. Missing or
    /// malformed payloads yield `None`; the drop is then simply ignored.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str::<DragPayload>(raw) {
            Ok(payload) => Some(Self::start(payload)),
            Err(err) => {
                debug!(%err, "ignoring malformed drag payload");
                None
            }
        }
    }

    pub fn payload(&self) -> &DragPayload {
        &self.payload
    }
}

/// The container under the pointer at drop time, with its rendered entries in
/// container order.
#[derive(Debug, Clone, Copy)]
pub struct DropTarget<'a> {
    pub container: &'a ContainerId,
    pub candidates: &'a [Candidate],
    pub orientation: Orientation,
}

impl<'a> DropTarget<'a> {
    pub fn new(
        container: &'a ContainerId,
        candidates: &'a [Candidate],
        orientation: Orientation,
    ) -> Self {
        Self {
            container,
            candidates,
            orientation,
        }
    }
}

/// Applies a finished gesture. `target` is `None` when the pointer was released
/// outside every container.
pub fn resolve_drop(
    coordinator: &mut AssignmentCoordinator,
    session: &DragSession,
    pointer: Point,
    target: Option<DropTarget<'_>>,
) -> Outcome {
    let Some(target) = target else {
        debug!(id = %session.payload.id, "drop outside any container");
        return Outcome::Unchanged(NoOpReason::OutsideContainers);
    };

    match session.payload.kind {
        DragKind::Tier => {
            let Some(target_tier) = target.container.as_tier() else {
                return Outcome::Unchanged(NoOpReason::TierOutsideRegistry);
            };
            coordinator.move_tier(&TierId::new(session.payload.id.as_str()), target_tier)
        }
        DragKind::Entry => {
            let Some(source) = session.payload.source_container_id.as_ref() else {
                return Outcome::Unchanged(NoOpReason::MissingSource);
            };
            let entry_id = EntryId::new(session.payload.id.as_str());

            // The pool only reorders its own entries; anything arriving from a
            // tier is appended.
            let index = if target.container.is_unassigned() && !source.is_unassigned() {
                None
            } else {
                insertion_index(
                    target.candidates,
                    pointer,
                    Some(&entry_id),
                    target.orientation,
                )
            };

            coordinator.move_entry(&entry_id, source, target.container, index)
        }
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
