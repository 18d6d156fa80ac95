//! Placement engine: turns a drop pointer and the rendered geometry of a
//! container into an insertion index.
//!
//! The resolver is a pure function over `(id, center)` pairs so it can be driven
//! without any display. Candidates must be given in container order.

use shared::domain::{EntryId, Orientation, Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: EntryId,
    pub center: Point,
}

impl Candidate {
    pub fn new(id: EntryId, center: Point) -> Self {
        Self { id, center }
    }

    pub fn from_rect(id: EntryId, rect: Rect) -> Self {
        Self {
            id,
            center: rect.center(),
        }
    }
}

/// Insertion index for a drop at `pointer`, or `None` meaning "append".
///
/// The candidate nearest to the pointer (Euclidean distance to its center,
/// first one wins on ties) decides the slot. The dragged entry never takes part
/// and is not counted, so the index addresses the container as it looks once
/// the dragged entry has been lifted out of it.
///
/// Row-major: a pointer below the candidate's center inserts after it,
/// otherwise before. Column-major: a pointer left of the center inserts before
/// it, otherwise after.
pub fn insertion_index(
    candidates: &[Candidate],
    pointer: Point,
    dragged: Option<&EntryId>,
    orientation: Orientation,
) -> Option<usize> {
    let mut nearest: Option<(usize, Point, f64)> = None;

    for (position, candidate) in candidates
        .iter()
        .filter(|candidate| Some(&candidate.id) != dragged)
        .enumerate()
    {
        let distance = pointer.distance_to(candidate.center);
        let closer = match nearest {
            Some((_, _, best)) => distance < best,
            None => !distance.is_nan(),
        };
        if closer {
            nearest = Some((position, candidate.center, distance));
        }
    }

    let (position, center, _) = nearest?;
    let after = match orientation {
        Orientation::RowMajor => pointer.y > center.y,
        Orientation::ColumnMajor => pointer.x >= center.x,
    };
    Some(if after { position + 1 } else { position })
}

#[cfg(test)]
#[path = "tests/placement_tests.rs"]
mod tests;
