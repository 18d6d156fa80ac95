//! Assignment coordinator: the only component that mutates a `Board`.
//!
//! Every operation is validated against the live board before anything is
//! touched, so an operation either applies completely or leaves the board
//! exactly as it was. Unknown ids are reported as `Outcome::Unchanged`, never as
//! errors: drag gestures routinely race with re-renders.

use std::collections::HashSet;

use shared::domain::{ContainerId, Entry, EntryId, TierId};
use tracing::{debug, info};

use crate::{
    board::Board,
    registry::{position_for_rating, rating_for_position, BoardDefaults},
};

/// Title given to entries added without one.
pub const UNTITLED_ENTRY: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Source and target are the same container and no index was requested.
    SelfDrop,
    UnknownEntry,
    UnknownContainer,
    UnknownTier,
    /// A tier was dropped onto itself.
    SameTier,
    /// The entry id is already held by some container.
    DuplicateEntry,
    /// The gesture ended outside every registered container.
    OutsideContainers,
    /// The gesture payload did not name a source container.
    MissingSource,
    /// Tiers can only be dropped onto other tiers.
    TierOutsideRegistry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Applied,
    Unchanged(NoOpReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub placed: usize,
    pub unassigned: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone)]
pub struct AssignmentCoordinator {
    board: Board,
    defaults: BoardDefaults,
    revision: u64,
}

impl Default for AssignmentCoordinator {
    fn default() -> Self {
        Self::new(BoardDefaults::default())
    }
}

impl AssignmentCoordinator {
    pub fn new(defaults: BoardDefaults) -> Self {
        let board = Board::new(defaults.seed_tiers());
        Self::with_board(board, defaults)
    }

    pub fn with_board(board: Board, defaults: BoardDefaults) -> Self {
        Self {
            board,
            defaults,
            revision: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn defaults(&self) -> &BoardDefaults {
        &self.defaults
    }

    /// Bumped once per applied mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn applied(&mut self) -> Outcome {
        self.revision += 1;
        Outcome::Applied
    }

    fn unchanged(op: &'static str, reason: NoOpReason) -> Outcome {
        debug!(op, ?reason, "board unchanged");
        Outcome::Unchanged(reason)
    }

    /// Moves an entry between (or within) containers.
    ///
    /// Landing in a tier rewrites the entry's rating from that tier's position;
    /// landing in the pool keeps whatever rating it had. `target_index` beyond
    /// the end of the target list is clamped to an append.
    pub fn move_entry(
        &mut self,
        entry_id: &EntryId,
        source: &ContainerId,
        target: &ContainerId,
        target_index: Option<usize>,
    ) -> Outcome {
        if source == target && target_index.is_none() {
            return Self::unchanged("move_entry", NoOpReason::SelfDrop);
        }

        let target_position = match target {
            ContainerId::Unassigned => None,
            ContainerId::Tier(id) => match self.board.tier_position(id) {
                Some(position) => Some(position),
                None => return Self::unchanged("move_entry", NoOpReason::UnknownContainer),
            },
        };

        let Some(source_items) = self.board.items(source) else {
            return Self::unchanged("move_entry", NoOpReason::UnknownContainer);
        };
        let Some(source_index) = source_items.iter().position(|e| &e.id == entry_id) else {
            return Self::unchanged("move_entry", NoOpReason::UnknownEntry);
        };

        let tier_count = self.board.tier_count();
        let Some(mut entry) = self
            .board
            .items_mut(source)
            .map(|items| items.remove(source_index))
        else {
            return Self::unchanged("move_entry", NoOpReason::UnknownContainer);
        };

        if let Some(position) = target_position {
            rerate_for_position(&mut entry, tier_count, position);
        }

        let Some(target_items) = self.board.items_mut(target) else {
            // Resolved above; cannot disappear between the two lookups.
            return Self::unchanged("move_entry", NoOpReason::UnknownContainer);
        };
        match target_index {
            Some(index) => target_items.insert(index.min(target_items.len()), entry),
            None => target_items.push(entry),
        }

        debug!(entry = %entry_id, %source, %target, ?target_index, "entry moved");
        self.applied()
    }

    /// Reinserts `dragged` at the position `target` occupies before the move.
    /// Ratings are left alone.
    pub fn move_tier(&mut self, dragged: &TierId, target: &TierId) -> Outcome {
        let (Some(from), Some(to)) = (
            self.board.tier_position(dragged),
            self.board.tier_position(target),
        ) else {
            return Self::unchanged("move_tier", NoOpReason::UnknownTier);
        };
        if from == to {
            return Self::unchanged("move_tier", NoOpReason::SameTier);
        }

        let tiers = self.board.tiers_mut();
        let tier = tiers.remove(from);
        tiers.insert(to.min(tiers.len()), tier);

        debug!(tier = %dragged, from, to, "tier moved");
        self.applied()
    }

    /// Appends an empty placeholder tier and returns its id.
    pub fn add_tier(&mut self) -> TierId {
        let tier = self.defaults.placeholder_tier();
        let id = tier.id.clone();
        self.board.tiers_mut().push(tier);
        debug!(tier = %id, "tier added");
        let _ = self.applied();
        id
    }

    /// Removes a tier, moving its entries (ratings untouched) to the end of the pool.
    pub fn delete_tier(&mut self, tier_id: &TierId) -> Outcome {
        let Some(position) = self.board.tier_position(tier_id) else {
            return Self::unchanged("delete_tier", NoOpReason::UnknownTier);
        };

        let tier = self.board.tiers_mut().remove(position);
        let released = tier.items.len();
        self.board.unassigned_mut().extend(tier.items);

        debug!(tier = %tier_id, released, "tier deleted");
        self.applied()
    }

    pub fn rename_tier(&mut self, tier_id: &TierId, name: impl Into<String>) -> Outcome {
        match self.board.tiers_mut().iter_mut().find(|t| &t.id == tier_id) {
            Some(tier) => tier.name = name.into(),
            None => return Self::unchanged("rename_tier", NoOpReason::UnknownTier),
        }
        self.applied()
    }

    pub fn recolor_tier(&mut self, tier_id: &TierId, color: impl Into<String>) -> Outcome {
        match self.board.tiers_mut().iter_mut().find(|t| &t.id == tier_id) {
            Some(tier) => tier.color = color.into(),
            None => return Self::unchanged("recolor_tier", NoOpReason::UnknownTier),
        }
        self.applied()
    }

    /// Appends an entry to the pool. Ids already on the board are refused.
    pub fn add_entry(&mut self, entry: Entry) -> Outcome {
        if self.board.contains_entry(&entry.id) {
            return Self::unchanged("add_entry", NoOpReason::DuplicateEntry);
        }
        debug!(entry = %entry.id, "entry added");
        self.board.unassigned_mut().push(entry);
        self.applied()
    }

    /// Creates an entry with a generated id in the pool. A blank title falls
    /// back to `UNTITLED_ENTRY`.
    pub fn add_new_entry(&mut self, title: &str, cover: impl Into<String>) -> EntryId {
        let title = match title.trim() {
            "" => UNTITLED_ENTRY,
            trimmed => trimmed,
        };
        let entry = Entry::new(EntryId::generate(), title, cover);
        let id = entry.id.clone();
        let _ = self.add_entry(entry);
        id
    }

    pub fn delete_entry(&mut self, entry_id: &EntryId) -> Outcome {
        let Some(container) = self.board.locate(entry_id) else {
            return Self::unchanged("delete_entry", NoOpReason::UnknownEntry);
        };
        if let Some(items) = self.board.items_mut(&container) {
            items.retain(|entry| &entry.id != entry_id);
        }
        debug!(entry = %entry_id, %container, "entry deleted");
        self.applied()
    }

    /// Rebuilds every container from the incoming entries' ratings.
    ///
    /// All previous memberships are discarded. Entries whose rating maps onto
    /// an existing tier go there in input order; the rest form the new pool.
    /// A repeated id keeps only its first occurrence.
    pub fn import_entries(&mut self, entries: Vec<Entry>) -> ImportSummary {
        self.rebuild(entries, &HashSet::new())
    }

    /// Like `import_entries`, except that ids listed in `unassigned` land in
    /// the pool whatever rating they carry. Used when membership was saved
    /// alongside the entries, since a pool entry keeps its last tier rating.
    pub fn restore_entries(
        &mut self,
        entries: Vec<Entry>,
        unassigned: &HashSet<EntryId>,
    ) -> ImportSummary {
        self.rebuild(entries, unassigned)
    }

    fn rebuild(&mut self, entries: Vec<Entry>, pinned: &HashSet<EntryId>) -> ImportSummary {
        let tier_count = self.board.tier_count();
        let mut summary = ImportSummary::default();
        let mut seen = HashSet::new();
        let mut pool = Vec::new();

        for tier in self.board.tiers_mut().iter_mut() {
            tier.items.clear();
        }

        for entry in entries {
            if !seen.insert(entry.id.clone()) {
                summary.duplicates += 1;
                continue;
            }
            let position = entry
                .rating
                .filter(|_| !pinned.contains(&entry.id))
                .and_then(|rating| position_for_rating(tier_count, rating));
            match position {
                Some(position) => {
                    self.board.tiers_mut()[position].items.push(entry);
                    summary.placed += 1;
                }
                None => {
                    pool.push(entry);
                    summary.unassigned += 1;
                }
            }
        }
        *self.board.unassigned_mut() = pool;

        info!(
            placed = summary.placed,
            unassigned = summary.unassigned,
            duplicates = summary.duplicates,
            pinned = pinned.len(),
            "entries imported"
        );
        let _ = self.applied();
        summary
    }
}

/// The single place where a tier position is written back into a rating.
fn rerate_for_position(entry: &mut Entry, tier_count: usize, position: usize) {
    entry.rating = Some(rating_for_position(tier_count, position));
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
