//! Transient selection state owned by the front end, kept apart from `Board`.

use shared::domain::TierId;

use crate::{
    board::Board,
    coordinator::{AssignmentCoordinator, NoOpReason, Outcome},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    editing_name: Option<TierId>,
    color_picker: Option<TierId>,
}

impl ViewState {
    pub fn start_editing_name(&mut self, tier_id: TierId) {
        self.editing_name = Some(tier_id);
    }

    pub fn cancel_editing_name(&mut self) {
        self.editing_name = None;
    }

    pub fn editing_name(&self) -> Option<&TierId> {
        self.editing_name.as_ref()
    }

    pub fn is_editing_name(&self, tier_id: &TierId) -> bool {
        self.editing_name.as_ref() == Some(tier_id)
    }

    /// Renames the tier being edited and leaves edit mode.
    pub fn commit_name(
        &mut self,
        coordinator: &mut AssignmentCoordinator,
        name: impl Into<String>,
    ) -> Outcome {
        match self.editing_name.take() {
            Some(tier_id) => coordinator.rename_tier(&tier_id, name),
            None => Outcome::Unchanged(NoOpReason::UnknownTier),
        }
    }

    pub fn open_color_picker(&mut self, tier_id: TierId) {
        self.color_picker = Some(tier_id);
    }

    pub fn close_color_picker(&mut self) {
        self.color_picker = None;
    }

    pub fn color_picker_open_for(&self, tier_id: &TierId) -> bool {
        self.color_picker.as_ref() == Some(tier_id)
    }

    /// Recolors the tier whose picker is open and closes the picker.
    pub fn pick_color(
        &mut self,
        coordinator: &mut AssignmentCoordinator,
        color: impl Into<String>,
    ) -> Outcome {
        match self.color_picker.take() {
            Some(tier_id) => coordinator.recolor_tier(&tier_id, color),
            None => Outcome::Unchanged(NoOpReason::UnknownTier),
        }
    }

    /// Drops selections that point at tiers no longer on the board.
    pub fn retain_known(&mut self, board: &Board) {
        if let Some(id) = &self.editing_name {
            if board.tier(id).is_none() {
                self.editing_name = None;
            }
        }
        if let Some(id) = &self.color_picker {
            if board.tier(id).is_none() {
                self.color_picker = None;
            }
        }
    }
}
