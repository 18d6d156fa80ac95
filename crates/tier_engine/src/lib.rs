//! Tier assignment and reordering engine.
//!
//! `Board` holds the tiers and the unassigned pool, `AssignmentCoordinator` is
//! the only way to change it, and the placement/gesture modules translate raw
//! drops into coordinator calls.

pub mod board;
pub mod coordinator;
pub mod gesture;
pub mod placement;
pub mod registry;
pub mod view_state;

pub use board::{Board, ContainmentViolation};
pub use coordinator::{AssignmentCoordinator, ImportSummary, NoOpReason, Outcome};
pub use gesture::{resolve_drop, DragSession, DropTarget};
pub use placement::{insertion_index, Candidate};
pub use registry::{BoardDefaults, TierSeed};
pub use view_state::ViewState;
