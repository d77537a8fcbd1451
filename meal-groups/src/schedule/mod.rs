pub mod types;
pub mod slot_utils;
pub mod targets;
pub mod filters;
pub mod scoring;
pub mod construction;
pub mod runner;

pub use types::{Assignment, AssignmentProblem, Placement, Slot, SlotCategory};
pub use slot_utils::{SlotRegistry, CANONICAL_SLOTS};
pub use targets::target_sizes;
pub use filters::{TieBreak, DEFAULT_PIPELINE};
pub use runner::{AssignConfig, AssignRunner};
