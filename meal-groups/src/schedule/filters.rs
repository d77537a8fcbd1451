//! Candidate narrowing rules applied when placing one person.
//!
//! Each rule shrinks the candidate list; a rule that would leave nothing
//! keeps the list it was given, so the pipeline never empties a non-empty
//! option set.

use super::types::Slot;

/// Current state of the slots during one construction attempt
#[derive(Debug, Clone, Copy)]
pub struct Occupancy<'a> {
    pub slots: &'a [Slot],
    pub sizes: &'a [usize],
    pub targets: &'a [usize],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Slots still below their target.
    UnderTarget,
    /// Slots at the smallest current size.
    LeastOccupied,
    /// Lunch slots, to keep dinners small.
    PreferLunch,
}

/// Rules in the order the engine applies them.
pub const DEFAULT_PIPELINE: [TieBreak; 3] = [
    TieBreak::UnderTarget,
    TieBreak::LeastOccupied,
    TieBreak::PreferLunch,
];

impl TieBreak {
    pub fn apply(self, candidates: Vec<usize>, occupancy: &Occupancy<'_>) -> Vec<usize> {
        let kept: Vec<usize> = match self {
            TieBreak::UnderTarget => candidates
                .iter()
                .copied()
                .filter(|&idx| occupancy.sizes[idx] < occupancy.targets[idx])
                .collect(),
            TieBreak::LeastOccupied => {
                match candidates.iter().map(|&idx| occupancy.sizes[idx]).min() {
                    Some(min) => candidates
                        .iter()
                        .copied()
                        .filter(|&idx| occupancy.sizes[idx] == min)
                        .collect(),
                    None => Vec::new(),
                }
            }
            TieBreak::PreferLunch => candidates
                .iter()
                .copied()
                .filter(|&idx| occupancy.slots[idx].is_lunch())
                .collect(),
        };

        if kept.is_empty() {
            candidates
        } else {
            kept
        }
    }
}

/// Runs `options` through every rule of `pipeline` in order.
pub fn narrow(options: &[usize], occupancy: &Occupancy<'_>, pipeline: &[TieBreak]) -> Vec<usize> {
    pipeline
        .iter()
        .fold(options.to_vec(), |candidates, rule| rule.apply(candidates, occupancy))
}
