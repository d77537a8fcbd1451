//! Who may go where.

use std::collections::{BTreeSet, HashMap};

use crate::error::{DrawError, DrawResult};
use crate::schedule::{AssignmentProblem, Slot, SlotRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// Listed in the "free for any meal" section.
    AnySlot,
    /// Listed under one meal header.
    Specific(Slot),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantFact {
    pub person: String,
    pub grant: Grant,
}

/// People and the slots each one may be placed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityModel {
    /// Unique people, sorted case-insensitively.
    pub people: Vec<String>,
    /// Every known slot in registry order.
    pub slots: Vec<Slot>,
    eligible: HashMap<String, BTreeSet<usize>>,
}

impl EligibilityModel {
    /// Unions all grants per person.
    ///
    /// Slots named by a fact but missing from `registry` are appended after
    /// the registry's own slots. Any-slot grants cover the final slot list.
    pub fn build(facts: &[GrantFact], registry: &SlotRegistry) -> Self {
        let mut registry = registry.clone();
        for fact in facts {
            if let Grant::Specific(slot) = fact.grant {
                registry.register(slot);
            }
        }
        let all: BTreeSet<usize> = (0..registry.slots().len()).collect();

        let mut eligible: HashMap<String, BTreeSet<usize>> = HashMap::new();
        for fact in facts {
            if fact.person.is_empty() {
                continue;
            }
            let allowed = eligible.entry(fact.person.clone()).or_default();
            match fact.grant {
                Grant::AnySlot => allowed.extend(all.iter().copied()),
                Grant::Specific(slot) => {
                    if let Some(idx) = registry.index_of(slot) {
                        allowed.insert(idx);
                    }
                }
            }
        }

        let mut people: Vec<String> = eligible.keys().cloned().collect();
        people.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));

        EligibilityModel {
            people,
            slots: registry.slots().to_vec(),
            eligible,
        }
    }

    pub fn eligible_slots(&self, person: &str) -> Vec<Slot> {
        self.eligible
            .get(person)
            .map(|set| set.iter().map(|&idx| self.slots[idx]).collect())
            .unwrap_or_default()
    }

    /// People with no slot at all, in display order
    pub fn unplaceable(&self) -> Vec<String> {
        self.people
            .iter()
            .filter(|p| self.eligible.get(*p).map_or(true, |set| set.is_empty()))
            .cloned()
            .collect()
    }

    /// Rejects inputs the engine should never see.
    pub fn validate(&self) -> DrawResult<()> {
        if self.people.is_empty() {
            return Err(DrawError::NoPeople);
        }
        let unplaceable = self.unplaceable();
        if !unplaceable.is_empty() {
            return Err(DrawError::NoEligibleSlots(unplaceable));
        }
        Ok(())
    }

    pub fn to_problem(&self) -> AssignmentProblem {
        let options = self
            .people
            .iter()
            .map(|p| {
                self.eligible
                    .get(p)
                    .map(|set| set.iter().copied().collect())
                    .unwrap_or_default()
            })
            .collect();
        AssignmentProblem {
            people: self.people.clone(),
            slots: self.slots.clone(),
            options,
        }
    }
}
