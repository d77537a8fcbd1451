use super::types::Slot;

/// The six meals the draw is organised around, in display order.
pub const CANONICAL_SLOTS: [Slot; 6] = [
    Slot::lunch(9),
    Slot::dinner(9),
    Slot::lunch(10),
    Slot::dinner(10),
    Slot::lunch(11),
    Slot::lunch(12),
];

/// Ordered list of known slots.
///
/// Starts from the canonical six and grows when a message mentions a meal
/// that is not in the list yet; new slots keep their discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
}

impl SlotRegistry {
    pub fn canonical() -> Self {
        SlotRegistry { slots: CANONICAL_SLOTS.to_vec() }
    }

    pub fn empty() -> Self {
        SlotRegistry { slots: Vec::new() }
    }

    /// Returns the index of `slot`, appending it if it is new.
    pub fn register(&mut self, slot: Slot) -> usize {
        match self.index_of(slot) {
            Some(idx) => idx,
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        }
    }

    pub fn index_of(&self, slot: Slot) -> Option<usize> {
        self.slots.iter().position(|s| *s == slot)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

impl Default for SlotRegistry {
    fn default() -> Self {
        SlotRegistry::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_appends_new_slots_in_discovery_order() {
        let mut registry = SlotRegistry::canonical();
        assert_eq!(registry.register(Slot::dinner(12)), 6);
        assert_eq!(registry.register(Slot::dinner(11)), 7);
        assert_eq!(registry.register(Slot::lunch(9)), 0);
        assert_eq!(registry.register(Slot::dinner(12)), 6);
        assert_eq!(registry.slots().len(), 8);
        assert_eq!(&registry.slots()[..6], &CANONICAL_SLOTS);
    }
}
