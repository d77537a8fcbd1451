use super::types::Slot;

/// Target size per slot for `n_people` spread over `slots`.
///
/// Everyone gets `n / k`; the remaining `n % k` seats go one per slot to the
/// lunches first (in slot order) and only then to the dinners, so dinners
/// never end up above their fair share while a lunch is still at base.
pub fn target_sizes(n_people: usize, slots: &[Slot]) -> Vec<usize> {
    let k = slots.len();
    if k == 0 {
        return Vec::new();
    }

    let base = n_people / k;
    let mut remainder = n_people % k;
    let mut targets = vec![base; k];

    let lunches = slots.iter().enumerate().filter(|(_, s)| s.is_lunch());
    let dinners = slots.iter().enumerate().filter(|(_, s)| !s.is_lunch());
    for (idx, _) in lunches.chain(dinners) {
        if remainder == 0 {
            break;
        }
        targets[idx] += 1;
        remainder -= 1;
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::slot_utils::CANONICAL_SLOTS;

    #[test]
    fn test_even_split() {
        assert_eq!(target_sizes(12, &CANONICAL_SLOTS), vec![2; 6]);
    }

    #[test]
    fn test_remainder_goes_to_lunches_first() {
        // Lunch 9, Dinner 9, Lunch 10, Dinner 10, Lunch 11, Lunch 12
        assert_eq!(target_sizes(7, &CANONICAL_SLOTS), vec![2, 1, 1, 1, 1, 1]);
        assert_eq!(target_sizes(10, &CANONICAL_SLOTS), vec![2, 1, 2, 1, 2, 2]);
        assert_eq!(target_sizes(11, &CANONICAL_SLOTS), vec![2, 2, 2, 1, 2, 2]);
    }

    #[test]
    fn test_fewer_people_than_slots() {
        assert_eq!(target_sizes(3, &CANONICAL_SLOTS), vec![1, 0, 1, 0, 1, 0]);
        assert_eq!(target_sizes(0, &CANONICAL_SLOTS), vec![0; 6]);
    }

    #[test]
    fn test_only_dinners() {
        let slots = [Slot::dinner(1), Slot::dinner(2)];
        assert_eq!(target_sizes(3, &slots), vec![2, 1]);
    }

    #[test]
    fn test_no_slots() {
        assert!(target_sizes(5, &[]).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let slots = [Slot::dinner(1), Slot::lunch(1), Slot::dinner(2), Slot::lunch(2)];
        assert_eq!(target_sizes(7, &slots), target_sizes(7, &slots));
        assert_eq!(target_sizes(7, &slots), vec![2, 2, 1, 2]);
    }
}
