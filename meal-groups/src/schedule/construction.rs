use rand::seq::SliceRandom;
use rand::Rng;

use super::filters::{narrow, Occupancy, DEFAULT_PIPELINE};
use super::types::AssignmentProblem;

/// A complete placement produced by one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Slot index per person, aligned with `problem.people`.
    pub slot_of: Vec<usize>,
    pub sizes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Feasible(Attempt),
    /// Aborted at the first person with nowhere to go.
    Infeasible { person: usize },
}

/// Groups people by how many slots they can take, least flexible first.
///
/// Inside a group people are sorted by case-insensitive name (exact name as
/// the last resort) so the starting order does not depend on input order.
pub fn flexibility_groups(problem: &AssignmentProblem) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..problem.people.len()).collect();
    order.sort_by(|&a, &b| {
        let (name_a, name_b) = (&problem.people[a], &problem.people[b]);
        problem.options[a]
            .len()
            .cmp(&problem.options[b].len())
            .then_with(|| name_a.to_lowercase().cmp(&name_b.to_lowercase()))
            .then_with(|| name_a.cmp(name_b))
    });

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current_len = None;
    for person in order {
        let len = problem.options[person].len();
        if current_len != Some(len) {
            groups.push(Vec::new());
            current_len = Some(len);
        }
        if let Some(group) = groups.last_mut() {
            group.push(person);
        }
    }
    groups
}

/// One randomized greedy pass.
///
/// Each flexibility group is shuffled with `rng`, then every person goes to
/// a slot picked at random among the candidates left by the tie-break
/// pipeline. `groups` must come from [`flexibility_groups`] on the same
/// problem.
pub fn construct<R: Rng + ?Sized>(
    problem: &AssignmentProblem,
    groups: &[Vec<usize>],
    targets: &[usize],
    rng: &mut R,
) -> AttemptOutcome {
    let mut order = Vec::with_capacity(problem.people.len());
    for group in groups {
        let mut block = group.clone();
        block.shuffle(rng);
        order.extend(block);
    }

    let mut sizes = vec![0usize; problem.slots.len()];
    let mut slot_of: Vec<Option<usize>> = vec![None; problem.people.len()];

    for person in order {
        let options = &problem.options[person];
        if options.is_empty() {
            return AttemptOutcome::Infeasible { person };
        }

        let occupancy = Occupancy {
            slots: &problem.slots,
            sizes: &sizes,
            targets,
        };
        let candidates = narrow(options, &occupancy, &DEFAULT_PIPELINE);
        let Some(&chosen) = candidates.choose(rng) else {
            return AttemptOutcome::Infeasible { person };
        };

        slot_of[person] = Some(chosen);
        sizes[chosen] += 1;
    }

    // a person left out of `groups` was never placed
    if let Some(person) = slot_of.iter().position(Option::is_none) {
        return AttemptOutcome::Infeasible { person };
    }
    let slot_of = slot_of.into_iter().flatten().collect();
    AttemptOutcome::Feasible(Attempt { slot_of, sizes })
}
