//! Message in, balanced groups out.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::eligibility::EligibilityModel;
use crate::error::DrawResult;
use crate::parser::parse_message;
use crate::schedule::{AssignConfig, AssignRunner, Assignment, SlotRegistry};
use crate::seed::ResolvedSeed;

/// A finished draw and everything needed to repeat it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    /// Unique participants, sorted case-insensitively.
    pub people: Vec<String>,
    pub assignment: Assignment,
    pub seed: ResolvedSeed,
    pub max_attempts: usize,
}

/// Parses the message and checks that everyone has somewhere to go.
///
/// The engine is never involved: an input that fails here is rejected
/// before any attempt runs.
pub fn prepare(text: &str) -> DrawResult<EligibilityModel> {
    let mut registry = SlotRegistry::canonical();
    let parsed = parse_message(text, &mut registry);
    let model = EligibilityModel::build(&parsed.grant_facts(), &registry);
    info!(
        people = model.people.len(),
        slots = model.slots.len(),
        "message parsed"
    );
    model.validate()?;
    Ok(model)
}

pub fn run_prepared(
    model: &EligibilityModel,
    seed: ResolvedSeed,
    max_attempts: usize,
) -> DrawResult<Draw> {
    let config = AssignConfig::default()
        .with_seed(seed.value)
        .with_max_attempts(max_attempts);
    let assignment = AssignRunner::run(&model.to_problem(), &config)?;
    Ok(Draw {
        people: model.people.clone(),
        assignment,
        seed,
        max_attempts,
    })
}

pub fn run_draw(text: &str, seed: ResolvedSeed, max_attempts: usize) -> DrawResult<Draw> {
    let model = prepare(text)?;
    run_prepared(&model, seed, max_attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrawError;
    use crate::schedule::Slot;

    #[test]
    fn test_run_draw_end_to_end() {
        let text = "TODO:\n- Ana\n- Bea\n- Carl\n\n- Cena 9\n- Dani\n- Comida 12\n- Dani\n";
        let draw = run_draw(text, ResolvedSeed::manual(11), 200).unwrap();

        assert_eq!(draw.people, vec!["Ana", "Bea", "Carl", "Dani"]);
        let dani = draw.assignment.slot_of("Dani").unwrap();
        assert!(dani == Slot::dinner(9) || dani == Slot::lunch(12));
        assert_eq!(draw.assignment.sizes.iter().sum::<usize>(), 4);
        assert_eq!(draw.assignment.seed, Some(11));
    }

    #[test]
    fn test_prepare_rejects_empty_message() {
        assert!(matches!(prepare("just chatting\n"), Err(DrawError::NoPeople)));
    }
}
