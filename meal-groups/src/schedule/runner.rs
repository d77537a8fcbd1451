//! Randomized-restart loop around the greedy construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::construction::{construct, flexibility_groups, Attempt, AttemptOutcome};
use super::scoring::{is_balanced, score};
use super::targets::target_sizes;
use super::types::{Assignment, AssignmentProblem, Placement};
use crate::config::DEFAULT_MAX_ATTEMPTS;
use crate::error::{DrawError, DrawResult};

/// Configuration for a draw.
///
/// # Examples
///
/// ```
/// use meal_groups::schedule::AssignConfig;
///
/// let config = AssignConfig::default()
///     .with_max_attempts(500)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignConfig {
    /// Upper bound on construction attempts.
    pub max_attempts: usize,

    /// Seed for the random stream. `None` draws a fresh one, which is
    /// reported back in [`Assignment::seed`].
    pub seed: Option<u64>,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl AssignConfig {
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Runs the balanced assignment search.
pub struct AssignRunner;

impl AssignRunner {
    /// Seeds a `StdRng` from the config and searches with it.
    pub fn run(problem: &AssignmentProblem, config: &AssignConfig) -> DrawResult<Assignment> {
        config.validate().map_err(DrawError::InvalidConfig)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut assignment = Self::run_with_rng(problem, config.max_attempts, &mut rng)?;
        assignment.seed = Some(seed);
        Ok(assignment)
    }

    /// Searches with an injected random stream.
    ///
    /// Up to `max_attempts` attempts run in sequence; the first balanced
    /// attempt stops the search, otherwise the lowest score wins and the
    /// earliest attempt wins a tie.
    pub fn run_with_rng<R: Rng + ?Sized>(
        problem: &AssignmentProblem,
        max_attempts: usize,
        rng: &mut R,
    ) -> DrawResult<Assignment> {
        if max_attempts == 0 {
            return Err(DrawError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        problem.validate().map_err(DrawError::InvalidConfig)?;

        let targets = target_sizes(problem.people.len(), &problem.slots);
        let groups = flexibility_groups(problem);

        let mut best: Option<(usize, Attempt)> = None;
        let mut attempts = 0;

        for attempt_no in 1..=max_attempts {
            attempts = attempt_no;
            let attempt = match construct(problem, &groups, &targets, rng) {
                AttemptOutcome::Feasible(attempt) => attempt,
                AttemptOutcome::Infeasible { .. } => continue,
            };

            let attempt_score = score(&attempt.sizes, &targets);
            let balanced = is_balanced(&attempt.sizes, &targets);
            if best.as_ref().map_or(true, |(best_score, _)| attempt_score < *best_score) {
                debug!(attempt = attempt_no, score = attempt_score, "new best assignment");
                best = Some((attempt_score, attempt));
            }
            if balanced {
                break;
            }
        }

        let Some((best_score, attempt)) = best else {
            let unplaceable = problem.unplaceable();
            info!(attempts, unplaceable = unplaceable.len(), "no feasible assignment");
            return Err(DrawError::Infeasible { attempts, unplaceable });
        };

        info!(
            people = problem.people.len(),
            slots = problem.slots.len(),
            attempts,
            score = best_score,
            "draw finished"
        );

        let placements = problem
            .people
            .iter()
            .zip(&attempt.slot_of)
            .map(|(person, &idx)| Placement {
                person: person.clone(),
                slot: problem.slots[idx],
            })
            .collect();

        Ok(Assignment {
            slots: problem.slots.clone(),
            placements,
            sizes: attempt.sizes,
            targets,
            seed: None,
            attempts,
            score: best_score,
        })
    }
}
