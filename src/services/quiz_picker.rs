use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

use crate::models::domain::Question;

/// Every question in the pool has already been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no unused questions left in the pool")]
pub struct Exhausted;

/// Picks an unused question from `questions` using the thread-local RNG.
pub fn pick<'a>(
    questions: &'a [Question],
    previous: &HashSet<i64>,
) -> Result<&'a Question, Exhausted> {
    pick_with(&mut rand::thread_rng(), questions, previous)
}

/// Picks a question whose id is not in `previous`, uniformly among the
/// unused ones.
///
/// Draws from the whole pool at most `questions.len()` times and then falls
/// back to choosing from the filtered unused subset, so it always terminates.
pub fn pick_with<'a, R: Rng + ?Sized>(
    rng: &mut R,
    questions: &'a [Question],
    previous: &HashSet<i64>,
) -> Result<&'a Question, Exhausted> {
    if previous.len() >= questions.len() {
        return Err(Exhausted);
    }

    for _ in 0..questions.len() {
        let candidate = &questions[rng.gen_range(0..questions.len())];
        if !previous.contains(&candidate.id) {
            return Ok(candidate);
        }
    }

    let unused: Vec<&Question> = questions
        .iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    // Empty only when the pool repeats ids.
    unused.choose(rng).copied().ok_or(Exhausted)
}
