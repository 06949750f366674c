use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::model::{Question, QuestionId, QuizPick};

/// Pick an unseen question uniformly at random from `pool`.
///
/// `pool` is expected to be filtered to the round's category already.
/// Questions whose ids appear in `excluded` are never returned. When nothing
/// is left the result is `QuizPick::Exhausted`, which is also the answer for
/// an empty pool.
///
/// The function holds no memory between calls: callers accumulate the ids
/// they have served and pass the full set every time.
pub fn next_question<R>(pool: &[Question], excluded: &HashSet<QuestionId>, rng: &mut R) -> QuizPick
where
    R: Rng + ?Sized,
{
    let remaining: Vec<&Question> = pool.iter().filter(|q| !excluded.contains(&q.id)).collect();

    match remaining.choose(rng) {
        Some(question) => QuizPick::Next((*question).clone()),
        None => QuizPick::Exhausted,
    }
}
