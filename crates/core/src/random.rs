use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::model::{Question, QuestionId, QuizPick};
use crate::selection::next_question;

/// Randomness used for quiz selection, injectable for deterministic tests.
#[derive(Clone, Default)]
pub enum RandomSource {
    /// The thread-local generator seeded from the OS.
    #[default]
    Thread,
    /// A shared generator with a fixed seed.
    Seeded(Arc<Mutex<StdRng>>),
}

impl RandomSource {
    /// Returns a source backed by the thread-local generator.
    #[must_use]
    pub fn thread() -> Self {
        Self::Thread
    }

    /// Returns a source whose sequence of picks is fixed by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))))
    }

    /// Run [`next_question`] with this source's generator.
    pub fn pick(&self, pool: &[Question], excluded: &HashSet<QuestionId>) -> QuizPick {
        match self {
            RandomSource::Thread => next_question(pool, excluded, &mut rand::rng()),
            RandomSource::Seeded(rng) => {
                // A poisoned generator is still a valid generator.
                let mut guard = rng.lock().unwrap_or_else(PoisonError::into_inner);
                next_question(pool, excluded, &mut *guard)
            }
        }
    }
}

impl fmt::Debug for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomSource::Thread => f.write_str("RandomSource::Thread"),
            RandomSource::Seeded(_) => f.write_str("RandomSource::Seeded"),
        }
    }
}
