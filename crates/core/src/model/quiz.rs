use std::collections::HashSet;

use crate::model::ids::{CategoryId, QuestionId};
use crate::model::question::Question;

/// Which slice of the question bank an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryScope {
    /// The whole question bank.
    #[default]
    All,
    /// Questions of a single category.
    Only(CategoryId),
}

impl CategoryScope {
    /// Raw id used by quiz clients to request every category.
    pub const ALL_SENTINEL: u64 = 0;

    /// Interpret a client-supplied category id, where `0` means every category.
    #[must_use]
    pub fn from_raw(id: u64) -> Self {
        if id == Self::ALL_SENTINEL {
            Self::All
        } else {
            Self::Only(CategoryId::new(id))
        }
    }

    #[must_use]
    pub fn category_id(self) -> Option<CategoryId> {
        match self {
            Self::All => None,
            Self::Only(id) => Some(id),
        }
    }
}

/// Progress of one quiz round, rebuilt from every request.
///
/// The server keeps no round state; clients send back every id they have
/// already been served.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizState {
    previous: Vec<QuestionId>,
    scope: CategoryScope,
}

impl QuizState {
    /// Build a round state. Duplicate ids are dropped, first occurrence wins.
    #[must_use]
    pub fn new(previous: impl IntoIterator<Item = QuestionId>, scope: CategoryScope) -> Self {
        let mut seen = HashSet::new();
        let previous = previous.into_iter().filter(|id| seen.insert(*id)).collect();
        Self { previous, scope }
    }

    #[must_use]
    pub fn previous(&self) -> &[QuestionId] {
        &self.previous
    }

    #[must_use]
    pub fn scope(&self) -> CategoryScope {
        self.scope
    }

    /// Previously served ids as a lookup set.
    #[must_use]
    pub fn excluded(&self) -> HashSet<QuestionId> {
        self.previous.iter().copied().collect()
    }
}

/// Outcome of picking the next quiz question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPick {
    /// An unseen question from the candidate pool.
    Next(Question),
    /// Every candidate has already been served this round.
    Exhausted,
}

impl QuizPick {
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, QuizPick::Exhausted)
    }

    /// The picked question, or `None` once the round is exhausted.
    #[must_use]
    pub fn into_question(self) -> Option<Question> {
        match self {
            QuizPick::Next(question) => Some(question),
            QuizPick::Exhausted => None,
        }
    }
}
