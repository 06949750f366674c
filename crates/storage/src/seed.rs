//! Starter data for a fresh question bank.

use trivia_core::model::{Category, CategoryId, CategoryName, CategoryScope, Difficulty};

use crate::repository::{NewQuestionRecord, Storage, StorageError};

/// The six standard trivia categories, keyed by their fixed ids.
pub const DEFAULT_CATEGORIES: [(u64, &str); 6] = [
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

/// (question, answer, category, difficulty)
pub const STARTER_QUESTIONS: [(&str, &str, u64, i64); 19] = [
    ("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
    ("What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
    ("What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 5, 3),
    ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    ("Who invented Peanut Butter?", "George Washington Carver", 4, 2),
    ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
    ("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
    ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    ("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
    ("Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?", "Jackson Pollock", 2, 2),
    ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
    ("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
];

/// What a seeding run wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub categories: usize,
    pub questions: usize,
}

/// Upsert the default categories and, when the bank is empty, the starter
/// questions. Running it twice does not duplicate questions.
///
/// # Errors
///
/// Returns `StorageError` if any write fails.
pub async fn seed_defaults(storage: &Storage) -> Result<SeedReport, StorageError> {
    let mut report = SeedReport::default();

    for (id, name) in DEFAULT_CATEGORIES {
        let name = CategoryName::new(name).map_err(|e| StorageError::Serialization(e.to_string()))?;
        storage
            .categories
            .upsert_category(&Category::new(CategoryId::new(id), name))
            .await?;
        report.categories += 1;
    }

    if !storage
        .questions
        .list_questions(CategoryScope::All)
        .await?
        .is_empty()
    {
        tracing::info!("question bank already populated, skipping starter questions");
        return Ok(report);
    }

    for (question, answer, category, difficulty) in STARTER_QUESTIONS {
        let record = NewQuestionRecord {
            question: question.to_owned(),
            answer: answer.to_owned(),
            category: CategoryId::new(category),
            difficulty: Difficulty::new(difficulty)
                .map_err(|e| StorageError::Serialization(e.to_string()))?,
        };
        storage.questions.insert_new_question(record).await?;
        report.questions += 1;
    }

    tracing::info!(
        categories = report.categories,
        questions = report.questions,
        "seeded question bank"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let storage = Storage::in_memory();

        let first = seed_defaults(&storage).await.unwrap();
        assert_eq!(first.categories, 6);
        assert_eq!(first.questions, STARTER_QUESTIONS.len());

        let second = seed_defaults(&storage).await.unwrap();
        assert_eq!(second.questions, 0);

        let all = storage
            .questions
            .list_questions(CategoryScope::All)
            .await
            .unwrap();
        assert_eq!(all.len(), STARTER_QUESTIONS.len());
    }
}
