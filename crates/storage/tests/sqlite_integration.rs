use storage::repository::{
    CategoryRepository, NewQuestionRecord, QuestionRepository, Storage, StorageError,
};
use storage::seed::{STARTER_QUESTIONS, seed_defaults};
use storage::sqlite::SqliteRepository;
use trivia_core::model::{
    Category, CategoryId, CategoryName, CategoryScope, Difficulty, QuestionId,
};

fn record(text: &str, category: u64, difficulty: i64) -> NewQuestionRecord {
    NewQuestionRecord {
        question: text.to_string(),
        answer: "An answer".to_string(),
        category: CategoryId::new(category),
        difficulty: Difficulty::new(difficulty).unwrap(),
    }
}

#[tokio::test]
async fn sqlite_roundtrip_questions_and_categories() {
    let url = "sqlite:file:memdb_roundtrip?mode=memory&cache=shared";
    let repo = SqliteRepository::open(url).await.expect("open");
    // Migrations are re-runnable.
    SqliteRepository::open(url).await.expect("reopen");

    repo.upsert_category(&Category::new(
        CategoryId::new(1),
        CategoryName::new("Science").unwrap(),
    ))
    .await
    .unwrap();
    repo.upsert_category(&Category::new(
        CategoryId::new(4),
        CategoryName::new("History").unwrap(),
    ))
    .await
    .unwrap();

    let first = repo
        .insert_new_question(record("Who discovered penicillin?", 1, 3))
        .await
        .unwrap();
    let second = repo
        .insert_new_question(record("What boxer's original name is Cassius Clay?", 4, 1))
        .await
        .unwrap();
    assert!(first < second);

    let fetched = repo.get_question(first).await.unwrap().expect("stored");
    assert_eq!(fetched.question, "Who discovered penicillin?");
    assert_eq!(fetched.category, CategoryId::new(1));
    assert_eq!(fetched.difficulty.value(), 3);

    let history = repo
        .list_questions(CategoryScope::Only(CategoryId::new(4)))
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, second);

    let all = repo.list_questions(CategoryScope::All).await.unwrap();
    let ids: Vec<_> = all.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![first, second]);

    let categories = repo.list_categories().await.unwrap();
    let names: Vec<_> = categories.iter().map(|c| c.name().as_str()).collect();
    assert_eq!(names, vec!["Science", "History"]);
    assert!(repo.get_category(CategoryId::new(2)).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_enforces_category_reference_and_reports_missing_deletes() {
    let repo = SqliteRepository::open("sqlite:file:memdb_constraints?mode=memory&cache=shared")
        .await
        .expect("open");

    let err = repo
        .insert_new_question(record("Orphan question", 42, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict), "got {err:?}");

    repo.upsert_category(&Category::new(
        CategoryId::new(3),
        CategoryName::new("Geography").unwrap(),
    ))
    .await
    .unwrap();
    let id = repo
        .insert_new_question(record("What is the largest lake in Africa?", 3, 2))
        .await
        .unwrap();

    repo.delete_question(id).await.expect("delete");
    let err = repo.delete_question(id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_storage_can_be_seeded() {
    let storage = Storage::sqlite("sqlite:file:memdb_seed?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");

    let report = seed_defaults(&storage).await.expect("seed");
    assert_eq!(report.categories, 6);
    assert_eq!(report.questions, STARTER_QUESTIONS.len());

    let again = seed_defaults(&storage).await.expect("seed twice");
    assert_eq!(again.questions, 0);

    let sports = storage
        .questions
        .list_questions(CategoryScope::Only(CategoryId::new(6)))
        .await
        .unwrap();
    assert_eq!(sports.len(), 2);
}

#[tokio::test]
async fn sqlite_ids_beyond_i64_are_simply_absent() {
    let repo = SqliteRepository::open("sqlite:file:memdb_wide_ids?mode=memory&cache=shared")
        .await
        .expect("open");
    let huge_question = QuestionId::new(u64::MAX);
    let huge_category = CategoryId::new(u64::MAX);

    assert!(repo.get_question(huge_question).await.unwrap().is_none());
    assert!(repo.get_category(huge_category).await.unwrap().is_none());
    assert!(
        repo.list_questions(CategoryScope::Only(huge_category))
            .await
            .unwrap()
            .is_empty()
    );
    let err = repo.delete_question(huge_question).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound), "got {err:?}");
}
