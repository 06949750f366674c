use crate::model::Question;

/// Keep the questions whose text contains `term`, ignoring case.
///
/// Matching is a plain substring test on the question text, with no
/// tokenizing or stemming. A blank term applies no filter and returns every
/// question in its original order.
#[must_use]
pub fn search(items: &[Question], term: &str) -> Vec<Question> {
    if term.trim().is_empty() {
        return items.to_vec();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
