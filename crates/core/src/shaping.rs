use std::collections::BTreeMap;

use crate::model::{Category, CategoryScope};

/// Label reported as the current category when no category filter applies.
pub const ALL_CATEGORIES_LABEL: &str = "All";

/// Map each category id (stringified) to its display name.
///
/// When the input repeats an id, the last entry wins.
#[must_use]
pub fn to_category_mapping(categories: &[Category]) -> BTreeMap<String, String> {
    categories
        .iter()
        .map(|c| (c.id().to_string(), c.name().as_str().to_owned()))
        .collect()
}

/// Display name for a scope.
///
/// Returns `None` when the scope names a category that is not in
/// `categories`.
#[must_use]
pub fn current_category_label(scope: CategoryScope, categories: &[Category]) -> Option<String> {
    match scope {
        CategoryScope::All => Some(ALL_CATEGORIES_LABEL.to_owned()),
        CategoryScope::Only(id) => categories
            .iter()
            .rev()
            .find(|c| c.id() == id)
            .map(|c| c.name().as_str().to_owned()),
    }
}
