//! Domain types and the pure question-bank operations: paging, search, quiz
//! selection and category shaping. Nothing in this crate performs I/O.

#![forbid(unsafe_code)]

pub mod model;
pub mod pagination;
pub mod random;
pub mod search;
pub mod selection;
pub mod shaping;

pub use pagination::{QUESTIONS_PER_PAGE, paginate};
pub use random::RandomSource;
pub use search::search;
pub use selection::next_question;
pub use shaping::{ALL_CATEGORIES_LABEL, current_category_label, to_category_mapping};
