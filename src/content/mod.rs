//! Quiz and vocabulary content: item types, JSON collections and the two
//! samplers that feed the games.

mod category;
mod collection;
mod item;
mod pool;

pub use category::{CategorizedWord, CategoryPool};
pub use collection::{
    load_quiz_items, load_word_categories, parse_quiz_items, parse_word_categories,
    WordCategories,
};
pub use item::{QuizItem, SkippedWord, WordItem};
pub use pool::{ContentPool, Drawn};
