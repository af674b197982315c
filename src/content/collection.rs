use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use super::item::{QuizItem, WordItem};
use crate::error::ContentError;

/// Words grouped by category name, in file order.
pub type WordCategories = IndexMap<String, Vec<WordItem>>;

/// Question files are either a flat list or a category map.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuizFile {
    Flat(Vec<QuizItem>),
    Categorized(IndexMap<String, Vec<QuizItem>>),
}

/// Parse a question collection. Items from a category map are tagged with
/// their category and flattened in file order.
pub fn parse_quiz_items(json: &str) -> Result<Vec<QuizItem>, ContentError> {
    let items = match serde_json::from_str::<QuizFile>(json)? {
        QuizFile::Flat(items) => items,
        QuizFile::Categorized(categories) => categories
            .into_iter()
            .flat_map(|(category, items)| {
                items.into_iter().map(move |item| QuizItem {
                    category: Some(category.clone()),
                    ..item
                })
            })
            .collect(),
    };
    debug!(count = items.len(), "parsed quiz items");
    Ok(items)
}

pub fn parse_word_categories(json: &str) -> Result<WordCategories, ContentError> {
    let categories: WordCategories = serde_json::from_str(json)?;
    debug!(categories = categories.len(), "parsed word categories");
    Ok(categories)
}

pub fn load_quiz_items(path: &Path) -> Result<Vec<QuizItem>, ContentError> {
    parse_quiz_items(&read(path)?)
}

pub fn load_word_categories(path: &Path) -> Result<WordCategories, ContentError> {
    parse_word_categories(&read(path)?)
}

fn read(path: &Path) -> Result<String, ContentError> {
    std::fs::read_to_string(path).map_err(|e| ContentError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_quiz_items() {
        let json = r#"[
            {"question": "2 + 2?", "answer": "4"},
            {"question": "Capital of France?", "answer": "Paris", "image": "paris.png"}
        ]"#;
        let items = parse_quiz_items(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].image.as_deref(), Some("paris.png"));
        assert_eq!(items[0].category, None);
    }

    #[test]
    fn test_parse_categorized_quiz_items() {
        let json = r#"{
            "math": [{"question": "2 + 2?", "answer": "4"}],
            "geography": [
                {"question": "Capital of France?", "answer": "Paris"},
                {"question": "Longest river?", "answer": "Nile", "answer_image": "nile.jpg"}
            ]
        }"#;
        let items = parse_quiz_items(json).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].category.as_deref(), Some("math"));
        assert_eq!(items[1].category.as_deref(), Some("geography"));
        assert_eq!(items[2].answer_image.as_deref(), Some("nile.jpg"));
    }

    #[test]
    fn test_parse_word_categories() {
        let json = r#"{
            "animals": [{"word": "otter", "definition": "a river mammal"}],
            "tools": []
        }"#;
        let categories = parse_word_categories(json).unwrap();
        assert_eq!(categories["animals"][0].word, "otter");
        assert!(categories["tools"].is_empty());
    }

    #[test]
    fn test_word_categories_keep_file_order() {
        let json = r#"{
            "weather": [{"word": "sleet", "definition": "icy rain"}],
            "animals": [{"word": "otter", "definition": "a river mammal"}],
            "colors": []
        }"#;
        let categories = parse_word_categories(json).unwrap();
        assert_eq!(
            categories.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["weather", "animals", "colors"]
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_word_categories("[1, 2"),
            Err(ContentError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_quiz_items(Path::new("does_not_exist.json")).unwrap_err();
        assert!(matches!(err, ContentError::FileRead { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, r#"{"colors": [{"word": "teal", "definition": "blue-green"}]}"#)
            .unwrap();
        let categories = load_word_categories(&path).unwrap();
        assert_eq!(categories.len(), 1);
    }
}
