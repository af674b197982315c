use serde::{Deserialize, Serialize};

/// A trivia question with its answer and optional image references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_image: Option<String>,
    /// Category the item was filed under, if the source was categorized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl QuizItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        QuizItem {
            question: question.into(),
            answer: answer.into(),
            image: None,
            answer_image: None,
            category: None,
        }
    }
}

/// A vocabulary word and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordItem {
    pub word: String,
    pub definition: String,
}

impl WordItem {
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        WordItem {
            word: word.into(),
            definition: definition.into(),
        }
    }
}

/// A word the player passed on, with the category it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedWord {
    pub word: WordItem,
    pub category: String,
}
