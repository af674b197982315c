//! Paged flashcard viewer over the vocabulary categories.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{WordCategories, WordItem};
use crate::observer::{Observers, SubscriptionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashcardConfig {
    pub words_per_page: usize,
}

impl Default for FlashcardConfig {
    fn default() -> Self {
        FlashcardConfig { words_per_page: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub word: WordItem,
    pub flipped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckSnapshot {
    pub categories: Vec<String>,
    pub selected: Option<String>,
    pub page: usize,
    pub total_pages: usize,
    pub cards: Vec<Card>,
}

pub struct FlashcardDeck {
    categories: WordCategories,
    selected: Option<String>,
    page: usize,
    per_page: usize,
    flipped: BTreeSet<usize>,
    observers: Observers<DeckSnapshot>,
}

impl FlashcardDeck {
    /// Open the deck on the first category in file order.
    pub fn new(categories: WordCategories, config: &FlashcardConfig) -> Self {
        let selected = categories.keys().next().cloned();
        FlashcardDeck {
            categories,
            selected,
            page: 0,
            per_page: config.words_per_page.max(1),
            flipped: BTreeSet::new(),
            observers: Observers::new(),
        }
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Switch category, back to the first page with every card face down.
    /// Unknown names are ignored.
    pub fn select_category(&mut self, name: &str) -> bool {
        if !self.categories.contains_key(name) {
            return false;
        }
        self.selected = Some(name.to_string());
        self.page = 0;
        self.flipped.clear();
        debug!(category = name, "category selected");
        self.notify();
        true
    }

    fn words(&self) -> &[WordItem] {
        self.selected
            .as_ref()
            .and_then(|name| self.categories.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.words().len().div_ceil(self.per_page)
    }

    pub fn page_words(&self) -> &[WordItem] {
        let words = self.words();
        let start = (self.page * self.per_page).min(words.len());
        let end = (start + self.per_page).min(words.len());
        &words[start..end]
    }

    pub fn next_page(&mut self) -> bool {
        if self.page + 1 >= self.total_pages() {
            return false;
        }
        self.page += 1;
        self.flipped.clear();
        self.notify();
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        self.flipped.clear();
        self.notify();
        true
    }

    /// Toggle the card at `index` on the current page.
    pub fn flip(&mut self, index: usize) -> Option<bool> {
        if index >= self.page_words().len() {
            return None;
        }
        let flipped = if self.flipped.remove(&index) {
            false
        } else {
            self.flipped.insert(index);
            true
        };
        self.notify();
        Some(flipped)
    }

    pub fn is_flipped(&self, index: usize) -> bool {
        self.flipped.contains(&index)
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot {
            categories: self.categories.keys().cloned().collect(),
            selected: self.selected.clone(),
            page: self.page,
            total_pages: self.total_pages(),
            cards: self
                .page_words()
                .iter()
                .enumerate()
                .map(|(i, word)| Card {
                    word: word.clone(),
                    flipped: self.is_flipped(i),
                })
                .collect(),
        }
    }

    pub fn subscribe(&mut self, f: impl FnMut(&DeckSnapshot) + 'static) -> SubscriptionId {
        self.observers.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&mut self) {
        if !self.observers.is_empty() {
            let snapshot = self.snapshot();
            self.observers.notify(&snapshot);
        }
    }
}
