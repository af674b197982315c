use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use super::collection::WordCategories;
use super::item::{SkippedWord, WordItem};
use crate::error::PoolError;

/// A word drawn together with its category.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CategorizedWord {
    pub category: String,
    pub word: WordItem,
}

/// Category-aware sampler for the word game.
///
/// A draw picks a random category, then a random eligible word in it. A
/// word is eligible unless it is the word on display or was skipped earlier
/// in the round. Categories with nothing eligible are dropped from the
/// candidate list and another is tried.
#[derive(Debug, Clone)]
pub struct CategoryPool<R = StdRng> {
    categories: Vec<(String, Vec<WordItem>)>,
    rng: R,
}

impl CategoryPool<StdRng> {
    pub fn new(categories: WordCategories) -> Self {
        Self::with_rng(categories, StdRng::from_os_rng())
    }

    pub fn seeded(categories: WordCategories, seed: u64) -> Self {
        Self::with_rng(categories, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CategoryPool<R> {
    pub fn with_rng(categories: WordCategories, rng: R) -> Self {
        CategoryPool {
            categories: categories.into_iter().collect(),
            rng,
        }
    }

    pub fn draw(
        &mut self,
        current: Option<&WordItem>,
        skipped: &[SkippedWord],
    ) -> Result<CategorizedWord, PoolError> {
        let is_eligible = |word: &WordItem| {
            !current.is_some_and(|c| c.word == word.word)
                && !skipped.iter().any(|s| s.word.word == word.word)
        };

        let mut candidates: Vec<usize> = (0..self.categories.len())
            .filter(|&i| !self.categories[i].1.is_empty())
            .collect();

        while !candidates.is_empty() {
            let pick = self.rng.random_range(0..candidates.len());
            let (name, words) = &self.categories[candidates[pick]];
            let eligible: Vec<&WordItem> = words.iter().filter(|w| is_eligible(w)).collect();

            if eligible.is_empty() {
                debug!(category = %name, "category has no eligible words");
                candidates.swap_remove(pick);
                continue;
            }

            let word = eligible[self.rng.random_range(0..eligible.len())].clone();
            debug!(category = %name, word = %word.word, "drew word");
            return Ok(CategorizedWord {
                category: name.clone(),
                word,
            });
        }

        warn!("word pool exhausted");
        Err(PoolError::Exhausted)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Total number of words across all categories.
    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|(_, words)| words.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> WordCategories {
        let mut map = WordCategories::new();
        map.insert(
            "animals".to_string(),
            vec![
                WordItem::new("otter", "river mammal"),
                WordItem::new("heron", "wading bird"),
            ],
        );
        map.insert(
            "colors".to_string(),
            vec![WordItem::new("teal", "blue-green")],
        );
        map.insert("empty".to_string(), Vec::new());
        map
    }

    fn skip(word: &WordItem, category: &str) -> SkippedWord {
        SkippedWord {
            word: word.clone(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_draw_returns_word_from_its_category() {
        let source = categories();
        let mut pool = CategoryPool::seeded(source.clone(), 1);
        for _ in 0..20 {
            let drawn = pool.draw(None, &[]).unwrap();
            assert!(source[&drawn.category].contains(&drawn.word));
        }
    }

    #[test]
    fn test_never_returns_current_or_skipped() {
        let mut pool = CategoryPool::seeded(categories(), 2);
        let otter = WordItem::new("otter", "river mammal");
        let teal = WordItem::new("teal", "blue-green");
        let skipped = vec![skip(&teal, "colors")];

        for _ in 0..50 {
            let drawn = pool.draw(Some(&otter), &skipped).unwrap();
            assert_eq!(drawn.word.word, "heron");
            assert_eq!(drawn.category, "animals");
        }
    }

    #[test]
    fn test_exhaustion() {
        let mut pool = CategoryPool::seeded(categories(), 3);
        let heron = WordItem::new("heron", "wading bird");
        let skipped = vec![
            skip(&WordItem::new("otter", "river mammal"), "animals"),
            skip(&WordItem::new("teal", "blue-green"), "colors"),
        ];
        assert_eq!(
            pool.draw(Some(&heron), &skipped),
            Err(PoolError::Exhausted)
        );
    }

    #[test]
    fn test_no_categories_is_exhausted() {
        let mut pool = CategoryPool::seeded(WordCategories::new(), 4);
        assert_eq!(pool.draw(None, &[]), Err(PoolError::Exhausted));
    }

    #[test]
    fn test_counts() {
        let pool = CategoryPool::seeded(categories(), 5);
        assert_eq!(pool.word_count(), 3);
        assert_eq!(
            pool.category_names().collect::<Vec<_>>(),
            vec!["animals", "colors", "empty"]
        );
    }
}
