use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::session::SessionError;
use crate::game::summary::{PassThreshold, SessionSummary};
use crate::model::{CategoryId, ItemId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchSetError {
    #[error("match puzzle needs at least one item and one category")]
    Empty,

    #[error("item id {0} is used twice")]
    DuplicateItem(ItemId),

    #[error("category id {0} is used twice")]
    DuplicateCategory(CategoryId),

    #[error("pair ({0}, {1}) references an unknown item or category")]
    UnknownPair(ItemId, CategoryId),

    #[error("item {0} has no correct category")]
    UnmatchedItem(ItemId),

    #[error("category {0} is the answer for more than one item")]
    SharedCategory(CategoryId),

    #[error("{items} items cannot be placed on {categories} categories")]
    TooFewCategories { items: usize, categories: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchItem {
    pub id: ItemId,
    pub label: String,
    #[serde(default)]
    pub media: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCategory {
    pub id: CategoryId,
    pub label: String,
}

/// Validated puzzle content: items, categories and the answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    items: Vec<MatchItem>,
    categories: Vec<MatchCategory>,
    correct: HashSet<(ItemId, CategoryId)>,
}

impl MatchSet {
    /// # Errors
    ///
    /// Returns `MatchSetError` for empty sides, duplicate ids, pairs that
    /// point nowhere, items without any correct category, or answer keys a
    /// flawless player could not complete (a category shared by two items,
    /// fewer categories than items).
    pub fn new(
        items: Vec<MatchItem>,
        categories: Vec<MatchCategory>,
        pairs: impl IntoIterator<Item = (ItemId, CategoryId)>,
    ) -> Result<Self, MatchSetError> {
        if items.is_empty() || categories.is_empty() {
            return Err(MatchSetError::Empty);
        }

        let mut item_ids = HashSet::new();
        for item in &items {
            if !item_ids.insert(item.id) {
                return Err(MatchSetError::DuplicateItem(item.id));
            }
        }
        let mut category_ids = HashSet::new();
        for category in &categories {
            if !category_ids.insert(category.id) {
                return Err(MatchSetError::DuplicateCategory(category.id));
            }
        }

        if categories.len() < items.len() {
            return Err(MatchSetError::TooFewCategories {
                items: items.len(),
                categories: categories.len(),
            });
        }

        let mut correct = HashSet::new();
        let mut claimed = HashSet::new();
        for (item, category) in pairs {
            if !item_ids.contains(&item) || !category_ids.contains(&category) {
                return Err(MatchSetError::UnknownPair(item, category));
            }
            if !correct.insert((item, category)) {
                continue;
            }
            // Committing a pair consumes its category.
            if !claimed.insert(category) {
                return Err(MatchSetError::SharedCategory(category));
            }
        }

        if let Some(orphan) = items
            .iter()
            .find(|item| !correct.iter().any(|(i, _)| *i == item.id))
        {
            return Err(MatchSetError::UnmatchedItem(orphan.id));
        }

        Ok(Self {
            items,
            categories,
            correct,
        })
    }

    #[must_use]
    pub fn items(&self) -> &[MatchItem] {
        &self.items
    }

    #[must_use]
    pub fn categories(&self) -> &[MatchCategory] {
        &self.categories
    }

    #[must_use]
    pub fn is_correct(&self, item: ItemId, category: CategoryId) -> bool {
        self.correct.contains(&(item, category))
    }
}

/// One committed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord {
    pub item: ItemId,
    pub category: CategoryId,
    pub is_correct: bool,
}

/// Drag-to-match session.
///
/// The player picks an item and a category (either order, re-selectable),
/// then commits. Committed items and categories leave the board whether or
/// not the pair was right.
#[derive(Debug, Clone)]
pub struct MatchPuzzle {
    set: MatchSet,
    selected_item: Option<ItemId>,
    selected_category: Option<CategoryId>,
    used_items: BTreeSet<ItemId>,
    used_categories: BTreeSet<CategoryId>,
    history: Vec<MatchRecord>,
    score: u32,
}

impl MatchPuzzle {
    #[must_use]
    pub fn new(set: MatchSet) -> Self {
        Self {
            set,
            selected_item: None,
            selected_category: None,
            used_items: BTreeSet::new(),
            used_categories: BTreeSet::new(),
            history: Vec::new(),
            score: 0,
        }
    }

    #[must_use]
    pub fn set(&self) -> &MatchSet {
        &self.set
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Every item counts once towards the total.
    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.set.items.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn history(&self) -> &[MatchRecord] {
        &self.history
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<ItemId> {
        self.selected_item
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<CategoryId> {
        self.selected_category
    }

    pub fn available_items(&self) -> impl Iterator<Item = &MatchItem> {
        self.set
            .items
            .iter()
            .filter(|item| !self.used_items.contains(&item.id))
    }

    pub fn available_categories(&self) -> impl Iterator<Item = &MatchCategory> {
        self.set
            .categories
            .iter()
            .filter(|category| !self.used_categories.contains(&category.id))
    }

    #[must_use]
    pub fn is_item_available(&self, id: ItemId) -> bool {
        !self.used_items.contains(&id) && self.set.items.iter().any(|i| i.id == id)
    }

    #[must_use]
    pub fn is_category_available(&self, id: CategoryId) -> bool {
        !self.used_categories.contains(&id) && self.set.categories.iter().any(|c| c.id == id)
    }

    /// Finished once every item was attempted, or when no category is left
    /// to drop the remaining items on.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.used_items.len() == self.set.items.len()
            || self.used_categories.len() == self.set.categories.len()
    }

    /// # Errors
    ///
    /// Returns `SessionError::Finished` or `SessionError::ItemUnavailable`.
    pub fn select_item(&mut self, id: ItemId) -> Result<(), SessionError> {
        self.ensure_running()?;
        if !self.is_item_available(id) {
            return Err(SessionError::ItemUnavailable(id));
        }
        self.selected_item = Some(id);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::Finished` or `SessionError::CategoryUnavailable`.
    pub fn select_category(&mut self, id: CategoryId) -> Result<(), SessionError> {
        self.ensure_running()?;
        if !self.is_category_available(id) {
            return Err(SessionError::CategoryUnavailable(id));
        }
        self.selected_category = Some(id);
        Ok(())
    }

    /// Scores the selected pair and removes both sides from the board.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IncompleteSelection` unless both sides are selected.
    pub fn commit_match(&mut self) -> Result<MatchRecord, SessionError> {
        self.ensure_running()?;
        let (Some(item), Some(category)) = (self.selected_item, self.selected_category) else {
            return Err(SessionError::IncompleteSelection);
        };

        let is_correct = self.set.is_correct(item, category);
        if is_correct {
            self.score += 1;
        }
        let record = MatchRecord {
            item,
            category,
            is_correct,
        };
        self.history.push(record);
        self.used_items.insert(item);
        self.used_categories.insert(category);
        self.selected_item = None;
        self.selected_category = None;
        Ok(record)
    }

    pub fn reset(&mut self) {
        self.selected_item = None;
        self.selected_category = None;
        self.used_items.clear();
        self.used_categories.clear();
        self.history.clear();
        self.score = 0;
    }

    #[must_use]
    pub fn summary(&self, threshold: PassThreshold) -> Option<SessionSummary> {
        self.is_finished()
            .then(|| SessionSummary::new(self.score, self.total(), threshold))
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        if self.is_finished() {
            Err(SessionError::Finished)
        } else {
            Ok(())
        }
    }
}
