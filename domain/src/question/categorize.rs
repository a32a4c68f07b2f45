//! Categorize questions: sort items into categories.

use crate::core::error::{DomainError, check_index};
use crate::validation::{Violation, ViolationCode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Placeholder added by "add category" in the editor.
pub const NEW_CATEGORY: &str = "New Category";
/// Placeholder added by "add item" in the editor.
pub const NEW_ITEM: &str = "New Item";

/// Authoring state of a Categorize question.
///
/// `correct_category` is keyed by item *text*, so two items with the same
/// text share one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeBody {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub correct_category: BTreeMap<String, String>,
}

impl CategorizeBody {
    pub fn new(categories: Vec<String>, items: Vec<String>) -> Self {
        Self {
            categories,
            items,
            correct_category: BTreeMap::new(),
        }
    }

    pub(crate) fn placeholder() -> Self {
        Self::new(
            vec!["Category 1".to_string(), "Category 2".to_string()],
            vec!["Item 1".to_string(), "Item 2".to_string()],
        )
    }

    pub fn add_category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    pub fn rename_category(mut self, index: usize, name: impl Into<String>) -> Result<Self, DomainError> {
        check_index("category", index, self.categories.len())?;
        self.categories[index] = name.into();
        Ok(self)
    }

    /// Remove a category. Items already assigned to it keep their
    /// (now dangling) correctCategory entry; validation reports it.
    pub fn remove_category(mut self, index: usize) -> Result<Self, DomainError> {
        check_index("category", index, self.categories.len())?;
        self.categories.remove(index);
        Ok(self)
    }

    pub fn add_item(mut self, text: impl Into<String>) -> Self {
        self.items.push(text.into());
        self
    }

    pub fn rename_item(mut self, index: usize, text: impl Into<String>) -> Result<Self, DomainError> {
        check_index("item", index, self.items.len())?;
        self.items[index] = text.into();
        Ok(self)
    }

    /// Remove the item at `index` and the correctCategory entry keyed by its
    /// text. Other items with identical text lose their entry too.
    pub fn remove_item(mut self, index: usize) -> Result<Self, DomainError> {
        check_index("item", index, self.items.len())?;
        let removed = self.items.remove(index);
        self.correct_category.remove(&removed);
        Ok(self)
    }

    pub fn set_correct_category(mut self, item: impl Into<String>, category: impl Into<String>) -> Self {
        self.correct_category.insert(item.into(), category.into());
        self
    }

    pub fn clear_correct_category(mut self, item: &str) -> Self {
        self.correct_category.remove(item);
        self
    }

    /// Set or clear the correct category of the item at `index`, keyed by
    /// the item's text.
    pub fn correct_category_at(self, index: usize, category: Option<String>) -> Result<Self, DomainError> {
        check_index("item", index, self.items.len())?;
        let item = self.items[index].clone();
        Ok(match category {
            Some(category) => self.set_correct_category(item, category),
            None => self.clear_correct_category(&item),
        })
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub(crate) fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.categories.is_empty() {
            violations.push(Violation::error(
                ViolationCode::NoCategories,
                "categorize question has no categories",
            ));
        }
        if self.items.is_empty() {
            violations.push(Violation::error(
                ViolationCode::NoItems,
                "categorize question has no items",
            ));
        }

        for dup in duplicates(&self.categories) {
            violations.push(Violation::warning(
                ViolationCode::DuplicateCategory,
                format!("category '{}' appears more than once", dup),
            ));
        }
        for dup in duplicates(&self.items) {
            violations.push(Violation::warning(
                ViolationCode::DuplicateItem,
                format!(
                    "item '{}' appears more than once; its correct category is shared",
                    dup
                ),
            ));
        }

        for (item, category) in &self.correct_category {
            if !self.has_item(item) {
                violations.push(Violation::warning(
                    ViolationCode::CorrectCategoryUnknownItem,
                    format!("correct category set for unknown item '{}'", item),
                ));
            }
            if !category.is_empty() && !self.has_category(category) {
                violations.push(Violation::warning(
                    ViolationCode::CorrectCategoryUnknownCategory,
                    format!("item '{}' points at unknown category '{}'", item, category),
                ));
            }
        }

        violations
    }
}

/// Values appearing more than once, in first-seen order.
fn duplicates(values: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if !seen.insert(value.as_str()) && reported.insert(value.as_str()) {
            out.push(value.as_str());
        }
    }
    out
}
