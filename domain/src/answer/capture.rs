//! Per-variant answer values and their capture operations.
//!
//! Capture is permissive: nothing here checks that an item, ordinal or
//! sub-question actually exists on the question. That happens at the
//! submission boundary (see [`super::check`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categorize answer: item text → chosen category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAnswer {
    placements: BTreeMap<String, String>,
}

impl CategoryAnswer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `item` in `category`, replacing any earlier placement.
    pub fn set_category_for_item(mut self, item: impl Into<String>, category: impl Into<String>) -> Self {
        self.placements.insert(item.into(), category.into());
        self
    }

    /// Take `item` back out of its category.
    pub fn unset_item(mut self, item: &str) -> Self {
        self.placements.remove(item);
        self
    }

    pub fn category_of(&self, item: &str) -> Option<&str> {
        self.placements.get(item).map(String::as_str)
    }

    /// Items placed in `category`, in item order.
    pub fn items_in(&self, category: &str) -> Vec<&str> {
        self.placements
            .iter()
            .filter(|(_, c)| c.as_str() == category)
            .map(|(item, _)| item.as_str())
            .collect()
    }

    /// Items of the question not yet placed anywhere, in question order.
    pub fn uncategorized_items<'a>(&self, items: &'a [String]) -> Vec<&'a str> {
        items
            .iter()
            .filter(|item| !self.placements.contains_key(item.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn placements(&self) -> &BTreeMap<String, String> {
        &self.placements
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Cloze answer: blank ordinal → filled text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlankAnswer {
    fills: BTreeMap<usize, String>,
}

impl BlankAnswer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the blank with the given ordinal, overwriting earlier text.
    pub fn set_blank(mut self, ordinal: usize, text: impl Into<String>) -> Self {
        self.fills.insert(ordinal, text.into());
        self
    }

    pub fn blank(&self, ordinal: usize) -> Option<&str> {
        self.fills.get(&ordinal).map(String::as_str)
    }

    pub fn fills(&self) -> &BTreeMap<usize, String> {
        &self.fills
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }
}

/// Comprehension answer: sub-question index → chosen option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceAnswer {
    choices: BTreeMap<usize, String>,
}

impl ChoiceAnswer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the chosen option; one option per sub-question, last write wins.
    pub fn set_choice(mut self, sub_question: usize, option: impl Into<String>) -> Self {
        self.choices.insert(sub_question, option.into());
        self
    }

    pub fn choice(&self, sub_question: usize) -> Option<&str> {
        self.choices.get(&sub_question).map(String::as_str)
    }

    pub fn choices(&self) -> &BTreeMap<usize, String> {
        &self.choices
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}
