use std::collections::HashMap;

use crate::model::{Answer, AnswerKey};

/// Session-scoped answers, keyed by `AnswerKey`.
///
/// Iteration order is first-insertion order. Re-answering a question replaces
/// the value in place and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerStore {
    entries: Vec<(AnswerKey, Answer)>,
    index: HashMap<AnswerKey, usize>,
}

impl AnswerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, overwriting any previous value for the same key.
    ///
    /// The key is not checked against a catalog. Returns the previous value.
    pub fn record(
        &mut self,
        group: impl Into<String>,
        subgroup: impl Into<String>,
        question: impl Into<String>,
        value: Answer,
    ) -> Option<Answer> {
        self.record_key(AnswerKey::new(group, subgroup, question), value)
    }

    pub fn record_key(&mut self, key: AnswerKey, value: Answer) -> Option<Answer> {
        if let Some(&pos) = self.index.get(&key) {
            let previous = self.entries[pos].1;
            self.entries[pos].1 = value;
            return Some(previous);
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    #[must_use]
    pub fn get(&self, key: &AnswerKey) -> Option<Answer> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    #[must_use]
    pub fn contains(&self, key: &AnswerKey) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnswerKey, Answer)> {
        self.entries.iter().map(|(key, value)| (key, *value))
    }

    /// Copy of every entry in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(AnswerKey, Answer)> {
        self.entries.clone()
    }
}
