use std::fmt;

use serde::{Deserialize, Serialize};

/// A checklist answer. The UI offers the options in `Answer::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub const ALL: [Answer; 2] = [Answer::Yes, Answer::No];

    /// The option a freshly rendered question starts with.
    #[must_use]
    pub const fn first_option() -> Self {
        Self::ALL[0]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, Answer::No)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Composite identity of an answer: `(group, subgroup, question)`.
///
/// The same question text under two subgroups yields two distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnswerKey {
    group: String,
    subgroup: String,
    question: String,
}

impl AnswerKey {
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        subgroup: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            subgroup: subgroup.into(),
            question: question.into(),
        }
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn subgroup(&self) -> &str {
        &self.subgroup
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Split the key back into `(group, subgroup, question)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String, String) {
        (self.group, self.subgroup, self.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_option_is_yes() {
        assert_eq!(Answer::first_option(), Answer::Yes);
        assert!(Answer::No.is_negative());
        assert!(!Answer::Yes.is_negative());
        assert_eq!(Answer::No.to_string(), "No");
    }

    #[test]
    fn keys_differ_by_subgroup() {
        let a = AnswerKey::new("G", "S1", "Q");
        let b = AnswerKey::new("G", "S2", "Q");
        assert_ne!(a, b);
        assert_eq!(
            a.into_parts(),
            ("G".to_owned(), "S1".to_owned(), "Q".to_owned())
        );
    }
}
