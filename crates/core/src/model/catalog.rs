use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::error::NotFoundError;
use crate::model::AnswerKey;

/// The CX survey quality checklist shipped with the app.
const BUILTIN_CATALOG: &str = include_str!("../../data/cx_checklist.json");

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no groups")]
    Empty,

    #[error("group name cannot be empty")]
    EmptyGroupName,

    #[error("group {group:?} has no subgroups")]
    EmptyGroup { group: String },

    #[error("subgroup name cannot be empty (group {group:?})")]
    EmptySubgroupName { group: String },

    #[error("subgroup {subgroup:?} in group {group:?} has no questions")]
    EmptySubgroup { group: String, subgroup: String },

    #[error("question text cannot be empty ({group:?} / {subgroup:?})")]
    EmptyQuestion { group: String, subgroup: String },

    #[error("duplicate group name: {0:?}")]
    DuplicateGroup(String),

    #[error("duplicate subgroup {subgroup:?} in group {group:?}")]
    DuplicateSubgroup { group: String, subgroup: String },

    #[error("duplicate question {question:?} in {group:?} / {subgroup:?}")]
    DuplicateQuestion {
        group: String,
        subgroup: String,
        question: String,
    },

    #[error("invalid catalog document: {0}")]
    Parse(String),
}

//
// ─── SUBGROUP ──────────────────────────────────────────────────────────────────
//

/// A named page of questions. Question order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subgroup {
    name: String,
    questions: Vec<String>,
}

impl Subgroup {
    #[must_use]
    pub fn new(name: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    #[must_use]
    pub fn contains(&self, question: &str) -> bool {
        self.questions.iter().any(|q| q == question)
    }
}

//
// ─── GROUP ─────────────────────────────────────────────────────────────────────
//

/// Top-level checklist category. Subgroup order is page order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    name: String,
    subgroups: Vec<Subgroup>,
}

impl Group {
    #[must_use]
    pub fn new(name: impl Into<String>, subgroups: Vec<Subgroup>) -> Self {
        Self {
            name: name.into(),
            subgroups,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn subgroups(&self) -> &[Subgroup] {
        &self.subgroups
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.subgroups.iter().map(|s| s.questions.len()).sum()
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct CatalogDocument {
    groups: Vec<Group>,
}

/// Ordered, immutable set of groups → subgroups → questions.
///
/// A validated catalog always has at least one group, every group has at least
/// one subgroup, and every `(group, subgroup, question)` triple is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<Group>,
}

impl Catalog {
    /// Build a catalog from groups, validating structure and key uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for empty containers, blank names, or duplicate
    /// group/subgroup/question identities.
    pub fn new(groups: Vec<Group>) -> Result<Self, CatalogError> {
        if groups.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut group_names = HashSet::new();
        for group in &groups {
            if group.name.trim().is_empty() {
                return Err(CatalogError::EmptyGroupName);
            }
            if !group_names.insert(group.name.as_str()) {
                return Err(CatalogError::DuplicateGroup(group.name.clone()));
            }
            validate_group(group)?;
        }

        Ok(Self { groups })
    }

    /// Parse a catalog from its JSON document form.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or any validation error
    /// from [`Catalog::new`].
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(doc.groups)
    }

    /// The checklist embedded at build time.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded document is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Group names in menu order.
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        self.groups.iter().map(Group::name).collect()
    }

    #[must_use]
    pub fn all_groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    /// # Errors
    ///
    /// Returns `NotFoundError::Group` if no group has this name.
    pub fn group(&self, name: &str) -> Result<&Group, NotFoundError> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| NotFoundError::Group {
                name: name.to_owned(),
            })
    }

    /// Ordered subgroups of a group.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Group` if no group has this name.
    pub fn subgroups_of(&self, group_name: &str) -> Result<&[Subgroup], NotFoundError> {
        self.group(group_name).map(Group::subgroups)
    }

    /// # Errors
    ///
    /// Returns `NotFoundError::Group` for an unknown group and
    /// `NotFoundError::Page` when `index` is past the last subgroup.
    pub fn subgroup_at(&self, group_name: &str, index: usize) -> Result<&Subgroup, NotFoundError> {
        self.subgroups_of(group_name)?
            .get(index)
            .ok_or_else(|| NotFoundError::Page {
                group: group_name.to_owned(),
                index,
            })
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.groups.iter().map(Group::question_count).sum()
    }

    /// Whether the key names a question that exists in this catalog.
    #[must_use]
    pub fn contains_key(&self, key: &AnswerKey) -> bool {
        self.subgroups_of(key.group())
            .ok()
            .and_then(|subs| subs.iter().find(|s| s.name == key.subgroup()))
            .is_some_and(|s| s.contains(key.question()))
    }
}

fn validate_group(group: &Group) -> Result<(), CatalogError> {
    if group.subgroups.is_empty() {
        return Err(CatalogError::EmptyGroup {
            group: group.name.clone(),
        });
    }

    let mut subgroup_names = HashSet::new();
    for subgroup in &group.subgroups {
        if subgroup.name.trim().is_empty() {
            return Err(CatalogError::EmptySubgroupName {
                group: group.name.clone(),
            });
        }
        if !subgroup_names.insert(subgroup.name.as_str()) {
            return Err(CatalogError::DuplicateSubgroup {
                group: group.name.clone(),
                subgroup: subgroup.name.clone(),
            });
        }
        if subgroup.questions.is_empty() {
            return Err(CatalogError::EmptySubgroup {
                group: group.name.clone(),
                subgroup: subgroup.name.clone(),
            });
        }

        let mut questions = HashSet::new();
        for question in &subgroup.questions {
            if question.trim().is_empty() {
                return Err(CatalogError::EmptyQuestion {
                    group: group.name.clone(),
                    subgroup: subgroup.name.clone(),
                });
            }
            if !questions.insert(question.as_str()) {
                return Err(CatalogError::DuplicateQuestion {
                    group: group.name.clone(),
                    subgroup: subgroup.name.clone(),
                    question: question.clone(),
                });
            }
        }
    }

    Ok(())
}
