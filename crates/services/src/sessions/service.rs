use std::fmt;
use std::sync::Arc;

use checklist_core::model::{
    Answer, AnswerKey, AnswerStore, Catalog, Group, SessionId, Subgroup,
};
use checklist_core::{Cursor, Navigator, NotFoundError};
use tracing::{debug, info};

use super::progress::{ChecklistProgress, GroupProgress};
use super::settings::SessionSettings;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One user's pass through the checklist: cursor, answers and settings.
///
/// Nothing here is shared between sessions except the immutable catalog.
/// A page counts as rendered as soon as it becomes current, which is when the
/// default-answer policy from `SessionSettings` is applied.
pub struct ChecklistSession {
    id: SessionId,
    navigator: Navigator,
    answers: AnswerStore,
    settings: SessionSettings,
}

impl ChecklistSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, settings: SessionSettings) -> Self {
        Self::with_id(SessionId::new_random(), catalog, settings)
    }

    #[must_use]
    pub fn with_id(id: SessionId, catalog: Arc<Catalog>, settings: SessionSettings) -> Self {
        let mut session = Self {
            id,
            navigator: Navigator::new(catalog),
            answers: AnswerStore::new(),
            settings,
        };
        info!(
            session_id = %session.id,
            require_explicit_answer = settings.require_explicit_answer,
            "checklist session started"
        );
        session.page_rendered();
        session
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.navigator.catalog()
    }

    /// Group names in menu order.
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        self.catalog().groups()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.navigator.cursor()
    }

    #[must_use]
    pub fn current_group(&self) -> &Group {
        self.navigator.current_group()
    }

    #[must_use]
    pub fn current_subgroup(&self) -> &Subgroup {
        self.navigator.current_subgroup()
    }

    #[must_use]
    pub fn page_index(&self) -> usize {
        self.navigator.page_index()
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.navigator.page_count()
    }

    #[must_use]
    pub fn can_previous(&self) -> bool {
        self.navigator.can_previous()
    }

    #[must_use]
    pub fn can_next(&self) -> bool {
        self.navigator.can_next()
    }

    #[must_use]
    pub fn can_finalize(&self) -> bool {
        self.navigator.can_finalize()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<(AnswerKey, Answer)> {
        self.answers.snapshot()
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Switch groups. Always lands on the group's first page.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` for an unknown group name.
    pub fn select_group(&mut self, name: &str) -> Result<(), SessionError> {
        self.navigator.select_group(name)?;
        debug!(session_id = %self.id, group = name, "group selected");
        self.page_rendered();
        Ok(())
    }

    /// Advance one page. Returns `Ok(false)` on the last page of the group.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Unanswered` when explicit answers are required
    /// and the current page is incomplete.
    pub fn next(&mut self) -> Result<bool, SessionError> {
        if !self.navigator.can_next() {
            return Ok(false);
        }
        self.ensure_page_answered()?;
        self.navigator.next();
        debug!(session_id = %self.id, page = self.page_index(), "next page");
        self.page_rendered();
        Ok(true)
    }

    /// Go back one page. Returns `false` on the first page of the group.
    pub fn previous(&mut self) -> bool {
        if !self.navigator.previous() {
            return false;
        }
        debug!(session_id = %self.id, page = self.page_index(), "previous page");
        self.page_rendered();
        true
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    /// Record an answer for any key. Keys are not checked against the catalog.
    pub fn record(
        &mut self,
        group: &str,
        subgroup: &str,
        question: &str,
        value: Answer,
    ) -> Option<Answer> {
        self.answers.record(group, subgroup, question, value)
    }

    /// Answer a question on the current page.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFound` if the question is not on this page.
    pub fn answer_current(&mut self, question: &str, value: Answer) -> Result<(), SessionError> {
        let key = self.current_key(question)?;
        self.answers.record_key(key, value);
        Ok(())
    }

    /// Answer for a question on the current page, if any.
    #[must_use]
    pub fn answer_of(&self, question: &str) -> Option<Answer> {
        self.current_key(question)
            .ok()
            .and_then(|key| self.answers.get(&key))
    }

    /// Questions on the current page without an answer, in display order.
    #[must_use]
    pub fn unanswered_on_current_page(&self) -> Vec<&str> {
        let group = self.current_group().name();
        let subgroup = self.current_subgroup();
        subgroup
            .questions()
            .iter()
            .filter(|q| {
                !self
                    .answers
                    .contains(&AnswerKey::new(group, subgroup.name(), q.as_str()))
            })
            .map(String::as_str)
            .collect()
    }

    /// Checks that finalizing is allowed from the current page.
    ///
    /// Other groups do not need to be visited.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotOnLastPage` before the group's last page, or
    /// `SessionError::Unanswered` when explicit answers are required and the
    /// current page is incomplete.
    pub fn ensure_can_finalize(&self) -> Result<(), SessionError> {
        if !self.can_finalize() {
            return Err(SessionError::NotOnLastPage);
        }
        self.ensure_page_answered()
    }

    #[must_use]
    pub fn progress(&self) -> ChecklistProgress {
        let catalog = self.catalog();
        let groups: Vec<GroupProgress> = catalog
            .all_groups()
            .iter()
            .map(|group| {
                let answered = group
                    .subgroups()
                    .iter()
                    .flat_map(|sub| {
                        sub.questions()
                            .iter()
                            .map(move |q| AnswerKey::new(group.name(), sub.name(), q.as_str()))
                    })
                    .filter(|key| self.answers.contains(key))
                    .count();
                GroupProgress {
                    name: group.name().to_owned(),
                    total: group.question_count(),
                    answered,
                }
            })
            .collect();

        let total = catalog.question_count();
        let answered = groups.iter().map(|g| g.answered).sum::<usize>();
        ChecklistProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: answered >= total,
            groups,
        }
    }

    fn current_key(&self, question: &str) -> Result<AnswerKey, NotFoundError> {
        let subgroup = self.current_subgroup();
        if !subgroup.contains(question) {
            return Err(NotFoundError::Question {
                subgroup: subgroup.name().to_owned(),
                question: question.to_owned(),
            });
        }
        Ok(AnswerKey::new(
            self.current_group().name(),
            subgroup.name(),
            question,
        ))
    }

    fn ensure_page_answered(&self) -> Result<(), SessionError> {
        if !self.settings.require_explicit_answer {
            return Ok(());
        }
        match self.unanswered_on_current_page().len() {
            0 => Ok(()),
            missing => Err(SessionError::Unanswered { missing }),
        }
    }

    fn page_rendered(&mut self) {
        if self.settings.require_explicit_answer {
            return;
        }
        let group = self.navigator.current_group().name().to_owned();
        let subgroup = self.navigator.current_subgroup().clone();
        for question in subgroup.questions() {
            let key = AnswerKey::new(group.as_str(), subgroup.name(), question.as_str());
            if !self.answers.contains(&key) {
                self.answers.record_key(key, Answer::first_option());
            }
        }
    }
}

impl fmt::Debug for ChecklistSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecklistSession")
            .field("id", &self.id)
            .field("cursor", &self.navigator.cursor())
            .field("answers_len", &self.answers.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
