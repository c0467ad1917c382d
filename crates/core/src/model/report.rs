use chrono::{DateTime, Utc};

use crate::model::{Answer, AnswerKey, AnswerStore};

/// Column headings of the exported answer sheet.
pub const REPORT_HEADER: [&str; 4] = ["Group", "Subgroup", "Question", "Answer"];

/// Column headings of the on-screen "answered No" table.
pub const NEGATIVE_TABLE_HEADER: [&str; 3] = ["Group", "Subgroup", "Question"];

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// One answered question joined with its group/subgroup context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub group: String,
    pub subgroup: String,
    pub question: String,
    pub answer: Answer,
}

impl ReportRecord {
    #[must_use]
    pub fn from_entry(key: AnswerKey, answer: Answer) -> Self {
        let (group, subgroup, question) = key.into_parts();
        Self {
            group,
            subgroup,
            question,
            answer,
        }
    }

    /// Cells in `REPORT_HEADER` order.
    #[must_use]
    pub fn cells(&self) -> [&str; 4] {
        [
            self.group.as_str(),
            self.subgroup.as_str(),
            self.question.as_str(),
            self.answer.label(),
        ]
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// Nothing was answered "No" (this includes an empty report).
    AllYes,
    HasNegatives { count: usize },
}

/// Compiled answers at finalization time.
///
/// Records keep the answer store's insertion order, not catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    compiled_at: DateTime<Utc>,
    records: Vec<ReportRecord>,
}

impl Report {
    #[must_use]
    pub fn compile(
        entries: impl IntoIterator<Item = (AnswerKey, Answer)>,
        compiled_at: DateTime<Utc>,
    ) -> Self {
        let records = entries
            .into_iter()
            .map(|(key, answer)| ReportRecord::from_entry(key, answer))
            .collect();
        Self {
            compiled_at,
            records,
        }
    }

    #[must_use]
    pub fn from_store(store: &AnswerStore, compiled_at: DateTime<Utc>) -> Self {
        Self::compile(store.snapshot(), compiled_at)
    }

    #[must_use]
    pub fn compiled_at(&self) -> DateTime<Utc> {
        self.compiled_at
    }

    #[must_use]
    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    /// Records answered "No", in report order.
    #[must_use]
    pub fn negatives(&self) -> Vec<&ReportRecord> {
        self.records
            .iter()
            .filter(|r| r.answer.is_negative())
            .collect()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn negative_count(&self) -> usize {
        self.records.iter().filter(|r| r.answer.is_negative()).count()
    }

    #[must_use]
    pub fn status(&self) -> ReportStatus {
        match self.negative_count() {
            0 => ReportStatus::AllYes,
            count => ReportStatus::HasNegatives { count },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn negatives_are_exactly_the_no_answers() {
        let mut store = AnswerStore::new();
        store.record("Purpose", "Intro", "Q1", Answer::Yes);
        store.record("Purpose", "Intro", "Q2", Answer::No);
        store.record("Ease", "Flow", "Q3", Answer::No);
        store.record("Ease", "Flow", "Q4", Answer::Yes);

        let report = Report::from_store(&store, fixed_now());
        let negatives: Vec<_> = report.negatives().iter().map(|r| r.question.as_str()).collect();

        assert_eq!(negatives, vec!["Q2", "Q3"]);
        assert_eq!(report.total(), 4);
        assert_eq!(report.status(), ReportStatus::HasNegatives { count: 2 });
    }

    #[test]
    fn empty_store_reports_success() {
        let report = Report::from_store(&AnswerStore::new(), fixed_now());
        assert_eq!(report.total(), 0);
        assert_eq!(report.status(), ReportStatus::AllYes);
        assert!(report.negatives().is_empty());
    }

    #[test]
    fn records_follow_insertion_order_and_split_keys() {
        let mut store = AnswerStore::new();
        store.record("B", "S", "later in catalog", Answer::Yes);
        store.record("A", "S", "earlier in catalog", Answer::No);

        let report = Report::from_store(&store, fixed_now());
        assert_eq!(report.records()[0].group, "B");
        assert_eq!(
            report.records()[1].cells(),
            ["A", "S", "earlier in catalog", "No"]
        );
        assert_eq!(report.compiled_at(), fixed_now());
    }
}
