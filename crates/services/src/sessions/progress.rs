/// Answered-vs-total counts for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupProgress {
    pub name: String,
    pub total: usize,
    pub answered: usize,
}

/// Aggregated view of checklist progress, useful for UI.
///
/// Only answers whose key exists in the catalog are counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
    pub groups: Vec<GroupProgress>,
}
