use checklist_core::model::Answer;
use services::ChecklistSession;

pub const CHECKLIST_TITLE: &str = "CX Survey Quality Checklist";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    /// Position on the page; doubles as the radio group name.
    pub index: usize,
    pub text: String,
    pub answer: Option<Answer>,
}

impl QuestionVm {
    #[must_use]
    pub fn input_name(&self) -> String {
        format!("question-{}", self.index)
    }
}

/// Everything the checklist page renders for the current cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageVm {
    pub title: &'static str,
    pub group_name: String,
    pub subgroup_name: String,
    pub questions: Vec<QuestionVm>,
    pub can_previous: bool,
    pub can_next: bool,
    pub can_finalize: bool,
    pub page_label: String,
    pub progress_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupMenuItemVm {
    pub name: String,
    pub selected: bool,
    pub progress_label: String,
}

#[must_use]
pub fn map_page(session: &ChecklistSession) -> PageVm {
    let subgroup = session.current_subgroup();
    let questions = subgroup
        .questions()
        .iter()
        .enumerate()
        .map(|(index, text)| QuestionVm {
            index,
            text: text.clone(),
            answer: session.answer_of(text),
        })
        .collect();
    let progress = session.progress();

    PageVm {
        title: CHECKLIST_TITLE,
        group_name: session.current_group().name().to_owned(),
        subgroup_name: subgroup.name().to_owned(),
        questions,
        can_previous: session.can_previous(),
        can_next: session.can_next(),
        can_finalize: session.can_finalize(),
        page_label: format!(
            "Page {} of {}",
            session.page_index() + 1,
            session.page_count()
        ),
        progress_label: format!("{} of {} answered", progress.answered, progress.total),
    }
}

#[must_use]
pub fn map_group_menu(session: &ChecklistSession) -> Vec<GroupMenuItemVm> {
    let current = session.current_group().name();
    session
        .progress()
        .groups
        .into_iter()
        .map(|group| GroupMenuItemVm {
            selected: group.name == current,
            progress_label: format!("{}/{}", group.answered, group.total),
            name: group.name,
        })
        .collect()
}
