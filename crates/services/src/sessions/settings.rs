/// Per-session behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSettings {
    /// When `false`, every question on a page that becomes current is
    /// pre-answered with the first option ("Yes") unless it already has an
    /// answer. When `true`, nothing is pre-answered and the session refuses to
    /// advance or finalize past a page with unanswered questions.
    pub require_explicit_answer: bool,
}

impl SessionSettings {
    #[must_use]
    pub fn with_require_explicit_answer(mut self, require: bool) -> Self {
        self.require_explicit_answer = require;
        self
    }
}
