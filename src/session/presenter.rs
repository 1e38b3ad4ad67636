use anyhow::Result;

use crate::{Intent, Label};

/// What the presenter is asked to show for one iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    /// Position in the visited sequence.
    pub index: usize,
    pub identifier: String,
    /// Current label, `None` when unlabeled.
    pub label: Option<Label>,
    /// Pulled from the walker this iteration (first time shown).
    pub fresh: bool,
}

/// Renders images and turns raw input into [`Intent`]s.
///
/// `wait_for_intent` is the session's only suspension point; it blocks until a mapped key arrives.
pub trait Presenter {
    fn display(&mut self, view: &View) -> Result<()>;
    fn wait_for_intent(&mut self) -> Result<Intent>;
}
