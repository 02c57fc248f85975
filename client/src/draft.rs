//! New-post draft
//!
//! `PostDraft` is never mutated in place: each edit yields a new value, and
//! the latest value per field wins. `DraftState` tracks the form lifecycle
//! `Empty -> Editing -> Submitted`; `Submitted` is terminal.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostDraft {
    title: String,
    content: String,
}

/// Form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Content,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    pub fn with_field(&self, field: DraftField, value: impl Into<String>) -> Self {
        match field {
            DraftField::Title => self.with_title(value),
            DraftField::Content => self.with_content(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftState {
    #[default]
    Empty,
    Editing(PostDraft),
    Submitted,
}

impl DraftState {
    /// Apply one field change. Edits after submission are ignored.
    pub fn edit(&self, field: DraftField, value: impl Into<String>) -> Self {
        match self {
            DraftState::Empty => DraftState::Editing(PostDraft::default().with_field(field, value)),
            DraftState::Editing(draft) => DraftState::Editing(draft.with_field(field, value)),
            DraftState::Submitted => DraftState::Submitted,
        }
    }

    /// The draft that a submit would send; empty when nothing was typed yet
    pub fn draft(&self) -> Option<PostDraft> {
        match self {
            DraftState::Empty => Some(PostDraft::default()),
            DraftState::Editing(draft) => Some(draft.clone()),
            DraftState::Submitted => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, DraftState::Submitted)
    }
}
