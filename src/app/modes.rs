//! Input mode state machine.
//!
//! The mode decides how keys are interpreted and which overlay the renderer
//! draws on top of the table:
//!
//! - **Normal**: table navigation and commands
//! - **Search**: typing a filter, or navigating the filtered rows
//! - **Form**: the add/edit modal has focus
//! - **ConfirmDelete**: the delete confirmation dialog has focus

use crate::app::form::EmployeeForm;
use crate::domain::EmployeeId;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the filter text.
    Typing,
    /// Keys move through the filtered rows.
    Navigating,
}

/// Row awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: EmployeeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search(SearchFocus),
    Form(Box<EmployeeForm>),
    ConfirmDelete(PendingDelete),
}

impl InputMode {
    /// Whether a modal dialog currently owns the keyboard.
    #[must_use]
    pub const fn is_modal(&self) -> bool {
        matches!(self, Self::Form(_) | Self::ConfirmDelete(_))
    }
}
