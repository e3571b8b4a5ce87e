//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready data only: truncated cell text,
//! highlight ranges, selection flags and overlay contents.

use crate::domain::EmployeeStatus;
use crate::notify::Severity;
use crate::table::Column;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Title line at the top of the pane.
    pub header: HeaderInfo,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Columns that fit the pane, in display order.
    pub columns: Vec<ColumnHeader>,

    /// Rows of the current page inside the visible window.
    pub rows: Vec<DisplayRow>,

    /// Range text and page position under the table.
    pub pagination: PaginationInfo,

    /// Keybinding hints on the last row.
    pub footer: FooterInfo,

    /// Replaces the table body when there is nothing to show.
    pub empty_state: Option<EmptyState>,

    /// The single visible notification, if any.
    pub toast: Option<ToastInfo>,

    /// Present while any request is in flight.
    pub loading: Option<LoadingInfo>,

    /// Add/edit form or delete confirmation drawn over everything else.
    pub modal: Option<ModalInfo>,
}

/// Header line content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title with the employee count, e.g. `" Employee Directory (42) "`.
    pub title: String,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current filter text.
    pub query: String,
    /// Whether keys currently edit the query.
    pub focused: bool,
}

/// One table column as laid out for this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub column: Column,
    /// Header text.
    pub label: String,
    /// Width in cells, separator included.
    pub width: usize,
    /// `▲`/`▼` when the table is sorted on this column.
    pub sort_arrow: Option<&'static str>,
}

/// A table row ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// One cell per visible column, same order as the headers.
    pub cells: Vec<DisplayCell>,
    /// Drives the status cell color.
    pub status: EmployeeStatus,
    /// Selected rows render with the selection colors.
    pub is_selected: bool,
}

/// One cell, already truncated to its column width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    pub column: Column,
    /// Clipped cell text.
    pub text: String,
    /// `(start, end)` character ranges matching the filter.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Pagination line content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// `"1 to 10 of 42 employees"`.
    pub text: String,
    /// `"Page 2 of 5"`.
    pub page: String,
    /// Rows per page.
    pub page_size: usize,
}

/// Footer content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Hints for the current input mode.
    pub keybindings: String,
}

/// Placeholder shown instead of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Main line, e.g. `"No employees found"`.
    pub message: String,
    /// Dimmed hint under the message.
    pub subtitle: String,
}

/// Notification toast content.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastInfo {
    /// Severity glyph or a custom icon.
    pub icon: String,
    pub message: String,
    /// Selects the accent color.
    pub severity: Severity,
    /// Elapsed share of the display time, `0.0..=1.0`.
    pub progress: f64,
}

/// Loading overlay content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingInfo {
    /// Current spinner frame.
    pub spinner: &'static str,
    /// `"Loading..."`, with an elapsed hint on slow requests.
    pub message: String,
    /// Requests currently counted by the tracker.
    pub in_flight: usize,
    /// Animation step of the indeterminate progress bar.
    pub bar_offset: usize,
}

/// Modal dialog drawn over the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalInfo {
    Form(FormInfo),
    Confirm(ConfirmInfo),
}

/// Add/edit form content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInfo {
    /// `"Add New Employee"` or `"Edit Employee"`.
    pub title: String,
    /// Fields in tab order.
    pub fields: Vec<FormFieldInfo>,
    /// Shows a saving hint while the request is in flight.
    pub submitting: bool,
}

/// One form row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldInfo {
    pub label: String,
    /// Raw input text or the selected option.
    pub value: String,
    /// Validation message shown after the value.
    pub error: Option<String>,
    /// Draws the focus marker.
    pub focused: bool,
    /// Picker fields cycle with arrow keys instead of accepting text.
    pub is_choice: bool,
}

/// Delete confirmation content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmInfo {
    pub title: String,
    /// Question naming the employee.
    pub message: String,
    /// `"This action cannot be undone."`
    pub warning: String,
}
