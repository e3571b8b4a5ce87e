//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the table, the
//! API client (and through it the loading tracker), the notification slot and
//! the current input mode. View models are computed on demand from it.
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines, search mode only]
//! [Column headers]
//! [Rows]
//! [Pagination]
//! [Border]
//! [Footer]
//! ```

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::app::modes::{InputMode, SearchFocus};
use crate::domain::Employee;
use crate::http::ApiClient;
use crate::infrastructure::Clock;
use crate::notify::NotificationCenter;
use crate::table::{highlight_ranges, Column, TableController};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnHeader, ConfirmInfo, DisplayCell, DisplayRow, EmptyState, FooterInfo, FormFieldInfo, FormInfo,
    HeaderInfo, LoadingInfo, ModalInfo, PaginationInfo, SearchBarInfo, ToastInfo, UIViewModel,
};

/// Braille spinner frames for the loading overlay.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between spinner frames.
pub const SPINNER_INTERVAL_MS: i64 = 120;

/// Lines used by everything except table rows, without and with the search bar.
const CHROME_ROWS: usize = 7;
const SEARCH_CHROME_ROWS: usize = 10;

pub struct AppState {
    pub table: TableController,
    pub api: ApiClient,
    pub notifications: NotificationCenter,
    pub input_mode: InputMode,
    pub search_query: String,
    pub theme: Theme,
    pub clock: Rc<dyn Clock>,

    /// Current spinner frame; advanced by timer ticks while loading.
    pub spinner_frame: usize,
    /// When the armed spinner timer is due, `None` when no spinner timer is armed.
    pub spinner_due: Option<DateTime<Utc>>,
    /// Start of the current loading period, maintained by a loading observer.
    pub loading_since: Rc<Cell<Option<DateTime<Utc>>>>,

    /// Set once the employee list has been fetched successfully.
    pub has_loaded: bool,
    /// Message of the last failed list fetch, cleared by the next success.
    pub last_error: Option<String>,
    pub permissions_granted: bool,
}

impl AppState {
    /// Creates the state and subscribes to loading transitions.
    #[must_use]
    pub fn new(mut api: ApiClient, theme: Theme, clock: Rc<dyn Clock>, page_size: usize) -> Self {
        let loading_since = Rc::new(Cell::new(None));
        let since = Rc::clone(&loading_since);
        let observer_clock = Rc::clone(&clock);
        api.interceptor_mut()
            .loading_mut()
            .subscribe(move |loading| since.set(loading.then(|| observer_clock.now())));

        Self {
            table: TableController::new(page_size),
            api,
            notifications: NotificationCenter::new(Rc::clone(&clock)),
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme,
            clock,
            spinner_frame: 0,
            spinner_due: None,
            loading_since,
            has_loaded: false,
            last_error: None,
            permissions_granted: false,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.api.interceptor().is_loading()
    }

    /// How long the current loading period has lasted.
    #[must_use]
    pub fn loading_elapsed(&self) -> Option<Duration> {
        self.loading_since.get().map(|since| self.clock.now() - since)
    }

    #[must_use]
    pub fn selected_employee(&self) -> Option<&Employee> {
        self.table.selected()
    }

    /// Pushes the search query into the table filter.
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_rows = self.table.rows().len(),
            query_len = self.search_query.len()
        )
        .entered();

        self.table.set_filter(self.search_query.clone());

        tracing::debug!(filtered_count = self.table.filtered_len(), "search filter applied");
    }

    /// Computes a renderable view model for a pane of `rows` x `cols` cells.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let columns = Self::fit_columns(cols);
        let window = self.visible_window(rows);

        let query = self.search_query.trim();
        let highlight = !query.is_empty();
        let selected = self.table.selected_index();

        let display_rows = self.table.visible()[window.clone()]
            .iter()
            .enumerate()
            .map(|(offset, employee)| DisplayRow {
                cells: columns
                    .iter()
                    .map(|header| {
                        let text = truncate(&header.column.cell(employee), header.width.saturating_sub(1));
                        let highlight_ranges = if highlight && header.column.is_searchable() {
                            highlight_ranges(&text, query).into_iter().map(|r| (r.start, r.end)).collect()
                        } else {
                            vec![]
                        };
                        DisplayCell {
                            column: header.column,
                            text,
                            highlight_ranges,
                        }
                    })
                    .collect(),
                status: employee.status,
                is_selected: window.start + offset == selected && !self.input_mode.is_modal(),
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            columns: columns
                .into_iter()
                .map(|header| ColumnHeader {
                    sort_arrow: self
                        .table
                        .sort()
                        .filter(|key| key.column == header.column)
                        .map(|key| key.direction.arrow()),
                    ..header
                })
                .collect(),
            rows: display_rows,
            pagination: self.compute_pagination(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            toast: self.compute_toast(),
            loading: self.compute_loading(),
            modal: self.compute_modal(),
        }
    }

    /// Drops low-priority columns until the rest fit in `cols`.
    fn fit_columns(cols: usize) -> Vec<ColumnHeader> {
        let mut visible: Vec<Column> = Column::ALL.to_vec();
        let width = |columns: &[Column]| columns.iter().map(|c| c.width()).sum::<usize>();

        for dropped in Column::DROP_ORDER {
            if width(&visible) <= cols {
                break;
            }
            visible.retain(|c| *c != dropped);
        }

        visible
            .into_iter()
            .map(|column| ColumnHeader {
                column,
                label: column.label().to_string(),
                width: column.width(),
                sort_arrow: None,
            })
            .collect()
    }

    /// Range of page rows to draw, keeping the selection near the middle.
    fn visible_window(&self, rows: usize) -> std::ops::Range<usize> {
        let page_len = self.table.visible().len();
        let chrome = if matches!(self.input_mode, InputMode::Search(_)) {
            SEARCH_CHROME_ROWS
        } else {
            CHROME_ROWS
        };
        let available = rows.saturating_sub(chrome).max(1);
        if page_len <= available {
            return 0..page_len;
        }

        let selected = self.table.selected_index();
        let mut start = selected.saturating_sub(available / 2);
        let end = (start + available).min(page_len);
        if end - start < available {
            start = end.saturating_sub(available);
        }
        start..end
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(" Employee Directory ({}) ", self.table.rows().len()),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.search_query.clone(),
                focused: focus == SearchFocus::Typing,
            }),
            _ => None,
        }
    }

    fn compute_pagination(&self) -> PaginationInfo {
        PaginationInfo {
            text: self.table.pagination_text(),
            page: format!("Page {} of {}", self.table.page_index() + 1, self.table.page_count()),
            page_size: self.table.page_size(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match &self.input_mode {
            InputMode::Search(SearchFocus::Typing) => "ESC: clear search  Enter: results  Type to filter",
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: clear search  /: edit query  j/k: navigate  h/l: page  e: edit  d: delete"
            }
            InputMode::Form(_) => "Tab/Shift+Tab: field  ←/→: choose  Enter: save  ESC: cancel",
            InputMode::ConfirmDelete(_) => "Enter/y: delete  ESC/n: cancel",
            InputMode::Normal => {
                "j/k: navigate  h/l: page  1-9: sort  +: page size  /: search  a: add  e: edit  d: delete  r: reload  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if self.table.filtered_len() > 0 {
            return None;
        }

        if !self.has_loaded {
            return self.last_error.as_ref().map(|error| EmptyState {
                message: "Unable to load employees".to_string(),
                subtitle: format!("{error}  Press r to retry."),
            });
        }

        let query = self.search_query.trim();
        if self.table.rows().is_empty() || query.is_empty() {
            Some(EmptyState {
                message: "No employees found".to_string(),
                subtitle: "Press a to add an employee".to_string(),
            })
        } else {
            Some(EmptyState {
                message: format!("No employees match \"{query}\""),
                subtitle: "Press ESC to clear the search".to_string(),
            })
        }
    }

    fn compute_toast(&self) -> Option<ToastInfo> {
        let now = self.clock.now();
        self.notifications
            .active()
            .filter(|n| n.expires_at > now)
            .map(|n| ToastInfo {
                icon: n.icon.clone(),
                message: n.message.clone(),
                severity: n.severity,
                progress: n.progress(now),
            })
    }

    fn compute_loading(&self) -> Option<LoadingInfo> {
        if !self.is_loading() {
            return None;
        }
        let in_flight = self.api.interceptor().loading().in_flight();
        let message = match self.loading_elapsed() {
            Some(elapsed) if elapsed.num_seconds() >= 3 => {
                format!("Loading... ({}s, Ctrl+x to stop)", elapsed.num_seconds())
            }
            _ => "Loading...".to_string(),
        };
        Some(LoadingInfo {
            spinner: SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()],
            message,
            in_flight,
            bar_offset: self.spinner_frame,
        })
    }

    fn compute_modal(&self) -> Option<ModalInfo> {
        use crate::app::form::Field;

        match &self.input_mode {
            InputMode::Form(form) => Some(ModalInfo::Form(FormInfo {
                title: form.title().to_string(),
                fields: Field::ALL
                    .into_iter()
                    .map(|field| FormFieldInfo {
                        label: field.label().to_string(),
                        value: form.value(field).to_string(),
                        error: form.error(field).map(str::to_string),
                        focused: form.focused() == field,
                        is_choice: field.choices().is_some(),
                    })
                    .collect(),
                submitting: form.submitting,
            })),
            InputMode::ConfirmDelete(pending) => Some(ModalInfo::Confirm(ConfirmInfo {
                title: "Delete Employee".to_string(),
                message: format!("Are you sure you want to delete {}?", pending.name),
                warning: "This action cannot be undone.".to_string(),
            })),
            InputMode::Normal | InputMode::Search(_) => None,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("table", &self.table)
            .field("api", &self.api)
            .field("notifications", &self.notifications)
            .field("input_mode", &self.input_mode)
            .field("search_query", &self.search_query)
            .field("spinner_frame", &self.spinner_frame)
            .field("has_loaded", &self.has_loaded)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

/// Cuts `text` to `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeDraft, EmployeeId, EmployeeStatus};
    use crate::http::api::ApiConfig;
    use crate::infrastructure::ManualClock;
    use crate::storage::MemoryTokenStore;
    use chrono::NaiveDate;

    fn state() -> AppState {
        let clock: Rc<dyn Clock> = Rc::new(ManualClock::default());
        let api = ApiClient::new(ApiConfig::default(), Box::new(MemoryTokenStore::default()), Rc::clone(&clock));
        AppState::new(api, Theme::default(), clock, 10)
    }

    fn employee(id: u64, first: &str, last: &str) -> Employee {
        Employee::from_draft(
            EmployeeId(id),
            EmployeeDraft {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!("{}@example.com", first.to_lowercase()),
                phone: "+15550100".to_string(),
                position: "Data Analyst".to_string(),
                department: "Data & Analytics".to_string(),
                salary: 70_000.0,
                join_date: NaiveDate::from_ymd_opt(2022, 5, 9).unwrap(),
                status: EmployeeStatus::Inactive,
            },
        )
    }

    #[test]
    fn narrow_panes_drop_low_priority_columns() {
        let wide: Vec<Column> = AppState::fit_columns(200).iter().map(|c| c.column).collect();
        assert_eq!(wide, Column::ALL.to_vec());

        let narrow: Vec<Column> = AppState::fit_columns(60).iter().map(|c| c.column).collect();
        assert!(!narrow.contains(&Column::Phone));
        assert!(narrow.contains(&Column::Name));
        assert!(narrow.contains(&Column::Status));
    }

    #[test]
    fn viewmodel_highlights_filter_matches() {
        let mut state = state();
        state.has_loaded = true;
        state.table.set_rows(vec![employee(1, "John", "Doe"), employee(2, "Jane", "Smith")]);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.search_query = "doe".to_string();
        state.apply_search_filter();

        let vm = state.compute_viewmodel(30, 200);
        assert_eq!(vm.rows.len(), 1);
        let name = vm.rows[0].cells.iter().find(|c| c.column == Column::Name).unwrap();
        assert_eq!(name.text, "John Doe");
        assert_eq!(name.highlight_ranges, vec![(5, 8)]);
        assert!(vm.search_bar.unwrap().focused);
        assert_eq!(vm.pagination.text, "1 to 1 of 1 employees");
    }

    #[test]
    fn highlights_only_searched_columns() {
        let mut state = state();
        state.has_loaded = true;
        state.table.set_rows(vec![employee(1, "John", "Doe")]);
        state.search_query = "1".to_string();
        state.apply_search_filter();

        let vm = state.compute_viewmodel(30, 200);
        let cell = |column| vm.rows[0].cells.iter().find(|c| c.column == column).unwrap();
        assert_eq!(cell(Column::Id).text, "1");
        assert!(cell(Column::Id).highlight_ranges.is_empty());
        assert_eq!(cell(Column::Phone).highlight_ranges, vec![(1, 2), (6, 7)]);
    }

    #[test]
    fn empty_states_distinguish_causes() {
        let mut state = state();
        assert!(state.compute_viewmodel(30, 120).empty_state.is_none());

        state.last_error = Some("Unable to connect".to_string());
        assert_eq!(
            state.compute_viewmodel(30, 120).empty_state.unwrap().message,
            "Unable to load employees"
        );

        state.has_loaded = true;
        state.table.set_rows(vec![employee(1, "John", "Doe")]);
        state.search_query = "zzz".to_string();
        state.apply_search_filter();
        assert_eq!(
            state.compute_viewmodel(30, 120).empty_state.unwrap().message,
            "No employees match \"zzz\""
        );
    }

    #[test]
    fn window_follows_selection_on_short_panes() {
        let mut state = state();
        state.table.set_rows((1..=10).map(|i| employee(i, "Row", "Person")).collect());
        for _ in 0..8 {
            state.table.move_down();
        }

        let vm = state.compute_viewmodel(CHROME_ROWS + 4, 200);
        assert_eq!(vm.rows.len(), 4);
        assert!(vm.rows.iter().any(|r| r.is_selected));
    }

    #[test]
    fn truncation_marks_cut() {
        assert_eq!(truncate("Customer Support Representative", 10), "Customer …");
        assert_eq!(truncate("short", 10), "short");
    }
}
