//! Filter, sort and page window over the employee rows.
//!
//! The controller keeps the full row set in server order and derives `view`,
//! the indices of rows that pass the filter in sort order. Every mutation
//! recomputes the view and clamps the page and selection into range.

use std::ops::Range;

use crate::domain::{Employee, EmployeeId};
use crate::table::column::{Column, SortDirection, SortKey};

/// Page sizes offered by `cycle_page_size`.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct TableController {
    rows: Vec<Employee>,
    filter: String,
    sort: Option<SortKey>,
    page_index: usize,
    page_size: usize,
    selected: usize,
    view: Vec<usize>,
}

impl Default for TableController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableController {
    /// Creates an empty table. A zero page size falls back to the default.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            filter: String::new(),
            sort: None,
            page_index: 0,
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
            selected: 0,
            view: Vec::new(),
        }
    }

    /// Replaces every row. The page is kept and clamped.
    pub fn set_rows(&mut self, rows: Vec<Employee>) {
        tracing::debug!(rows = rows.len(), "table rows replaced");
        self.rows = rows;
        self.refresh();
    }

    #[must_use]
    pub fn rows(&self) -> &[Employee] {
        &self.rows
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Sets the filter text and returns to the first page.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page_index = 0;
        self.selected = 0;
        self.refresh();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(String::new());
    }

    #[must_use]
    pub const fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    /// Cycles `column` through ascending, descending and unsorted.
    ///
    /// Selecting a different column starts over at ascending.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some(SortKey {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => Some(SortKey {
                column,
                direction: SortDirection::Descending,
            }),
            Some(SortKey {
                column: current,
                direction: SortDirection::Descending,
            }) if current == column => None,
            _ => Some(SortKey {
                column,
                direction: SortDirection::Ascending,
            }),
        };
        tracing::debug!(sort = ?self.sort, "table sort changed");
        self.refresh();
    }

    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages, at least one even when empty.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.view.len().div_ceil(self.page_size).max(1)
    }

    /// Rows passing the filter.
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    pub fn next_page(&mut self) {
        if self.page_index + 1 < self.page_count() {
            self.page_index += 1;
            self.selected = 0;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page_index > 0 {
            self.page_index -= 1;
            self.selected = 0;
        }
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
        self.selected = 0;
    }

    pub fn last_page(&mut self) {
        self.page_index = self.page_count() - 1;
        self.selected = 0;
    }

    /// Advances to the next entry of [`PAGE_SIZE_OPTIONS`], wrapping around.
    ///
    /// The page index is adjusted so the first visible row stays on screen.
    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|&size| size > self.page_size)
            .unwrap_or(PAGE_SIZE_OPTIONS[0]);
        self.set_page_size(next);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            return;
        }
        let first_row = self.page_index * self.page_size;
        self.page_size = page_size;
        self.page_index = first_row / page_size;
        self.selected = 0;
        self.clamp();
    }

    /// Range of `view` positions shown on the current page.
    fn page_range(&self) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(self.view.len());
        let end = (start + self.page_size).min(self.view.len());
        start..end
    }

    /// Rows on the current page, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Employee> {
        self.view[self.page_range()].iter().map(|&i| &self.rows[i]).collect()
    }

    /// Cursor position within the current page.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Employee> {
        let position = self.page_range().start + self.selected;
        self.view.get(position).map(|&i| &self.rows[i])
    }

    /// Moves the cursor down, wrapping to the top of the page.
    pub fn move_down(&mut self) {
        let len = self.page_range().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Moves the cursor up, wrapping to the bottom of the page.
    pub fn move_up(&mut self) {
        let len = self.page_range().len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Adds a row at the head and returns to the first page.
    pub fn insert(&mut self, employee: Employee) {
        tracing::debug!(id = %employee.id, "table row inserted");
        self.rows.insert(0, employee);
        self.page_index = 0;
        self.selected = 0;
        self.refresh();
    }

    /// Replaces the row with `id`, returning the previous value.
    ///
    /// Returns `None` and changes nothing if no such row exists.
    pub fn update_by_id(&mut self, id: EmployeeId, employee: Employee) -> Option<Employee> {
        let slot = self.rows.iter_mut().find(|row| row.id == id)?;
        let previous = std::mem::replace(slot, employee);
        self.refresh();
        Some(previous)
    }

    /// Removes the row with `id`. Returns `None` if no such row exists.
    pub fn delete_by_id(&mut self, id: EmployeeId) -> Option<Employee> {
        let position = self.rows.iter().position(|row| row.id == id)?;
        let removed = self.rows.remove(position);
        self.refresh();
        Some(removed)
    }

    #[must_use]
    pub fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// `"<start> to <end> of <total> employees"` for the current page.
    #[must_use]
    pub fn pagination_text(&self) -> String {
        let total = self.view.len();
        if total == 0 {
            return "0 to 0 of 0 employees".to_string();
        }
        let range = self.page_range();
        format!("{} to {} of {} employees", range.start + 1, range.end, total)
    }

    fn refresh(&mut self) {
        let needle = self.filter.trim().to_lowercase();
        let mut view: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| needle.is_empty() || row.search_text().contains(&needle))
            .map(|(i, _)| i)
            .collect();

        if let Some(key) = self.sort {
            let rows = &self.rows;
            view.sort_by(|&a, &b| key.compare(&rows[a], &rows[b]));
        }

        self.view = view;
        self.clamp();
    }

    fn clamp(&mut self) {
        let last_page = self.page_count() - 1;
        if self.page_index > last_page {
            self.page_index = last_page;
        }
        let len = self.page_range().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

/// Character ranges of `text` that match `query` case-insensitively.
///
/// Case folds with [`str::to_lowercase`] like the filter does, so a char
/// that lowercases to several chars still maps back to one range. Ranges
/// are char indices, non-overlapping, in order. An empty query matches
/// nothing.
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    // Lowercased chars paired with the index of the char they came from.
    let haystack: Vec<(char, usize)> = text
        .chars()
        .enumerate()
        .flat_map(|(index, c)| c.to_lowercase().map(move |lower| (lower, index)))
        .collect();

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        let window = &haystack[start..start + needle.len()];
        if window.iter().map(|(c, _)| *c).eq(needle.iter().copied()) {
            let first = window[0].1;
            let last = window[window.len() - 1].1;
            ranges.push(first..last + 1);
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeStatus, EmployeeDraft};
    use chrono::NaiveDate;

    fn employee(id: u64, first: &str, last: &str, salary: f64) -> Employee {
        Employee::from_draft(
            EmployeeId(id),
            EmployeeDraft {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
                phone: format!("+1555010{id}"),
                position: "Software Engineer".to_string(),
                department: "Engineering".to_string(),
                salary,
                join_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
                status: EmployeeStatus::Active,
            },
        )
    }

    fn roster(count: u64) -> Vec<Employee> {
        (1..=count)
            .map(|i| employee(i, &format!("First{i}"), &format!("Last{i}"), 1000.0 * i as f64))
            .collect()
    }

    fn ids(table: &TableController) -> Vec<u64> {
        table.visible().iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn empty_filter_shows_everything_and_doe_matches_john_doe() {
        let mut table = TableController::new(50);
        table.set_rows(vec![
            employee(1, "John", "Doe", 85_000.0),
            employee(2, "Jane", "Smith", 95_000.0),
        ]);

        table.set_filter("   ");
        assert_eq!(table.filtered_len(), 2);

        table.set_filter("DOE");
        assert_eq!(ids(&table), vec![1]);
    }

    #[test]
    fn filter_resets_to_first_page() {
        let mut table = TableController::new(5);
        table.set_rows(roster(12));
        table.next_page();
        assert_eq!(table.page_index(), 1);

        table.set_filter("last1");
        assert_eq!(table.page_index(), 0);
        assert_eq!(ids(&table), vec![1, 10, 11, 12]);
    }

    #[test]
    fn sort_cycles_and_is_stable() {
        let mut table = TableController::new(10);
        table.set_rows(vec![
            employee(1, "Ann", "B", 500.0),
            employee(2, "Bob", "A", 100.0),
            employee(3, "Cid", "C", 500.0),
        ]);

        table.toggle_sort(Column::Salary);
        assert_eq!(ids(&table), vec![2, 1, 3]);

        table.toggle_sort(Column::Salary);
        assert_eq!(ids(&table), vec![1, 3, 2]);

        table.toggle_sort(Column::Salary);
        assert_eq!(table.sort(), None);
        assert_eq!(ids(&table), vec![1, 2, 3]);

        table.toggle_sort(Column::Salary);
        table.toggle_sort(Column::Name);
        assert_eq!(
            table.sort(),
            Some(SortKey {
                column: Column::Name,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn paging_and_pagination_text() {
        let mut table = TableController::new(10);
        assert_eq!(table.pagination_text(), "0 to 0 of 0 employees");
        assert_eq!(table.page_count(), 1);

        table.set_rows(roster(42));
        assert_eq!(table.pagination_text(), "1 to 10 of 42 employees");
        table.last_page();
        assert_eq!(table.pagination_text(), "41 to 42 of 42 employees");
        table.next_page();
        assert_eq!(table.page_index(), 4);
        table.first_page();
        table.previous_page();
        assert_eq!(table.page_index(), 0);
    }

    #[test]
    fn page_size_cycles_through_options() {
        let mut table = TableController::new(10);
        table.set_rows(roster(30));
        table.next_page();
        table.next_page();

        table.cycle_page_size();
        assert_eq!(table.page_size(), 25);
        assert_eq!(table.page_index(), 0);
        table.cycle_page_size();
        table.cycle_page_size();
        assert_eq!(table.page_size(), 5);
    }

    #[test]
    fn shrinking_set_clamps_page() {
        let mut table = TableController::new(5);
        table.set_rows(roster(11));
        table.last_page();
        assert_eq!(table.page_index(), 2);

        table.delete_by_id(EmployeeId(11));
        assert_eq!(table.page_index(), 1);
        assert_eq!(table.pagination_text(), "6 to 10 of 10 employees");
    }

    #[test]
    fn selection_wraps_within_page() {
        let mut table = TableController::new(5);
        table.set_rows(roster(7));

        table.move_up();
        assert_eq!(table.selected().unwrap().id, EmployeeId(5));
        table.move_down();
        assert_eq!(table.selected().unwrap().id, EmployeeId(1));

        table.next_page();
        table.move_down();
        table.move_down();
        assert_eq!(table.selected().unwrap().id, EmployeeId(6));
    }

    #[test]
    fn insert_update_delete() {
        let mut table = TableController::new(5);
        table.set_rows(roster(8));
        table.next_page();

        table.insert(employee(100, "Jane", "Smith", 95_000.0));
        assert_eq!(table.page_index(), 0);
        assert_eq!(ids(&table)[0], 100);

        let previous = table
            .update_by_id(EmployeeId(100), employee(100, "Janet", "Smith", 99_000.0))
            .unwrap();
        assert_eq!(previous.first_name, "Jane");
        assert_eq!(table.find(EmployeeId(100)).unwrap().first_name, "Janet");

        assert!(table.update_by_id(EmployeeId(999), employee(999, "No", "One", 1.0)).is_none());
        assert_eq!(table.rows().len(), 9);

        assert!(table.delete_by_id(EmployeeId(100)).is_some());
        assert!(table.find(EmployeeId(100)).is_none());
        assert!(table.delete_by_id(EmployeeId(100)).is_none());
    }

    #[test]
    fn highlight_finds_all_occurrences() {
        assert_eq!(highlight_ranges("Doe Doe", "doe"), vec![0..3, 4..7]);
        assert_eq!(highlight_ranges("Ünïcode dOe", "DOE"), vec![8..11]);
        assert!(highlight_ranges("anything", "").is_empty());
        assert_eq!(highlight_ranges("İlker", "i\u{307}l"), vec![0..2]);
    }
}
