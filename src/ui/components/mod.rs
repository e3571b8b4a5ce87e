//! Composable UI component renderers.
//!
//! Each component draws one part of the interface at a given row and returns
//! the next free row, so layouts read top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title bar with the employee count
//! - [`search`]: Search input box
//! - [`table`]: Column headers and employee rows
//! - [`empty`]: Message shown instead of the table body
//! - [`pagination`]: Range summary and page position
//! - [`footer`]: Keybinding hints for the current mode
//! - [`toast`]: Notification in the top-right corner
//! - [`overlay`]: Loading progress bar and spinner
//! - [`modal`]: Add/edit form and delete confirmation

mod empty;
mod footer;
mod header;
mod modal;
mod overlay;
mod pagination;
mod search;
mod table;
mod toast;

pub use modal::render_modal;
pub use overlay::render_loading;
pub use toast::render_toast;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the base layout underneath any overlays.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines, search mode only]
/// [Table Headers]
/// [Table Rows | Empty State]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
///
/// The bottom three lines are pinned to the end of the pane.
pub fn render_main(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    current_row = render_table_headers(current_row, &vm.columns, theme, cols);

    match &vm.empty_state {
        Some(empty) => {
            render_empty_state(current_row, empty, theme, cols);
        }
        None => {
            render_table_rows(current_row, &vm.rows, theme, cols);
        }
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);

    render_pagination(pagination_row, &vm.pagination, theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
