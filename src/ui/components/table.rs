//! Table component renderer.
//!
//! Renders the employee grid: a bold header line carrying sort arrows, then
//! one line per employee with selection, status and match highlighting.

use crate::table::Column;
use crate::ui::helpers::{self, pad, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeader, DisplayCell, DisplayRow};

/// Renders the column headers at `row` and returns the next row.
///
/// The sorted column shows `▲` or `▼` after its label.
pub fn render_table_headers(row: usize, columns: &[ColumnHeader], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));

    let mut used = 0;
    for header in columns {
        let label = match header.sort_arrow {
            Some(arrow) => format!("{} {arrow}", header.label),
            None => header.label.clone(),
        };
        print!("{}", pad(&label, header.width));
        used += header.width;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row` and returns the row after the last one.
pub fn render_table_rows(row: usize, rows: &[DisplayRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for display_row in rows {
        current_row = render_table_row(current_row, display_row, theme, cols);
    }
    current_row
}

/// Renders a single row padded to the full pane width.
///
/// Styling precedence: selection colors, then the status color for the
/// status cell, then match highlights, then normal text. Cell text arrives
/// already shorter than its column, leaving one space as the gutter.
fn render_table_row(row: usize, display_row: &DisplayRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if display_row.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    let mut used = 0;
    for cell in &display_row.cells {
        render_cell(cell, display_row, theme, &base);
        used += cell.column.width();
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}

fn render_cell(cell: &DisplayCell, display_row: &DisplayRow, theme: &Theme, base: &str) {
    let width = cell.column.width();

    if cell.column == Column::Status && !display_row.is_selected {
        print!("{}", Theme::fg(theme.status_color(display_row.status)));
        print!("{}", pad(&cell.text, width));
        print!("{base}");
        return;
    }

    if cell.highlight_ranges.is_empty() {
        print!("{}", pad(&cell.text, width));
    } else {
        helpers::render_highlighted_text(&cell.text, &cell.highlight_ranges, theme, display_row.is_selected, base);
        print!("{}", " ".repeat(width.saturating_sub(text_width(&cell.text))));
    }
}
