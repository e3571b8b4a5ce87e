//! Pagination line renderer.

use crate::ui::helpers::{clip, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders the range summary on the left and page position on the right.
///
/// ```text
///  11 to 20 of 42 employees                     Page 2 of 5 · 10 per page
/// ```
///
/// The right-hand side is dropped when both halves do not fit.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let left = clip(&format!(" {}", pagination.text), cols);
    let right = format!("{} · {} per page ", pagination.page, pagination.page_size);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{left}");

    let used = text_width(&left);
    let right_len = text_width(&right);
    if used + right_len + 1 <= cols {
        print!("{}", " ".repeat(cols - used - right_len));
        print!("{right}");
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }

    print!("{}", Theme::reset());
    row + 1
}
