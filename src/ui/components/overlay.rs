//! Loading overlay renderer.
//!
//! While requests are in flight an indeterminate progress bar sweeps across
//! the border under the header, and a spinner box sits in the middle of the
//! pane unless a modal already occupies it.

use crate::ui::helpers::{clip, position_cursor, render_box, render_box_line, text_width, BoxArea};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoadingInfo;

/// Row of the border the progress bar replaces.
pub const PROGRESS_ROW: usize = 3;

/// Cells the progress segment advances per spinner frame.
const BAR_STEP: usize = 3;

/// Renders the progress bar and, when `with_spinner` is set, the spinner box.
pub fn render_loading(loading: &LoadingInfo, theme: &Theme, cols: usize, rows: usize, with_spinner: bool) {
    render_progress_bar(loading.bar_offset, theme, cols);

    if with_spinner {
        render_spinner_box(loading, theme, cols, rows);
    }
}

/// Start and end columns (0-based, end exclusive) of the bar segment.
fn segment(bar_offset: usize, cols: usize) -> (usize, usize) {
    let len = (cols / 5).max(4).min(cols);
    let span = cols + len;
    let head = (bar_offset * BAR_STEP) % span.max(1);
    (head.saturating_sub(len), head.min(cols))
}

fn render_progress_bar(bar_offset: usize, theme: &Theme, cols: usize) {
    let (start, end) = segment(bar_offset, cols);

    position_cursor(PROGRESS_ROW, 1);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}", "─".repeat(start));
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.info));
    print!("{}", "━".repeat(end - start));
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}", "─".repeat(cols.saturating_sub(end)));
    print!("{}", Theme::reset());
}

fn render_spinner_box(loading: &LoadingInfo, theme: &Theme, cols: usize, rows: usize) {
    let headline = format!("{} {}", loading.spinner, loading.message);
    let detail = (loading.in_flight > 1).then(|| format!("{} requests in flight", loading.in_flight));

    let content_width = text_width(&headline).max(detail.as_deref().map_or(0, text_width));
    let height = if detail.is_some() { 4 } else { 3 };
    let area = BoxArea::centered(content_width + 6, height, cols, rows);
    let inner = area.inner_width();
    let bg = &theme.colors.overlay_bg;

    render_box(area, &theme.colors.border, bg, None);
    render_box_line(
        area,
        0,
        &theme.colors.border,
        bg,
        &format!("{}{}", Theme::fg(&theme.colors.info), centered(&headline, inner)),
    );
    if let Some(detail) = detail {
        render_box_line(
            area,
            1,
            &theme.colors.border,
            bg,
            &format!("{}{}", Theme::fg(&theme.colors.text_dim), centered(&detail, inner)),
        );
    }
}

fn centered(text: &str, width: usize) -> String {
    let text = clip(text, width);
    let padding = width.saturating_sub(text_width(&text)) / 2;
    format!("{}{text}", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_segment_sweeps_and_wraps() {
        assert_eq!(segment(0, 100), (0, 0));
        assert_eq!(segment(10, 100), (10, 30));
        assert_eq!(segment(39, 100), (97, 100));
        assert_eq!(segment(40, 100), (0, 0));
    }

    #[test]
    fn centered_pads_left_only() {
        assert_eq!(centered("ab", 6), "  ab");
        assert_eq!(centered("abcdef", 4), "abcd");
    }
}
