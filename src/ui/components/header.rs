//! Header component renderer.

use crate::ui::helpers::render_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the bold, centered title bar at `row` and returns the next row.
///
/// `header_bg` fills the whole line when the theme sets one.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let mut style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        style.push_str(&Theme::bg(bg));
    }

    render_centered(row, &header.title, &style, cols);
    row + 1
}
