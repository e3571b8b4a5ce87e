//! Empty state component renderer.
//!
//! Shown in place of the table body when no employees are loaded, none match
//! the current search or the first load failed.

use crate::ui::helpers::render_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message and subtitle one line below `row`.
///
/// ```text
///
///                    No employees match "zed"
///                  Press ESC to clear the search
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let message_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.empty_state_fg));
    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));

    render_centered(row + 1, &empty.message, &message_style, cols);
    render_centered(row + 2, &empty.subtitle, &subtitle_style, cols);
    row + 3
}
