//! Toast notification renderer.

use crate::ui::helpers::{clip, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastInfo;

/// Cells in the countdown gauge after the message.
const GAUGE_CELLS: usize = 5;

/// Renders the active notification in the top-right corner of the pane.
///
/// ```text
///                                   ✓ Employee created successfully ▰▰▰▱▱
/// ```
///
/// The gauge empties as the notification approaches its expiry.
pub fn render_toast(toast: &ToastInfo, theme: &Theme, cols: usize) {
    let color = theme.severity_color(toast.severity);
    let available = cols.saturating_sub(GAUGE_CELLS + 3);
    let body = clip(&format!(" {} {} ", toast.icon, toast.message), available);

    let remaining = 1.0 - toast.progress.clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((remaining * GAUGE_CELLS as f64).ceil() as usize).min(GAUGE_CELLS);
    let gauge = format!("{}{}", "▰".repeat(filled), "▱".repeat(GAUGE_CELLS - filled));

    let width = text_width(&body) + GAUGE_CELLS + 1;
    position_cursor(1, cols.saturating_sub(width) + 1);
    print!("{}", Theme::bg(&theme.colors.overlay_bg));
    print!("{}{}", Theme::bold(), Theme::fg(color));
    print!("{body}");
    print!("{}", Theme::reset());
    print!("{}", Theme::bg(&theme.colors.overlay_bg));
    print!("{}{gauge} ", Theme::fg(color));
    print!("{}", Theme::reset());
}
