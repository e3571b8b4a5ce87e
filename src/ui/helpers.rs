//! Shared rendering utilities.
//!
//! Low-level helpers used by several components: cursor placement, padded
//! cells, filter-match highlighting and framed boxes for overlays. All width
//! arithmetic counts characters, not bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text` in cells.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Clips `text` and pads it with spaces to exactly `width` characters.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let clipped = clip(text, width);
    let fill = width.saturating_sub(text_width(&clipped));
    format!("{clipped}{}", " ".repeat(fill))
}

/// Prints `text` centered on `row`, padded to the full width in `style`.
///
/// Text wider than the pane is clipped from the right.
pub fn render_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = clip(text, cols);
    let left = cols.saturating_sub(text_width(&text)) / 2;
    let right = cols.saturating_sub(left + text_width(&text));

    position_cursor(row, 1);
    print!("{style}{}{text}{}{}", " ".repeat(left), " ".repeat(right), Theme::reset());
}

/// Prints `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. Selected rows print plain text so the selection colors
/// stay intact. `restore` is re-emitted after every highlighted section to
/// bring back the cell's own colors.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool, restore: &str) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{restore}");

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Geometry of a framed box centered in the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxArea {
    pub top: usize,
    pub left: usize,
    pub width: usize,
    pub height: usize,
}

impl BoxArea {
    /// Centers a `width` x `height` box, shrinking it to fit the pane.
    #[must_use]
    pub fn centered(width: usize, height: usize, cols: usize, rows: usize) -> Self {
        let width = width.min(cols.saturating_sub(2)).max(4);
        let height = height.min(rows).max(2);
        Self {
            top: rows.saturating_sub(height) / 2 + 1,
            left: cols.saturating_sub(width) / 2 + 1,
            width,
            height,
        }
    }

    /// Characters available between the side borders.
    #[must_use]
    pub const fn inner_width(&self) -> usize {
        self.width.saturating_sub(2)
    }

    /// Row of the `index`-th content line, directly below the top border.
    #[must_use]
    pub const fn line_row(&self, index: usize) -> usize {
        self.top + 1 + index
    }
}

/// Draws the border of `area` and clears its interior with `bg`.
pub fn render_box(area: BoxArea, border: &str, bg: &str, title: Option<&str>) {
    let inner = area.inner_width();

    position_cursor(area.top, area.left);
    print!("{}{}╭", Theme::bg(bg), Theme::fg(border));
    let label = title.map_or_else(String::new, |title| clip(&format!("─ {title} "), inner));
    print!("{}{label}{}{}", Theme::bold(), Theme::reset(), Theme::bg(bg));
    print!("{}{}╮", Theme::fg(border), "─".repeat(inner.saturating_sub(text_width(&label))));
    print!("{}", Theme::reset());

    for line in 0..area.height.saturating_sub(2) {
        render_box_line(area, line, border, bg, "");
    }

    position_cursor(area.top + area.height.saturating_sub(1), area.left);
    print!("{}{}", Theme::bg(bg), Theme::fg(border));
    print!("╰{}╯", "─".repeat(inner));
    print!("{}", Theme::reset());
}

/// Prints one content line of `area`.
///
/// `styled` may contain escape sequences; its visible part must already fit
/// the inner width, which is filled up with spaces.
pub fn render_box_line(area: BoxArea, line: usize, border: &str, bg: &str, styled: &str) {
    let visible = text_width(&strip_escapes(styled));

    position_cursor(area.line_row(line), area.left);
    print!("{}{}│", Theme::bg(bg), Theme::fg(border));
    print!("{}{styled}{}", Theme::bg(bg), Theme::bg(bg));
    print!("{}", " ".repeat(area.inner_width().saturating_sub(visible)));
    print!("{}│{}", Theme::fg(border), Theme::reset());
}

/// Removes CSI escape sequences, leaving the visible characters.
#[must_use]
pub fn strip_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_clips_and_fills() {
        assert_eq!(pad("Engineering", 6), "Engine");
        assert_eq!(pad("HR", 5), "HR   ");
        assert_eq!(pad("Café", 5), "Café ");
    }

    #[test]
    fn strip_escapes_keeps_visible_text() {
        let styled = format!("{}Saving{}…", Theme::fg("#ffffff"), Theme::reset());
        assert_eq!(strip_escapes(&styled), "Saving…");
    }

    #[test]
    fn centered_box_fits_pane() {
        let area = BoxArea::centered(60, 15, 40, 10);
        assert_eq!(area.width, 38);
        assert_eq!(area.height, 10);
        assert_eq!(area.left, 2);
        assert_eq!(area.top, 1);
        assert_eq!(area.inner_width(), 36);
    }
}
