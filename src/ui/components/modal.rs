//! Modal dialogs: the add/edit form and the delete confirmation.

use crate::ui::helpers::{clip, pad, render_box, render_box_line, text_width, BoxArea};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ConfirmInfo, FormFieldInfo, FormInfo, ModalInfo};

const FORM_WIDTH: usize = 72;
const CONFIRM_WIDTH: usize = 52;
const LABEL_WIDTH: usize = 13;

/// Renders `modal` centered over the rest of the UI.
pub fn render_modal(modal: &ModalInfo, theme: &Theme, cols: usize, rows: usize) {
    match modal {
        ModalInfo::Form(form) => render_form(form, theme, cols, rows),
        ModalInfo::Confirm(confirm) => render_confirm(confirm, theme, cols, rows),
    }
}

/// ```text
/// ╭─ Add Employee ──────────────────────────╮
/// │                                         │
/// │ › First Name   Ada▏                     │
/// │   Last Name                 ✗ Required  │
/// │   ...                                   │
/// │                                         │
/// │ Enter: save  Tab: next field  ESC: ...  │
/// ╰─────────────────────────────────────────╯
/// ```
fn render_form(form: &FormInfo, theme: &Theme, cols: usize, rows: usize) {
    let height = form.fields.len() + 5;
    let area = BoxArea::centered(FORM_WIDTH, height, cols, rows);
    let border = &theme.colors.modal_border;
    let bg = &theme.colors.overlay_bg;

    render_box(area, border, bg, Some(&form.title));

    for (index, field) in form.fields.iter().enumerate() {
        let line = field_line(field, area.inner_width(), theme);
        render_box_line(area, index + 1, border, bg, &line);
    }

    let hint = if form.submitting {
        format!("{} Saving...", Theme::fg(&theme.colors.info))
    } else {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.text_dim),
            clip(" Enter: save  Tab: next field  ←/→: choose  ESC: cancel", area.inner_width())
        )
    };
    render_box_line(area, form.fields.len() + 2, border, bg, &hint);
}

/// Builds one styled field line whose visible width never exceeds `inner`.
fn field_line(field: &FormFieldInfo, inner: usize, theme: &Theme) -> String {
    let marker = if field.focused { " › " } else { "   " };
    let label = pad(&field.label, LABEL_WIDTH);

    let value = match (field.focused, field.is_choice) {
        (true, true) => format!("◂ {} ▸", field.value),
        (true, false) => format!("{}▏", field.value),
        (false, _) => field.value.clone(),
    };

    let value_room = inner.saturating_sub(text_width(marker) + LABEL_WIDTH);
    let error = field.error.as_deref().map(|e| format!("  ✗ {e}"));
    let error_len = error.as_deref().map_or(0, text_width);

    let value = if error_len > 0 && text_width(&value) + error_len <= value_room {
        value
    } else {
        clip(&value, value_room.saturating_sub(error_len.min(value_room / 2)))
    };
    let error = error.map(|e| clip(&e, value_room.saturating_sub(text_width(&value))));

    let mut line = String::new();
    line.push_str(&Theme::fg(&theme.colors.modal_border));
    line.push_str(marker);
    line.push_str(&Theme::fg(if field.focused {
        &theme.colors.header_fg
    } else {
        &theme.colors.text_dim
    }));
    line.push_str(&label);
    line.push_str(&Theme::fg(&theme.colors.text_normal));
    if field.focused {
        line.push_str(Theme::bold());
    }
    line.push_str(&value);
    line.push_str(Theme::reset());
    if let Some(error) = error {
        line.push_str(&Theme::bg(&theme.colors.overlay_bg));
        line.push_str(&Theme::fg(&theme.colors.error));
        line.push_str(&error);
    }
    line
}

/// ```text
/// ╭─ Delete Employee ──────────────────╮
/// │                                    │
/// │  Are you sure you want to delete   │
/// │  This action cannot be undone.     │
/// │                                    │
/// │  [Enter] Delete     [Esc] Cancel   │
/// ╰────────────────────────────────────╯
/// ```
fn render_confirm(confirm: &ConfirmInfo, theme: &Theme, cols: usize, rows: usize) {
    let area = BoxArea::centered(CONFIRM_WIDTH, 7, cols, rows);
    let inner = area.inner_width().saturating_sub(2);
    let border = &theme.colors.modal_border;
    let bg = &theme.colors.overlay_bg;

    render_box(area, border, bg, Some(&confirm.title));
    render_box_line(
        area,
        1,
        border,
        bg,
        &format!("  {}{}", Theme::fg(&theme.colors.text_normal), clip(&confirm.message, inner)),
    );
    render_box_line(
        area,
        2,
        border,
        bg,
        &format!("  {}{}", Theme::fg(&theme.colors.warning), clip(&confirm.warning, inner)),
    );

    let actions = format!(
        "  {}{}[Enter] Delete{}{}     {}[Esc] Cancel",
        Theme::bold(),
        Theme::fg(&theme.colors.error),
        Theme::reset(),
        Theme::bg(bg),
        Theme::fg(&theme.colors.text_dim),
    );
    render_box_line(area, 4, border, bg, &actions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_escapes;

    fn field(value: &str, error: Option<&str>, focused: bool, is_choice: bool) -> FormFieldInfo {
        FormFieldInfo {
            label: "Department".to_string(),
            value: value.to_string(),
            error: error.map(str::to_string),
            focused,
            is_choice,
        }
    }

    #[test]
    fn focused_choice_shows_arrows() {
        let line = strip_escapes(&field_line(&field("Finance", None, true, true), 70, &Theme::default()));
        assert_eq!(line, " › Department   ◂ Finance ▸");
    }

    #[test]
    fn error_follows_value() {
        let line = strip_escapes(&field_line(
            &field("", Some("Department is required"), false, false),
            70,
            &Theme::default(),
        ));
        assert_eq!(line, "   Department     ✗ Department is required");
    }

    #[test]
    fn long_lines_fit_inner_width() {
        let long = "x".repeat(200);
        let line = strip_escapes(&field_line(&field(&long, Some("Too long"), true, false), 40, &Theme::default()));
        assert!(text_width(&line) <= 40);
        assert!(line.contains('✗'));
    }
}
