//! Theme management and ANSI escape sequence generation.
//!
//! Color schemes come either from the built-in Catppuccin variants or from a
//! custom TOML file. Colors are hex strings turned into 24-bit ANSI escapes.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#89b4fa"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! status_active = "#a6e3a1"
//! status_inactive = "#f38ba8"
//! status_on_leave = "#fab387"
//! success = "#a6e3a1"
//! error = "#f38ba8"
//! warning = "#f9e2af"
//! info = "#89dceb"
//! overlay_bg = "#181825"
//! modal_border = "#cba6f7"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{Result, RosterError};
use crate::domain::EmployeeStatus;
use crate::notify::Severity;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// A named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Identifier, e.g. `"catppuccin-mocha"`.
    pub name: String,
    /// Colors for every UI element.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header title text.
    pub header_fg: String,
    /// Optional header background; unset leaves the pane background.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Text of the selected row.
    pub selection_fg: String,
    /// Background of the selected row.
    pub selection_bg: String,

    /// Table cells and form values.
    pub text_normal: String,
    /// Footer, pagination and secondary text.
    pub text_dim: String,

    /// Separator lines and unfocused frames.
    pub border: String,

    /// Search frame while the query has focus.
    pub search_bar_border: String,
    /// Text of a filter match.
    pub match_highlight_fg: String,
    /// Background of a filter match.
    pub match_highlight_bg: String,

    /// Empty state message.
    pub empty_state_fg: String,

    /// Status cell colors.
    pub status_active: String,
    pub status_inactive: String,
    pub status_on_leave: String,

    /// Toast accents and the progress bar, per severity.
    pub success: String,
    pub error: String,
    pub warning: String,
    pub info: String,

    /// Background of the loading overlay, toasts and modals.
    pub overlay_bg: String,
    /// Frame of forms and dialogs.
    pub modal_border: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Example
    ///
    /// ```
    /// use zroster::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| RosterError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| RosterError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Color of the status cell for `status`.
    ///
    /// # Parameters
    ///
    /// * `status` - Employee status shown in the row
    ///
    /// # Returns
    ///
    /// A hex color string borrowed from the theme.
    #[must_use]
    pub fn status_color(&self, status: EmployeeStatus) -> &str {
        match status {
            EmployeeStatus::Active => &self.colors.status_active,
            EmployeeStatus::Inactive => &self.colors.status_inactive,
            EmployeeStatus::OnLeave => &self.colors.status_on_leave,
        }
    }

    /// Accent color of a toast with `severity`.
    #[must_use]
    pub fn severity_color(&self, severity: Severity) -> &str {
        match severity {
            Severity::Success => &self.colors.success,
            Severity::Error => &self.colors.error,
            Severity::Warning => &self.colors.warning,
            Severity::Info => &self.colors.info,
        }
    }

    /// Parses `#rrggbb`, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Bold text escape.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Dim text escape.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears every attribute and color.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in theme fails to parse.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_theme_parses() {
        for name in ["catppuccin-mocha", "catppuccin-latte", "catppuccin-frappe", "catppuccin-macchiato"] {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} failed to parse"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn escapes_from_hex() {
        assert_eq!(Theme::fg("#a6e3a1"), "\u{1b}[38;2;166;227;161m");
        assert_eq!(Theme::bg("1e1e2e"), "\u{1b}[48;2;30;30;46m");
        assert_eq!(Theme::fg("#zzz"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn custom_theme_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        std::fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), theme);

        std::fs::write(&path, "name = 3").unwrap();
        assert!(matches!(Theme::from_file(&path), Err(RosterError::Theme(_))));
        assert!(matches!(Theme::from_file(dir.path().join("missing.toml")), Err(RosterError::Theme(_))));
    }
}
