use super::theme::DEFAULT_THEME;
use super::{color_enabled, Colorizer, Role};
use crossterm::style::Stylize;

/// ANSI 256-color backend
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiColorizer {
    enabled: Option<bool>,
}

impl AnsiColorizer {
    /// Follow the process-wide color setting
    pub fn new() -> Self {
        AnsiColorizer { enabled: None }
    }

    /// Ignore the process-wide setting
    pub fn with_enabled(enabled: bool) -> Self {
        if enabled {
            // crossterm drops sequences on its own when NO_COLOR is set
            crossterm::style::force_color_output(true);
        }
        AnsiColorizer {
            enabled: Some(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or_else(color_enabled)
    }
}

impl Colorizer for AnsiColorizer {
    fn colorize(&self, role: Role, text: &str) -> String {
        if !self.is_enabled() {
            return text.to_string();
        }
        text.with(DEFAULT_THEME.swatch(role).ansi).to_string()
    }
}
