use super::theme::DEFAULT_THEME;
use super::{Colorizer, Role};
use rustc_hash::FxHashMap;

/// HTML backend: one inline-styled `span` per fragment
pub struct HtmlColorizer {
    palette: FxHashMap<Role, &'static str>,
    fallback: &'static str,
}

impl HtmlColorizer {
    pub fn new() -> Self {
        let palette = [
            Role::Muted,
            Role::Marker,
            Role::Text,
            Role::Number,
            Role::Reference,
            Role::Key,
        ]
        .into_iter()
        .map(|role| (role, DEFAULT_THEME.swatch(role).html))
        .collect();

        HtmlColorizer {
            palette,
            fallback: DEFAULT_THEME.default.html,
        }
    }

    fn color_of(&self, role: Role) -> &'static str {
        self.palette.get(&role).copied().unwrap_or(self.fallback)
    }
}

impl Default for HtmlColorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Colorizer for HtmlColorizer {
    fn colorize(&self, role: Role, text: &str) -> String {
        format!(
            "<span style=\"color:{}\">{}</span>",
            self.color_of(role),
            escape_html(text)
        )
    }

    fn is_markup(&self) -> bool {
        true
    }
}

/// Escape the characters that would otherwise be read as markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_color() {
        let html = HtmlColorizer::new();
        assert_eq!(
            html.colorize(Role::Text, "\"Alice\""),
            "<span style=\"color:#80ff80\">\"Alice\"</span>"
        );
    }

    #[test]
    fn test_unmapped_role_still_wraps() {
        let html = HtmlColorizer::new();
        assert_eq!(
            html.colorize(Role::Default, "x"),
            "<span style=\"color:#ff7f00\">x</span>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let html = HtmlColorizer::new();
        let out = html.colorize(Role::Muted, "<#dump // a.rs:1");
        assert!(out.contains("&lt;#dump"));
        assert_eq!(escape_html("a => b & c"), "a =&gt; b &amp; c");
    }
}
