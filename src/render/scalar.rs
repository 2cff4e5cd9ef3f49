//! Scalar and byte buffer formatting

use super::INDENT_WIDTH;
use crate::color::{Colorizer, Role};
use crate::value::Node;
use std::borrow::Cow;

const HEX_LINE_LEN: usize = 16;
const ASCII_START_COL: usize = 50;

/// Replace control characters with their two-character escapes
pub(crate) fn escape_control(s: &str) -> Cow<'_, str> {
    if !s.chars().any(needs_escape) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            '\x1b' => out.push_str("\\x1b"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn needs_escape(c: char) -> bool {
    matches!(c, '\n' | '\t' | '\r' | '\x0b' | '\x0c' | '\x1b')
}

/// Keep at most `max` code points, marking the cut with an ellipsis
pub(crate) fn truncate(s: &str, max: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max) {
        Some((cut, _)) => Cow::Owned(format!("{}…", &s[..cut])),
        None => Cow::Borrowed(s),
    }
}

pub(crate) fn format_complex(re: f64, im: f64) -> String {
    format!("({}{:+}i)", re, im)
}

/// Format a scalar node. Returns `None` for anything that is not a scalar.
pub(crate) fn format_scalar(
    node: &Node<'_>,
    max_string_len: usize,
    colors: &dyn Colorizer,
) -> Option<String> {
    let out = match node {
        Node::Bool(true) => colors.colorize(Role::Marker, "true"),
        Node::Bool(false) => colors.colorize(Role::Muted, "false"),
        Node::Int(n) => colors.colorize(Role::Number, &n.to_string()),
        Node::Uint(n) => colors.colorize(Role::Number, &n.to_string()),
        Node::Float(f) => colors.colorize(Role::Number, &format!("{:.6}", f)),
        Node::Complex { re, im } => colors.colorize(Role::Number, &format_complex(*re, *im)),
        Node::Char(c) => {
            let mut buf = [0u8; 4];
            quoted("'", &escape_control(c.encode_utf8(&mut buf)), colors)
        }
        Node::Str(s) => quoted("\"", &escape_control(&truncate(s, max_string_len)), colors),
        _ => return None,
    };
    Some(out)
}

fn quoted(mark: &str, body: &str, colors: &dyn Colorizer) -> String {
    let mark = colors.colorize(Role::Marker, mark);
    format!("{}{}{}", mark, colors.colorize(Role::Text, body), mark)
}

/// Hex dump of a byte buffer.
///
/// Rows are indented one level below `depth`; the closing brace sits at
/// `depth`.
pub(crate) fn hex_dump(
    data: &[u8],
    cap: usize,
    type_name: &str,
    depth: usize,
    colors: &dyn Colorizer,
) -> String {
    let body_indent = " ".repeat((depth + 1) * INDENT_WIDTH);
    let mut out = colors.colorize(
        Role::Text,
        &format!("({}) (len={} cap={}) {{", type_name, data.len(), cap),
    );
    out.push('\n');

    for (row, line) in data.chunks(HEX_LINE_LEN).enumerate() {
        let offset = format!("{:08x}  ", row * HEX_LINE_LEN);

        let mut hex = String::with_capacity(HEX_LINE_LEN * 3 + 1);
        for j in 0..HEX_LINE_LEN {
            match line.get(j) {
                Some(byte) => hex.push_str(&format!("{:02x} ", byte)),
                None => hex.push_str("   "),
            }
            if j == 7 {
                hex.push(' ');
            }
        }

        let ascii: String = line
            .iter()
            .map(|&b| if (32..=126).contains(&b) { b as char } else { '.' })
            .collect();

        let visible = offset.len() + hex.len();
        let padding = ASCII_START_COL.saturating_sub(visible).max(1);

        out.push_str(&body_indent);
        out.push_str(&colors.colorize(Role::Key, &offset));
        out.push_str(&colors.colorize(Role::Number, &hex));
        out.push_str(&" ".repeat(padding));
        out.push_str(&colors.colorize(Role::Muted, "| "));
        out.push_str(&colors.colorize(Role::Text, &ascii));
        out.push_str(&" ".repeat(HEX_LINE_LEN - line.len()));
        out.push_str(&colors.colorize(Role::Muted, " |"));
        out.push('\n');
    }

    out.push_str(&" ".repeat(depth * INDENT_WIDTH));
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PlainColorizer;

    #[test]
    fn test_escape_control() {
        assert_eq!(escape_control("a\nb\tc"), "a\\nb\\tc");
        assert_eq!(escape_control("\r\x0b\x0c"), "\\r\\v\\f");
        assert_eq!(escape_control("\x1b[31m"), "\\x1b[31m");
        assert!(matches!(escape_control("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_counts_code_points() {
        assert_eq!(truncate("abcdef", 3), "abc…");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("héllo wörld", 5), "héllo…");
        assert_eq!(truncate("abc", 0), "…");
    }

    #[test]
    fn test_scalars() {
        let plain = PlainColorizer;
        let fmt = |node: Node<'_>| format_scalar(&node, 100, &plain);

        assert_eq!(fmt(Node::Bool(true)).as_deref(), Some("true"));
        assert_eq!(fmt(Node::Int(-42)).as_deref(), Some("-42"));
        assert_eq!(fmt(Node::Uint(42)).as_deref(), Some("42"));
        assert_eq!(fmt(Node::Float(1.5)).as_deref(), Some("1.500000"));
        assert_eq!(fmt(Node::Char('\n')).as_deref(), Some("'\\n'"));
        assert_eq!(
            fmt(Node::Complex { re: 1.0, im: -2.5 }).as_deref(),
            Some("(1-2.5i)")
        );
        assert_eq!(fmt(Node::Str("hi".into())).as_deref(), Some("\"hi\""));
        assert!(fmt(Node::Func).is_none());
    }

    #[test]
    fn test_long_string_is_truncated_before_escaping() {
        let plain = PlainColorizer;
        let out = format_scalar(&Node::Str("\n\n\n\n".into()), 2, &plain);
        assert_eq!(out.as_deref(), Some("\"\\n\\n…\""));
    }

    #[test]
    fn test_hex_dump_layout() {
        let data = br#"{"error":"x"}"#;
        let out = hex_dump(data, 16, "Vec<u8>", 0, &PlainColorizer);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "(Vec<u8>) (len=13 cap=16) {");
        assert!(lines[1].starts_with("  00000000  7b 22 65 72 72 6f 72 22  3a"));
        assert!(lines[1].ends_with(r#"| {"error":"x"}    |"#));
        assert_eq!(lines[2], "}");
    }

    #[test]
    fn test_hex_dump_rows_and_nonprintable() {
        let data: Vec<u8> = (0u8..20).collect();
        let out = hex_dump(&data, 20, "[u8]", 1, &PlainColorizer);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("    00000000  00 01"));
        assert!(lines[2].starts_with("    00000010  10 11 12 13"));
        assert!(lines[2].contains("| ....             |"));
        assert_eq!(lines[3], "  }");
    }

    #[test]
    fn test_empty_hex_dump() {
        let out = hex_dump(&[], 0, "Vec<u8>", 0, &PlainColorizer);
        assert_eq!(out, "(Vec<u8>) (len=0 cap=0) {\n}");
    }
}
