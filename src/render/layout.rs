//! Elastic tabstop alignment
//!
//! The renderer separates a field name from its value with a tab. Before the
//! text is written out, [`ColumnWriter`] replaces tabs with padding so that
//! `=>` arrows line up.
//!
//! Text is split into lines and lines into tab-terminated cells; the text
//! after the last tab is not part of any column. A column block is a run of
//! consecutive lines that all have a cell in that column. Every cell of a
//! block is padded to the widest cell plus the padding, and the lines of the
//! block are then aligned on the next column the same way.

use std::borrow::Cow;

struct Cell<'t> {
    text: &'t str,
    width: usize,
}

pub struct ColumnWriter {
    padding: usize,
    markup: bool,
}

impl ColumnWriter {
    /// `markup` makes width measurement skip HTML tags and count entities
    /// as one character
    pub fn new(markup: bool) -> Self {
        ColumnWriter {
            padding: 1,
            markup,
        }
    }

    pub fn format<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !text.contains('\t') {
            return Cow::Borrowed(text);
        }

        let lines: Vec<Vec<Cell<'t>>> = text
            .split('\n')
            .map(|line| {
                line.split('\t')
                    .map(|cell| Cell {
                        text: cell,
                        width: visible_width(cell, self.markup),
                    })
                    .collect()
            })
            .collect();

        let mut out = Vec::with_capacity(lines.len());
        let mut widths = Vec::new();
        self.format_block(&lines, &mut widths, 0, lines.len(), &mut out);
        Cow::Owned(out.join("\n"))
    }

    fn format_block(
        &self,
        lines: &[Vec<Cell<'_>>],
        widths: &mut Vec<usize>,
        mut line0: usize,
        line1: usize,
        out: &mut Vec<String>,
    ) {
        let column = widths.len();
        let mut this = line0;

        while this < line1 {
            if column + 1 >= lines[this].len() {
                this += 1;
                continue;
            }

            // Lines before the block keep the current widths
            write_lines(&lines[line0..this], widths, out);
            line0 = this;

            let mut width = 0;
            while this < line1 && column + 1 < lines[this].len() {
                width = width.max(lines[this][column].width + self.padding);
                this += 1;
            }

            widths.push(width);
            self.format_block(lines, widths, line0, this, out);
            widths.pop();
            line0 = this;
        }

        write_lines(&lines[line0..line1], widths, out);
    }
}

fn write_lines(lines: &[Vec<Cell<'_>>], widths: &[usize], out: &mut Vec<String>) {
    for line in lines {
        let mut rendered = String::new();
        for (j, cell) in line.iter().enumerate() {
            rendered.push_str(cell.text);
            if let Some(&width) = widths.get(j) {
                rendered.push_str(&" ".repeat(width.saturating_sub(cell.width)));
            }
        }
        out.push(rendered);
    }
}

/// Width of `text` on screen: ANSI sequences take no room, and in markup
/// mode neither do tags
pub fn visible_width(text: &str, markup: bool) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
            }
            '<' if markup => {
                for next in chars.by_ref() {
                    if next == '>' {
                        break;
                    }
                }
            }
            '&' if markup => {
                for next in chars.by_ref() {
                    if next == ';' {
                        break;
                    }
                }
                width += 1;
            }
            _ => width += 1,
        }
    }
    width
}
