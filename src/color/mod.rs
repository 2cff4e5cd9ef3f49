//! Color backends
//!
//! The renderer never emits escape codes or markup itself. It tags every
//! fragment with a [`Role`] and hands it to a [`Colorizer`], which decides
//! what the role looks like: an ANSI 256-color sequence, an HTML `span`, or
//! nothing at all.
//!
//! Whether ANSI color is used by default is decided once per process from the
//! environment (see [`color_enabled`]) and can be overridden with
//! [`set_color_enabled`].

pub mod ansi;
pub mod html;
pub mod theme;

pub use ansi::AnsiColorizer;
pub use html::{escape_html, HtmlColorizer};

use std::sync::atomic::{AtomicU8, Ordering};

/// Emphasis role of a rendered fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Punctuation, type names, limit markers, `false`
    Muted,
    /// Quotes, visibility markers, `true`
    Marker,
    /// String bodies, text forms, nil types
    Text,
    /// Numbers, sequence indices, hex bytes
    Number,
    /// Back-references
    Reference,
    /// Map keys and hex offsets
    Key,
    Default,
}

/// Maps a role to its concrete rendering
pub trait Colorizer: Send + Sync {
    fn colorize(&self, role: Role, text: &str) -> String;

    /// Markup backends produce tags and entities that take no room on screen
    fn is_markup(&self) -> bool {
        false
    }
}

/// Leaves text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainColorizer;

impl Colorizer for PlainColorizer {
    fn colorize(&self, _role: Role, text: &str) -> String {
        text.to_string()
    }
}

const UNSET: u8 = 0;
const OFF: u8 = 1;
const ON: u8 = 2;

static COLOR_STATE: AtomicU8 = AtomicU8::new(UNSET);

/// Decide color support from the `NO_COLOR` and `FORCE_COLOR` values.
///
/// A non-empty `NO_COLOR` wins; otherwise a non-empty `FORCE_COLOR` forces
/// color on; otherwise color is on.
pub fn detect_color_from(no_color: Option<&str>, force_color: Option<&str>) -> bool {
    if no_color.is_some_and(|v| !v.is_empty()) {
        return false;
    }
    if force_color.is_some_and(|v| !v.is_empty()) {
        return true;
    }
    true
}

fn detect_color() -> bool {
    let no_color = std::env::var("NO_COLOR").ok();
    let force_color = std::env::var("FORCE_COLOR").ok();
    detect_color_from(no_color.as_deref(), force_color.as_deref())
}

/// Whether ANSI output is enabled for this process
pub fn color_enabled() -> bool {
    match COLOR_STATE.load(Ordering::Acquire) {
        ON => true,
        OFF => false,
        _ => {
            let detected = if detect_color() { ON } else { OFF };
            // An explicit override may have landed in the meantime
            match COLOR_STATE.compare_exchange(UNSET, detected, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => detected == ON,
                Err(current) => current == ON,
            }
        }
    }
}

/// Override environment detection for the rest of the process
pub fn set_color_enabled(enabled: bool) {
    COLOR_STATE.store(if enabled { ON } else { OFF }, Ordering::Release);
    crossterm::style::force_color_output(enabled);
    log::debug!("ANSI color output {}", if enabled { "enabled" } else { "disabled" });
}
