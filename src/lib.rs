//! # Introduction
//!
//! vardump renders in-memory values for debugging: type names, field
//! visibility, container contents, pointer identity and raw bytes, as
//! colorized terminal text or as HTML.
//!
//! ```text
//! <#dump // src/main.rs:14
//! #model::User
//!   +name => "Alice"
//!   +tags => [
//!     0 => "admin"
//!   ]
//!   -token => "s3cr3t"
//! }
//! ```
//!
//! ## Rendering pipeline
//!
//! ```text
//! value → Dump::node → Renderer (+ RenderContext) → Colorizer → ColumnWriter → sink
//! ```
//!
//! 1. [`value`]: the [`Dump`] trait and the one-level [`Node`] view it
//!    produces, with implementations for the standard library.
//! 2. [`render`]: the traversal engine: depth/item/length limits, cycle
//!    detection through pointer identity, scalar and hex dump formatting,
//!    column alignment.
//! 3. [`color`]: ANSI, HTML and plain backends behind [`Colorizer`].
//! 4. [`dumper`]: [`Dumper`], the configured entry point, and its builder.
//!
//! ## Usage
//!
//! User types implement [`Dump`] by hand or through [`dump_struct!`]:
//!
//! ```
//! use vardump::{dump_str, dump_struct};
//!
//! struct Point { x: i32, y: i32 }
//! dump_struct!(Point { +x, -y });
//!
//! let out = dump_str!(Point { x: 1, y: 2 });
//! assert!(out.contains("Point"));
//! ```
//!
//! The free functions use a process-wide [`Dumper`] configured from the
//! environment (`VARDUMP_MAX_DEPTH`, `VARDUMP_MAX_ITEMS`,
//! `VARDUMP_MAX_STRING_LEN`; ANSI color follows `NO_COLOR` and
//! `FORCE_COLOR`). Build a [`Dumper`] for anything else.

pub mod color;
pub mod config;
pub mod dumper;
pub mod errors;
mod macros;
pub mod render;
pub mod value;

use std::io::Write;
use std::sync::OnceLock;

pub use color::{
    color_enabled, set_color_enabled, AnsiColorizer, Colorizer, HtmlColorizer, PlainColorizer,
    Role,
};
pub use config::Config;
pub use dumper::{Dumper, DumperBuilder};
pub use errors::DumpError;
pub use value::{AsChild, Child, Dump, FieldDescriptor, Node, Record, TypeInfo, Visibility};

static DEFAULT_DUMPER: OnceLock<Dumper> = OnceLock::new();

/// The dumper behind the free functions and macros
pub fn default_dumper() -> &'static Dumper {
    DEFAULT_DUMPER.get_or_init(|| Dumper::builder().config(Config::from_env()).build())
}

/// Dump values to stdout
#[track_caller]
pub fn dump(values: &[&dyn Dump]) {
    default_dumper().dump(values)
}

#[track_caller]
pub fn dump_to_string(values: &[&dyn Dump]) -> String {
    default_dumper().dump_to_string(values)
}

#[track_caller]
pub fn dump_to_html(values: &[&dyn Dump]) -> String {
    default_dumper().dump_to_html(values)
}

#[track_caller]
pub fn dump_to<W: Write + ?Sized>(writer: &mut W, values: &[&dyn Dump]) -> Result<(), DumpError> {
    default_dumper().dump_to(writer, values)
}

/// Dump values to stdout, then exit with status 1
#[track_caller]
pub fn dump_and_exit(values: &[&dyn Dump]) {
    default_dumper().dump_and_exit(values)
}
