//! Top-level dump calls
//!
//! A [`Dumper`] combines a [`Config`], an output sink, a colorizer and an exit
//! hook. Every call renders into a fresh [`RenderContext`], so one `Dumper`
//! can be shared between threads.
//!
//! Output starts with a header naming the call site, taken from
//! `#[track_caller]`:
//!
//! ```text
//! <#dump // src/main.rs:12
//! ```

use crate::color::{AnsiColorizer, Colorizer, HtmlColorizer, Role};
use crate::config::Config;
use crate::errors::DumpError;
use crate::render::layout::ColumnWriter;
use crate::render::{RenderContext, Renderer};
use crate::value::Dump;
use std::io::{self, Write};
use std::panic::Location;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Called by [`Dumper::dump_and_exit`] with the exit status
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

/// Writer shared between clones of a `Dumper`
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

const HTML_OPEN: &str = concat!(
    "<body style='background-color:black;'>",
    "<pre style=\"background-color:black; color:white; padding:5px; border-radius: 5px\">\n",
);
const HTML_CLOSE: &str = "</pre></body>";

#[derive(Clone)]
enum Sink {
    Stdout,
    Stderr,
    Writer(SharedWriter),
}

#[derive(Clone)]
pub struct Dumper {
    config: Config,
    sink: Sink,
    colorizer: Arc<dyn Colorizer>,
    on_exit: ExitHook,
    header: bool,
}

impl Default for Dumper {
    fn default() -> Self {
        Dumper::builder().build()
    }
}

impl Dumper {
    pub fn builder() -> DumperBuilder {
        DumperBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dump to the configured sink. Write failures are logged, not returned.
    #[track_caller]
    pub fn dump(&self, values: &[&dyn Dump]) {
        let location = Location::caller();
        if let Err(err) = self.write_to_sink(values, location) {
            log::error!("{}", err);
        }
    }

    /// Render to a string with the configured colorizer
    #[track_caller]
    pub fn dump_to_string(&self, values: &[&dyn Dump]) -> String {
        self.render(values, &*self.colorizer, Location::caller())
    }

    /// Render an HTML fragment, independent of the configured colorizer
    #[track_caller]
    pub fn dump_to_html(&self, values: &[&dyn Dump]) -> String {
        let body = self.render(values, &HtmlColorizer::new(), Location::caller());
        format!("{}{}{}", HTML_OPEN, body, HTML_CLOSE)
    }

    /// Dump to `writer` instead of the configured sink
    #[track_caller]
    pub fn dump_to<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        values: &[&dyn Dump],
    ) -> Result<(), DumpError> {
        let text = self.render(values, &*self.colorizer, Location::caller());
        write_all(writer, &text)
    }

    /// Dump, then hand exit status 1 to the exit hook
    #[track_caller]
    pub fn dump_and_exit(&self, values: &[&dyn Dump]) {
        let location = Location::caller();
        if let Err(err) = self.write_to_sink(values, location) {
            log::error!("{}", err);
        }
        (self.on_exit)(1);
    }

    fn write_to_sink(
        &self,
        values: &[&dyn Dump],
        location: &Location<'_>,
    ) -> Result<(), DumpError> {
        let text = self.render(values, &*self.colorizer, location);
        match &self.sink {
            Sink::Stdout => write_all(&mut io::stdout().lock(), &text),
            Sink::Stderr => write_all(&mut io::stderr().lock(), &text),
            Sink::Writer(shared) => {
                let mut writer = shared.lock().unwrap_or_else(PoisonError::into_inner);
                write_all(&mut *writer, &text)
            }
        }
    }

    fn render(
        &self,
        values: &[&dyn Dump],
        colors: &dyn Colorizer,
        location: &Location<'_>,
    ) -> String {
        log::debug!(
            "dumping {} value(s) from {}:{} ({})",
            values.len(),
            location.file(),
            location.line(),
            if colors.is_markup() { "html" } else { "text" }
        );

        let mut out = String::new();
        if self.header {
            out.push_str(&colors.colorize(Role::Muted, &header_text(location)));
            out.push('\n');
        }

        let mut ctx = RenderContext::new();
        Renderer::new(&self.config, colors).render_all(values, &mut ctx, &mut out);
        ColumnWriter::new(colors.is_markup()).format(&out).into_owned()
    }
}

fn write_all<W: Write + ?Sized>(writer: &mut W, text: &str) -> Result<(), DumpError> {
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn header_text(location: &Location<'_>) -> String {
    format!(
        "<#dump // {}:{}",
        display_path(location.file()),
        location.line()
    )
}

/// Paths under the working directory are shown relative to it
fn display_path(file: &str) -> String {
    let path = Path::new(file);
    if path.is_absolute() {
        if let Ok(cwd) = std::env::current_dir() {
            if let Ok(relative) = path.strip_prefix(&cwd) {
                return relative.display().to_string();
            }
        }
    }
    file.to_string()
}

pub struct DumperBuilder {
    config: Config,
    sink: Sink,
    colorizer: Option<Arc<dyn Colorizer>>,
    on_exit: ExitHook,
    header: bool,
}

impl DumperBuilder {
    fn new() -> Self {
        DumperBuilder {
            config: Config::default(),
            sink: Sink::Stdout,
            colorizer: None,
            on_exit: Arc::new(|code: i32| std::process::exit(code)),
            header: true,
        }
    }

    /// Replace all limits at once
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn max_items(mut self, max_items: usize) -> Self {
        self.config.max_items = max_items;
        self
    }

    pub fn max_string_len(mut self, max_string_len: usize) -> Self {
        self.config.max_string_len = max_string_len;
        self
    }

    pub fn sort_map_keys(mut self, sort: bool) -> Self {
        self.config.sort_map_keys = sort;
        self
    }

    /// Write dumps to `writer` instead of stdout
    pub fn writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.shared_writer(Arc::new(Mutex::new(writer)))
    }

    /// Write dumps to a writer the caller keeps a handle to
    pub fn shared_writer(mut self, writer: SharedWriter) -> Self {
        self.sink = Sink::Writer(writer);
        self
    }

    pub fn stderr(mut self) -> Self {
        self.sink = Sink::Stderr;
        self
    }

    pub fn colorizer<C: Colorizer + 'static>(mut self, colorizer: C) -> Self {
        self.colorizer = Some(Arc::new(colorizer));
        self
    }

    pub fn on_exit<F: Fn(i32) + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.on_exit = Arc::new(hook);
        self
    }

    /// Toggle the `<#dump // file:line` header
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn build(self) -> Dumper {
        Dumper {
            config: self.config,
            sink: self.sink,
            colorizer: self
                .colorizer
                .unwrap_or_else(|| Arc::new(AnsiColorizer::new())),
            on_exit: self.on_exit,
            header: self.header,
        }
    }
}
