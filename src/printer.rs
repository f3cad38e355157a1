use std::sync::Arc;

use crate::{
    clock::{self, Clock},
    config::Config,
    level::Level,
    value::Render,
    writer::{LogJob, Writer},
};

pub const DEFAULT_SEPARATOR: &str = " ";
pub const DEFAULT_TERMINATOR: &str = "\n";

/// Where a log call was made. Usually captured with [`crate::location!`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub function: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }

    pub fn file_name(&self) -> &'static str {
        self.file
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(self.file)
    }

    /// `<file name> <function> line: <line>`
    pub fn describe(&self) -> String {
        format!("{} {} line: {}", self.file_name(), self.function, self.line)
    }
}

/// Turns the `type_name` of a function item nested in the caller into the
/// caller's path.
#[doc(hidden)]
pub fn enclosing_function(name: &'static str) -> &'static str {
    let mut name = name.strip_suffix("::__f").unwrap_or(name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

/// Level gate and dispatcher in front of the serialized writer.
pub struct Printer {
    config: Arc<Config>,
    clock: Arc<dyn Clock>,
    writer: Writer,
}

impl std::fmt::Debug for Printer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Printer {
    pub(crate) fn new(config: Arc<Config>, clock: Arc<dyn Clock>, writer: Writer) -> Self {
        Self {
            config,
            clock,
            writer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn enabled(&self, level: Level) -> bool {
        level.passes(self.config.minimum_level())
    }

    pub fn log(&self, level: Level, value: impl Render, location: Location) {
        self.log_with(
            level,
            value,
            DEFAULT_SEPARATOR,
            DEFAULT_TERMINATOR,
            location,
        )
    }

    pub fn log_with(
        &self,
        level: Level,
        value: impl Render,
        separator: &str,
        terminator: &str,
        location: Location,
    ) {
        if !self.enabled(level) {
            return;
        }

        let time = self.clock.now();
        let mut prefix = Vec::with_capacity(2);
        if self.config.show_timestamp() {
            prefix.push(clock::format_timestamp(&time));
        }
        if self.config.show_source_location() {
            prefix.push(location.describe());
        }

        self.writer.submit(LogJob {
            prefix,
            value: value.to_value(),
            separator: separator.to_string(),
            terminator: terminator.to_string(),
            time,
        });
    }

    pub fn debug(&self, value: impl Render, location: Location) {
        self.log(Level::Debug, value, location)
    }

    pub fn info(&self, value: impl Render, location: Location) {
        self.log(Level::Info, value, location)
    }

    pub fn warning(&self, value: impl Render, location: Location) {
        self.log(Level::Warning, value, location)
    }

    pub fn error(&self, value: impl Render, location: Location) {
        self.log(Level::Error, value, location)
    }

    pub fn debug_with(
        &self,
        value: impl Render,
        separator: &str,
        terminator: &str,
        location: Location,
    ) {
        self.log_with(Level::Debug, value, separator, terminator, location)
    }

    pub fn info_with(
        &self,
        value: impl Render,
        separator: &str,
        terminator: &str,
        location: Location,
    ) {
        self.log_with(Level::Info, value, separator, terminator, location)
    }

    pub fn warning_with(
        &self,
        value: impl Render,
        separator: &str,
        terminator: &str,
        location: Location,
    ) {
        self.log_with(Level::Warning, value, separator, terminator, location)
    }

    pub fn error_with(
        &self,
        value: impl Render,
        separator: &str,
        terminator: &str,
        location: Location,
    ) {
        self.log_with(Level::Error, value, separator, terminator, location)
    }

    /// See [`Writer::flush`].
    pub fn flush(&self) {
        self.writer.flush()
    }

    pub async fn flushed(&self) {
        self.writer.flushed().await
    }
}
