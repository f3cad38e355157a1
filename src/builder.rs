use std::{io::Write, path::PathBuf, sync::Arc};

use eyre::{eyre, Context};

use crate::{
    bridge::LogBridge,
    clock::{Clock, SystemClock},
    config::{default_log_dir, Config},
    level::Level,
    printer::Printer,
    sinks::{ConsoleSink, DailyFileSink},
    writer::Writer,
    GLOBAL,
};

pub struct Builder {
    level: Level,
    show_timestamp: bool,
    show_source_location: bool,
    console: bool,
    directory: Option<PathBuf>,
    console_writer: Option<Box<dyn Write + Send>>,
    clock: Arc<dyn Clock>,
    log_facade: bool,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            level: Level::Debug,
            show_timestamp: false,
            show_source_location: false,
            console: cfg!(debug_assertions),
            directory: None,
            console_writer: None,
            clock: Arc::new(SystemClock),
            log_facade: false,
        }
    }

    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    pub fn with_timestamp(self, show_timestamp: bool) -> Self {
        Self {
            show_timestamp,
            ..self
        }
    }

    pub fn with_source_location(self, show_source_location: bool) -> Self {
        Self {
            show_source_location,
            ..self
        }
    }

    pub fn with_directory(self, path: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(path.into()),
            ..self
        }
    }

    pub fn with_console(self, console: bool) -> Self {
        Self { console, ..self }
    }

    /// Sends console output to `writer` instead of stdout.
    pub fn with_console_writer(self, writer: Box<dyn Write + Send>) -> Self {
        Self {
            console_writer: Some(writer),
            ..self
        }
    }

    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    /// Also route records from the `log` crate macros when installed with
    /// [`Builder::init`].
    pub fn with_log_facade(self, log_facade: bool) -> Self {
        Self { log_facade, ..self }
    }

    pub fn build(self) -> eyre::Result<Printer> {
        let config = Config::new(self.directory.unwrap_or_else(default_log_dir));
        config.set_minimum_level(self.level);
        config.set_show_timestamp(self.show_timestamp);
        config.set_show_source_location(self.show_source_location);
        config.set_console_enabled(self.console);
        let config = Arc::new(config);

        let console = match self.console_writer {
            Some(writer) => ConsoleSink::new(writer),
            None => ConsoleSink::stdout(),
        };
        let file = DailyFileSink::new(config.clone());
        let writer = Writer::spawn(config.clone(), Box::new(console), Box::new(file))?;

        Ok(Printer::new(config, self.clock, writer))
    }

    /// Builds the printer and installs it as the process-wide instance used by
    /// the crate macros.
    pub fn init(self) -> eyre::Result<&'static Printer> {
        let log_facade = self.log_facade;
        let printer = self.build()?;

        GLOBAL.set(printer).map_err(|_| {
            eyre!(
                "printlog is already initialized; a logging macro or printlog::global() \
                 called before Builder::init installs a default printer"
            )
        })?;
        let printer = GLOBAL
            .get()
            .ok_or_else(|| eyre!("printlog global instance missing after init"))?;

        if log_facade {
            log::set_max_level(log::LevelFilter::Trace);
            log::set_boxed_logger(Box::new(LogBridge::new(printer)))
                .context("Failed registering printlog as the log facade")?;
        }

        Ok(printer)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
