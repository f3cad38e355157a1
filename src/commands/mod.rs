use std::{fmt::Display, path::PathBuf};

use clap::{Parser, Subcommand};
use printlog::{Builder, Level};
use tracing::level_filters::LevelFilter;

mod path;
mod write;

#[derive(Subcommand, Debug)]
pub enum PrintlogCmd {
    Write(write::Cmd),

    Path(path::Cmd),
}

impl Display for PrintlogCmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrintlogCmd::Write(cmd) => write!(f, "write {}", cmd.message_level),
            PrintlogCmd::Path(_cmd) => write!(f, "path"),
        }
    }
}

#[derive(Parser)]
#[command(version, long_version = "")]
#[command(about = "Print messages to the console and append them to a daily log file.", long_about = None, disable_help_subcommand = true)]
pub struct Printlog {
    #[arg(
        global = true,
        long,
        help = "Directory holding the daily log files. Defaults to $PRINTLOG_DIR or ~/Documents/Print.",
        display_order = 0
    )]
    pub dir: Option<PathBuf>,

    #[arg(
        global = true,
        long,
        default_value_t = Level::Debug,
        help = "Minimum level that is printed: debug, info, warning, error or max.",
        display_order = 0
    )]
    pub level: Level,

    #[arg(
        global = true,
        long,
        help = "Prefix every line with a millisecond timestamp.",
        display_order = 1
    )]
    pub timestamp: bool,

    #[arg(
        global = true,
        long,
        help = "Prefix every line with the file, function and line of the call.",
        display_order = 1
    )]
    pub location: bool,

    #[arg(
        global = true,
        long,
        conflicts_with = "no_console",
        help = "Echo lines to stdout. On by default in debug builds.",
        display_order = 2
    )]
    pub console: bool,

    #[arg(
        global = true,
        long,
        help = "Only write to the log file.",
        display_order = 2
    )]
    pub no_console: bool,

    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        global = true,
        help = "Write verbose messages to stderr for debugging.",
        display_order = 999
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: PrintlogCmd,
}

impl Printlog {
    fn trace_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::OFF,
            1 => LevelFilter::ERROR,
            2 => LevelFilter::WARN,
            3 => LevelFilter::INFO,
            4 => LevelFilter::DEBUG,
            5_u8..=u8::MAX => LevelFilter::TRACE,
        }
    }

    fn console_enabled(&self) -> bool {
        if self.console {
            true
        } else if self.no_console {
            false
        } else {
            cfg!(debug_assertions)
        }
    }

    fn setup_tracing(&self) {
        let filter = self.trace_filter();
        if filter == LevelFilter::OFF {
            return;
        }

        tracing_subscriber::fmt()
            .with_max_level(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    fn builder(&self) -> Builder {
        let mut builder = Builder::new()
            .with_level(self.level)
            .with_timestamp(self.timestamp)
            .with_source_location(self.location)
            .with_console(self.console_enabled());

        if let Some(dir) = &self.dir {
            builder = builder.with_directory(dir);
        }

        builder
    }

    pub fn run(self) -> eyre::Result<()> {
        self.setup_tracing();

        let printer = self.builder().init()?;
        tracing::info!(target: "printlog", "running command {}", &self.cmd);
        tracing::trace!(target: "printlog", "log directory: {}", printer.config().log_directory().display());

        let result = match &self.cmd {
            PrintlogCmd::Write(write) => write.run(printer),
            PrintlogCmd::Path(path) => path.run(printer),
        };

        printlog::flush();

        if let Err(msg) = &result {
            tracing::error!(target: "printlog", "failed running command {}, error={} cause={}", &self.cmd, msg, msg.root_cause());
        }

        result
    }
}
