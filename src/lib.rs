//! Leveled printing to the console and a daily log file.
//!
//! Every call that passes the level gate is handed to a single writer thread,
//! which prints it to stdout (when the console is enabled) and appends it to
//! `<log directory>/<yyyy-MM-dd>.log`. Lines from concurrent callers never
//! interleave.
//!
//! ```no_run
//! use printlog::{Builder, Level};
//!
//! Builder::new()
//!     .with_level(Level::Info)
//!     .with_timestamp(true)
//!     .init()?;
//!
//! printlog::info!("service started");
//! printlog::error!((404, "not found"), separator = " | ");
//! # Ok::<(), eyre::Report>(())
//! ```

mod bridge;
mod builder;
pub mod clock;
pub mod config;
mod error;
pub mod format;
mod level;
pub mod printer;
pub mod sinks;
pub mod value;
mod writer;

use std::sync::OnceLock;

pub use bridge::LogBridge;
pub use builder::Builder;
pub use config::Config;
pub use error::SinkError;
pub use format::{render, render_debug};
pub use level::{Level, ParseLevelError};
pub use printer::{Location, Printer, DEFAULT_SEPARATOR, DEFAULT_TERMINATOR};
pub use value::{Field, Render, Streamable, TypeName, Value};
pub use writer::{LogJob, Writer};

pub(crate) static GLOBAL: OnceLock<Printer> = OnceLock::new();

/// The process-wide printer. Installed by [`Builder::init`], or built with
/// default settings on first use.
pub fn global() -> Option<&'static Printer> {
    if let Some(printer) = GLOBAL.get() {
        return Some(printer);
    }

    match Builder::new().build() {
        Ok(printer) => {
            // Losing a race here just drops the spare printer.
            let _ = GLOBAL.set(printer);
            GLOBAL.get()
        }
        Err(err) => {
            tracing::error!(target: "printlog", "failed starting default printer: {:#}", err);
            None
        }
    }
}

/// Waits for everything logged through the process-wide printer so far.
pub fn flush() {
    if let Some(printer) = GLOBAL.get() {
        printer.flush();
    }
}

/// Captures the current file, enclosing function and line.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(
            ::std::file!(),
            $crate::printer::enclosing_function({
                fn __f() {}
                fn type_name_of<T>(_: T) -> &'static str {
                    ::std::any::type_name::<T>()
                }
                type_name_of(__f)
            }),
            ::std::line!(),
        )
    };
}

/// `log!(level, value)` logs through the process-wide printer,
/// `log!(printer => level, value)` through a specific one. Both accept
/// trailing `separator = ...` and `terminator = ...`.
#[macro_export]
macro_rules! log {
    ($printer:expr => $level:expr, $value:expr, separator = $sep:expr, terminator = $term:expr $(,)?) => {
        $printer.log_with($level, $value, $sep, $term, $crate::location!())
    };
    ($printer:expr => $level:expr, $value:expr, separator = $sep:expr $(,)?) => {
        $printer.log_with(
            $level,
            $value,
            $sep,
            $crate::DEFAULT_TERMINATOR,
            $crate::location!(),
        )
    };
    ($printer:expr => $level:expr, $value:expr, terminator = $term:expr $(,)?) => {
        $printer.log_with(
            $level,
            $value,
            $crate::DEFAULT_SEPARATOR,
            $term,
            $crate::location!(),
        )
    };
    ($printer:expr => $level:expr, $value:expr $(,)?) => {
        $printer.log($level, $value, $crate::location!())
    };
    ($level:expr, $($rest:tt)+) => {
        if let ::std::option::Option::Some(printer) = $crate::global() {
            $crate::log!(printer => $level, $($rest)+)
        }
    };
}

#[macro_export]
macro_rules! debug {
    ($printer:expr => $($rest:tt)+) => {
        $crate::log!($printer => $crate::Level::Debug, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::Level::Debug, $($rest)+)
    };
}

#[macro_export]
macro_rules! info {
    ($printer:expr => $($rest:tt)+) => {
        $crate::log!($printer => $crate::Level::Info, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::Level::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($printer:expr => $($rest:tt)+) => {
        $crate::log!($printer => $crate::Level::Warning, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::Level::Warning, $($rest)+)
    };
}

#[macro_export]
macro_rules! error {
    ($printer:expr => $($rest:tt)+) => {
        $crate::log!($printer => $crate::Level::Error, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::log!($crate::Level::Error, $($rest)+)
    };
}
