mod console;
mod file;

use chrono::{DateTime, Local};

pub use console::ConsoleSink;
pub use file::DailyFileSink;

use crate::error::SinkError;

/// One fully composed log line, ready to be written verbatim.
#[derive(Debug, Clone)]
pub struct Line {
    pub text: String,
    /// When the call was made. Picks the day's file.
    pub time: DateTime<Local>,
}

pub trait LogSink: Send {
    fn write_line(&mut self, line: &Line) -> Result<(), SinkError>;
}
