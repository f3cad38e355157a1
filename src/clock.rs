use std::fmt::Write;

use chrono::{DateTime, Local};

/// `yyyy-MM-dd HH:mm:ss.SSS`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// `yyyy-MM-dd`, used to name the daily log file.
pub const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Default, Clone, Debug)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Formats `time` with a chrono strftime `pattern`.
///
/// An invalid pattern yields an empty string rather than panicking.
pub fn format(time: &DateTime<Local>, pattern: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", time.format(pattern)) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

pub fn format_timestamp(time: &DateTime<Local>) -> String {
    format(time, TIMESTAMP_FORMAT)
}

pub fn format_file_date(time: &DateTime<Local>) -> String {
    format(time, FILE_DATE_FORMAT)
}
