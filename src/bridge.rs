use crate::{level::Level, printer::Location, printer::Printer, value::Value};

/// Forwards records from the `log` crate macros to a [`Printer`].
pub struct LogBridge {
    printer: &'static Printer,
}

impl LogBridge {
    pub fn new(printer: &'static Printer) -> Self {
        Self { printer }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.printer.enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let location = Location::new(
            record.file_static().unwrap_or("<unknown>"),
            record.module_path_static().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
        );

        self.printer.log(
            record.level().into(),
            Value::Text(record.args().to_string()),
            location,
        );
    }

    /// Blocks until queued lines are written. Must not be called from async code.
    fn flush(&self) {
        self.printer.flush()
    }
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;
    use crate::Builder;

    fn leaked_printer(dir: &std::path::Path, level: Level) -> &'static Printer {
        let printer = Builder::new()
            .with_level(level)
            .with_console(false)
            .with_directory(dir)
            .with_source_location(true)
            .build()
            .unwrap();
        Box::leak(Box::new(printer))
    }

    fn todays_log(dir: &std::path::Path) -> String {
        let name = format!("{}.log", chrono::Local::now().format("%Y-%m-%d"));
        std::fs::read_to_string(dir.join(name)).unwrap_or_default()
    }

    #[test]
    fn forwards_records_with_their_location() {
        let tmp = tempfile::tempdir().unwrap();
        let bridge = LogBridge::new(leaked_printer(tmp.path(), Level::Debug));

        bridge.log(
            &log::Record::builder()
                .args(format_args!("connected to {}", "db"))
                .level(log::Level::Warn)
                .file_static(Some("src/db/pool.rs"))
                .module_path_static(Some("app::db::pool"))
                .line(Some(12))
                .build(),
        );
        bridge.flush();

        assert_eq!(
            todays_log(tmp.path()),
            "pool.rs app::db::pool line: 12 connected to db\n"
        );
    }

    #[test]
    fn respects_the_printer_gate() {
        let tmp = tempfile::tempdir().unwrap();
        let bridge = LogBridge::new(leaked_printer(tmp.path(), Level::Warning));

        let metadata = log::Metadata::builder().level(log::Level::Info).build();
        assert!(!bridge.enabled(&metadata));

        bridge.log(
            &log::Record::builder()
                .args(format_args!("ignored"))
                .level(log::Level::Trace)
                .build(),
        );
        bridge.flush();

        assert_eq!(todays_log(tmp.path()), "");
    }
}
