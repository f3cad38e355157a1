use std::io::Write;

use super::{Line, LogSink};
use crate::error::SinkError;

pub struct ConsoleSink {
    handle: Box<dyn Write + Send>,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            handle: Box::new(std::io::stdout()),
        }
    }

    pub fn new(handle: Box<dyn Write + Send>) -> Self {
        Self { handle }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl LogSink for ConsoleSink {
    fn write_line(&mut self, line: &Line) -> Result<(), SinkError> {
        self.handle
            .write_all(line.text.as_bytes())
            .and_then(|_| self.handle.flush())
            .map_err(SinkError::Console)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::Local;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_line_verbatim() {
        let captured = Captured::default();
        let mut sink = ConsoleSink::new(Box::new(captured.clone()));

        for text in ["first\n", "second", "|third\n"] {
            let line = Line {
                text: text.to_string(),
                time: Local::now(),
            };
            sink.write_line(&line).unwrap();
        }

        let written = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "first\nsecond|third\n");
    }
}
