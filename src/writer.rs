use std::{
    any::Any,
    error::Error,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread::JoinHandle,
};

use chrono::{DateTime, Local};
use eyre::Context;
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    oneshot,
};

use crate::{
    config::Config,
    format,
    sinks::{Line, LogSink},
    value::Value,
};

/// One log call's worth of output.
#[derive(Debug, Clone)]
pub struct LogJob {
    pub prefix: Vec<String>,
    pub value: Value,
    pub separator: String,
    pub terminator: String,
    pub time: DateTime<Local>,
}

impl LogJob {
    /// `prefix<sep>value<terminator>`, or `value<terminator>` with no prefix.
    pub fn compose(&self) -> String {
        let mut text = self.prefix.join(&self.separator);
        if !text.is_empty() {
            text.push_str(&self.separator);
        }
        text.push_str(&format::render(&self.value));
        text.push_str(&self.terminator);
        text
    }
}

enum Command {
    Write(LogJob),
    Flush(oneshot::Sender<()>),
}

/// Handle to the single thread that performs every write.
///
/// Jobs run one at a time in the order they were submitted. Dropping the
/// handle lets the thread finish the queue and waits for it.
pub struct Writer {
    sender: Option<UnboundedSender<Command>>,
    handle: Option<JoinHandle<()>>,
}

impl Writer {
    pub fn spawn(
        config: Arc<Config>,
        console: Box<dyn LogSink>,
        file: Box<dyn LogSink>,
    ) -> eyre::Result<Self> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = Worker {
            config,
            console,
            file,
        };

        let handle = std::thread::Builder::new()
            .name("printlog-writer".to_string())
            .spawn(move || worker.run(receiver))
            .context("Failed spawning log writer thread")?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queues `job` and returns immediately.
    pub fn submit(&self, job: LogJob) {
        if let Some(sender) = &self.sender {
            // Only fails once the worker is gone, and then there is nobody to write.
            let _ = sender.send(Command::Write(job));
        }
    }

    /// Blocks until every job submitted before this call has been written.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async execution context; use
    /// [`Writer::flushed`] there.
    pub fn flush(&self) {
        if let Some(done) = self.barrier() {
            let _ = done.blocking_recv();
        }
    }

    pub async fn flushed(&self) {
        if let Some(done) = self.barrier() {
            let _ = done.await;
        }
    }

    fn barrier(&self) -> Option<oneshot::Receiver<()>> {
        let (done, wait) = oneshot::channel();
        self.sender.as_ref()?.send(Command::Flush(done)).ok()?;
        Some(wait)
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        drop(self.sender.take());

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!(target: "printlog", "log writer thread panicked");
            }
        }
    }
}

struct Worker {
    config: Arc<Config>,
    console: Box<dyn LogSink>,
    file: Box<dyn LogSink>,
}

impl Worker {
    fn run(mut self, mut receiver: UnboundedReceiver<Command>) {
        tracing::debug!(target: "printlog", "log writer started");

        while let Some(command) = receiver.blocking_recv() {
            match command {
                Command::Write(job) => {
                    // A panicking user value loses its own line, not the writer.
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.execute(&job)));
                    if let Err(payload) = outcome {
                        report_panic(payload.as_ref());
                    }
                }
                Command::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }

        tracing::debug!(target: "printlog", "log writer stopped");
    }

    fn execute(&mut self, job: &LogJob) {
        let line = Line {
            text: job.compose(),
            time: job.time,
        };

        if self.config.console_enabled() {
            if let Err(err) = self.console.write_line(&line) {
                report(&err);
            }
        }

        if let Err(err) = self.file.write_line(&line) {
            report(&err);
        }
    }
}

fn report(err: &crate::error::SinkError) {
    let cause = err.source().map(|e| e.to_string()).unwrap_or_default();
    tracing::error!(target: "printlog", "dropping log line, error={} cause={}", err, cause);
}

fn report_panic(payload: &(dyn Any + Send)) {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!(target: "printlog", "dropping log line, panic while writing: {}", message);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{error::SinkError, value::Render};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl LogSink for Recorder {
        fn write_line(&mut self, line: &Line) -> Result<(), SinkError> {
            self.0.lock().unwrap().push(line.text.clone());
            Ok(())
        }
    }

    /// Fails every other line.
    struct Flaky {
        calls: usize,
        inner: Recorder,
    }

    impl LogSink for Flaky {
        fn write_line(&mut self, line: &Line) -> Result<(), SinkError> {
            self.calls += 1;
            if self.calls % 2 == 1 {
                return Err(SinkError::Console(std::io::Error::other("flaky")));
            }
            self.inner.write_line(line)
        }
    }

    fn job(prefix: &[&str], value: impl Render) -> LogJob {
        LogJob {
            prefix: prefix.iter().map(|p| p.to_string()).collect(),
            value: value.to_value(),
            separator: " ".to_string(),
            terminator: "\n".to_string(),
            time: Local::now(),
        }
    }

    fn config(console: bool) -> Arc<Config> {
        let config = Config::new("/nonexistent");
        config.set_console_enabled(console);
        Arc::new(config)
    }

    #[test]
    fn compose_joins_prefix_with_separator() {
        assert_eq!(job(&[], "hello").compose(), "hello\n");
        assert_eq!(
            job(&["2024-01-01 00:00:00.000", "main.rs run line: 3"], 5).compose(),
            "2024-01-01 00:00:00.000 main.rs run line: 3 5\n"
        );

        let mut custom = job(&["t"], "v");
        custom.separator = " | ".to_string();
        custom.terminator = String::new();
        assert_eq!(custom.compose(), "t | v");
    }

    #[test]
    fn jobs_run_in_submission_order() {
        let console = Recorder::default();
        let file = Recorder::default();
        let writer = Writer::spawn(
            config(true),
            Box::new(console.clone()),
            Box::new(file.clone()),
        )
        .unwrap();

        for i in 0..200 {
            writer.submit(job(&[], i));
        }
        writer.flush();

        let expected = (0..200).map(|i| format!("{}\n", i)).collect::<Vec<_>>();
        assert_eq!(*file.0.lock().unwrap(), expected);
        assert_eq!(*console.0.lock().unwrap(), expected);
    }

    #[test]
    fn console_is_skipped_when_disabled() {
        let console = Recorder::default();
        let file = Recorder::default();
        let cfg = config(false);
        let writer =
            Writer::spawn(cfg.clone(), Box::new(console.clone()), Box::new(file.clone())).unwrap();

        writer.submit(job(&[], "quiet"));
        writer.flush();
        cfg.set_console_enabled(true);
        writer.submit(job(&[], "loud"));
        writer.flush();

        assert_eq!(*console.0.lock().unwrap(), vec!["loud\n".to_string()]);
        assert_eq!(file.0.lock().unwrap().len(), 2);
    }

    #[test]
    fn sink_failures_do_not_stop_the_writer() {
        let file = Recorder::default();
        let flaky = Flaky {
            calls: 0,
            inner: file.clone(),
        };
        let writer =
            Writer::spawn(config(false), Box::new(Recorder::default()), Box::new(flaky)).unwrap();

        for i in 0..6 {
            writer.submit(job(&[], i));
        }
        writer.flush();

        assert_eq!(*file.0.lock().unwrap(), vec!["1\n", "3\n", "5\n"]);
    }

    #[test]
    fn panicking_value_does_not_stop_the_writer() {
        struct Boom;

        impl crate::value::Streamable for Boom {
            fn write_to(&self, _out: &mut dyn std::fmt::Write) -> std::fmt::Result {
                panic!("value refused to render");
            }
        }

        let file = Recorder::default();
        let writer = Writer::spawn(
            config(false),
            Box::new(Recorder::default()),
            Box::new(file.clone()),
        )
        .unwrap();

        writer.submit(job(&[], "before"));
        writer.submit(job(&[], Value::stream(Boom)));
        writer.submit(job(&[], "after"));
        writer.flush();
        writer.submit(job(&[], "later"));
        writer.flush();

        assert_eq!(*file.0.lock().unwrap(), vec!["before\n", "after\n", "later\n"]);
    }

    #[test]
    fn drop_drains_pending_jobs() {
        let file = Recorder::default();
        {
            let writer = Writer::spawn(
                config(false),
                Box::new(Recorder::default()),
                Box::new(file.clone()),
            )
            .unwrap();
            for i in 0..50 {
                writer.submit(job(&[], i));
            }
        }

        assert_eq!(file.0.lock().unwrap().len(), 50);
    }

    #[tokio::test]
    async fn flushed_waits_from_async_code() {
        let file = Recorder::default();
        let writer = Writer::spawn(
            config(false),
            Box::new(Recorder::default()),
            Box::new(file.clone()),
        )
        .unwrap();

        writer.submit(job(&[], "async"));
        writer.flushed().await;

        assert_eq!(*file.0.lock().unwrap(), vec!["async\n"]);
    }
}
