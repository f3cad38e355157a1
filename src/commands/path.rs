use chrono::Local;
use clap::Args;
use printlog::{clock, Printer};

#[derive(Args, Debug)]
pub struct Cmd {}

impl Cmd {
    pub fn run(&self, printer: &Printer) -> eyre::Result<()> {
        let dir = printer.config().log_directory();
        let file = dir.join(format!("{}.log", clock::format_file_date(&Local::now())));

        println!("{}", file.display());
        Ok(())
    }
}
