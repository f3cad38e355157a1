use std::io::BufRead;

use clap::Args;
use eyre::Context;
use printlog::{Level, Printer};

#[derive(Args, Debug)]
pub struct Cmd {
    #[arg(
        id = "message_level",
        value_name = "LEVEL",
        index = 1,
        help = "Level of the message: debug, info, warning or error."
    )]
    pub message_level: Level,

    #[arg(
        index = 2,
        help = "Message to log. Each line of stdin is logged when omitted."
    )]
    pub message: Vec<String>,

    #[arg(long, default_value = " ", help = "Separator between prefix and message.")]
    pub separator: String,

    #[arg(long, default_value = "\n", help = "Written after every message.")]
    pub terminator: String,
}

impl Cmd {
    pub fn run(&self, printer: &Printer) -> eyre::Result<()> {
        if !self.message.is_empty() {
            self.emit(printer, self.message.join(" "));
            return Ok(());
        }

        for line in std::io::stdin().lock().lines() {
            let line = line.context("Failed reading message from stdin")?;
            self.emit(printer, line);
        }

        Ok(())
    }

    fn emit(&self, printer: &Printer, message: String) {
        printlog::log!(
            printer => self.message_level,
            message,
            separator = &self.separator,
            terminator = &self.terminator,
        );
    }
}
