//! Convert a transactions CSV into a paginated PDF report.
//!
//! Usage:
//!   txn_report [path/to/transactions.csv]
//!
//! Without an argument the path is read from stdin. The report is written
//! next to the input as `<name>_output.pdf`. Set `RUST_LOG=debug` for
//! stage-by-stage logging.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use txn_report::app::{App, FilePicker, Notifier, APP_TITLE, INPUT_LABEL};
use txn_report::config::ReportConfig;

/// Reads a path typed on stdin.
struct StdinPicker;

impl FilePicker for StdinPicker {
    fn pick_file(&mut self) -> Option<PathBuf> {
        print!("{} ", INPUT_LABEL);
        if let Err(e) = io::stdout().flush() {
            log::warn!("Could not flush prompt: {}", e);
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => {
                let line = line.trim();
                (!line.is_empty()).then(|| PathBuf::from(line))
            },
            Err(e) => {
                log::warn!("Could not read path from stdin: {}", e);
                None
            },
        }
    }
}

/// Prints outcomes to the terminal.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn info(&mut self, title: &str, message: &str) {
        println!("{}: {}", title, message);
    }

    fn error(&mut self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::debug!("{} starting", APP_TITLE);

    let mut app = App::new(ReportConfig::default());
    match std::env::args_os().nth(1) {
        Some(arg) => app.input = arg.to_string_lossy().into_owned(),
        None => app.browse(&mut StdinPicker),
    }

    if app.trigger(&mut TerminalNotifier).is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
