//! mpcalc Binary Entry Point
//!
//! Parses the command line, evaluates one operation and exits with the status
//! of its outcome.

use std::io;
use std::process;

use clap::Parser;
use frameworks_mp_calc::{logging, run, CalcArgs, Outcome};

fn main() {
    logging::init();
    let args = CalcArgs::parse();

    let stdout = io::stdout();
    let outcome = match run(&args, &mut stdout.lock()) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    };
    if let Outcome::Aborted(aborted) = &outcome {
        eprintln!("Error: {}", aborted);
    }
    process::exit(outcome.exit_code());
}
