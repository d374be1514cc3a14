//! atmoscan - Spatial Audio Scanner
//!
//! Entry point for the atmoscan CLI application.

use clap::Parser;

use atmoscan::cli::Cli;
use atmoscan::error::ExitCode;

fn main() {
    let cli = Cli::parse();

    match atmoscan::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
