//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use parkzone_cli::CliError;

fn main() {
    match parkzone_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("parkzone: {err}");
            std::process::exit(1);
        }
    }
}
