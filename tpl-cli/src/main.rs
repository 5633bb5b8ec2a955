//! Entry point for the `tplb` binary.
#![forbid(unsafe_code)]

use tpl_cli::CliError;

fn main() {
    tpl_cli::init_logging();
    match tpl_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("tplb: {err}");
            std::process::exit(1);
        }
    }
}
