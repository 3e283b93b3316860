//! Thin binary: all CLI behavior lives in `cli/`, this file only runs it and maps errors
//! to an exit code.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
