//! Helpers shared by the binaries.

use std::io::{self, Read};

/// Parses the command line, exiting with status 1 on a usage error.
///
/// `--help` and `--version` still print to stdout and exit with status 0.
pub fn parse_args<T: clap::Parser>() -> T {
    T::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(if err.use_stderr() { 1 } else { 0 })
    })
}

/// Reads all of standard input.
pub fn read_stdin() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    Ok(input)
}
