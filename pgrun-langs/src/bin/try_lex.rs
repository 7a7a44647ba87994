//! Prints the tokens a registered lexer produces.
//!
//! ```text
//! try-lex g:pemdas expr '1 + 2' '3**4'
//! try-lex g:json file data.json
//! ```
//!
//! In `file` mode every line of every file is lexed on its own.

use anyhow::{Context, Result, bail};
use clap::{Parser as ClapParser, ValueEnum};
use pgrun::{Lexer, Token};
use pgrun_langs::cli;
use pgrun_langs::registry::{self, LexerEntry};
use std::io::{self, BufRead, BufReader, Write};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Arguments are strings to lex
    Expr,
    /// Arguments are files to lex line by line
    File,
}

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Lexer name, e.g. g:pemdas
    lexer: String,
    /// How to read the arguments
    #[arg(value_enum)]
    mode: Mode,
    /// Strings or file names
    #[arg(required = true)]
    inputs: Vec<String>,
}

fn token_line(token: &Token) -> String {
    format!(
        "Line {:4} column {:4} type {:<14} token <<{}>>",
        token.location.line,
        token.location.column,
        token.token_type.as_str(),
        token.lexeme
    )
}

fn lex_once(entry: &LexerEntry, input: &str, out: &mut impl Write) -> Result<()> {
    let mut lexer = (entry.tables)().lexer(input);
    loop {
        let token = lexer.scan();
        writeln!(out, "{}", token_line(&token))?;
        if token.is_error() {
            bail!("lex error at {}: {}", token.location, token.lexeme);
        }
        if token.is_eof() {
            log::debug!("{:?}", lexer.stats());
            return Ok(());
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Args = cli::parse_args();
    let Some(entry) = registry::lexer(&args.lexer) else {
        let names = registry::describe(registry::lexers().iter().map(|e| (e.name, e.help)));
        bail!("unknown lexer {:?}; lexer names:\n{names}", args.lexer);
    };

    let mut out = io::stdout().lock();
    match args.mode {
        Mode::Expr => {
            for input in &args.inputs {
                lex_once(entry, input, &mut out)?;
            }
        }
        Mode::File => {
            for path in &args.inputs {
                let file =
                    std::fs::File::open(path).with_context(|| format!("can't open {path:?}"))?;
                for line in BufReader::new(file).lines() {
                    lex_once(entry, &line?, &mut out)?;
                }
            }
        }
    }
    Ok(())
}
