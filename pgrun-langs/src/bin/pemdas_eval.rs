//! Evaluates integer arithmetic expressions.
//!
//! ```text
//! pemdas-eval expr '1 + 2 * 3' '-2 ** 3'
//! pemdas-eval -v file sums.txt
//! echo '(1+2)-(3+4)+5' | pemdas-eval file
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser as ClapParser, ValueEnum};
use pgrun::AstMode;
use pgrun_langs::{cli, eval, pemdas};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Arguments are expressions (at least one)
    Expr,
    /// Arguments are files (none reads standard input)
    File,
}

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the tree before its value
    #[arg(short)]
    verbose: bool,
    /// How to read the arguments
    #[arg(value_enum)]
    mode: Mode,
    /// Expressions or file names
    inputs: Vec<String>,
}

fn evaluate_once(input: &str, verbose: bool) -> Result<()> {
    let Some(ast) = pemdas::tables().parse(input, AstMode::Default)? else {
        bail!("no tree built for {input:?}");
    };
    if verbose {
        print!("{ast}");
    }
    println!("{}", eval::evaluate(&ast)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Args = cli::parse_args();
    match args.mode {
        Mode::Expr => {
            if args.inputs.is_empty() {
                bail!("expr mode requires at least one expression");
            }
            for input in &args.inputs {
                evaluate_once(input, args.verbose)?;
            }
        }
        Mode::File if args.inputs.is_empty() => {
            evaluate_once(&cli::read_stdin()?, args.verbose)?;
        }
        Mode::File => {
            for path in &args.inputs {
                let input = std::fs::read_to_string(path)
                    .with_context(|| format!("can't read {path:?}"))?;
                evaluate_once(&input, args.verbose)?;
            }
        }
    }
    Ok(())
}
