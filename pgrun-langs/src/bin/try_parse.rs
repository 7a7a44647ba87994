//! Parses inputs with a registered parser and prints the trees.
//!
//! ```text
//! try-parse --states -e g:pemdas '1 + 2 * 3'
//! try-parse --fullast g:json data.json
//! echo '[1, 2]' | try-parse g:json
//! ```
//!
//! Options are long flags with two dashes (`--noast`, `--fullast`, ...);
//! only `-e` is a short one.

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use pgrun::{Ast, AstMode, TraceWriter};
use pgrun_langs::cli;
use pgrun_langs::registry::{self, ParserKind};
use std::io;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print tokens as they are read
    #[arg(long)]
    tokens: bool,
    /// Show parser actions
    #[arg(long)]
    states: bool,
    /// Show the parser stacks after each action
    #[arg(long)]
    stack: bool,
    /// Check syntax only; build and print no tree (generated parsers only)
    #[arg(long)]
    noast: bool,
    /// Ignore shaping rules and build the full parse tree (generated parsers only)
    #[arg(long)]
    fullast: bool,
    /// Print trees as parenthesized expressions
    #[arg(long)]
    parex: bool,
    /// Arguments are expressions rather than file names
    #[arg(short = 'e')]
    exprs: bool,
    /// Parser name, e.g. g:pemdas
    parser: String,
    /// Expressions with -e, else files (none reads standard input)
    inputs: Vec<String>,
}

impl Args {
    fn mode(&self) -> Result<AstMode> {
        match (self.noast, self.fullast) {
            (true, true) => bail!("cannot use --noast and --fullast together"),
            (true, false) => Ok(AstMode::NoAst),
            (false, true) => Ok(AstMode::Full),
            (false, false) => Ok(AstMode::Default),
        }
    }

    fn tracing(&self) -> bool {
        self.tokens || self.states || self.stack
    }
}

fn parse_once(args: &Args, kind: ParserKind, mode: AstMode, input: &str) -> Result<()> {
    println!("{input}");
    let ast: Option<Ast> = match kind {
        ParserKind::Generated(tables) => {
            let tables = tables();
            if args.tracing() {
                let trace = TraceWriter::new(io::stdout())
                    .tokens(args.tokens)
                    .states(args.states)
                    .stack(args.stack);
                tables.parse_traced(input, mode, trace)?
            } else {
                let mut parser = tables.parser();
                let ast = parser.parse(&mut tables.lexer(input), mode)?;
                log::info!("Stats: {:?}", parser.stats());
                ast
            }
        }
        ParserKind::Manual(parse) => Some(parse(input)?),
    };
    if let Some(ast) = ast {
        if args.parex {
            print!("{}", ast.to_parex_multiline());
        } else {
            print!("{ast}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Args = cli::parse_args();
    let mode = args.mode()?;
    let Some(entry) = registry::parser(&args.parser) else {
        let names = registry::describe(registry::parsers().iter().map(|e| (e.name, e.help)));
        bail!("unknown parser {:?}; parser names:\n{names}", args.parser);
    };
    if matches!(entry.kind, ParserKind::Manual(_)) && (args.tracing() || args.noast || args.fullast)
    {
        log::warn!(
            "{} is hand-written; trace and AST mode options are ignored",
            entry.name
        );
    }

    if args.exprs {
        if args.inputs.is_empty() {
            bail!("-e requires at least one expression");
        }
        for input in &args.inputs {
            parse_once(&args, entry.kind, mode, input)?;
        }
    } else if args.inputs.is_empty() {
        parse_once(&args, entry.kind, mode, &cli::read_stdin()?)?;
    } else {
        for path in &args.inputs {
            let input =
                std::fs::read_to_string(path).with_context(|| format!("can't read {path:?}"))?;
            parse_once(&args, entry.kind, mode, &input)?;
        }
    }
    Ok(())
}
