mod command;
mod error;

use alg_engine::{
    eval::{evaluate, Numeric},
    parser::parse,
    registry,
    Expression,
    Simplifier,
    SimplifyOptionsBuilder,
};
use alg_error::Error;
use alg_value::Value;
use clap::Parser;
use command::{Binding, Command, Located};
use log::{debug, info};
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::{
    collections::HashMap,
    fs,
    io::{self, IsTerminal, Read},
    path::PathBuf,
    process::ExitCode,
};

const HELP: &str = "\
<expr>                          simplify the expression
:parse <expr>                   print the canonical form without simplifying
:steps <expr>                   simplify, listing every rule that was applied
:eval <expr> [where a = 1, ...] evaluate with floating-point numbers
:exact <expr> [where a = 1, ...] evaluate exactly
:funcs                          list the registered functions
:help                           print this message";

/// Simplify and evaluate algebraic expressions.
///
/// With no file, reads lines from stdin if it is not a terminal, or starts an interactive
/// session otherwise.
#[derive(clap::Parser, Debug)]
#[command(name = "alg", version)]
struct Args {
    /// File to run, one command per line
    file: Option<PathBuf>,

    /// Combine sums of fractions over a common denominator
    #[arg(long)]
    merge_fractions: bool,

    /// Do not fold identities such as tan(x)*cot(x) = 1
    #[arg(long)]
    no_identities: bool,

    /// Do not replace calls on values with their exact results
    #[arg(long)]
    no_fast_paths: bool,

    /// Maximum number of simplification passes
    #[arg(long, default_value_t = 32)]
    max_passes: usize,

    /// Log more; repeat for even more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn simplifier(&self) -> Simplifier<'static> {
        Simplifier::new(
            SimplifyOptionsBuilder::new()
                .merge_fractions(self.merge_fractions)
                .fold_identities(!self.no_identities)
                .fast_paths(!self.no_fast_paths)
                .max_passes(self.max_passes)
                .build(),
        )
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Parses an expression, pointing errors into the whole line.
fn parse_located(located: Located) -> Result<Expression, Error> {
    parse(located.text)
        .map(Expression::from_node)
        .map_err(|err| located.relocate(err))
}

/// Evaluates the expression after evaluating the value of every binding.
fn eval_with<N: Numeric>(expr: Located, bindings: &[Binding]) -> Result<N, Error> {
    let mut scope = HashMap::new();
    for binding in bindings {
        let value = parse_located(binding.value)?
            .evaluate::<N>(&scope)
            .map_err(|err| binding.value.relocate(err))?;
        scope.insert(binding.name, value);
    }
    parse_located(expr)?.evaluate(&scope)
}

/// Runs one command, printing its output.
fn run(line: &str, simplifier: &Simplifier) -> Result<(), Error> {
    match Command::parse(line)? {
        Command::Simplify(expr) => println!("{}", parse_located(expr)?.simplify_with(simplifier)),
        Command::Parse(expr) => println!("{}", parse_located(expr)?),
        Command::Steps(expr) => {
            let expr = parse_located(expr)?;
            let (simplified, steps) = simplifier.simplify_with_steps(expr.node());
            for (idx, step) in steps.iter().enumerate() {
                println!("{:>3}. {}", idx + 1, step);
            }
            println!("{}", simplified);
        },
        Command::Eval(expr, bindings) => println!("{}", eval_with::<f64>(expr, &bindings)?),
        Command::Exact(expr, bindings) => println!("{}", eval_with::<Value>(expr, &bindings)?),
        Command::Funcs => {
            for def in registry::global().iter() {
                let params = (1..=def.arity)
                    .map(|n| format!("x{}", n))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}({}): {}", def.name, params, def.description);
            }
        },
        Command::Help => println!("{}", HELP),
    }
    Ok(())
}

/// Runs every non-empty line of the input. Returns false if any line failed.
fn run_batch(input: &str, simplifier: &Simplifier) -> bool {
    let mut ok = true;
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        if let Err(err) = run(line, simplifier) {
            err.report_to_stderr("input", line);
            ok = false;
        }
    }
    ok
}

/// Runs the interactive session until end of input.
fn run_interactive(simplifier: &Simplifier) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };
        if input.trim().is_empty() {
            continue;
        }

        rl.add_history_entry(&input)?;
        if let Err(err) = run(&input, simplifier) {
            err.report_to_stderr("input", &input);
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    // a logger that fails to install leaves the shell usable
    let _ = TermLogger::init(args.log_level(), Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
    debug!("{:?}", args);

    let simplifier = args.simplifier();
    let input = if let Some(path) = &args.file {
        match fs::read_to_string(path) {
            Ok(input) => Some(input),
            Err(err) => {
                eprintln!("could not read {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            },
        }
    } else if !io::stdin().is_terminal() {
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        Some(input)
    } else {
        None
    };

    match input {
        Some(input) => {
            info!("running {} lines", input.lines().count());
            if run_batch(&input, &simplifier) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        },
        None => match run_interactive(&simplifier) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            },
        },
    }
}
