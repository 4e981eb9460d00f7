//! jsinspect REPL
//!
//! Interactive value inspector, file describer and demonstration tour.

use std::io::{self, Write};
use std::process;

use jsinspect::{parse_value, tour, InspectOptions, ValueDescriber};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;
use tracing::{debug, Level};

const USAGE: &str = "\
usage: jsinspect [--depth N] [-v | --verbose] [--tour | <file>]

  (no file)      interactive REPL; :type <expr>, :depth N, :quit
  <file>         describe each non-empty, non-comment line of the file
  --tour         print the demonstration tour
  --depth N      nesting depth for aggregates (minimum 2)
  -v, --verbose  debug logging on stderr";

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("invalid depth '{0}'")]
    InvalidDepth(String),

    #[error("missing value for '{0}'")]
    MissingValue(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("line editor: {0}")]
    Readline(#[from] ReadlineError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    depth: Option<usize>,
    verbose: bool,
    tour: bool,
    help: bool,
    file: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, CliError> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--depth" => {
                let value = args.next().ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                parsed.depth = Some(parse_depth(&value)?);
            }
            "-v" | "--verbose" => parsed.verbose = true,
            "--tour" => parsed.tour = true,
            "-h" | "--help" => parsed.help = true,
            s if s.starts_with('-') && s.len() > 1 => return Err(CliError::UnknownOption(arg)),
            _ if parsed.file.is_none() => parsed.file = Some(arg),
            _ => return Err(CliError::UnexpectedArgument(arg)),
        }
    }
    Ok(parsed)
}

fn parse_depth(text: &str) -> Result<usize, CliError> {
    text.trim()
        .parse()
        .map_err(|_| CliError::InvalidDepth(text.to_string()))
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("jsinspect: {}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    init_logging(args.verbose);

    let mut options = InspectOptions::default();
    if let Some(depth) = args.depth {
        options = options.with_depth(depth);
    }

    let result = if args.help {
        println!("{}", USAGE);
        Ok(())
    } else if args.tour {
        run_tour(&ValueDescriber::new(options))
    } else if let Some(path) = &args.file {
        run_file(path, &ValueDescriber::new(options))
    } else {
        run_repl(options)
    };

    if let Err(e) = result {
        eprintln!("jsinspect: {}", e);
        process::exit(1);
    }
}

fn run_tour(describer: &ValueDescriber) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    tour::run(&mut out, describer)?;
    out.flush()?;
    Ok(())
}

fn run_file(path: &str, describer: &ValueDescriber) -> Result<(), CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })?;
    debug!(path, bytes = source.len(), "describing file");

    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        match parse_value(line) {
            Ok(value) => println!("{}", describer.describe(&value)),
            Err(e) => eprintln!("{}:{}: {}", path, index + 1, e),
        }
    }
    Ok(())
}

fn run_repl(mut options: InspectOptions) -> Result<(), CliError> {
    println!("jsinspect - JavaScript value inspector");
    println!("Type a literal to describe it, :type <expr> for the category only, Ctrl+D to exit.\n");

    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                history_added(editor.add_history_entry(line));
                match eval_line(line, &mut options) {
                    Reply::Output(text) => println!("{}", text),
                    Reply::Error(text) => println!("Error: {}", text),
                    Reply::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Whether a line made it into the history; failures are logged and ignored
fn history_added(result: rustyline::Result<bool>) -> bool {
    match result {
        Ok(added) => added,
        Err(e) => {
            debug!(error = %e, "history entry not saved");
            false
        }
    }
}

/// What the REPL prints for one input line
#[derive(Debug, PartialEq)]
enum Reply {
    Output(String),
    Error(String),
    Quit,
}

fn eval_line(line: &str, options: &mut InspectOptions) -> Reply {
    let describer = ValueDescriber::new(*options);

    if let Some(rest) = line.strip_prefix(":type") {
        return match parse_value(rest.trim()) {
            Ok(value) => Reply::Output(describer.classify(&value).to_string()),
            Err(e) => Reply::Error(e.to_string()),
        };
    }
    if let Some(rest) = line.strip_prefix(":depth") {
        return match parse_depth(rest) {
            Ok(depth) => {
                *options = options.with_depth(depth);
                Reply::Output(format!("depth = {}", options.effective_depth()))
            }
            Err(e) => Reply::Error(e.to_string()),
        };
    }
    if line == ":quit" || line == ":q" {
        return Reply::Quit;
    }
    if line.starts_with(':') {
        return Reply::Error(format!("unknown command '{}'", line));
    }

    match parse_value(line) {
        Ok(value) => Reply::Output(describer.describe(&value)),
        Err(e) => Reply::Error(e.to_string()),
    }
}
