//! Monkey CLI
//!
//! `monkey` starts the REPL; `monkey <file>` runs a program.

use std::process::ExitCode;

use monkeyc::commands::{lex_file, parse_file, resolve_file, run_file};
use monkeyc::repl::run_repl;
use monkeyc::{init_tracing, CliError};

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        None => run_repl(),
        Some("help" | "--help" | "-h") => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        Some("run") => with_file(&args, "run", run_file),
        Some("lex") => with_file(&args, "lex", lex_file),
        Some("parse") => with_file(&args, "parse", parse_file),
        Some("resolve") => with_file(&args, "resolve", resolve_file),
        Some(path) if args.len() == 2 => run_file(path),
        Some(_) => Err(CliError::Usage(format!(
            "unsupported number of arguments {}",
            args.len() - 1
        ))),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            if matches!(err, CliError::Usage(_)) {
                eprintln!();
                print_usage();
            }
            ExitCode::FAILURE
        }
    }
}

/// Run `command` on the single file argument after the subcommand name.
fn with_file(
    args: &[String],
    name: &str,
    command: fn(&str) -> Result<ExitCode, CliError>,
) -> Result<ExitCode, CliError> {
    match &args[2..] {
        [path] => command(path),
        _ => Err(CliError::Usage(format!("usage: monkey {name} <file>"))),
    }
}

fn print_usage() {
    eprintln!("Usage: monkey [command] [file]");
    eprintln!();
    eprintln!("With no arguments, starts the interactive REPL.");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  <file>            Run a Monkey program");
    eprintln!("  run <file>        Run a Monkey program");
    eprintln!("  lex <file>        Show the token stream");
    eprintln!("  parse <file>      Show the parsed statements");
    eprintln!("  resolve <file>    Show how every name resolves");
    eprintln!("  help              Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=monkey_eval=trace) for log output.");
}
