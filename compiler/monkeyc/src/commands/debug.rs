//! Debug commands: `lex`, `parse` and `resolve` dump compiler internals.

use std::fmt::Write as _;
use std::process::ExitCode;

use monkey_compile::Resolution;
use monkey_ir::Program;
use monkey_lexer::LexError;
use monkey_parse::ParseError;

use super::read_file;
use crate::{format_parse_errors, CliError};

/// One line per token: `Debug` form and span.
pub fn dump_tokens(source: &str) -> Result<String, LexError> {
    let tokens = monkey_lexer::lex(source)?;
    let mut out = format!("{} tokens", tokens.len());
    for token in &tokens {
        let _ = write!(out, "\n  {:?} @ {}", token.value, token.span);
    }
    Ok(out)
}

/// Each statement in its parenthesised form.
pub fn dump_parse(program: &Program) -> String {
    let mut out = format!("{} statements", program.statements.len());
    for stmt in &program.statements {
        let _ = write!(out, "\n  {} @ {}", stmt, stmt.span);
    }
    out
}

/// Identifier uses, function layouts and unresolved names.
pub fn dump_resolution(resolution: &Resolution) -> String {
    let mut out = format!("globals: {}", resolution.num_globals);
    if !resolution.names.is_empty() {
        out.push_str("\nnames:");
        for resolved in &resolution.names {
            let _ = write!(out, "\n  {} @ {}", resolved.symbol, resolved.span);
        }
    }
    if !resolution.functions.is_empty() {
        out.push_str("\nfunctions:");
        for function in &resolution.functions {
            let free: Vec<String> = function
                .free_symbols
                .iter()
                .map(ToString::to_string)
                .collect();
            let _ = write!(
                out,
                "\n  {} @ {}: locals={} free=[{}]",
                function.name.as_deref().unwrap_or("<anonymous>"),
                function.span,
                function.num_locals,
                free.join(", ")
            );
        }
    }
    if resolution.has_errors() {
        out.push_str("\nerrors:");
        for err in &resolution.errors {
            let _ = write!(out, "\n  {} @ {}", err, err.span());
        }
    }
    out
}

pub fn lex_file(path: &str) -> Result<ExitCode, CliError> {
    let source = read_file(path)?;
    match dump_tokens(&source) {
        Ok(dump) => {
            println!("Tokens for '{path}': {dump}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{path}: {err} @ {}", err.span());
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn parse_file(path: &str) -> Result<ExitCode, CliError> {
    let source = read_file(path)?;
    let Some(program) = parse_or_report(&source) else {
        return Ok(ExitCode::FAILURE);
    };
    println!("Parse result for '{path}': {}", dump_parse(&program));
    Ok(ExitCode::SUCCESS)
}

pub fn resolve_file(path: &str) -> Result<ExitCode, CliError> {
    let source = read_file(path)?;
    let Some(program) = parse_or_report(&source) else {
        return Ok(ExitCode::FAILURE);
    };
    let resolution = monkey_compile::resolve_program(&program);
    println!("Resolution for '{path}':\n{}", dump_resolution(&resolution));
    Ok(if resolution.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn parse_or_report(source: &str) -> Option<Program> {
    match monkey_parse::parse(source) {
        Ok(program) => Some(program),
        Err(errors) => {
            report_parse_errors(&errors);
            None
        }
    }
}

fn report_parse_errors(errors: &[ParseError]) {
    println!("{}", format_parse_errors(errors));
}
