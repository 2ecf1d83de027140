//! Monkey driver: REPL, file runner and debug dumps.

pub mod commands;
mod error;
pub mod repl;
mod tracing_setup;

pub use error::CliError;
pub use tracing_setup::init_tracing;

/// Printed above parse errors and as the REPL banner.
pub const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

/// Render parse errors the way the REPL and the file runner show them.
pub fn format_parse_errors<E: std::fmt::Display>(errors: &[E]) -> String {
    let mut out = String::from(MONKEY_FACE);
    out.push_str("\nWoops! We ran into some monkey business here!\n Parser errors:");
    for err in errors {
        out.push_str("\n\t");
        out.push_str(&err.to_string());
    }
    out
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
