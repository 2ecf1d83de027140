//! Subcommands of the `monkey` binary.

mod debug;
mod run;

use std::fs;
use std::path::Path;

pub use debug::{dump_parse, dump_resolution, dump_tokens, lex_file, parse_file, resolve_file};
pub use run::{execute, run_file, RunOutcome};

use crate::CliError;

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: Path::new(path).to_path_buf(),
        source,
    })
}
