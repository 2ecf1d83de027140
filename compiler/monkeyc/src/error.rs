//! Driver errors.

use std::io;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Usage(String),
    #[error("line editor failed: {0}")]
    Readline(#[from] ReadlineError),
}
