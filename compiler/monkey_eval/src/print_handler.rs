//! Destination for `puts` output.
//!
//! Programs print to stdout; tests and embedders that want to inspect what a
//! program printed capture it in a buffer instead.

use std::cell::RefCell;
use std::rc::Rc;

pub enum PrintHandler {
    /// Writes to stdout (default).
    Stdout,
    /// Captures to a buffer.
    Buffer(RefCell<String>),
}

impl PrintHandler {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout => println!("{msg}"),
            Self::Buffer(buf) => {
                let mut buf = buf.borrow_mut();
                buf.push_str(msg);
                buf.push('\n');
            }
        }
    }

    /// Captured output; empty for stdout.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stdout => String::new(),
            Self::Buffer(buf) => buf.borrow().clone(),
        }
    }
}

/// Handle held by the interpreter and by whoever reads captured output.
pub type SharedPrintHandler = Rc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Rc::new(PrintHandler::Buffer(RefCell::default()))
}

#[cfg(test)]
mod tests;
