pub mod error;
pub mod extractor;
pub mod label;
pub mod loader;
pub mod model;
pub mod scorer;
pub mod utf8;
pub mod window;

pub use error::{strerror, Error, ErrorKind};
pub use label::Label;
pub use model::Model;

/// Session options that do not change classification results. Only the
/// verbosity of the scorer diagnostics for now.
#[derive(Copy, Clone, Debug, Default)]
pub struct Config {
    /// Log the contribution of every quadgram to every label.
    verbose: bool,
}

impl Config {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
