// Fri Jan 16 2026 - Alex

use crate::decl::frontend::{self, FrontendError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ARGS: &str = "--target=x86_64-pc-linux-gnu";

/// Front-end arguments for analysis passes, kept verbatim as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub args: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            args: DEFAULT_ARGS.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_args(mut self, args: &str) -> Self {
        self.set_args(args);
        self
    }

    /// Replaces the arguments. An empty string restores [`DEFAULT_ARGS`].
    pub fn set_args(&mut self, args: &str) {
        self.args = if args.is_empty() {
            DEFAULT_ARGS.to_string()
        } else {
            args.to_string()
        };
    }

    /// Splits on single spaces, dropping empty pieces. No quoting.
    pub fn split_args(&self) -> Vec<String> {
        self.args
            .split(' ')
            .filter(|arg| !arg.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn target_triple(&self) -> Result<String, FrontendError> {
        frontend::target_triple(&self.split_args())
    }
}
