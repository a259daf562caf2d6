//! Error taxonomy shared by the library and the CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid match format: {0}")]
    Template(#[from] TemplateError),

    #[error("Unknown orderby field '{field}' (template declares: {available})")]
    UnknownOrderField { field: String, available: String },

    #[error("--orderby {0} requires --match-format")]
    OrderFieldWithoutTemplate(String),

    #[error("At least one of --keep-count or --keep-size is required")]
    NoThreshold,

    #[error("Invalid size '{input}': {reason}")]
    InvalidSize { input: String, reason: String },

    #[error("Cannot read directory {}: {source}", path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// True for problems with the invocation itself, detected before the
    /// filesystem is touched.
    pub fn is_config(&self) -> bool {
        !matches!(self, Error::DirectoryAccess { .. })
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_config() {
            2
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
