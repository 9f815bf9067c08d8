use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Faults that stop generation.
#[derive(Debug, Error)]
pub(crate) enum GenerateError {
    #[error("Cannot open file {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Write error to file {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },

    #[error("EEPROM size {size} is smaller than the {required} wired addresses")]
    Capacity { size: usize, required: usize },

    #[error("Cannot set up logging: {0}")]
    Logging(#[from] fern::InitError),
}

/// A byte that did not make it to the sink. Generation carries on.
#[derive(Debug, Error)]
#[error("Error writing byte {value:08b} (0x{value:02x}) at address 0x{offset:04x}: {reason}")]
pub(crate) struct WriteFault {
    pub(crate) offset: u64,
    pub(crate) value: u8,
    pub(crate) reason: String,
}

impl WriteFault {
    pub(crate) fn new(offset: u64, value: u8, reason: &str) -> Self {
        WriteFault {
            offset,
            value,
            reason: reason.to_string(),
        }
    }
}
