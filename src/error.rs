use std::io;
use thiserror::Error;

/// Fatal conditions raised while the machine is running. Neither is recoverable for the current
/// run: both mean the device map or the program image is broken.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum EmulationError {
    /// No connected device claims the address.
    #[error("no device mapped at address ${addr:04X}")]
    UnmappedAddress { addr: u16 },

    /// The fetched byte has no entry in the instruction table.
    #[error("unknown opcode ${opcode:02X} at ${pc:04X}")]
    UnknownOpcode { opcode: u8, pc: u16 },
}

/// Errors reported while loading a cartridge image, before any clock cycle runs.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read ROM image: {0}")]
    Io(#[from] io::Error),

    #[error("invalid iNES header")]
    InvalidHeader,

    #[error("ROM image truncated in {section}: expected {expected} bytes, found {actual}")]
    Truncated {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported mapper {0:03}")]
    UnsupportedMapper(u8),
}
