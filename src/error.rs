//! Error types for command parsing and adapter sessions.

use thiserror::Error;

/// Why a single slcan command could not be parsed into a frame.
///
/// Parse errors are local to one command: the stream decoder reports them
/// and carries on with the next command.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Leading character is not one of `t`, `r`, `T`, `R`.
    #[error("invalid frame type")]
    InvalidFrameType,
    /// Identifier field is incomplete, not hexadecimal, or out of range.
    #[error("invalid identifier")]
    InvalidIdentifier,
    /// DLC character is missing, not a decimal digit, or above 8.
    #[error("invalid data length code")]
    InvalidDlc,
    /// Data byte at this zero-based index is missing or not hexadecimal.
    #[error("invalid data byte at index {0}")]
    InvalidDataByte(usize),
    /// The adapter answered with BEL instead of a command.
    #[error("adapter replied with an error")]
    ErrorReply,
}

#[derive(Error, Debug)]
pub enum Error {
    /// The session has not been opened, or was closed.
    #[error("not connected")]
    NotConnected,
    #[error("unsupported CAN bitrate: {0} bit/s")]
    UnsupportedBitrate(u32),
    #[cfg(feature = "std")]
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}
