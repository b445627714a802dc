//! Incremental reassembly of slcan commands from a serial byte stream.

use crate::{parse, Frame, ParseError};
use core::fmt::{self, Debug};
use std::time::SystemTime;

/// Command terminator.
const CR: u8 = b'\r';
/// Error reply from the adapter. It is not followed by a terminator.
const BEL: u8 = 0x07;

/// Where the decoder is between two terminators. `Dispatching` only lasts
/// for the duration of `dispatch`; callbacks cannot observe the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    /// Collecting bytes of the in-progress command.
    Accumulating,
    /// A terminator arrived and the collected command is being parsed and
    /// handed to a callback.
    Dispatching,
}

/// Turns serial bytes, delivered in chunks of any size, into frames.
///
/// Each `\r` completes a command. A parsed frame is stamped with the current
/// time and passed to `on_frame`; a malformed command is passed to `on_error`
/// and dropped, so it never affects the command after it. A BEL from the
/// adapter is reported as [`ParseError::ErrorReply`] and discards whatever
/// was pending. Chunk boundaries make no difference to the output.
///
/// One decoder belongs to one connection.
pub struct StreamDecoder<F, E>
where
    F: FnMut(Frame),
    E: FnMut(ParseError),
{
    buffer: Vec<u8>,
    state: DecoderState,
    on_frame: F,
    on_error: E,
}

impl<F, E> StreamDecoder<F, E>
where
    F: FnMut(Frame),
    E: FnMut(ParseError),
{
    pub fn new(on_frame: F, on_error: E) -> Self {
        Self {
            buffer: Vec::new(),
            state: DecoderState::Accumulating,
            on_frame,
            on_error,
        }
    }

    /// Feed a chunk of received bytes, in arrival order.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.feed_byte(byte);
        }
    }

    pub fn feed_byte(&mut self, byte: u8) {
        debug_assert_eq!(self.state, DecoderState::Accumulating);

        match byte {
            CR => self.dispatch(),
            BEL => {
                log::warn!(
                    "slcan adapter reported an error, dropping {} pending bytes",
                    self.buffer.len()
                );
                self.buffer.clear();
                (self.on_error)(ParseError::ErrorReply);
            }
            _ => self.buffer.push(byte),
        }
    }

    /// Bytes of the command received so far.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Drop a partially received command, e.g. after reopening the port.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = DecoderState::Accumulating;
    }

    fn dispatch(&mut self) {
        self.state = DecoderState::Dispatching;

        // Keep the allocation but never the contents.
        let mut command = core::mem::take(&mut self.buffer);

        if command.is_empty() {
            // Adapters acknowledge setup commands with a bare CR.
            log::trace!("skipping empty slcan command");
        } else {
            match parse(&command) {
                Ok(frame) => (self.on_frame)(frame.with_timestamp(SystemTime::now())),
                Err(err) => {
                    log::warn!(
                        "dropping malformed slcan command {:?}: {}",
                        String::from_utf8_lossy(&command),
                        err
                    );
                    (self.on_error)(err);
                }
            }
        }

        command.clear();
        self.buffer = command;
        self.state = DecoderState::Accumulating;
    }
}

impl<F, E> Debug for StreamDecoder<F, E>
where
    F: FnMut(Frame),
    E: FnMut(ParseError),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDecoder")
            .field("buffer", &String::from_utf8_lossy(&self.buffer))
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
