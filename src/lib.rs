//! A Rust Serial Line CAN (slcan) codec with stream reassembly.
//!
//! Frames are encoded into slcan commands with [`encode`] (or the
//! [`Transmit`] command) and parsed back with [`parse`]. These only need
//! `alloc`. With the `std` feature (on by default), bytes read back from the
//! adapter are turned into timestamped frames by a `StreamDecoder`, and a
//! `Session` drives an adapter over any `std::io::Write` serial handle.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
mod decoder;
mod error;
mod frame;
mod parser;
#[cfg(feature = "std")]
mod session;

use alloc::string::{String, ToString};
use core::fmt::{Debug, Display};
#[cfg(feature = "std")]
pub use decoder::StreamDecoder;
pub use embedded_can::{ExtendedId, Id, StandardId};
pub use error::{Error, ParseError};
pub use frame::{Frame, FrameType};
pub use parser::parse;
#[cfg(feature = "std")]
pub use session::Session;

/// Bitrate options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Bitrate {
    Rate10kbit = 0,
    Rate20kbit = 1,
    Rate50kbit = 2,
    Rate100kbit = 3,
    Rate125kbit = 4,
    Rate250kbit = 5,
    Rate500kbit = 6,
    Rate800kbit = 7,
    Rate1000kbit = 8,
}

impl Bitrate {
    const ALL: [Bitrate; 9] = [
        Bitrate::Rate10kbit,
        Bitrate::Rate20kbit,
        Bitrate::Rate50kbit,
        Bitrate::Rate100kbit,
        Bitrate::Rate125kbit,
        Bitrate::Rate250kbit,
        Bitrate::Rate500kbit,
        Bitrate::Rate800kbit,
        Bitrate::Rate1000kbit,
    ];

    pub const fn bits_per_second(self) -> u32 {
        match self {
            Bitrate::Rate10kbit => 10_000,
            Bitrate::Rate20kbit => 20_000,
            Bitrate::Rate50kbit => 50_000,
            Bitrate::Rate100kbit => 100_000,
            Bitrate::Rate125kbit => 125_000,
            Bitrate::Rate250kbit => 250_000,
            Bitrate::Rate500kbit => 500_000,
            Bitrate::Rate800kbit => 800_000,
            Bitrate::Rate1000kbit => 1_000_000,
        }
    }
}

impl TryFrom<u32> for Bitrate {
    type Error = Error;

    /// Bitrate for a bus speed in bit/s.
    fn try_from(bits_per_second: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|rate| rate.bits_per_second() == bits_per_second)
            .ok_or(Error::UnsupportedBitrate(bits_per_second))
    }
}

/// Setup port command.
#[derive(Debug)]
pub struct Setup {
    pub bitrate: Bitrate,
}

impl Setup {
    pub fn new(bitrate: Bitrate) -> Self {
        Self { bitrate }
    }
}

impl Display for Setup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "S{:}\r", self.bitrate as u8)
    }
}

/// Open port command.
#[derive(Debug, Default)]
pub struct Open {}

impl Open {
    pub fn new() -> Self {
        Self {}
    }
}

impl Display for Open {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "O\r")
    }
}

/// Close port command.
#[derive(Debug, Default)]
pub struct Close {}

impl Close {
    pub fn new() -> Self {
        Self {}
    }
}

impl Display for Close {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "C\r")
    }
}

/// Transmit frame command.
///
/// Works with any [`embedded_can::Frame`]. The identifier is written as 3 or
/// 8 uppercase hex digits and the dlc as one decimal digit; remote frames get
/// no data bytes.
pub struct Transmit<'a, F: embedded_can::Frame> {
    frame: &'a F,
}

impl<'a, F: embedded_can::Frame> Transmit<'a, F> {
    pub fn new(frame: &'a F) -> Self {
        Self { frame }
    }
}

impl<F: embedded_can::Frame> Display for Transmit<'_, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let cmd = FrameType::new(self.frame.is_extended(), self.frame.is_remote_frame());

        match self.frame.id() {
            Id::Standard(id) => write!(f, "{}{:03X}", cmd.command() as char, id.as_raw())?,
            Id::Extended(id) => write!(f, "{}{:08X}", cmd.command() as char, id.as_raw())?,
        }

        write!(f, "{}", self.frame.dlc())?;

        if self.frame.is_data_frame() {
            for byte in self.frame.data() {
                write!(f, "{:02X}", *byte)?;
            }
        }

        write!(f, "\r")?;

        Ok(())
    }
}

impl<F: embedded_can::Frame> Debug for Transmit<'_, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Transmit({:?})", self.to_string())
    }
}

/// Render a frame as a complete slcan command, trailing `\r` included.
pub fn encode(frame: &impl embedded_can::Frame) -> String {
    Transmit::new(frame).to_string()
}
