use crate::{Bitrate, Close, Error, Open, Setup, Transmit};
use core::fmt::Display;
use std::io::Write;

/// An slcan adapter session over a serial handle.
///
/// The session only writes. Bytes read from the same port go to a
/// [`StreamDecoder`](crate::StreamDecoder).
#[derive(Debug)]
pub struct Session<W: Write> {
    port: W,
    open: bool,
}

impl<W: Write> Session<W> {
    pub fn new(port: W) -> Self {
        Self { port, open: false }
    }

    /// Set the bus bitrate and open the CAN channel.
    pub fn open(&mut self, bitrate: Bitrate) -> Result<(), Error> {
        log::debug!("opening slcan channel at {} bit/s", bitrate.bits_per_second());
        self.send_command(Setup::new(bitrate))?;
        self.send_command(Open::new())?;
        self.open = true;
        Ok(())
    }

    /// Close the CAN channel.
    pub fn close(&mut self) -> Result<(), Error> {
        if !self.open {
            return Err(Error::NotConnected);
        }

        log::debug!("closing slcan channel");
        self.open = false;
        self.send_command(Close::new())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Encode a frame and write it to the adapter.
    pub fn transmit(&mut self, frame: &impl embedded_can::Frame) -> Result<(), Error> {
        if !self.open {
            return Err(Error::NotConnected);
        }

        let transmit = Transmit::new(frame);
        log::trace!("transmitting {:?}", transmit);
        self.send_command(transmit)
    }

    pub fn get_ref(&self) -> &W {
        &self.port
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.port
    }

    pub fn into_inner(self) -> W {
        self.port
    }

    /// Write one command in a single `write_all`. Some adapters fail to parse
    /// a command split across USB packets.
    fn send_command(&mut self, command: impl Display) -> Result<(), Error> {
        self.port.write_all(command.to_string().as_bytes())?;
        self.port.flush()?;
        Ok(())
    }
}
