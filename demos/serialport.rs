use embedded_can::{ExtendedId, Frame as _};
use slcan_stream::{Bitrate, Frame, Session, StreamDecoder};
use std::env;
use std::io::Read;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).ok_or("usage: serialport <port> <baud>")?;
    let baud = args.get(2).ok_or("usage: serialport <port> <baud>")?.parse()?;

    // Connect to the serial port.
    let serial = serialport::new(path, baud)
        .timeout(Duration::from_millis(100))
        .open()?;
    let mut reader = serial.try_clone()?;

    // Configure the CAN device bitrate and open the connection.
    let mut session = Session::new(serial);
    session.open(Bitrate::Rate500kbit)?;

    // Send a single frame.
    let frame = Frame::new(ExtendedId::new(0x1234).ok_or("bad id")?, &[0, 1, 2, 3, 4, 5, 6, 7])
        .ok_or("bad frame")?;
    session.transmit(&frame)?;

    // Print whatever comes back from the bus.
    let mut decoder = StreamDecoder::new(
        |frame| println!("{:?}", frame),
        |err| eprintln!("slcan error: {}", err),
    );
    let mut buf = [0u8; 256];
    loop {
        match reader.read(&mut buf) {
            Ok(n) => decoder.feed(&buf[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
