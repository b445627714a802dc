//! Parsing of a single slcan frame command.
//!
//! The grammar is `<type><id><dlc><data>`, with the terminating `\r` already
//! stripped. Each field is its own parser stage so a failure can be reported
//! with the kind of the field that broke.

use crate::{Frame, FrameType, ParseError};
use embedded_can::{ExtendedId, Id, StandardId};
use nom::{
    bytes::complete::take_while_m_n, combinator::map_opt, number::complete::u8 as any_byte,
    IResult,
};

fn frame_type(input: &[u8]) -> IResult<&[u8], FrameType> {
    map_opt(any_byte, FrameType::from_command)(input)
}

/// Exactly `width` hex digits, either case.
fn hex_field<'a>(width: usize) -> impl FnMut(&'a [u8]) -> IResult<&'a [u8], u32> {
    map_opt(
        take_while_m_n(width, width, |b: u8| b.is_ascii_hexdigit()),
        hex_value,
    )
}

fn hex_value(digits: &[u8]) -> Option<u32> {
    digits.iter().try_fold(0u32, |value, &digit| {
        let nibble = (digit as char).to_digit(16)?;
        value.checked_mul(16)?.checked_add(nibble)
    })
}

fn dlc(input: &[u8]) -> IResult<&[u8], u8> {
    map_opt(any_byte, |b: u8| match b {
        b'0'..=b'8' => Some(b - b'0'),
        _ => None,
    })(input)
}

fn identifier(frame_type: FrameType, raw: u32) -> Option<Id> {
    if frame_type.is_extended() {
        ExtendedId::new(raw).map(Id::Extended)
    } else {
        StandardId::new(u16::try_from(raw).ok()?).map(Id::Standard)
    }
}

/// Parse one terminator-stripped command into a frame.
///
/// The returned frame carries no timestamp. Remote frames consume no data
/// characters whatever their dlc. Anything after the last data byte is
/// ignored.
pub fn parse(command: impl AsRef<[u8]>) -> Result<Frame, ParseError> {
    let command = command.as_ref();

    let (rest, frame_type) = frame_type(command).map_err(|_| ParseError::InvalidFrameType)?;

    let (rest, raw_id) =
        hex_field(frame_type.id_width())(rest).map_err(|_| ParseError::InvalidIdentifier)?;
    let id = identifier(frame_type, raw_id).ok_or(ParseError::InvalidIdentifier)?;

    let (mut rest, dlc) = dlc(rest).map_err(|_| ParseError::InvalidDlc)?;

    let mut data = [0; 8];
    if !frame_type.is_remote() {
        for (index, byte) in data.iter_mut().take(dlc as usize).enumerate() {
            let (next, value) = hex_field(2)(rest).map_err(|_| ParseError::InvalidDataByte(index))?;
            *byte = value as u8;
            rest = next;
        }
    }

    if !rest.is_empty() {
        log::debug!("ignoring {} trailing bytes after slcan frame", rest.len());
    }

    Ok(Frame::from_parts(id, frame_type.is_remote(), dlc, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_can::Frame as _;

    #[test]
    fn parse_standard_data() {
        let frame = parse("t1232ABCD").unwrap();
        assert_eq!(frame.raw_id(), 0x123);
        assert_eq!(frame.dlc(), 2);
        assert_eq!(frame.data(), &[0xAB, 0xCD]);
        assert!(!frame.is_extended());
        assert!(!frame.is_remote_frame());
        #[cfg(feature = "std")]
        assert_eq!(frame.timestamp(), None);
    }

    #[test]
    fn parse_extended_data() {
        let frame = parse("T12ABCDEF2AA55").unwrap();
        assert_eq!(frame.raw_id(), 0x12ABCDEF);
        assert_eq!(frame.data(), &[0xAA, 0x55]);
        assert!(frame.is_extended());
    }

    #[test]
    fn parse_remote_consumes_no_data() {
        let frame = parse("r1235").unwrap();
        assert_eq!(frame.raw_id(), 0x123);
        assert_eq!(frame.dlc(), 5);
        assert!(frame.data().is_empty());
        assert!(frame.is_remote_frame());
        assert!(!frame.is_extended());

        let frame = parse("R1ABCDEF08").unwrap();
        assert_eq!(frame.raw_id(), 0x1ABCDEF0);
        assert_eq!(frame.dlc(), 8);
        assert!(frame.is_extended());
        assert!(frame.is_remote_frame());
    }

    #[test]
    fn parse_dlc_bounds() {
        assert_eq!(parse("t1230").unwrap().dlc(), 0);

        let frame = parse("t7FF80011223344556677").unwrap();
        assert_eq!(frame.dlc(), 8);
        assert_eq!(
            frame.data(),
            &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77]
        );

        assert_eq!(parse("t1239"), Err(ParseError::InvalidDlc));
        assert_eq!(parse("t123A"), Err(ParseError::InvalidDlc));
        assert_eq!(parse("t123"), Err(ParseError::InvalidDlc));
    }

    #[test]
    fn parse_hex_is_case_insensitive() {
        let frame = parse("t7ff2abCd").unwrap();
        assert_eq!(frame.raw_id(), 0x7FF);
        assert_eq!(frame.data(), &[0xAB, 0xCD]);
    }

    #[test]
    fn reject_frame_type() {
        assert_eq!(parse(""), Err(ParseError::InvalidFrameType));
        assert_eq!(parse("x1232ABCD"), Err(ParseError::InvalidFrameType));
        assert_eq!(parse("z"), Err(ParseError::InvalidFrameType));
    }

    #[test]
    fn reject_identifier() {
        assert_eq!(parse("tXYZ2ABCD"), Err(ParseError::InvalidIdentifier));
        assert_eq!(parse("t12"), Err(ParseError::InvalidIdentifier));
        assert_eq!(parse("t 122AB"), Err(ParseError::InvalidIdentifier));
        assert_eq!(parse("T1234567"), Err(ParseError::InvalidIdentifier));
        // Fits in three digits but not in 11 bits.
        assert_eq!(parse("t8000"), Err(ParseError::InvalidIdentifier));
        // Fits in eight digits but not in 29 bits.
        assert_eq!(parse("T200000000"), Err(ParseError::InvalidIdentifier));
    }

    #[test]
    fn reject_data_bytes() {
        assert_eq!(parse("t1232ABXD"), Err(ParseError::InvalidDataByte(1)));
        assert_eq!(parse("t1232 BCD"), Err(ParseError::InvalidDataByte(0)));
        assert_eq!(parse("t1233AABB"), Err(ParseError::InvalidDataByte(2)));
        assert_eq!(parse("t1232ABC"), Err(ParseError::InvalidDataByte(1)));
        assert_eq!(parse("t1231"), Err(ParseError::InvalidDataByte(0)));
    }

    #[test]
    fn ignore_trailing_bytes() {
        let frame = parse("t1231AA1F40").unwrap();
        assert_eq!(frame.data(), &[0xAA]);
    }
}
