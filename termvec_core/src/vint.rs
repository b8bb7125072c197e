//! Variable length unsigned integers
//!
//! Seven bits per byte, least significant group first. The high bit of each
//! byte is set when another byte follows. A `u32` takes at most five bytes.

use std::io::{self, Read};

use byteorder::ReadBytesExt;


pub const MAX_VINT_BYTES: usize = 5;


pub fn encode_vint(mut value: u32, buf: &mut Vec<u8>) {
    while value >= 0x80 {
        buf.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }

    buf.push(value as u8);
}


/// Reads one vint from the reader
///
/// Fails with `UnexpectedEof` if the input ends in the middle of the integer
/// and with `InvalidData` if the encoding does not fit in a `u32`.
pub fn read_vint<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut value: u32 = 0;

    for i in 0..MAX_VINT_BYTES {
        let byte = reader.read_u8()?;
        let bits = (byte & 0x7F) as u32;

        // Only four bits remain for the fifth byte
        if i == MAX_VINT_BYTES - 1 && bits > 0x0F {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "vint overflows u32"));
        }

        value |= bits << (7 * i);

        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(io::Error::new(io::ErrorKind::InvalidData, "vint is longer than 5 bytes"))
}
