//! Per (term, document) posting record
//!
//! Wire layout:
//!
//! ```text
//! frequency          vint
//! position deltas    vint * frequency
//! offsets flag       u8 (0 = none, 1 = present)
//! offsets            (vint start delta, vint length) * frequency, if flagged
//! ```
//!
//! Position deltas are relative to the previous position (the first to zero).
//! Offset starts are relative to the previous start and the length is
//! `end - start`.

use std::io::{self, Cursor};
use std::error;
use std::fmt;

use byteorder::ReadBytesExt;

use vint::{encode_vint, read_vint};
use term_vector::TermVectorOffset;


const NO_OFFSETS: u8 = 0;
const HAS_OFFSETS: u8 = 1;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input ended before the record was complete
    Truncated(&'static str),

    /// A value does not fit in a `u32`
    Overflow(&'static str),

    /// The offsets flag was neither 0 nor 1
    InvalidFlag(u8),

    /// Bytes were left over after a complete record
    TrailingBytes(usize),

    /// The record can't be encoded
    InvalidRecord(String),
}


impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CodecError::Truncated(what) => write!(f, "truncated term info while reading {}", what),
            CodecError::Overflow(what) => write!(f, "{} overflows u32", what),
            CodecError::InvalidFlag(flag) => write!(f, "invalid offsets flag {}", flag),
            CodecError::TrailingBytes(count) => write!(f, "{} trailing bytes after term info", count),
            CodecError::InvalidRecord(ref message) => write!(f, "invalid term info: {}", message),
        }
    }
}


impl error::Error for CodecError {}


fn read_value(cursor: &mut Cursor<&[u8]>, what: &'static str) -> Result<u32, CodecError> {
    read_vint(cursor).map_err(|e| {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => CodecError::Truncated(what),
            _ => CodecError::Overflow(what),
        }
    })
}


fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    cursor.get_ref().len() - cursor.position() as usize
}


/// Frequency, positions and (optionally) character offsets of one term in one
/// document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TermInfo {
    pub frequency: u32,
    pub positions: Vec<u32>,
    pub offsets: Option<Vec<TermVectorOffset>>,
}


impl TermInfo {
    pub fn new(positions: Vec<u32>, offsets: Option<Vec<TermVectorOffset>>) -> TermInfo {
        TermInfo {
            frequency: positions.len() as u32,
            positions: positions,
            offsets: offsets,
        }
    }

    /// The record used for a term that has no stored posting
    pub fn empty() -> TermInfo {
        TermInfo::default()
    }

    pub fn has_offsets(&self) -> bool {
        self.offsets.is_some()
    }

    pub fn decode(bytes: &[u8]) -> Result<TermInfo, CodecError> {
        let mut cursor = Cursor::new(bytes);

        let frequency = read_value(&mut cursor, "frequency")?;

        // Each position takes at least one byte
        if frequency as usize > remaining(&cursor) {
            return Err(CodecError::Truncated("positions"));
        }

        let mut positions = Vec::with_capacity(frequency as usize);
        let mut position: u32 = 0;
        for _ in 0..frequency {
            let delta = read_value(&mut cursor, "positions")?;
            position = position.checked_add(delta).ok_or(CodecError::Overflow("position"))?;
            positions.push(position);
        }

        let flag = cursor.read_u8().map_err(|_| CodecError::Truncated("offsets flag"))?;
        let offsets = match flag {
            NO_OFFSETS => None,
            HAS_OFFSETS => {
                if frequency as usize > remaining(&cursor) / 2 {
                    return Err(CodecError::Truncated("offsets"));
                }

                let mut offsets = Vec::with_capacity(frequency as usize);
                let mut start: u32 = 0;
                for _ in 0..frequency {
                    let delta = read_value(&mut cursor, "offsets")?;
                    let length = read_value(&mut cursor, "offsets")?;
                    start = start.checked_add(delta).ok_or(CodecError::Overflow("offset start"))?;
                    let end = start.checked_add(length).ok_or(CodecError::Overflow("offset end"))?;
                    offsets.push(TermVectorOffset::new(start, end));
                }

                Some(offsets)
            }
            flag => return Err(CodecError::InvalidFlag(flag)),
        };

        let trailing = remaining(&cursor);
        if trailing > 0 {
            return Err(CodecError::TrailingBytes(trailing));
        }

        Ok(TermInfo {
            frequency: frequency,
            positions: positions,
            offsets: offsets,
        })
    }

    /// Encodes the record
    ///
    /// Positions and offset starts must be non-decreasing and there must be
    /// exactly `frequency` of each.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        if self.positions.len() != self.frequency as usize {
            return Err(CodecError::InvalidRecord(format!("{} positions for frequency {}", self.positions.len(), self.frequency)));
        }

        let mut buf = Vec::with_capacity(2 + self.positions.len() * 3);
        encode_vint(self.frequency, &mut buf);

        let mut previous: u32 = 0;
        for position in self.positions.iter() {
            if *position < previous {
                return Err(CodecError::InvalidRecord(format!("position {} follows {}", position, previous)));
            }

            encode_vint(position - previous, &mut buf);
            previous = *position;
        }

        match self.offsets {
            Some(ref offsets) => {
                if offsets.len() != self.frequency as usize {
                    return Err(CodecError::InvalidRecord(format!("{} offsets for frequency {}", offsets.len(), self.frequency)));
                }

                buf.push(HAS_OFFSETS);

                let mut previous_start: u32 = 0;
                for offset in offsets.iter() {
                    if offset.start < previous_start || offset.end < offset.start {
                        return Err(CodecError::InvalidRecord(format!("offset {}-{} out of order", offset.start, offset.end)));
                    }

                    encode_vint(offset.start - previous_start, &mut buf);
                    encode_vint(offset.end - offset.start, &mut buf);
                    previous_start = offset.start;
                }
            }
            None => buf.push(NO_OFFSETS),
        }

        Ok(buf)
    }
}
