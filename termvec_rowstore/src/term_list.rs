//! Encoding of the term list stored in a document's metadata row
//!
//! ```text
//! count              vint
//! per term:
//!     field length   vint
//!     field          utf-8
//!     text length    vint
//!     text           utf-8
//! ```

use std::io::{self, Cursor, Read};

use termvec_core::Term;
use termvec_core::vint::{encode_vint, read_vint};

use errors::MetadataDecodeError;


pub fn encode_term_list(terms: &[Term]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_vint(terms.len() as u32, &mut buf);

    for term in terms {
        encode_vint(term.field().len() as u32, &mut buf);
        buf.extend_from_slice(term.field().as_bytes());
        encode_vint(term.text().len() as u32, &mut buf);
        buf.extend_from_slice(term.text().as_bytes());
    }

    buf
}


fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    cursor.get_ref().len() - cursor.position() as usize
}


fn read_length(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<usize, MetadataDecodeError> {
    read_vint(cursor).map(|length| length as usize).map_err(|e| {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => MetadataDecodeError::new(format!("truncated while reading {}", what)),
            _ => MetadataDecodeError::new(format!("bad {}: {}", what, e)),
        }
    })
}


fn read_string(cursor: &mut Cursor<&[u8]>, what: &str) -> Result<String, MetadataDecodeError> {
    let length = read_length(cursor, what)?;
    if length > remaining(cursor) {
        return Err(MetadataDecodeError::new(format!("truncated while reading {}", what)));
    }

    let mut bytes = vec![0; length];
    cursor.read_exact(&mut bytes).map_err(|e| MetadataDecodeError::new(format!("bad {}: {}", what, e)))?;

    String::from_utf8(bytes).map_err(|e| MetadataDecodeError::new(format!("{} is not utf-8: {}", what, e)))
}


/// Decodes a whole term list
///
/// Any damage fails the whole list, nothing is returned partially.
pub fn decode_term_list(bytes: &[u8]) -> Result<Vec<Term>, MetadataDecodeError> {
    let mut cursor = Cursor::new(bytes);
    let count = read_length(&mut cursor, "term count")?;

    // Each term takes at least two bytes
    if count > remaining(&cursor) / 2 {
        return Err(MetadataDecodeError::new(format!("{} terms can't fit in {} bytes", count, bytes.len())));
    }

    let mut terms = Vec::with_capacity(count);
    for _ in 0..count {
        let field = read_string(&mut cursor, "field")?;
        let text = read_string(&mut cursor, "term text")?;
        terms.push(Term::new(field, text));
    }

    let trailing = remaining(&cursor);
    if trailing > 0 {
        return Err(MetadataDecodeError::new(format!("{} trailing bytes", trailing)));
    }

    Ok(terms)
}
