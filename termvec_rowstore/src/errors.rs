use std::error;
use std::fmt;
use std::str::Utf8Error;

use termvec_core::CodecError;

use key_builder::describe_key;


/// A read from the row store failed
#[derive(Debug)]
pub struct StoreError {
    key: Vec<u8>,
    message: String,
}


impl StoreError {
    pub fn new(key: Vec<u8>, message: String) -> StoreError {
        StoreError {
            key: key,
            message: message,
        }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}


impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "failed to read {}: {}", describe_key(&self.key), self.message)
    }
}


impl error::Error for StoreError {}


/// A document's term list could not be decoded
#[derive(Debug)]
pub struct MetadataDecodeError {
    key: Vec<u8>,
    message: String,
}


impl MetadataDecodeError {
    pub fn new(message: String) -> MetadataDecodeError {
        MetadataDecodeError {
            key: Vec::new(),
            message: message,
        }
    }

    /// Attaches the key of the row the term list was read from
    pub fn for_key(self, key: &[u8]) -> MetadataDecodeError {
        MetadataDecodeError {
            key: key.to_vec(),
            message: self.message,
        }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}


impl fmt::Display for MetadataDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "bad term list in {}: {}", describe_key(&self.key), self.message)
    }
}


impl error::Error for MetadataDecodeError {}


/// A row key is missing its delimiters
#[derive(Debug)]
pub struct KeyFormatError {
    key: Vec<u8>,
    message: String,
}


impl KeyFormatError {
    pub fn new(key: Vec<u8>, message: String) -> KeyFormatError {
        KeyFormatError {
            key: key,
            message: message,
        }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }
}


impl fmt::Display for KeyFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "malformed key {}: {}", describe_key(&self.key), self.message)
    }
}


impl error::Error for KeyFormatError {}


/// A row key is not valid UTF-8
#[derive(Debug)]
pub struct CharacterEncodingError {
    key: Vec<u8>,
    error: Utf8Error,
}


impl CharacterEncodingError {
    pub fn new(key: Vec<u8>, error: Utf8Error) -> CharacterEncodingError {
        CharacterEncodingError {
            key: key,
            error: error,
        }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }
}


impl fmt::Display for CharacterEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "key {} is not text: {}", describe_key(&self.key), self.error)
    }
}


impl error::Error for CharacterEncodingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.error)
    }
}


/// Anything that stops a term vector from being rebuilt
///
/// A missing document or a missing posting row is not an error; those come
/// back as empty data.
#[derive(Debug)]
pub enum TermVectorError {
    Store(StoreError),
    MetadataDecode(MetadataDecodeError),
    KeyFormat(KeyFormatError),
    CharacterEncoding(CharacterEncodingError),
    Codec {
        key: Vec<u8>,
        error: CodecError,
    },
}


impl TermVectorError {
    pub fn codec(key: &[u8], error: CodecError) -> TermVectorError {
        TermVectorError::Codec {
            key: key.to_vec(),
            error: error,
        }
    }
}


impl fmt::Display for TermVectorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TermVectorError::Store(ref e) => fmt::Display::fmt(e, f),
            TermVectorError::MetadataDecode(ref e) => fmt::Display::fmt(e, f),
            TermVectorError::KeyFormat(ref e) => fmt::Display::fmt(e, f),
            TermVectorError::CharacterEncoding(ref e) => fmt::Display::fmt(e, f),
            TermVectorError::Codec { ref key, ref error } => {
                write!(f, "bad posting in {}: {}", describe_key(key), error)
            }
        }
    }
}


impl error::Error for TermVectorError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            TermVectorError::Store(ref e) => Some(e),
            TermVectorError::MetadataDecode(ref e) => Some(e),
            TermVectorError::KeyFormat(ref e) => Some(e),
            TermVectorError::CharacterEncoding(ref e) => Some(e),
            TermVectorError::Codec { ref error, .. } => Some(error),
        }
    }
}


impl From<StoreError> for TermVectorError {
    fn from(e: StoreError) -> TermVectorError {
        TermVectorError::Store(e)
    }
}


impl From<MetadataDecodeError> for TermVectorError {
    fn from(e: MetadataDecodeError) -> TermVectorError {
        TermVectorError::MetadataDecode(e)
    }
}


impl From<KeyFormatError> for TermVectorError {
    fn from(e: KeyFormatError) -> TermVectorError {
        TermVectorError::KeyFormat(e)
    }
}


impl From<CharacterEncodingError> for TermVectorError {
    fn from(e: CharacterEncodingError) -> TermVectorError {
        TermVectorError::CharacterEncoding(e)
    }
}
