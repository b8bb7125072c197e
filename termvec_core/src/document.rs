use std::fmt;
use std::num::ParseIntError;


/// Internal numeric handle of a document
///
/// Rows in the store address a document by the lowercase, unpadded hex form
/// of this number.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct DocId(pub u32);


impl DocId {
    pub fn to_hex(&self) -> String {
        format!("{:x}", self.0)
    }

    pub fn from_hex(hex: &str) -> Result<DocId, ParseIntError> {
        u32::from_str_radix(hex, 16).map(DocId)
    }
}


impl From<u32> for DocId {
    fn from(ord: u32) -> DocId {
        DocId(ord)
    }
}


impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}
