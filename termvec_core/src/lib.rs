extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate byteorder;
#[cfg(test)]
#[macro_use]
extern crate serde_json;

pub mod vint;
pub mod term;
pub mod document;
pub mod term_info;
pub mod term_vector;

pub use term::Term;
pub use document::DocId;
pub use term_info::{TermInfo, CodecError};
pub use term_vector::{TermFreqVector, TermVectorEntry, TermVectorOffset, TermVectorSlot};
