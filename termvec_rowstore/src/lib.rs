#[macro_use]
extern crate log;
extern crate termvec_core;

pub mod errors;
pub mod key_builder;
pub mod store;
pub mod term_list;
pub mod document_index;
pub mod postings;
pub mod term_vectors;

pub use errors::{TermVectorError, StoreError, MetadataDecodeError, KeyFormatError, CharacterEncodingError};
pub use key_builder::{KeyBuilder, PostingKey};
pub use store::{RowStore, Row, Column, ColumnFamily, ColumnSelector};
pub use store::memory::MemoryRowStore;
pub use document_index::DocumentTermResolver;
pub use postings::{PostingFetcher, FetchedPostings};
pub use term_vectors::TermVectorAssembler;
