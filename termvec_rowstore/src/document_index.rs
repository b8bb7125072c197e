use termvec_core::{Term, DocId};

use key_builder::KeyBuilder;
use store::{RowStore, ColumnFamily, ColumnSelector};
use term_list::decode_term_list;
use errors::TermVectorError;


/// Column of the metadata row that holds the document's term list
pub const TERMS_COLUMN: &'static [u8] = b"_terms";


/// Looks up the terms recorded for a document
///
/// Every document has a metadata row listing all of the (field, term) pairs
/// it was indexed with, across all of its fields.
pub struct DocumentTermResolver<'a, S: RowStore + ?Sized + 'a> {
    store: &'a S,
}


impl<'a, S: RowStore + ?Sized + 'a> DocumentTermResolver<'a, S> {
    pub fn new(store: &'a S) -> DocumentTermResolver<'a, S> {
        DocumentTermResolver {
            store: store,
        }
    }

    /// Reads the term list of a document
    ///
    /// A document without a metadata row has no terms, which is not an error.
    pub fn resolve(&self, index_name: &str, doc_id: DocId) -> Result<Vec<Term>, TermVectorError> {
        let kb = KeyBuilder::doc_meta(index_name, doc_id)?;
        let selector = ColumnSelector::single(ColumnFamily::Documents, TERMS_COLUMN);

        let row = match self.store.read_one(kb.key(), &selector)? {
            Some(row) => row,
            None => {
                debug!("document {} is missing from {}", doc_id, index_name);
                return Ok(Vec::new());
            }
        };

        let column = match row.column(TERMS_COLUMN) {
            Some(column) => column,
            None => {
                debug!("document {} in {} has no term list", doc_id, index_name);
                return Ok(Vec::new());
            }
        };

        let terms = decode_term_list(&column.value).map_err(|e| e.for_key(kb.key()))?;
        trace!("document {} in {} lists {} terms", doc_id, index_name, terms.len());

        Ok(terms)
    }
}
