use std::collections::BTreeSet;

use termvec_core::{Term, DocId, TermInfo, CodecError};

use key_builder::KeyBuilder;
use store::{RowStore, Row, ColumnFamily, ColumnSelector};
use errors::TermVectorError;


/// The result of the batched posting read for one document and field
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPostings {
    /// Text of every term that was requested
    pub terms: BTreeSet<String>,

    /// Rows in the order the store returned them
    pub rows: Vec<Row>,
}


impl FetchedPostings {
    pub fn empty() -> FetchedPostings {
        FetchedPostings {
            terms: BTreeSet::new(),
            rows: Vec::new(),
        }
    }

    pub fn was_requested(&self, term_text: &str) -> bool {
        self.terms.contains(term_text)
    }
}


/// Reads the postings of a document's terms
///
/// Each posting row holds a column per document containing the term. Reads are
/// narrowed to the one document's column, so the cost doesn't depend on how
/// common the term is.
pub struct PostingFetcher<'a, S: RowStore + ?Sized + 'a> {
    store: &'a S,
}


impl<'a, S: RowStore + ?Sized + 'a> PostingFetcher<'a, S> {
    pub fn new(store: &'a S) -> PostingFetcher<'a, S> {
        PostingFetcher {
            store: store,
        }
    }

    /// Fetches the postings of `terms` that belong to `field`, in one batch
    pub fn fetch(&self, index_name: &str, field: &str, doc_id: DocId, terms: &[Term]) -> Result<FetchedPostings, TermVectorError> {
        let requested = terms.iter()
            .filter(|term| term.field() == field)
            .map(|term| term.text().to_string())
            .collect::<BTreeSet<String>>();

        if requested.is_empty() {
            debug!("document {} in {} has no terms in {}", doc_id, index_name, field);
            return Ok(FetchedPostings::empty());
        }

        // A delimiter inside any segment would make the returned row keys
        // unparseable, so the whole batch is refused before reading
        let keys = requested.iter()
            .map(|term_text| KeyBuilder::posting(index_name, field, term_text).map(|kb| kb.into_key()))
            .collect::<Result<Vec<Vec<u8>>, _>>()?;
        let selector = ColumnSelector::single(ColumnFamily::TermVectors, doc_id.to_hex().as_bytes());

        let rows = self.store.read_many(&keys, &selector)?;
        debug!("fetched {} of {} posting rows for document {} in {}/{}", rows.len(), keys.len(), doc_id, index_name, field);

        Ok(FetchedPostings {
            terms: requested,
            rows: rows,
        })
    }
}


/// Decodes the posting of one document from a posting row
///
/// A row with no columns has no data for the document and decodes to an empty
/// record. More than one column, or a column for another document, is an
/// error rather than a guess.
pub fn decode_posting_row(row: &Row, doc_id: DocId) -> Result<TermInfo, TermVectorError> {
    match row.columns.len() {
        0 => Ok(TermInfo::empty()),
        1 => {
            let column = &row.columns[0];
            if column.name != doc_id.to_hex().as_bytes() {
                let message = format!("column {} is not document {}", String::from_utf8_lossy(&column.name), doc_id);
                return Err(TermVectorError::codec(&row.key, CodecError::InvalidRecord(message)));
            }

            TermInfo::decode(&column.value).map_err(|e| TermVectorError::codec(&row.key, e))
        }
        count => {
            let message = format!("expected one column, found {}", count);
            Err(TermVectorError::codec(&row.key, CodecError::InvalidRecord(message)))
        }
    }
}
