use std::collections::HashSet;

use termvec_core::{DocId, TermInfo, TermFreqVector, TermVectorEntry};

use key_builder::{PostingKey, describe_key};
use store::RowStore;
use document_index::DocumentTermResolver;
use postings::{PostingFetcher, decode_posting_row};
use errors::TermVectorError;


/// Rebuilds term vectors from the row store
///
/// This takes two rounds of reads. The document's metadata row is read first
/// to find its terms, then the postings of those terms are read in one batch.
/// Nothing is cached between calls.
pub struct TermVectorAssembler<'a, S: RowStore + ?Sized + 'a> {
    store: &'a S,
}


impl<'a, S: RowStore + ?Sized + 'a> TermVectorAssembler<'a, S> {
    pub fn new(store: &'a S) -> TermVectorAssembler<'a, S> {
        TermVectorAssembler {
            store: store,
        }
    }

    pub fn assemble(&self, index_name: &str, field: &str, doc_id: DocId) -> Result<TermFreqVector, TermVectorError> {
        let terms = DocumentTermResolver::new(self.store).resolve(index_name, doc_id)?;
        if terms.is_empty() {
            return Ok(TermFreqVector::empty(field));
        }

        let fetched = PostingFetcher::new(self.store).fetch(index_name, field, doc_id, &terms)?;

        let mut entries = Vec::with_capacity(fetched.terms.len());
        let mut found = HashSet::with_capacity(fetched.terms.len());

        // Rows may come back in any order, so each one is matched to its term
        // through its key
        for row in fetched.rows.iter() {
            let posting_key = PostingKey::parse(&row.key)?;

            if posting_key.index_name != index_name || posting_key.field != field || !fetched.was_requested(&posting_key.term) {
                warn!("ignoring unrequested posting row {}", describe_key(&row.key));
                continue;
            }

            if found.contains(&posting_key.term) {
                warn!("ignoring duplicate posting row {}", describe_key(&row.key));
                continue;
            }

            let info = decode_posting_row(row, doc_id)?;
            found.insert(posting_key.term.clone());
            entries.push(TermVectorEntry::new(posting_key.term, info));
        }

        // Listed in the metadata but without a posting row, for example when a
        // delete raced with this read
        for term_text in fetched.terms.iter() {
            if !found.contains(term_text) {
                debug!("no posting for {}:{} in document {} of {}", field, term_text, doc_id, index_name);
                entries.push(TermVectorEntry::new(term_text.clone(), TermInfo::empty()));
            }
        }

        Ok(TermFreqVector::from_entries(field, entries))
    }
}
