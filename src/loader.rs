//! Loads plain-text documents from a JSON fixture and indexes them into a row
//! store, producing the metadata and posting rows the term vector reader
//! expects

use std::fmt;
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::collections::BTreeMap;

use serde_json;
use unicode_segmentation::{UnicodeSegmentation, UnicodeWordIndices};

use termvec_core::{Term, DocId, TermInfo, TermVectorOffset, CodecError};
use termvec_rowstore::{KeyBuilder, ColumnFamily, MemoryRowStore, StoreError, KeyFormatError};
use termvec_rowstore::document_index::TERMS_COLUMN;
use termvec_rowstore::term_list::encode_term_list;


#[derive(Debug)]
pub enum LoadError {
    Io(PathBuf, io::Error),
    Json(serde_json::Error),
    Store(StoreError),
    Codec(CodecError),
    Key(KeyFormatError),
}


impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LoadError::Io(ref path, ref e) => write!(f, "cannot read {}: {}", path.display(), e),
            LoadError::Json(ref e) => write!(f, "invalid documents: {}", e),
            LoadError::Store(ref e) => write!(f, "cannot write document: {}", e),
            LoadError::Codec(ref e) => write!(f, "cannot encode posting: {}", e),
            LoadError::Key(ref e) => write!(f, "cannot build row key: {}", e),
        }
    }
}


impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            LoadError::Io(_, ref e) => Some(e),
            LoadError::Json(ref e) => Some(e),
            LoadError::Store(ref e) => Some(e),
            LoadError::Codec(ref e) => Some(e),
            LoadError::Key(ref e) => Some(e),
        }
    }
}


impl From<StoreError> for LoadError {
    fn from(e: StoreError) -> LoadError {
        LoadError::Store(e)
    }
}


impl From<CodecError> for LoadError {
    fn from(e: CodecError) -> LoadError {
        LoadError::Codec(e)
    }
}


impl From<KeyFormatError> for LoadError {
    fn from(e: KeyFormatError) -> LoadError {
        LoadError::Key(e)
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDocument {
    pub id: u32,

    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}


pub fn parse_documents(json: &str) -> Result<Vec<FixtureDocument>, LoadError> {
    serde_json::from_str(json).map_err(LoadError::Json)
}


pub fn load_documents(path: &Path) -> Result<Vec<FixtureDocument>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    serde_json::from_reader(io::BufReader::new(file)).map_err(LoadError::Json)
}


#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub term: String,
    pub position: u32,

    /// Character span of the word in the original text
    pub offset: TermVectorOffset,
}


/// Splits text on unicode word boundaries and lowercases each word
///
/// Positions count from 0. Offsets count characters rather than bytes.
pub struct StandardTokenizer<'a> {
    input: &'a str,
    word_indices: UnicodeWordIndices<'a>,
    position_counter: u32,
    byte_cursor: usize,
    char_cursor: u32,
}


impl<'a> StandardTokenizer<'a> {
    pub fn new(input: &'a str) -> StandardTokenizer<'a> {
        StandardTokenizer {
            input: input,
            word_indices: input.unicode_word_indices(),
            position_counter: 0,
            byte_cursor: 0,
            char_cursor: 0,
        }
    }
}


impl<'a> Iterator for StandardTokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let (byte_start, word) = match self.word_indices.next() {
            Some(word) => word,
            None => return None,
        };

        let start = self.char_cursor + self.input[self.byte_cursor..byte_start].chars().count() as u32;
        let end = start + word.chars().count() as u32;
        self.byte_cursor = byte_start + word.len();
        self.char_cursor = end;

        let position = self.position_counter;
        self.position_counter += 1;

        Some(Token {
            term: word.to_lowercase(),
            position: position,
            offset: TermVectorOffset::new(start, end),
        })
    }
}


/// Groups the tokens of one field into a posting per distinct term
pub fn field_postings(text: &str, store_offsets: bool) -> BTreeMap<String, TermInfo> {
    let mut occurrences: BTreeMap<String, (Vec<u32>, Vec<TermVectorOffset>)> = BTreeMap::new();

    for token in StandardTokenizer::new(text) {
        let entry = occurrences.entry(token.term).or_insert_with(|| (Vec::new(), Vec::new()));
        entry.0.push(token.position);
        entry.1.push(token.offset);
    }

    occurrences.into_iter()
        .map(|(term, (positions, offsets))| {
            let offsets = if store_offsets { Some(offsets) } else { None };
            (term, TermInfo::new(positions, offsets))
        })
        .collect()
}


/// Writes the rows for one document
///
/// Each (field, term) gets a column for this document in its posting row, and
/// the metadata row lists every (field, term) of the document. Returns the
/// number of terms.
pub fn index_document(store: &MemoryRowStore, index_name: &str, doc: &FixtureDocument, store_offsets: bool) -> Result<usize, LoadError> {
    let doc_id = DocId(doc.id);
    let column_name = doc_id.to_hex();
    let mut terms = Vec::new();

    for (field, text) in doc.fields.iter() {
        for (term_text, info) in field_postings(text, store_offsets) {
            let kb = KeyBuilder::posting(index_name, field, &term_text)?;
            store.put(ColumnFamily::TermVectors, kb.key(), column_name.as_bytes(), &info.encode()?)?;
            terms.push(Term::new(field.as_str(), term_text));
        }
    }

    let kb = KeyBuilder::doc_meta(index_name, doc_id)?;
    store.put(ColumnFamily::Documents, kb.key(), TERMS_COLUMN, &encode_term_list(&terms))?;

    Ok(terms.len())
}


#[cfg(test)]
mod tests {
    use termvec_core::{Term, DocId, TermInfo, TermVectorOffset};
    use termvec_rowstore::{KeyBuilder, ColumnFamily, ColumnSelector, MemoryRowStore, RowStore, TermVectorAssembler};
    use termvec_rowstore::document_index::DocumentTermResolver;

    use super::{StandardTokenizer, Token, FixtureDocument, LoadError, parse_documents, field_postings, index_document};

    const TEXT: &'static str = "Up from the bowels of hell he sails, weilding a tankard of freshly brewed ale!";

    fn make_document(id: u32, fields: Vec<(&str, &str)>) -> FixtureDocument {
        FixtureDocument {
            id: id,
            fields: fields.into_iter().map(|(field, text)| (field.to_string(), text.to_string())).collect(),
        }
    }

    #[test]
    fn test_standard_tokenizer() {
        let tokens = StandardTokenizer::new(TEXT).take(4).collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token { term: "up".to_string(), position: 0, offset: TermVectorOffset::new(0, 2) },
            Token { term: "from".to_string(), position: 1, offset: TermVectorOffset::new(3, 7) },
            Token { term: "the".to_string(), position: 2, offset: TermVectorOffset::new(8, 11) },
            Token { term: "bowels".to_string(), position: 3, offset: TermVectorOffset::new(12, 18) },
        ]);
    }

    #[test]
    fn test_standard_tokenizer_counts_characters() {
        let tokens = StandardTokenizer::new("Café ünd Bär").collect::<Vec<Token>>();

        assert_eq!(tokens, vec![
            Token { term: "café".to_string(), position: 0, offset: TermVectorOffset::new(0, 4) },
            Token { term: "ünd".to_string(), position: 1, offset: TermVectorOffset::new(5, 8) },
            Token { term: "bär".to_string(), position: 2, offset: TermVectorOffset::new(9, 12) },
        ]);
    }

    #[test]
    fn test_standard_tokenizer_empty() {
        assert!(StandardTokenizer::new("").next().is_none());
        assert!(StandardTokenizer::new(" ,. !").next().is_none());
    }

    #[test]
    fn test_field_postings() {
        let postings = field_postings("The cat saw the dog", true);

        assert_eq!(postings.keys().collect::<Vec<_>>(), vec!["cat", "dog", "saw", "the"]);
        assert_eq!(postings["the"], TermInfo::new(vec![0, 3], Some(vec![
            TermVectorOffset::new(0, 3),
            TermVectorOffset::new(12, 15),
        ])));
        assert_eq!(postings["dog"].frequency, 1);
    }

    #[test]
    fn test_field_postings_without_offsets() {
        let postings = field_postings("the cat saw the dog", false);

        assert_eq!(postings["the"], TermInfo::new(vec![0, 3], None));
    }

    #[test]
    fn test_parse_documents() {
        let docs = parse_documents(r#"[{"id": 26, "fields": {"body": "hello"}}, {"id": 27}]"#).unwrap();

        assert_eq!(docs, vec![
            make_document(26, vec![("body", "hello")]),
            make_document(27, vec![]),
        ]);
    }

    #[test]
    fn test_parse_documents_bad_id() {
        assert!(parse_documents(r#"[{"id": -1, "fields": {}}]"#).is_err());
        assert!(parse_documents(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn test_index_document() {
        let store = MemoryRowStore::new();
        let doc = make_document(26, vec![("title", "Cat"), ("body", "cat dog cat")]);

        assert_eq!(index_document(&store, "books", &doc, true).unwrap(), 3);

        let terms = DocumentTermResolver::new(&store).resolve("books", DocId(26)).unwrap();
        assert_eq!(terms, vec![
            Term::new("body", "cat"),
            Term::new("body", "dog"),
            Term::new("title", "cat"),
        ]);

        let selector = ColumnSelector::single(ColumnFamily::TermVectors, b"1a");
        let row = store.read_one(KeyBuilder::posting("books", "body", "cat").unwrap().key(), &selector).unwrap().unwrap();
        assert_eq!(TermInfo::decode(&row.columns[0].value).unwrap().positions, vec![0, 2]);
    }

    #[test]
    fn test_indexed_documents_assemble() {
        let store = MemoryRowStore::new();
        index_document(&store, "books", &make_document(1, vec![("body", "to be or not to be")]), true).unwrap();
        index_document(&store, "books", &make_document(2, vec![("body", "be quick")]), true).unwrap();

        let vector = TermVectorAssembler::new(&store).assemble("books", "body", DocId(1)).unwrap();

        assert_eq!(vector.terms(), &["be".to_string(), "not".to_string(), "or".to_string(), "to".to_string()]);
        assert_eq!(vector.frequencies(), &[2, 1, 1, 2]);

        let be = vector.index_of("be").unwrap();
        assert_eq!(vector.positions(be), &[1, 5]);
        assert_eq!(vector.offsets(be), Some(&[TermVectorOffset::new(3, 5), TermVectorOffset::new(16, 18)][..]));
    }

    #[test]
    fn test_index_document_rejects_delimiter_in_index_name() {
        let store = MemoryRowStore::new();
        let doc = make_document(1, vec![("body", "cat")]);

        match index_document(&store, "a\u{ffff}b", &doc, true) {
            Err(LoadError::Key(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
