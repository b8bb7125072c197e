use std::str;

use termvec_core::DocId;

use errors::{KeyFormatError, CharacterEncodingError, TermVectorError};


/// Separates the segments of a row key
///
/// U+FFFF is a noncharacter. Segments containing it are rejected, otherwise
/// the key could not be split back into the same segments.
pub const DELIMITER: &'static str = "\u{ffff}";


fn check_segment(what: &str, segment: &str) -> Result<(), KeyFormatError> {
    if segment.contains(DELIMITER) {
        return Err(KeyFormatError::new(segment.as_bytes().to_vec(), format!("{} contains the key delimiter", what)));
    }

    Ok(())
}


pub struct KeyBuilder {
    key: Vec<u8>,
}


impl KeyBuilder {
    pub fn with_capacity(size: usize) -> KeyBuilder {
        KeyBuilder {
            key: Vec::with_capacity(size),
        }
    }

    /// Key of the row holding a document's term list
    ///
    /// `<index> DELIMITER <doc id hex>`
    pub fn doc_meta(index_name: &str, doc_id: DocId) -> Result<KeyBuilder, KeyFormatError> {
        check_segment("index name", index_name)?;

        let doc_id = doc_id.to_hex();
        let mut kb = KeyBuilder::with_capacity(index_name.len() + DELIMITER.len() + doc_id.len());
        kb.push_string(index_name);
        kb.separator();
        kb.push_string(&doc_id);
        Ok(kb)
    }

    /// Key of the row holding the postings of one term
    ///
    /// `<index> DELIMITER <field> DELIMITER <term>`
    pub fn posting(index_name: &str, field: &str, term_text: &str) -> Result<KeyBuilder, KeyFormatError> {
        check_segment("index name", index_name)?;
        check_segment("field", field)?;
        check_segment("term text", term_text)?;

        let mut kb = KeyBuilder::with_capacity(index_name.len() + field.len() + term_text.len() + DELIMITER.len() * 2);
        kb.push_string(index_name);
        kb.separator();
        kb.push_string(field);
        kb.separator();
        kb.push_string(term_text);
        Ok(kb)
    }

    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key[..]
    }

    pub fn into_key(self) -> Vec<u8> {
        self.key
    }

    pub fn push_string(&mut self, s: &str) {
        self.key.extend_from_slice(s.as_bytes());
    }

    pub fn separator(&mut self) {
        self.key.extend_from_slice(DELIMITER.as_bytes());
    }
}


/// The segments of a posting row key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingKey {
    pub index_name: String,
    pub field: String,
    pub term: String,
}


impl PostingKey {
    /// Splits a posting key back into its segments
    ///
    /// Everything before the first delimiter is the index name and the last
    /// delimiter separates the field from the term.
    pub fn parse(key: &[u8]) -> Result<PostingKey, TermVectorError> {
        let key_str = match str::from_utf8(key) {
            Ok(key_str) => key_str,
            Err(e) => return Err(CharacterEncodingError::new(key.to_vec(), e).into()),
        };

        let first = match key_str.find(DELIMITER) {
            Some(first) => first,
            None => return Err(KeyFormatError::new(key.to_vec(), "no delimiter".to_string()).into()),
        };

        let last = key_str.rfind(DELIMITER).unwrap_or(first);
        if last == first {
            return Err(KeyFormatError::new(key.to_vec(), "no field/term boundary".to_string()).into());
        }

        Ok(PostingKey {
            index_name: key_str[..first].to_string(),
            field: key_str[first + DELIMITER.len()..last].to_string(),
            term: key_str[last + DELIMITER.len()..].to_string(),
        })
    }
}


/// Printable form of a key, with delimiters shown as "/"
pub fn describe_key(key: &[u8]) -> String {
    String::from_utf8_lossy(key).replace(DELIMITER, "/")
}


#[cfg(test)]
mod tests {
    use termvec_core::DocId;

    use errors::TermVectorError;
    use super::{KeyBuilder, PostingKey, DELIMITER, describe_key};

    #[test]
    fn test_doc_meta_key() {
        let kb = KeyBuilder::doc_meta("books", DocId(26)).unwrap();

        assert_eq!(kb.key(), b"books\xef\xbf\xbf1a");
    }

    #[test]
    fn test_posting_key() {
        let kb = KeyBuilder::posting("books", "body", "cat").unwrap();

        assert_eq!(kb.key(), b"books\xef\xbf\xbfbody\xef\xbf\xbfcat");
    }

    #[test]
    fn test_delimiter_bytes() {
        assert_eq!(DELIMITER.as_bytes(), &[0xEF, 0xBF, 0xBF]);
    }

    #[test]
    fn test_parse_posting_key() {
        let key = KeyBuilder::posting("books", "body", "cat").unwrap().into_key();

        assert_eq!(PostingKey::parse(&key).unwrap(), PostingKey {
            index_name: "books".to_string(),
            field: "body".to_string(),
            term: "cat".to_string(),
        });
    }

    #[test]
    fn test_parse_unicode_posting_key() {
        let key = KeyBuilder::posting("本", "タイトル", "こんにちは").unwrap().into_key();
        let posting_key = PostingKey::parse(&key).unwrap();

        assert_eq!(posting_key.index_name, "本");
        assert_eq!(posting_key.field, "タイトル");
        assert_eq!(posting_key.term, "こんにちは");
    }

    #[test]
    fn test_parse_empty_segments() {
        let key = KeyBuilder::posting("", "body", "").unwrap().into_key();
        let posting_key = PostingKey::parse(&key).unwrap();

        assert_eq!(posting_key.index_name, "");
        assert_eq!(posting_key.field, "body");
        assert_eq!(posting_key.term, "");
    }

    #[test]
    fn test_parse_without_delimiter() {
        match PostingKey::parse(b"bookscat") {
            Err(TermVectorError::KeyFormat(e)) => assert_eq!(e.key(), b"bookscat"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_parse_doc_meta_key_as_posting() {
        let key = KeyBuilder::doc_meta("books", DocId(1)).unwrap().into_key();

        match PostingKey::parse(&key) {
            Err(TermVectorError::KeyFormat(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_utf8() {
        match PostingKey::parse(b"books\xff\xfebody") {
            Err(TermVectorError::CharacterEncoding(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_describe_key() {
        let key = KeyBuilder::posting("books", "body", "cat").unwrap().into_key();

        assert_eq!(describe_key(&key), "books/body/cat");
    }

    #[test]
    fn test_delimiter_in_index_name() {
        let index_name = format!("a{}b", DELIMITER);

        match KeyBuilder::doc_meta(&index_name, DocId(1)) {
            Err(e) => assert_eq!(e.key(), index_name.as_bytes()),
            Ok(kb) => panic!("built key {:?}", describe_key(kb.key())),
        }
        assert!(KeyBuilder::posting(&index_name, "body", "cat").is_err());
    }

    #[test]
    fn test_delimiter_in_field() {
        let field = format!("bo{}dy", DELIMITER);

        assert!(KeyBuilder::posting("books", &field, "cat").is_err());
    }

    #[test]
    fn test_delimiter_in_term_text() {
        let term_text = format!("c{}at", DELIMITER);

        match KeyBuilder::posting("books", "body", &term_text) {
            Err(e) => assert_eq!(e.key(), term_text.as_bytes()),
            Ok(kb) => panic!("built key {:?}", describe_key(kb.key())),
        }
    }
}
