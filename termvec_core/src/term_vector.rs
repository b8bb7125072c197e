use term_info::TermInfo;


/// Character span of one occurrence of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermVectorOffset {
    pub start: u32,
    pub end: u32,
}


impl TermVectorOffset {
    pub fn new(start: u32, end: u32) -> TermVectorOffset {
        TermVectorOffset {
            start: start,
            end: end,
        }
    }
}


/// A term and its posting, as collected before the vector is built
#[derive(Debug, Clone, PartialEq)]
pub struct TermVectorEntry {
    pub term: String,
    pub info: TermInfo,
}


impl TermVectorEntry {
    pub fn new<T: Into<String>>(term: T, info: TermInfo) -> TermVectorEntry {
        TermVectorEntry {
            term: term.into(),
            info: info,
        }
    }
}


/// Borrowed view of a single term of a `TermFreqVector`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermVectorSlot<'a> {
    pub term: &'a str,
    pub frequency: u32,
    pub positions: &'a [u32],
    pub offsets: Option<&'a [TermVectorOffset]>,
}


/// The terms of one field of one document
///
/// `terms`, `frequencies`, `positions` and `offsets` are parallel. Terms are
/// unique and sorted so they can be looked up with a binary search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermFreqVector {
    field: String,
    terms: Vec<String>,
    frequencies: Vec<u32>,
    positions: Vec<Vec<u32>>,
    offsets: Vec<Option<Vec<TermVectorOffset>>>,
}


impl TermFreqVector {
    pub fn empty<F: Into<String>>(field: F) -> TermFreqVector {
        TermFreqVector {
            field: field.into(),
            terms: Vec::new(),
            frequencies: Vec::new(),
            positions: Vec::new(),
            offsets: Vec::new(),
        }
    }

    /// Builds the vector from entries in any order
    ///
    /// If a term appears more than once, the first entry for it wins.
    pub fn from_entries<F: Into<String>>(field: F, mut entries: Vec<TermVectorEntry>) -> TermFreqVector {
        // Stable, so the first of any duplicates stays in front
        entries.sort_by(|a, b| a.term.cmp(&b.term));
        entries.dedup_by(|a, b| a.term == b.term);

        let mut vector = TermFreqVector::empty(field);
        vector.terms.reserve(entries.len());
        vector.frequencies.reserve(entries.len());
        vector.positions.reserve(entries.len());
        vector.offsets.reserve(entries.len());

        for entry in entries {
            vector.terms.push(entry.term);
            vector.frequencies.push(entry.info.frequency);
            vector.positions.push(entry.info.positions);
            vector.offsets.push(entry.info.offsets);
        }

        vector
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn frequencies(&self) -> &[u32] {
        &self.frequencies
    }

    /// Token positions of the term at `index`
    ///
    /// Panics if `index` is out of bounds.
    pub fn positions(&self, index: usize) -> &[u32] {
        &self.positions[index]
    }

    /// Character offsets of the term at `index`, if they were stored
    ///
    /// Panics if `index` is out of bounds.
    pub fn offsets(&self, index: usize) -> Option<&[TermVectorOffset]> {
        self.offsets[index].as_ref().map(|offsets| &offsets[..])
    }

    pub fn size(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|probe| probe.as_str().cmp(term)).ok()
    }

    pub fn indexes_of(&self, terms: &[&str]) -> Vec<Option<usize>> {
        terms.iter().map(|term| self.index_of(term)).collect()
    }

    pub fn get(&self, index: usize) -> Option<TermVectorSlot> {
        if index >= self.terms.len() {
            return None;
        }

        Some(TermVectorSlot {
            term: &self.terms[index],
            frequency: self.frequencies[index],
            positions: &self.positions[index],
            offsets: self.offsets(index),
        })
    }

    pub fn iter<'a>(&'a self) -> Box<dyn Iterator<Item=TermVectorSlot<'a>> + 'a> {
        Box::new((0..self.terms.len()).filter_map(move |index| self.get(index)))
    }
}


#[cfg(test)]
mod tests {
    use serde_json;

    use term_info::TermInfo;

    use super::{TermFreqVector, TermVectorEntry, TermVectorOffset};

    fn make_vector() -> TermFreqVector {
        TermFreqVector::from_entries("body", vec![
            TermVectorEntry::new("dog", TermInfo::new(vec![1], None)),
            TermVectorEntry::new("cat", TermInfo::new(vec![3, 7], None)),
            TermVectorEntry::new("ant", TermInfo::new(vec![0], Some(vec![TermVectorOffset::new(0, 3)]))),
        ])
    }

    #[test]
    fn test_empty() {
        let vector = TermFreqVector::empty("body");

        assert_eq!(vector.field(), "body");
        assert_eq!(vector.size(), 0);
        assert!(vector.is_empty());
        assert_eq!(vector.index_of("cat"), None);
        assert_eq!(vector.iter().count(), 0);
    }

    #[test]
    fn test_sorts_terms() {
        let vector = make_vector();

        assert_eq!(vector.terms(), &["ant".to_string(), "cat".to_string(), "dog".to_string()]);
        assert_eq!(vector.frequencies(), &[1, 2, 1]);
        assert_eq!(vector.positions(1), &[3, 7]);
    }

    #[test]
    fn test_offsets_follow_their_term() {
        let vector = make_vector();

        assert_eq!(vector.offsets(0), Some(&[TermVectorOffset::new(0, 3)][..]));
        assert_eq!(vector.offsets(1), None);
        assert_eq!(vector.offsets(2), None);
    }

    #[test]
    fn test_index_of() {
        let vector = make_vector();

        assert_eq!(vector.index_of("ant"), Some(0));
        assert_eq!(vector.index_of("cat"), Some(1));
        assert_eq!(vector.index_of("dog"), Some(2));
        assert_eq!(vector.index_of("bee"), None);
        assert_eq!(vector.index_of(""), None);
        assert_eq!(vector.index_of("zebra"), None);
    }

    #[test]
    fn test_indexes_of() {
        let vector = make_vector();

        assert_eq!(vector.indexes_of(&["dog", "emu", "ant"]), vec![Some(2), None, Some(0)]);
    }

    #[test]
    fn test_sorts_by_bytes() {
        let vector = TermFreqVector::from_entries("body", vec![
            TermVectorEntry::new("éclair", TermInfo::empty()),
            TermVectorEntry::new("Zebra", TermInfo::empty()),
            TermVectorEntry::new("apple", TermInfo::empty()),
        ]);

        assert_eq!(vector.terms(), &["Zebra".to_string(), "apple".to_string(), "éclair".to_string()]);
        assert_eq!(vector.index_of("éclair"), Some(2));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let vector = TermFreqVector::from_entries("body", vec![
            TermVectorEntry::new("cat", TermInfo::new(vec![1], None)),
            TermVectorEntry::new("ant", TermInfo::empty()),
            TermVectorEntry::new("cat", TermInfo::new(vec![5, 6], None)),
        ]);

        assert_eq!(vector.size(), 2);
        assert_eq!(vector.positions(1), &[1]);
    }

    #[test]
    fn test_iter() {
        let vector = make_vector();
        let terms = vector.iter().map(|slot| (slot.term, slot.frequency)).collect::<Vec<_>>();

        assert_eq!(terms, vec![("ant", 1), ("cat", 2), ("dog", 1)]);
    }

    #[test]
    fn test_get_out_of_bounds() {
        assert!(make_vector().get(3).is_none());
    }

    #[test]
    fn test_serialize() {
        let vector = TermFreqVector::from_entries("title", vec![
            TermVectorEntry::new("cat", TermInfo::new(vec![0], Some(vec![TermVectorOffset::new(4, 7)]))),
        ]);

        let json = serde_json::to_value(&vector).unwrap();

        assert_eq!(json, json!({
            "field": "title",
            "terms": ["cat"],
            "frequencies": [1],
            "positions": [[0]],
            "offsets": [[{"start": 4, "end": 7}]],
        }));
    }
}
