use std::fmt;


/// A value indexed in a particular field
///
/// Terms order by field first, then by text.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize, Deserialize)]
pub struct Term {
    field: String,
    text: String,
}


impl Term {
    pub fn new<F: Into<String>, T: Into<String>>(field: F, text: T) -> Term {
        Term {
            field: field.into(),
            text: text.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}


impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.text)
    }
}
