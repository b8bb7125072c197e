//! The row store this crate reads from
//!
//! Rows are grouped into column families. Each row has a key and a sorted set
//! of named columns. Reads select columns by name ("slice by names").

pub mod memory;

use errors::StoreError;


#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnFamily {
    /// One row per document, holding its term list
    Documents,

    /// One row per (field, term), with a column per document
    TermVectors,
}


/// Chooses which columns of a row a read returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelector {
    family: ColumnFamily,
    names: Vec<Vec<u8>>,
}


impl ColumnSelector {
    pub fn names(family: ColumnFamily, names: Vec<Vec<u8>>) -> ColumnSelector {
        ColumnSelector {
            family: family,
            names: names,
        }
    }

    pub fn single(family: ColumnFamily, name: &[u8]) -> ColumnSelector {
        ColumnSelector::names(family, vec![name.to_vec()])
    }

    pub fn family(&self) -> ColumnFamily {
        self.family
    }

    pub fn matches(&self, name: &[u8]) -> bool {
        self.names.iter().any(|selected| &selected[..] == name)
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}


impl Column {
    pub fn new(name: Vec<u8>, value: Vec<u8>) -> Column {
        Column {
            name: name,
            value: value,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: Vec<u8>,
    pub columns: Vec<Column>,
}


impl Row {
    pub fn new(key: Vec<u8>, columns: Vec<Column>) -> Row {
        Row {
            key: key,
            columns: columns,
        }
    }

    pub fn column(&self, name: &[u8]) -> Option<&Column> {
        self.columns.iter().find(|column| &column.name[..] == name)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}


/// Read access to a row store
///
/// Consistency, retries and timeouts belong to the implementation.
pub trait RowStore {
    /// Reads the selected columns of one row
    ///
    /// Returns `None` if the row doesn't exist. A row that exists but has none
    /// of the selected columns comes back with no columns.
    fn read_one(&self, key: &[u8], selector: &ColumnSelector) -> Result<Option<Row>, StoreError>;

    /// Reads the selected columns of many rows as one batch
    ///
    /// Rows that don't exist are left out, and the rows that do come back may
    /// be in any order.
    fn read_many(&self, keys: &[Vec<u8>], selector: &ColumnSelector) -> Result<Vec<Row>, StoreError>;
}


impl<'a, S: RowStore + ?Sized> RowStore for &'a S {
    fn read_one(&self, key: &[u8], selector: &ColumnSelector) -> Result<Option<Row>, StoreError> {
        (**self).read_one(key, selector)
    }

    fn read_many(&self, keys: &[Vec<u8>], selector: &ColumnSelector) -> Result<Vec<Row>, StoreError> {
        (**self).read_many(keys, selector)
    }
}
