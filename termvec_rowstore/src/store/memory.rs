use std::collections::BTreeMap;
use std::sync::RwLock;

use errors::StoreError;
use store::{RowStore, Row, Column, ColumnFamily, ColumnSelector};


type Columns = BTreeMap<Vec<u8>, Vec<u8>>;


/// A row store held in memory
///
/// Used by the test suites and the command line tool. Reads and writes can
/// come from many threads at once.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    families: RwLock<BTreeMap<ColumnFamily, BTreeMap<Vec<u8>, Columns>>>,
}


fn poisoned(key: &[u8]) -> StoreError {
    StoreError::new(key.to_vec(), "memory store lock poisoned".to_string())
}


fn select(key: &[u8], columns: &Columns, selector: &ColumnSelector) -> Row {
    let columns = columns.iter()
        .filter(|&(name, _value)| selector.matches(name))
        .map(|(name, value)| Column::new(name.clone(), value.clone()))
        .collect();

    Row::new(key.to_vec(), columns)
}


impl MemoryRowStore {
    pub fn new() -> MemoryRowStore {
        MemoryRowStore::default()
    }

    /// Writes a column, creating the row if needed
    pub fn put(&self, family: ColumnFamily, key: &[u8], column: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut families = self.families.write().map_err(|_| poisoned(key))?;

        families.entry(family).or_insert_with(BTreeMap::new)
            .entry(key.to_vec()).or_insert_with(BTreeMap::new)
            .insert(column.to_vec(), value.to_vec());

        Ok(())
    }

    /// Removes a whole row. Returns false if it didn't exist
    pub fn delete_row(&self, family: ColumnFamily, key: &[u8]) -> Result<bool, StoreError> {
        let mut families = self.families.write().map_err(|_| poisoned(key))?;

        Ok(match families.get_mut(&family) {
            Some(rows) => rows.remove(key).is_some(),
            None => false,
        })
    }

    /// Removes one column from a row, leaving the (possibly empty) row behind
    pub fn delete_column(&self, family: ColumnFamily, key: &[u8], column: &[u8]) -> Result<bool, StoreError> {
        let mut families = self.families.write().map_err(|_| poisoned(key))?;

        Ok(match families.get_mut(&family).and_then(|rows| rows.get_mut(key)) {
            Some(columns) => columns.remove(column).is_some(),
            None => false,
        })
    }

    pub fn num_rows(&self, family: ColumnFamily) -> Result<usize, StoreError> {
        let families = self.families.read().map_err(|_| poisoned(b""))?;

        Ok(families.get(&family).map(|rows| rows.len()).unwrap_or(0))
    }
}


impl RowStore for MemoryRowStore {
    fn read_one(&self, key: &[u8], selector: &ColumnSelector) -> Result<Option<Row>, StoreError> {
        let families = self.families.read().map_err(|_| poisoned(key))?;

        Ok(families.get(&selector.family())
            .and_then(|rows| rows.get(key))
            .map(|columns| select(key, columns, selector)))
    }

    fn read_many(&self, keys: &[Vec<u8>], selector: &ColumnSelector) -> Result<Vec<Row>, StoreError> {
        let families = self.families.read().map_err(|_| poisoned(b""))?;

        let rows = match families.get(&selector.family()) {
            Some(rows) => rows,
            None => return Ok(Vec::new()),
        };

        Ok(keys.iter()
            .filter_map(|key| rows.get(key).map(|columns| select(key, columns, selector)))
            .collect())
    }
}
