//! Plain in-memory RowsAndColumns.

use std::collections::HashMap;
use std::sync::Arc;

use strata_core::error::{Error, Result};

use crate::column::Column;
use crate::rac::RowsAndColumns;

/// Named columns over one shared row count. The workhorse shape for derived
/// batches and tests; wraps no closeable resources.
pub struct MapOfColumns {
    names: Vec<String>,
    columns: HashMap<String, Arc<dyn Column>>,
    num_rows: usize,
}

impl std::fmt::Debug for MapOfColumns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapOfColumns")
            .field("names", &self.names)
            .field("num_rows", &self.num_rows)
            .finish_non_exhaustive()
    }
}

impl MapOfColumns {
    /// Builds from `(name, column)` pairs, validating the shared row count
    /// and name uniqueness. Order of the pairs is the schema order.
    pub fn of(pairs: Vec<(&str, Arc<dyn Column>)>) -> Result<Self> {
        let mut names = Vec::with_capacity(pairs.len());
        let mut columns = HashMap::with_capacity(pairs.len());
        let mut num_rows = None;

        for (name, column) in pairs {
            let rows = column.num_rows();
            match num_rows {
                None => num_rows = Some(rows),
                Some(expected) if expected != rows => {
                    return Err(Error::Schema(format!(
                        "column [{}] has {} rows, expected {}",
                        name, rows, expected
                    )));
                }
                Some(_) => {}
            }
            if columns.insert(name.to_owned(), column).is_some() {
                return Err(Error::Schema(format!("duplicate column [{}]", name)));
            }
            names.push(name.to_owned());
        }

        Ok(Self {
            names,
            columns,
            num_rows: num_rows.unwrap_or(0),
        })
    }
}

impl RowsAndColumns for MapOfColumns {
    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn find_column(&self, name: &str) -> Option<Arc<dyn Column>> {
        self.columns.get(name).cloned()
    }
}
