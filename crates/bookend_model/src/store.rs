//! In-memory tables backing reference host models.

use hashbrown::HashMap;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

/// Column holding the auto-incremented primary key.
pub const KEY_COLUMN: &str = "id";

/// A stored row: column name to value, in column order.
pub type Row = IndexMap<String, Value>;

#[derive(Debug, Default)]
struct Table {
    next_id: u64,
    rows: IndexMap<u64, Row>,
}

/// A set of named in-memory tables.
///
/// Each table assigns increasing integer keys starting at 1. Every operation
/// takes the lock once, so concurrent callers see whole rows.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    /// Creates a store with no tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `row` into `table` and returns the assigned key.
    ///
    /// The key is also written to the row's [`KEY_COLUMN`].
    pub fn insert(&self, table: &str, mut row: Row) -> u64 {
        let mut tables = self.tables.write();
        let table = tables.entry_ref(table).or_default();

        table.next_id += 1;
        let id = table.next_id;
        row.insert(KEY_COLUMN.to_string(), Value::from(id));
        table.rows.insert(id, row);
        id
    }

    /// Writes `changes` over the row `id`. Returns `false` if there is no such
    /// row.
    pub fn update(&self, table: &str, id: u64, changes: &Row) -> bool {
        let mut tables = self.tables.write();
        let Some(row) = tables.get_mut(table).and_then(|t| t.rows.get_mut(&id)) else {
            return false;
        };

        for (column, value) in changes {
            row.insert(column.clone(), value.clone());
        }
        true
    }

    /// Removes row `id`. Returns `false` if there is no such row.
    pub fn remove(&self, table: &str, id: u64) -> bool {
        self.tables
            .write()
            .get_mut(table)
            .is_some_and(|t| t.rows.shift_remove(&id).is_some())
    }

    /// Returns a copy of row `id`.
    #[must_use]
    pub fn get(&self, table: &str, id: u64) -> Option<Row> {
        self.tables
            .read()
            .get(table)
            .and_then(|t| t.rows.get(&id))
            .cloned()
    }

    /// Returns copies of every row matching `filter`, in insertion order.
    #[must_use]
    pub fn select(&self, table: &str, filter: impl Fn(&Row) -> bool) -> Vec<Row> {
        self.tables
            .read()
            .get(table)
            .map(|t| t.rows.values().filter(|row| filter(row)).cloned().collect())
            .unwrap_or_default()
    }

    /// Counts the rows matching `filter`.
    #[must_use]
    pub fn count(&self, table: &str, filter: impl Fn(&Row) -> bool) -> usize {
        self.tables
            .read()
            .get(table)
            .map_or(0, |t| t.rows.values().filter(|row| filter(row)).count())
    }
}
