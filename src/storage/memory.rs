//! Embedded in-memory engine.
//!
//! Databases keep their entries in a vector sorted under the registered
//! comparator, with duplicate values stored as sorted lists per key.
//! Deterministic: the same sequence of writes always produces the same
//! entry and duplicate order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::errors::{StorageError, StorageResult};
use super::{DbiHandle, IndexCursor, KeyComparator, ReadTransaction, WriteHandle};

struct Database {
    name: String,
    comparator: Option<Arc<dyn KeyComparator>>,
    dupsort: bool,
    /// Keys sorted under the registered comparator; values sorted byte-wise
    entries: Vec<(Vec<u8>, Vec<Vec<u8>>)>,
}

impl Database {
    fn compare_keys(&self, a: &[u8], b: &[u8]) -> Ordering {
        match &self.comparator {
            Some(comparator) => comparator.compare(a, b),
            None => a.cmp(b),
        }
    }

    fn find(&self, key: &[u8]) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(stored, _)| self.compare_keys(stored, key))
    }
}

/// In-memory ordered key-value engine with named databases
pub struct MemoryEngine {
    databases: Vec<Database>,
}

impl MemoryEngine {
    /// Creates an engine with no databases
    pub fn new() -> Self {
        Self {
            databases: Vec::new(),
        }
    }

    /// Registers a database, optionally with a custom comparator and
    /// duplicate-key support, returning its handle.
    ///
    /// The comparator is fixed for the lifetime of the database; changing
    /// the ordering of live entries would corrupt them.
    pub fn create_database(
        &mut self,
        name: impl Into<String>,
        comparator: Option<Arc<dyn KeyComparator>>,
        dupsort: bool,
    ) -> DbiHandle {
        let handle = self.databases.len() as DbiHandle;
        self.databases.push(Database {
            name: name.into(),
            comparator,
            dupsort,
            entries: Vec::new(),
        });
        handle
    }

    /// Returns the registered name of a database
    pub fn database_name(&self, dbi: DbiHandle) -> Option<&str> {
        self.databases.get(dbi as usize).map(|db| db.name.as_str())
    }

    /// Begins a read view over the current state.
    ///
    /// Writes are exclusive by construction (`&mut self`), so a read view
    /// observes a consistent snapshot for its lifetime.
    pub fn begin_read(&self) -> MemoryTransaction<'_> {
        MemoryTransaction { engine: self }
    }

    fn database(&self, dbi: DbiHandle) -> StorageResult<&Database> {
        self.databases
            .get(dbi as usize)
            .ok_or(StorageError::UnknownDatabase(dbi))
    }

    fn database_mut(&mut self, dbi: DbiHandle) -> StorageResult<&mut Database> {
        self.databases
            .get_mut(dbi as usize)
            .ok_or(StorageError::UnknownDatabase(dbi))
    }

    fn put_inner(
        &mut self,
        dbi: DbiHandle,
        key: &[u8],
        value: &[u8],
        overwrite: bool,
    ) -> StorageResult<()> {
        let db = self.database_mut(dbi)?;
        match db.find(key) {
            Ok(position) => {
                if db.dupsort {
                    let values = &mut db.entries[position].1;
                    if let Err(insert_at) = values.binary_search_by(|v| v.as_slice().cmp(value)) {
                        values.insert(insert_at, value.to_vec());
                    }
                    Ok(())
                } else if overwrite {
                    db.entries[position].1 = vec![value.to_vec()];
                    Ok(())
                } else {
                    Err(StorageError::KeyExists(dbi))
                }
            }
            Err(insert_at) => {
                db.entries
                    .insert(insert_at, (key.to_vec(), vec![value.to_vec()]));
                Ok(())
            }
        }
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteHandle for MemoryEngine {
    fn put(&mut self, dbi: DbiHandle, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.put_inner(dbi, key, value, true)
    }

    fn put_no_overwrite(&mut self, dbi: DbiHandle, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.put_inner(dbi, key, value, false)
    }

    fn delete(&mut self, dbi: DbiHandle, key: &[u8], value: Option<&[u8]>) -> StorageResult<()> {
        let db = self.database_mut(dbi)?;
        if let Ok(position) = db.find(key) {
            match value {
                Some(target) => {
                    let values = &mut db.entries[position].1;
                    if let Ok(found) = values.binary_search_by(|v| v.as_slice().cmp(target)) {
                        values.remove(found);
                    }
                    if values.is_empty() {
                        db.entries.remove(position);
                    }
                }
                None => {
                    db.entries.remove(position);
                }
            }
        }
        Ok(())
    }
}

/// Read view over a `MemoryEngine`
pub struct MemoryTransaction<'e> {
    engine: &'e MemoryEngine,
}

impl ReadTransaction for MemoryTransaction<'_> {
    fn cursor(&self, dbi: DbiHandle) -> StorageResult<Box<dyn IndexCursor + '_>> {
        let db = self.engine.database(dbi)?;
        Ok(Box::new(MemoryCursor {
            db,
            position: None,
        }))
    }

    fn get(&self, dbi: DbiHandle, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        let db = self.engine.database(dbi)?;
        Ok(db
            .find(key)
            .ok()
            .and_then(|position| db.entries[position].1.first().cloned()))
    }
}

/// Cursor over one database's sorted entries
struct MemoryCursor<'e> {
    db: &'e Database,
    /// (entry index, duplicate index) after a successful seek
    position: Option<(usize, usize)>,
}

impl IndexCursor for MemoryCursor<'_> {
    fn seek_exact(&mut self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        match self.db.find(key) {
            Ok(entry) => {
                self.position = Some((entry, 0));
                Ok(self.db.entries[entry].1.first().cloned())
            }
            Err(_) => {
                self.position = None;
                Ok(None)
            }
        }
    }

    fn next_duplicate(&mut self) -> StorageResult<Option<Vec<u8>>> {
        let Some((entry, duplicate)) = self.position else {
            return Ok(None);
        };
        let next = duplicate + 1;
        match self.db.entries[entry].1.get(next) {
            Some(value) => {
                self.position = Some((entry, next));
                Ok(Some(value.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Orders keys by their first byte only, to prove the registered
    /// comparator (not byte order) drives placement.
    struct FirstByteComparator;

    impl KeyComparator for FirstByteComparator {
        fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
            a.first().cmp(&b.first())
        }
    }

    #[test]
    fn test_put_get_roundtrip() {
        let mut engine = MemoryEngine::new();
        let dbi = engine.create_database("primary", None, false);

        engine.put(dbi, b"k1", b"v1").unwrap();
        engine.put(dbi, b"k2", b"v2").unwrap();

        let txn = engine.begin_read();
        assert_eq!(txn.get(dbi, b"k1").unwrap(), Some(b"v1".to_vec()));
        assert_eq!(txn.get(dbi, b"k3").unwrap(), None);
    }

    #[test]
    fn test_overwrite_vs_no_overwrite() {
        let mut engine = MemoryEngine::new();
        let dbi = engine.create_database("primary", None, false);

        engine.put(dbi, b"k", b"old").unwrap();
        engine.put(dbi, b"k", b"new").unwrap();
        assert_eq!(
            engine.begin_read().get(dbi, b"k").unwrap(),
            Some(b"new".to_vec())
        );

        let err = engine.put_no_overwrite(dbi, b"k", b"other").unwrap_err();
        assert_eq!(err, StorageError::KeyExists(dbi));
    }

    #[test]
    fn test_dupsort_accumulates_sorted() {
        let mut engine = MemoryEngine::new();
        let dbi = engine.create_database("index", None, true);

        engine.put(dbi, b"k", b"b").unwrap();
        engine.put(dbi, b"k", b"a").unwrap();
        engine.put(dbi, b"k", b"c").unwrap();
        engine.put(dbi, b"k", b"a").unwrap(); // duplicate value ignored

        let txn = engine.begin_read();
        let mut cursor = txn.cursor(dbi).unwrap();
        assert_eq!(cursor.seek_exact(b"k").unwrap(), Some(b"a".to_vec()));
        assert_eq!(cursor.next_duplicate().unwrap(), Some(b"b".to_vec()));
        assert_eq!(cursor.next_duplicate().unwrap(), Some(b"c".to_vec()));
        assert_eq!(cursor.next_duplicate().unwrap(), None);
    }

    #[test]
    fn test_seek_exact_is_not_range() {
        let mut engine = MemoryEngine::new();
        let dbi = engine.create_database("index", None, true);
        engine.put(dbi, b"b", b"v").unwrap();

        let txn = engine.begin_read();
        let mut cursor = txn.cursor(dbi).unwrap();
        // "a" sorts before "b": a range cursor would land on "b".
        assert_eq!(cursor.seek_exact(b"a").unwrap(), None);
        assert_eq!(cursor.next_duplicate().unwrap(), None);
    }

    #[test]
    fn test_custom_comparator_drives_order() {
        let mut engine = MemoryEngine::new();
        let dbi = engine.create_database("index", Some(Arc::new(FirstByteComparator)), false);

        engine.put(dbi, b"b-long-suffix", b"v1").unwrap();
        // Same first byte: the comparator says equal, so this overwrites.
        engine.put(dbi, b"b-other", b"v2").unwrap();

        let txn = engine.begin_read();
        assert_eq!(txn.get(dbi, b"b-anything").unwrap(), Some(b"v2".to_vec()));
    }

    #[test]
    fn test_delete_value_and_key() {
        let mut engine = MemoryEngine::new();
        let dbi = engine.create_database("index", None, true);
        engine.put(dbi, b"k", b"a").unwrap();
        engine.put(dbi, b"k", b"b").unwrap();

        engine.delete(dbi, b"k", Some(b"a")).unwrap();
        assert_eq!(
            engine.begin_read().get(dbi, b"k").unwrap(),
            Some(b"b".to_vec())
        );

        engine.delete(dbi, b"k", Some(b"b")).unwrap();
        assert_eq!(engine.begin_read().get(dbi, b"k").unwrap(), None);

        // Deleting a missing key is a no-op.
        engine.delete(dbi, b"gone", None).unwrap();
    }

    #[test]
    fn test_database_names_registered() {
        let mut engine = MemoryEngine::new();
        let primary = engine.create_database("primary", None, false);
        let index = engine.create_database("name_1", None, true);

        assert_eq!(engine.database_name(primary), Some("primary"));
        assert_eq!(engine.database_name(index), Some("name_1"));
        assert_eq!(engine.database_name(99), None);
    }

    #[test]
    fn test_unknown_handle_rejected() {
        let engine = MemoryEngine::new();
        let txn = engine.begin_read();
        assert_eq!(
            txn.get(99, b"k").unwrap_err(),
            StorageError::UnknownDatabase(99)
        );
    }
}
