//! A concurrently readable key/value store fed by the parser.

use alloc::{string::String, vec::Vec};

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::{
    entries::{Entries, Entry},
    error::Result,
    options::WriteOptions,
    source::{CharSource, ReadSource, StrSource},
    writer,
};

/// A key-unique, last-write-wins property store.
///
/// Reads go straight to the underlying concurrent map and may run in
/// parallel with each other. Every mutating operation — including a whole
/// [`PropertyMap::load`] — serializes on a single writer mutex, so writers
/// never interleave. Iteration order is unspecified.
///
/// # Examples
///
/// ```rust
/// use propstream::PropertyMap;
///
/// let map = PropertyMap::new();
/// map.load_str("host=localhost\nport=5432\nport=5433\n").unwrap();
/// assert_eq!(map.get("port").as_deref(), Some("5433"));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct PropertyMap {
    map: DashMap<String, String>,
    writer: Mutex<()>,
}

impl PropertyMap {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
            writer: Mutex::new(()),
        }
    }

    /// Returns a clone of the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    /// Inserts or replaces the value under `key`, returning the previous
    /// value if any.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let _guard = self.writer.lock();
        self.map.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&self, key: &str) -> Option<String> {
        let _guard = self.writer.lock();
        self.map.remove(key).map(|(_, value)| value)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let _guard = self.writer.lock();
        self.map.clear();
    }

    /// Bulk-inserts `other`, later pairs winning over earlier ones and over
    /// existing entries.
    pub fn merge<I>(&self, other: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let _guard = self.writer.lock();
        for (key, value) in other {
            self.map.insert(key, value);
        }
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Whether any entry stores `value`.
    #[must_use]
    pub fn contains_value(&self, value: &str) -> bool {
        self.map.iter().any(|entry| entry.value() == value)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// A snapshot of the keys, in unspecified order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.map.iter().map(|entry| entry.key().clone()).collect()
    }

    /// A snapshot of the entries, in unspecified order.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.map
            .iter()
            .map(|entry| Entry {
                key: entry.key().clone(),
                value: entry.value().clone(),
            })
            .collect()
    }

    /// Loads every record from `source`, returning how many were read.
    ///
    /// Repeated keys follow last-write-wins. The whole load holds the
    /// writer lock, so concurrent loads never interleave their records.
    ///
    /// # Errors
    ///
    /// Stops at the first malformed escape or source failure. Records read
    /// before the error remain in the store; there is no rollback.
    pub fn load<S: CharSource>(&self, source: S) -> Result<usize> {
        let _guard = self.writer.lock();
        let mut count = 0;
        for entry in Entries::new(source) {
            let Entry { key, value } = entry?;
            self.map.insert(key, value);
            count += 1;
        }
        Ok(count)
    }

    /// Loads records from in-memory text.
    ///
    /// # Errors
    ///
    /// Same failure behavior as [`PropertyMap::load`].
    pub fn load_str(&self, text: &str) -> Result<usize> {
        self.load(StrSource::new(text))
    }

    /// Loads records from a UTF-8 byte reader.
    ///
    /// # Errors
    ///
    /// Same failure behavior as [`PropertyMap::load`], plus I/O failures of
    /// `reader`.
    pub fn load_read<R: std::io::Read>(&self, reader: R) -> Result<usize> {
        self.load(ReadSource::new(reader))
    }

    /// Renders the store as escaped property text.
    ///
    /// An optional comment block comes first, then one `key=value` line per
    /// entry with keys sorted lexicographically — the map itself promises
    /// no order, so serialization imposes a deterministic one.
    #[must_use]
    pub fn to_text(&self, comment: Option<&str>, options: WriteOptions) -> String {
        let mut entries = self.entries();
        entries.sort_unstable_by(|a, b| a.key.cmp(&b.key));

        let mut out = String::new();
        if let Some(comment) = comment {
            writer::write_comments(&mut out, comment);
        }
        for entry in &entries {
            writer::write_entry(&mut out, &entry.key, &entry.value, options);
        }
        out
    }

    /// Writes the store as escaped property text.
    ///
    /// See [`PropertyMap::to_text`] for the output layout.
    ///
    /// # Errors
    ///
    /// Propagates failures of `writer`.
    pub fn save<W: std::io::Write>(
        &self,
        mut writer: W,
        comment: Option<&str>,
        options: WriteOptions,
    ) -> Result<()> {
        let text = self.to_text(comment, options);
        writer.write_all(text.as_bytes())?;
        Ok(())
    }
}
