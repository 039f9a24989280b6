//! Key/value records and the iterator that produces them.

use alloc::string::String;

use crate::{
    error::Result,
    escape,
    line_reader::LineReader,
    source::{CharSource, StrSource},
    split::split_logical_line,
};

/// One decoded key/value record.
///
/// Entries own their text and are independent of the reader that produced
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The decoded key.
    pub key: String,
    /// The decoded value; empty when the logical line held only a key.
    pub value: String,
}

/// An iterator over the decoded entries of a property stream.
///
/// Each item runs one logical line through key/value splitting and escape
/// decoding. The first error — malformed escape or source failure — is
/// yielded as `Some(Err(_))` and ends the iterator.
///
/// # Examples
///
/// ```rust
/// use propstream::{Entries, StrSource};
///
/// let mut entries = Entries::new(StrSource::new("greeting = hello\\u0021\n"));
/// let entry = entries.next().unwrap().unwrap();
/// assert_eq!((entry.key.as_str(), entry.value.as_str()), ("greeting", "hello!"));
/// assert!(entries.next().is_none());
/// ```
#[derive(Debug)]
pub struct Entries<S> {
    reader: LineReader<S>,
    done: bool,
}

impl<S: CharSource> Entries<S> {
    /// Creates an iterator reading from `source`.
    pub fn new(source: S) -> Self {
        Self {
            reader: LineReader::new(source),
            done: false,
        }
    }

    /// Creates an iterator over an existing [`LineReader`].
    pub fn from_reader(reader: LineReader<S>) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<S: CharSource> Iterator for Entries<S> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let line = match self.reader.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        };
        let (raw_key, raw_value) = split_logical_line(line);
        let decoded = escape::decode(raw_key)
            .and_then(|key| escape::decode(raw_value).map(|value| Entry { key, value }));
        match decoded {
            Ok(entry) => Some(Ok(entry)),
            Err(err) => {
                self.done = true;
                Some(Err(err.into()))
            }
        }
    }
}

/// Parses borrowed text into an entry iterator.
///
/// # Examples
///
/// ```rust
/// use propstream::parse_str;
///
/// let entries: Vec<_> = parse_str("a=1\nb=2\n").collect::<Result<_, _>>().unwrap();
/// assert_eq!(entries.len(), 2);
/// ```
#[must_use]
pub fn parse_str(text: &str) -> Entries<StrSource<'_>> {
    Entries::new(StrSource::new(text))
}
