//! A streaming, incremental parser and writer for line-oriented key/value
//! property text.
//!
//! The input grammar is the classic `.properties` format: natural lines
//! terminated by `\n`, `\r`, or `\r\n`; comment lines opening with `#` or
//! `!`; logical lines assembled from natural lines joined by trailing
//! backslash continuations; keys split from values at the first unescaped
//! `=`, `:`, or whitespace; and backslash escape sequences (including
//! `\uXXXX`) inside both keys and values.
//!
//! Parsing is incremental: a [`LineReader`] pulls characters from any
//! [`CharSource`] through a bounded input buffer and assembles one logical
//! line at a time in a reused, growable line buffer. The [`Entries`]
//! iterator layers key/value splitting and escape decoding on top, yielding
//! owned [`Entry`] records.
//!
//! # Examples
//!
//! ```rust
//! use propstream::parse_str;
//!
//! let text = "# database\nhost = localhost\nport: 5432\n";
//! let entries: Vec<_> = parse_str(text).collect::<Result<_, _>>().unwrap();
//! assert_eq!(entries[0].key, "host");
//! assert_eq!(entries[0].value, "localhost");
//! assert_eq!(entries[1].key, "port");
//! assert_eq!(entries[1].value, "5432");
//! ```
//!
//! With the default `std` feature, [`PropertyMap`] provides a concurrently
//! readable key/value store with bulk [`PropertyMap::load`] and
//! [`PropertyMap::save`] entry points that round-trip through the same
//! escaped textual form.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod entries;
mod error;
pub mod escape;
mod escape_buffer;
mod line_reader;
mod options;
mod source;
mod split;
#[cfg(feature = "std")]
mod store;
pub mod writer;

#[cfg(test)]
mod tests;

pub use entries::{Entries, Entry, parse_str};
pub use error::{Error, EscapeError, Result};
pub use line_reader::LineReader;
pub use options::WriteOptions;
#[cfg(feature = "std")]
pub use source::ReadSource;
pub use source::{CharSource, StrSource};
pub use split::split_logical_line;
#[cfg(feature = "std")]
pub use store::PropertyMap;
