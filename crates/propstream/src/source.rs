//! Character sources feeding the line reader.
//!
//! A [`CharSource`] is any sequential producer of characters that can fill
//! a caller-provided buffer, reporting end of input as a zero-length fill.
//! [`StrSource`] serves in-memory text; [`ReadSource`] (with the `std`
//! feature) decodes UTF-8 incrementally from any [`std::io::Read`],
//! carrying multi-byte sequences split across reads over to the next fill.

use crate::error::Result;

/// A blocking producer of characters.
///
/// `fill` writes as many characters as are available into the front of
/// `buf` and returns how many were written. A return of `0` signals end of
/// input; implementations must keep returning `0` once exhausted.
pub trait CharSource {
    /// Fills `buf` from the front, returning the number of characters
    /// written, or `0` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying producer.
    fn fill(&mut self, buf: &mut [char]) -> Result<usize>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn fill(&mut self, buf: &mut [char]) -> Result<usize> {
        (**self).fill(buf)
    }
}

/// A [`CharSource`] over a borrowed string.
#[derive(Debug)]
pub struct StrSource<'a> {
    rest: core::str::Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Creates a source yielding the characters of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn fill(&mut self, buf: &mut [char]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            let Some(c) = self.rest.next() else { break };
            buf[filled] = c;
            filled += 1;
        }
        Ok(filled)
    }
}

/// A [`CharSource`] decoding UTF-8 from a byte reader.
///
/// Bytes are pulled through an internal buffer and decoded with
/// [`bstr::decode_utf8`]. A multi-byte sequence cut off at the end of one
/// read is completed from the next; invalid sequences decode to U+FFFD, one
/// replacement character per rejected prefix.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
    buf: alloc::vec::Vec<u8>,
    start: usize,
    end: usize,
    eof: bool,
}

#[cfg(feature = "std")]
const READ_BUFFER_LEN: usize = 8 * 1024;

#[cfg(feature = "std")]
impl<R: std::io::Read> ReadSource<R> {
    /// Wraps a byte reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: alloc::vec![0; READ_BUFFER_LEN],
            start: 0,
            end: 0,
            eof: false,
        }
    }

    /// Reads more bytes behind any unconsumed tail, compacting first so the
    /// tail of a split UTF-8 sequence stays contiguous with the new bytes.
    fn refill(&mut self) -> Result<()> {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        while !self.eof && self.end < self.buf.len() {
            let n = self.inner.read(&mut self.buf[self.end..])?;
            if n == 0 {
                self.eof = true;
            } else {
                self.end += n;
                break;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> CharSource for ReadSource<R> {
    fn fill(&mut self, buf: &mut [char]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            if self.start >= self.end {
                if self.eof {
                    break;
                }
                self.refill()?;
                if self.start >= self.end {
                    break;
                }
            }
            let (decoded, size) = bstr::decode_utf8(&self.buf[self.start..self.end]);
            match decoded {
                Some(c) => {
                    buf[filled] = c;
                    filled += 1;
                    self.start += size;
                }
                None if !self.eof && self.start + size == self.end => {
                    // Possibly a sequence split at the end of this read;
                    // pull more bytes and decode it whole.
                    self.refill()?;
                }
                None => {
                    buf[filled] = char::REPLACEMENT_CHARACTER;
                    filled += 1;
                    self.start += size;
                }
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    #[cfg(feature = "std")]
    use alloc::vec::Vec;

    #[cfg(feature = "std")]
    use super::ReadSource;
    use super::{CharSource, StrSource};

    fn drain<S: CharSource>(mut source: S, chunk: usize) -> String {
        let mut buf = alloc::vec!['\0'; chunk];
        let mut out = String::new();
        loop {
            let n = source.fill(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend(&buf[..n]);
        }
        out
    }

    #[test]
    fn str_source_fills_in_chunks() {
        assert_eq!(drain(StrSource::new("hello world"), 4), "hello world");
        assert_eq!(drain(StrSource::new(""), 4), "");
    }

    /// A reader that returns at most one byte per `read` call, forcing every
    /// multi-byte sequence to straddle a refill.
    #[cfg(feature = "std")]
    struct TrickleReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    #[cfg(feature = "std")]
    impl std::io::Read for TrickleReader {
        fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || out.is_empty() {
                return Ok(0);
            }
            out[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn split_utf8_sequences_survive_refills() {
        let text = "aé😀π!";
        let reader = TrickleReader {
            bytes: text.as_bytes().to_vec(),
            pos: 0,
        };
        assert_eq!(drain(ReadSource::new(reader), 3), text);
    }

    #[cfg(feature = "std")]
    #[test]
    fn invalid_bytes_become_replacement_characters() {
        let reader = std::io::Cursor::new(b"a\xFF\xFEb".to_vec());
        assert_eq!(drain(ReadSource::new(reader), 8), "a\u{FFFD}\u{FFFD}b");
    }

    #[cfg(feature = "std")]
    #[test]
    fn truncated_trailing_sequence_is_replaced() {
        // The first two bytes of a four-byte emoji, then EOF
        let reader = std::io::Cursor::new(b"ok\xF0\x9F".to_vec());
        assert_eq!(drain(ReadSource::new(reader), 8), "ok\u{FFFD}");
    }
}
