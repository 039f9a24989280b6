//! Assembly of logical lines from a raw character stream.
//!
//! [`LineReader`] consumes a [`CharSource`] through a bounded input buffer
//! and produces one logical line at a time: natural lines joined by
//! trailing-backslash continuations, with comment lines and blank lines
//! discarded and leading whitespace stripped. The characters it yields are
//! still escaped; interpreting escapes is [`crate::escape::decode`]'s job.
//!
//! The line buffer is owned by the reader and reused across calls, so each
//! returned slice is only valid until the next [`LineReader::read_line`] —
//! a lifecycle the borrow checker enforces.

use alloc::{boxed::Box, vec::Vec};

use crate::{error::Result, source::CharSource};

/// Capacity of the bounded input buffer, in characters.
const INPUT_BUFFER_LEN: usize = 8 * 1024;

/// Initial capacity of the reusable logical-line buffer.
const INITIAL_LINE_LEN: usize = 80;

/// Where the reader stands inside the current logical line.
///
/// One natural line can move through several of these states; a logical
/// line with continuations cycles `Accumulating` → `AwaitingContinuation`
/// and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    /// At a fresh logical line: leading whitespace, blank natural lines,
    /// and line terminators are all discarded.
    SkippingWhitespace,
    /// Inside a comment line: everything through the next terminator is
    /// discarded, then whitespace skipping resumes.
    InComment,
    /// Copying characters into the line buffer. `preceding_backslash`
    /// holds exactly when the buffer ends in an odd run of backslashes.
    Accumulating { preceding_backslash: bool },
    /// Just after a continuation: leading whitespace of the appended
    /// natural line is discarded, but a terminator here ends the logical
    /// line instead of being skipped. `skip_lf` consumes the `\n` of a
    /// `\r\n` pair that straddled the continuation, surviving refills.
    AwaitingContinuation { skip_lf: bool },
}

/// An incremental reader producing decoded-but-unescaped logical lines.
///
/// # Examples
///
/// ```rust
/// use propstream::{LineReader, StrSource};
///
/// let mut reader = LineReader::new(StrSource::new("# skipped\nkey=va\\\n   lue\n"));
/// let line = reader.read_line().unwrap().unwrap();
/// assert_eq!(line.iter().collect::<String>(), "key=value");
/// assert!(reader.read_line().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct LineReader<S> {
    source: S,
    input: Box<[char]>,
    offset: usize,
    limit: usize,
    exhausted: bool,
    line: Vec<char>,
    state: ReadState,
}

impl<S: CharSource> LineReader<S> {
    /// Creates a reader over `source` with the default input buffer size.
    pub fn new(source: S) -> Self {
        Self::with_capacity(source, INPUT_BUFFER_LEN)
    }

    /// Creates a reader with an input buffer of `capacity` characters.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(source: S, capacity: usize) -> Self {
        assert!(capacity > 0, "input buffer capacity must be nonzero");
        Self {
            source,
            input: alloc::vec!['\0'; capacity].into_boxed_slice(),
            offset: 0,
            limit: 0,
            exhausted: false,
            line: Vec::with_capacity(INITIAL_LINE_LEN),
            state: ReadState::SkippingWhitespace,
        }
    }

    /// Consumes the reader, returning the underlying source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Reads the next logical line, or `None` at end of input.
    ///
    /// The returned slice borrows the reader's internal buffer and is
    /// overwritten by the next call. An empty input, or one holding only
    /// comments and blank lines, yields `None` immediately.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying source. The reader itself
    /// never rejects input; malformed escapes are only detected later,
    /// during decoding.
    pub fn read_line(&mut self) -> Result<Option<&[char]>> {
        self.line.clear();
        self.state = ReadState::SkippingWhitespace;

        loop {
            let Some(c) = self.next_char()? else {
                // End of input: flush whatever accumulated. A trailing
                // backslash with nothing following is not part of the value.
                if self.state == (ReadState::Accumulating { preceding_backslash: true }) {
                    self.line.pop();
                }
                if self.line.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(&self.line));
            };

            match self.state {
                ReadState::SkippingWhitespace => match c {
                    ' ' | '\t' | '\u{0C}' => {}
                    // Blank natural lines never end a logical line here
                    '\r' | '\n' => {}
                    '#' | '!' => self.state = ReadState::InComment,
                    c => self.accumulate(c),
                },
                ReadState::InComment => {
                    if c == '\r' || c == '\n' {
                        self.state = ReadState::SkippingWhitespace;
                    }
                }
                ReadState::AwaitingContinuation { skip_lf } => {
                    if skip_lf && c == '\n' {
                        // Second half of a CRLF that straddled the continuation
                        self.state = ReadState::AwaitingContinuation { skip_lf: false };
                        continue;
                    }
                    self.state = ReadState::AwaitingContinuation { skip_lf: false };
                    match c {
                        ' ' | '\t' | '\u{0C}' => {}
                        '\r' | '\n' => {
                            if self.line.is_empty() {
                                // The continuation contributed nothing;
                                // start over on a fresh logical line.
                                self.state = ReadState::SkippingWhitespace;
                            } else {
                                return Ok(Some(&self.line));
                            }
                        }
                        '#' | '!' if self.line.is_empty() => {
                            self.state = ReadState::InComment;
                        }
                        c => self.accumulate(c),
                    }
                }
                ReadState::Accumulating { preceding_backslash } => match c {
                    '\r' | '\n' => {
                        if preceding_backslash {
                            // Continuation: the backslash is dropped and the
                            // next natural line appends to this logical line.
                            self.line.pop();
                            self.state =
                                ReadState::AwaitingContinuation { skip_lf: c == '\r' };
                        } else {
                            return Ok(Some(&self.line));
                        }
                    }
                    c => {
                        let backslash = c == '\\' && !preceding_backslash;
                        self.line.push(c);
                        self.state = ReadState::Accumulating {
                            preceding_backslash: backslash,
                        };
                    }
                },
            }
        }
    }

    /// Appends the first character of a logical line (or of an appended
    /// natural line) and switches to accumulation.
    fn accumulate(&mut self, c: char) {
        self.line.push(c);
        self.state = ReadState::Accumulating {
            preceding_backslash: c == '\\',
        };
    }

    /// Returns the next character, refilling the input buffer when it is
    /// exhausted. `None` means the source is out of input for good.
    fn next_char(&mut self) -> Result<Option<char>> {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            self.offset <= self.limit && self.limit <= self.input.len(),
            "input buffer indices out of range"
        );
        if self.offset >= self.limit {
            if self.exhausted {
                return Ok(None);
            }
            self.limit = self.source.fill(&mut self.input)?;
            self.offset = 0;
            if self.limit == 0 {
                self.exhausted = true;
                return Ok(None);
            }
        }
        let c = self.input[self.offset];
        self.offset += 1;
        Ok(Some(c))
    }
}
