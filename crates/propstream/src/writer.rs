//! The reverse path: rendering entries and comments back into escaped
//! property text.
//!
//! These builders append to a `String`; the `std`-gated
//! [`crate::PropertyMap::save`] wraps them around an [`std::io::Write`].

use alloc::string::String;

use crate::{escape, options::WriteOptions};

/// Appends one `key=value` line for an entry.
///
/// The key is encoded with every space escaped so it survives the
/// whitespace-terminated key grammar; the value only needs a leading space
/// escaped.
pub fn write_entry(out: &mut String, key: &str, value: &str, options: WriteOptions) {
    out.push_str(&escape::encode(key, true, options.escape_unicode));
    out.push('=');
    out.push_str(&escape::encode(value, false, options.escape_unicode));
    out.push('\n');
}

/// Appends a free-text comment block in which every physical line begins
/// with `#`.
///
/// Characters up to U+00FF are copied verbatim and anything above becomes a
/// `\uXXXX` escape. Each line terminator inside the comment (CRLF counts
/// once) starts a fresh line with a `#` marker, unless the comment itself
/// already continues with `#` or `!`. The block always ends with a newline.
///
/// # Examples
///
/// ```rust
/// use propstream::writer::write_comments;
///
/// let mut out = String::new();
/// write_comments(&mut out, "generated\ndo not edit");
/// assert_eq!(out, "#generated\n#do not edit\n");
/// ```
pub fn write_comments(out: &mut String, comment: &str) {
    out.push('#');
    let mut chars = comment.chars().peekable();
    while let Some(c) = chars.next() {
        if c > '\u{00FF}' {
            escape::push_unicode_escape(out, c);
        } else if c == '\n' || c == '\r' {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
            match chars.peek() {
                Some(&('#' | '!')) => {}
                _ => out.push('#'),
            }
        } else {
            out.push(c);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{write_comments, write_entry};
    use crate::options::WriteOptions;

    fn comments(text: &str) -> String {
        let mut out = String::new();
        write_comments(&mut out, text);
        out
    }

    #[test]
    fn single_line_comment() {
        assert_eq!(comments("hello"), "#hello\n");
        assert_eq!(comments(""), "#\n");
    }

    #[test]
    fn each_physical_line_gets_a_marker() {
        assert_eq!(comments("a\nb"), "#a\n#b\n");
        assert_eq!(comments("a\rb"), "#a\n#b\n");
        assert_eq!(comments("a\r\nb"), "#a\n#b\n");
    }

    #[test]
    fn existing_markers_are_not_doubled() {
        assert_eq!(comments("a\n#b"), "#a\n#b\n");
        assert_eq!(comments("a\n!b"), "#a\n!b\n");
    }

    #[test]
    fn trailing_terminator_yields_an_empty_marked_line() {
        assert_eq!(comments("a\n"), "#a\n#\n");
    }

    #[test]
    fn characters_above_latin1_are_escaped() {
        assert_eq!(comments("π"), "#\\u03C0\n");
        // Latin-1 range stays verbatim
        assert_eq!(comments("é"), "#é\n");
    }

    #[test]
    fn entry_lines() {
        let mut out = String::new();
        write_entry(&mut out, "a key", "a value", WriteOptions::default());
        assert_eq!(out, "a\\ key=a value\n");
    }
}
