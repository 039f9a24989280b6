//! Locating the key/value boundary of a logical line.

/// Splits a logical line into its raw key and raw value spans.
///
/// The key ends at the first unescaped `=`, `:`, space, tab, or form feed.
/// Whitespace after the key is skipped, and at most one `=`/`:` found while
/// skipping is consumed as the separator, so `key = value`, `key:value`,
/// and `key value` all split the same way. A line with no value yields an
/// empty value span. Both spans are still escaped; pass them through
/// [`crate::escape::decode`].
///
/// # Examples
///
/// ```rust
/// use propstream::split_logical_line;
///
/// let line: Vec<char> = "fruits = apple, pear".chars().collect();
/// let (key, value) = split_logical_line(&line);
/// assert_eq!(key.iter().collect::<String>(), "fruits");
/// assert_eq!(value.iter().collect::<String>(), "apple, pear");
/// ```
#[must_use]
pub fn split_logical_line(line: &[char]) -> (&[char], &[char]) {
    let limit = line.len();
    let mut key_end = 0;
    let mut value_start = limit;
    let mut has_separator = false;
    let mut preceding_backslash = false;

    while key_end < limit {
        let c = line[key_end];
        if (c == '=' || c == ':') && !preceding_backslash {
            value_start = key_end + 1;
            has_separator = true;
            break;
        } else if (c == ' ' || c == '\t' || c == '\u{0C}') && !preceding_backslash {
            value_start = key_end + 1;
            break;
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
        key_end += 1;
    }

    while value_start < limit {
        let c = line[value_start];
        if c != ' ' && c != '\t' && c != '\u{0C}' {
            if !has_separator && (c == '=' || c == ':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    (&line[..key_end], &line[value_start..])
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use rstest::rstest;

    use super::split_logical_line;

    fn split(line: &str) -> (String, String) {
        let chars: alloc::vec::Vec<char> = line.chars().collect();
        let (key, value) = split_logical_line(&chars);
        (key.iter().collect(), value.iter().collect())
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.into(), value.into())
    }

    #[rstest]
    #[case("a=b")]
    #[case("a:b")]
    #[case("a b")]
    #[case("a = b")]
    #[case("a : b")]
    #[case("a\tb")]
    #[case("a =b")]
    #[case("a= b")]
    #[case("a \t b")]
    fn separator_variants(#[case] line: &str) {
        assert_eq!(split(line), pair("a", "b"));
    }

    #[test]
    fn only_first_separator_counts() {
        assert_eq!(split("a=b=c"), pair("a", "b=c"));
        assert_eq!(split("a = : b"), pair("a", ": b"));
        assert_eq!(split("a b c"), pair("a", "b c"));
        assert_eq!(split("a : = b"), pair("a", "= b"));
    }

    #[test]
    fn escaped_separators_stay_in_the_key() {
        assert_eq!(split("a\\=b=c"), pair("a\\=b", "c"));
        assert_eq!(split("a\\ b c"), pair("a\\ b", "c"));
        assert_eq!(split("a\\:b: c"), pair("a\\:b", "c"));
        // An even run of backslashes does not escape the separator
        assert_eq!(split("a\\\\=b"), pair("a\\\\", "b"));
    }

    #[test]
    fn missing_value() {
        assert_eq!(split("key"), pair("key", ""));
        assert_eq!(split("key="), pair("key", ""));
        assert_eq!(split("key "), pair("key", ""));
        assert_eq!(split(""), pair("", ""));
    }

    #[test]
    fn empty_key() {
        assert_eq!(split("=value"), pair("", "value"));
        assert_eq!(split(": v"), pair("", "v"));
    }
}
