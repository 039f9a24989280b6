/// Options controlling the serialized form of keys, values, and comments.
///
/// # Examples
///
/// ```rust
/// use propstream::WriteOptions;
///
/// let options = WriteOptions {
///     escape_unicode: true,
///     ..Default::default()
/// };
/// # let _ = options;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Whether to render characters outside printable ASCII as `\uXXXX`
    /// escapes.
    ///
    /// When `false`, output is UTF-8 with such characters copied verbatim.
    /// Enable this to produce pure-ASCII output for consumers that read
    /// property text in a legacy single-byte encoding.
    ///
    /// # Default
    ///
    /// `false`
    pub escape_unicode: bool,
}
