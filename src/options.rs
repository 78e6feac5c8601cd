/// Formatting configuration for the serializer.
///
/// The three strings are emitted verbatim: `indent` once per depth
/// level after each newline, `newline` after container openers, before
/// container closers and after element separators, and `space` between
/// a key's colon and its value. Any of them may be empty; the default
/// has all three empty and produces compact single-line output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatOptions {
    pub indent: String,
    pub newline: String,
    pub space: String,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-space indentation, `\n` newlines, one space after colons.
    pub fn pretty() -> Self {
        Self::new()
            .with_indent("  ")
            .with_newline("\n")
            .with_space(" ")
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    pub fn with_space(mut self, space: impl Into<String>) -> Self {
        self.space = space.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_default_is_compact() {
        let options = FormatOptions::default();
        assert!(options.indent.is_empty());
        assert!(options.newline.is_empty());
        assert!(options.space.is_empty());
    }

    #[rstest::rstest]
    fn test_builder() {
        let options = FormatOptions::new()
            .with_indent("\t")
            .with_newline("\r\n")
            .with_space(" ");
        assert_eq!(options.indent, "\t");
        assert_eq!(options.newline, "\r\n");
        assert_eq!(options.space, " ");
    }

    #[rstest::rstest]
    fn test_pretty_preset() {
        let options = FormatOptions::pretty();
        assert_eq!(options.indent, "  ");
        assert_eq!(options.newline, "\n");
        assert_eq!(options.space, " ");
    }
}
