/// What to do with a `/*` comment that is never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentPolicy {
    /// Emit an error token at the `/*`, like unterminated strings do
    #[default]
    Error,
    /// Silently consume everything up to end of input
    Skip,
}

/// What to do with an integer literal that does not fit in `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Emit an error token
    #[default]
    Error,
    /// Keep the low 64 bits (two's complement)
    Wrap,
    /// Clamp to `i64::MAX`
    Saturate,
}

/// Configuration for the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScannerConfig {
    pub unterminated_comment: CommentPolicy,

    pub integer_overflow: OverflowPolicy,
}

impl ScannerConfig {
    pub fn with_unterminated_comment(mut self, policy: CommentPolicy) -> Self {
        self.unterminated_comment = policy;
        self
    }

    pub fn with_integer_overflow(mut self, policy: OverflowPolicy) -> Self {
        self.integer_overflow = policy;
        self
    }
}
