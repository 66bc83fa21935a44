use thiserror::Error;

/// Diagnostics carried by error tokens.
///
/// Lexical errors never stop the scanner: each one becomes a
/// [`TokenKind::Error`](super::TokenKind::Error) token and scanning resumes
/// after the offending text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated character literal")]
    UnterminatedChar,

    #[error("empty character literal")]
    EmptyChar,

    #[error("unterminated block comment")]
    UnterminatedComment,

    #[error("illegal character '{}'", .0.escape_default())]
    IllegalCharacter(char),

    #[error("integer literal does not fit in 64 bits")]
    IntegerOverflow,

    #[error("floating-point literal is out of range")]
    FloatOutOfRange,

    #[error("hexadecimal literal has no digits")]
    MissingHexDigits,
}
