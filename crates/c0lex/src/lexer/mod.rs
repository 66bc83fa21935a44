//! Hand-written scanner for C0.
//!
//! The scanner is independent of the [`automaton`](crate::automaton) module:
//! it recognizes the fixed token grammar directly, one char of lookahead at a
//! time. Lexical errors are reported in-band as [`TokenKind::Error`] tokens
//! so a caller can keep pulling tokens after a bad one.
//!
//! ```
//! use c0lex::lexer::{Keyword, Scanner, TokenKind};
//!
//! let mut scanner = Scanner::new("int x = 10;");
//! let first = scanner.next_token();
//! assert_eq!(first.kind, TokenKind::Keyword(Keyword::Int));
//! assert_eq!((first.line, first.column), (1, 1));
//! ```

mod config;
mod cursor;
mod error;
mod scanner;
mod token;

pub use config::{CommentPolicy, OverflowPolicy, ScannerConfig};
pub use cursor::{Cursor, Mark};
pub use error::LexError;
pub use scanner::{Scanner, tokenize};
pub use token::{Delimiter, Keyword, Operator, Token, TokenKind};
