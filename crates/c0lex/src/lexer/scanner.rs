//! Hand-written scanner for C0 source text.

use crate::lexer::config::{CommentPolicy, OverflowPolicy, ScannerConfig};
use crate::lexer::cursor::{Cursor, Mark};
use crate::lexer::error::LexError;
use crate::lexer::token::{Delimiter, Keyword, Operator, Token, TokenKind};
use log::debug;
use std::iter::FusedIterator;

/// Pulls tokens out of borrowed source text one at a time.
///
/// Every call to [`Scanner::next_token`] skips whitespace and comments and
/// then recognizes exactly one token. Lookahead is one char past the
/// cursor, except after an exponent marker, where a sign may sit between
/// the marker and its first digit. Once the input is exhausted every
/// further call returns the same end-of-input token.
#[derive(Clone, Debug)]
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    config: ScannerConfig,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, ScannerConfig::default())
    }

    pub fn with_config(source: &'src str, config: ScannerConfig) -> Self {
        Self {
            cursor: Cursor::new(source),
            config,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Current line of the cursor.
    pub fn line(&self) -> usize {
        self.cursor.line()
    }

    /// Current column of the cursor.
    pub fn column(&self) -> usize {
        self.cursor.column()
    }

    /// Recognize the next token.
    pub fn next_token(&mut self) -> Token<'src> {
        let token = loop {
            self.skip_whitespace();
            let start = self.cursor.mark();

            let Some(c) = self.cursor.current() else {
                break self.token(TokenKind::Eof, start);
            };
            let next = self.cursor.peek();

            match c {
                '/' if next == Some('/') => self.skip_line_comment(),
                '/' if next == Some('*') => {
                    if let Some(error) = self.skip_block_comment(start) {
                        break error;
                    }
                }
                c if c.is_ascii_alphabetic() || c == '_' => break self.scan_identifier(start),
                c if c.is_ascii_digit() => break self.scan_number(start),
                '"' => break self.scan_string(start),
                '\'' => break self.scan_char(start),
                _ => break self.scan_operator(start),
            }
        };

        if let TokenKind::Error(err) = token.kind {
            debug!(
                "lexical error at {}:{}: {err} ({:?})",
                token.line, token.column, token.lexeme
            );
        }
        token
    }

    fn token(&self, kind: TokenKind, start: Mark) -> Token<'src> {
        Token::new(
            kind,
            self.cursor.slice_from(start.offset),
            start.line,
            start.column,
        )
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(is_whitespace);
    }

    /// Skip `// ...` up to and including the newline.
    fn skip_line_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();
        self.cursor.eat_while(|c| c != '\n');
        self.cursor.eat('\n');
    }

    /// Skip `/* ... */`. An unclosed comment runs to end of input and, unless
    /// the config says to skip it, becomes an error token.
    fn skip_block_comment(&mut self, start: Mark) -> Option<Token<'src>> {
        self.cursor.advance();
        self.cursor.advance();

        loop {
            match self.cursor.current() {
                None => {
                    return match self.config.unterminated_comment {
                        CommentPolicy::Error => Some(
                            self.token(TokenKind::Error(LexError::UnterminatedComment), start),
                        ),
                        CommentPolicy::Skip => None,
                    };
                }
                Some('*') if self.cursor.peek() == Some('/') => {
                    self.cursor.advance();
                    self.cursor.advance();
                    return None;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn scan_identifier(&mut self, start: Mark) -> Token<'src> {
        self.cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let lexeme = self.cursor.slice_from(start.offset);

        let kind = Keyword::from_ident(lexeme).map_or(TokenKind::Identifier, TokenKind::Keyword);
        self.token(kind, start)
    }

    fn scan_number(&mut self, start: Mark) -> Token<'src> {
        if self.cursor.current() == Some('0') && matches!(self.cursor.peek(), Some('x' | 'X')) {
            self.cursor.advance();
            self.cursor.advance();

            let digits_start = self.cursor.offset();
            self.cursor.eat_while(|c| c.is_ascii_hexdigit());
            let digits = self.cursor.slice_from(digits_start);

            let kind = if digits.is_empty() {
                TokenKind::Error(LexError::MissingHexDigits)
            } else {
                self.decode_integer(digits, 16)
            };
            return self.token(kind, start);
        }

        self.cursor.eat_while(|c| c.is_ascii_digit());
        let mut is_float = false;

        if self.cursor.current() == Some('.')
            && self.cursor.peek().is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        if let Some(exponent) = self.exponent_start() {
            is_float = true;
            self.cursor = exponent;
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        let lexeme = self.cursor.slice_from(start.offset);
        let kind = if is_float {
            decode_float(lexeme)
        } else {
            self.decode_integer(lexeme, 10)
        };
        self.token(kind, start)
    }

    /// A cursor past `e`, `E` and an optional sign, provided a digit follows.
    /// Otherwise the marker belongs to the next token.
    fn exponent_start(&self) -> Option<Cursor<'src>> {
        if !matches!(self.cursor.current(), Some('e' | 'E')) {
            return None;
        }
        let mut exponent = self.cursor.clone();
        exponent.advance();
        if matches!(exponent.current(), Some('+' | '-')) {
            exponent.advance();
        }
        exponent
            .current()
            .is_some_and(|c| c.is_ascii_digit())
            .then_some(exponent)
    }

    /// Decode a non-empty run of digits valid in `radix`.
    fn decode_integer(&self, digits: &str, radix: u32) -> TokenKind {
        if let Ok(value) = i64::from_str_radix(digits, radix) {
            return TokenKind::IntLiteral(value);
        }

        match self.config.integer_overflow {
            OverflowPolicy::Error => TokenKind::Error(LexError::IntegerOverflow),
            OverflowPolicy::Saturate => TokenKind::IntLiteral(i64::MAX),
            OverflowPolicy::Wrap => {
                let value = digits
                    .chars()
                    .filter_map(|c| c.to_digit(radix))
                    .fold(0i64, |acc, d| {
                        acc.wrapping_mul(i64::from(radix)).wrapping_add(i64::from(d))
                    });
                TokenKind::IntLiteral(value)
            }
        }
    }

    fn scan_string(&mut self, start: Mark) -> Token<'src> {
        // Opening quote
        self.cursor.advance();

        loop {
            match self.cursor.current() {
                None => return self.token(TokenKind::Error(LexError::UnterminatedString), start),
                Some('"') => {
                    self.cursor.advance();
                    return self.token(TokenKind::StringLiteral, start);
                }
                Some('\\') => {
                    // The escaped char is taken as is, whatever it is
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn scan_char(&mut self, start: Mark) -> Token<'src> {
        // Opening quote
        self.cursor.advance();

        let value = match self.cursor.current() {
            Some('\\') => {
                self.cursor.advance();
                self.cursor.advance().map(decode_escape)
            }
            Some('\'') => {
                self.cursor.advance();
                return self.token(TokenKind::Error(LexError::EmptyChar), start);
            }
            Some(c) => {
                self.cursor.advance();
                Some(c)
            }
            None => None,
        };

        match value {
            Some(value) if self.cursor.eat('\'') => self.token(TokenKind::CharLiteral(value), start),
            _ => self.token(TokenKind::Error(LexError::UnterminatedChar), start),
        }
    }

    fn scan_operator(&mut self, start: Mark) -> Token<'src> {
        let Some(c) = self.cursor.advance() else {
            return self.token(TokenKind::Eof, start);
        };

        let double = match (c, self.cursor.current()) {
            ('=', Some('=')) => Some(Operator::Eq),
            ('!', Some('=')) => Some(Operator::Ne),
            ('<', Some('=')) => Some(Operator::Le),
            ('>', Some('=')) => Some(Operator::Ge),
            ('&', Some('&')) => Some(Operator::And),
            ('|', Some('|')) => Some(Operator::Or),
            _ => None,
        };
        if let Some(op) = double {
            self.cursor.advance();
            return self.token(TokenKind::Operator(op), start);
        }

        let kind = match c {
            '+' => TokenKind::Operator(Operator::Plus),
            '-' => TokenKind::Operator(Operator::Minus),
            '*' => TokenKind::Operator(Operator::Multiply),
            '/' => TokenKind::Operator(Operator::Divide),
            '%' => TokenKind::Operator(Operator::Modulo),
            '=' => TokenKind::Operator(Operator::Assign),
            '<' => TokenKind::Operator(Operator::Lt),
            '>' => TokenKind::Operator(Operator::Gt),
            '!' => TokenKind::Operator(Operator::Not),
            ';' => TokenKind::Delimiter(Delimiter::Semicolon),
            ',' => TokenKind::Delimiter(Delimiter::Comma),
            '(' => TokenKind::Delimiter(Delimiter::LParen),
            ')' => TokenKind::Delimiter(Delimiter::RParen),
            '{' => TokenKind::Delimiter(Delimiter::LBrace),
            '}' => TokenKind::Delimiter(Delimiter::RBrace),
            '[' => TokenKind::Delimiter(Delimiter::LBracket),
            ']' => TokenKind::Delimiter(Delimiter::RBracket),
            other => TokenKind::Error(LexError::IllegalCharacter(other)),
        };
        self.token(kind, start)
    }
}

/// Yields every token before end of input; the EOF token itself is not
/// yielded.
impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}

impl FusedIterator for Scanner<'_> {}

/// Scan all of `source`. The last token is always EOF.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

/// The whitespace set of C's `isspace` in the "C" locale.
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn decode_escape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        // '\\', '\'' and unknown escapes stand for themselves
        other => other,
    }
}

fn decode_float(lexeme: &str) -> TokenKind {
    match lexeme.parse::<f64>() {
        Ok(value) if value.is_finite() => TokenKind::FloatLiteral(value),
        _ => TokenKind::Error(LexError::FloatOutOfRange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    fn single(source: &str) -> Token<'_> {
        let tokens = tokenize(source);
        assert_eq!(tokens.len(), 2, "{tokens:?}");
        tokens[0]
    }

    #[test]
    fn test_empty_input() {
        let mut scanner = Scanner::new("");
        let eof = scanner.next_token();
        assert!(eof.is_eof());
        assert_eq!((eof.line, eof.column, eof.lexeme), (1, 1, ""));

        let mut scanner = Scanner::new("  \n\t ");
        let eof = scanner.next_token();
        assert_eq!((eof.line, eof.column), (2, 3));
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut scanner = Scanner::new("x");
        assert_eq!(scanner.next_token().kind, TokenKind::Identifier);
        let first = scanner.next_token();
        let second = scanner.next_token();
        assert!(first.is_eof());
        assert_eq!(first, second);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("while whiles _x x_1 Return return"),
            vec![
                TokenKind::Keyword(Keyword::While),
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::Return),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(single("0").kind, TokenKind::IntLiteral(0));
        assert_eq!(single("007").kind, TokenKind::IntLiteral(7));
        assert_eq!(single("0x1a").kind, TokenKind::IntLiteral(26));
        assert_eq!(single("0XfF").kind, TokenKind::IntLiteral(255));
        assert_eq!(
            single("9223372036854775807").kind,
            TokenKind::IntLiteral(i64::MAX)
        );
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(single("3.25").kind, TokenKind::FloatLiteral(3.25));
        assert_eq!(single("2e3").kind, TokenKind::FloatLiteral(2000.0));
        assert_eq!(single("5E+2").kind, TokenKind::FloatLiteral(500.0));
        assert_eq!(single("1.5e-1").kind, TokenKind::FloatLiteral(0.15));
    }

    #[test]
    fn test_dot_without_fraction_digit() {
        let tokens = tokenize("1.x");
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral(1));
        assert_eq!(tokens[1].kind, TokenKind::Error(LexError::IllegalCharacter('.')));
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_malformed_numbers() {
        let hex = single("0x");
        assert_eq!(hex.kind, TokenKind::Error(LexError::MissingHexDigits));
        assert_eq!(hex.lexeme, "0x");

        assert_eq!(
            single("1e999").kind,
            TokenKind::Error(LexError::FloatOutOfRange)
        );
    }

    #[test]
    fn test_exponent_marker_without_digits() {
        let lexed = |source| {
            tokenize(source)
                .into_iter()
                .map(|t| (t.kind, t.lexeme))
                .collect::<Vec<_>>()
        };

        assert_eq!(
            lexed("1ex"),
            vec![
                (TokenKind::IntLiteral(1), "1"),
                (TokenKind::Identifier, "ex"),
                (TokenKind::Eof, ""),
            ]
        );
        assert_eq!(
            lexed("2E+;"),
            vec![
                (TokenKind::IntLiteral(2), "2"),
                (TokenKind::Identifier, "E"),
                (TokenKind::Operator(Operator::Plus), "+"),
                (TokenKind::Delimiter(Delimiter::Semicolon), ";"),
                (TokenKind::Eof, ""),
            ]
        );
        assert_eq!(
            lexed("1.5e-x"),
            vec![
                (TokenKind::FloatLiteral(1.5), "1.5"),
                (TokenKind::Identifier, "e"),
                (TokenKind::Operator(Operator::Minus), "-"),
                (TokenKind::Identifier, "x"),
                (TokenKind::Eof, ""),
            ]
        );
        assert_eq!(lexed("1e")[0], (TokenKind::IntLiteral(1), "1"));
        assert_eq!(lexed("3e-2")[0], (TokenKind::FloatLiteral(0.03), "3e-2"));
    }

    #[test]
    fn test_integer_overflow_policies() {
        let source = "9223372036854775808";
        let overflowing = |policy| {
            let config = ScannerConfig::default().with_integer_overflow(policy);
            Scanner::with_config(source, config).next_token().kind
        };

        assert_eq!(
            overflowing(OverflowPolicy::Error),
            TokenKind::Error(LexError::IntegerOverflow)
        );
        assert_eq!(
            overflowing(OverflowPolicy::Saturate),
            TokenKind::IntLiteral(i64::MAX)
        );
        assert_eq!(
            overflowing(OverflowPolicy::Wrap),
            TokenKind::IntLiteral(i64::MIN)
        );

        let config = ScannerConfig::default().with_integer_overflow(OverflowPolicy::Wrap);
        let token = Scanner::with_config("0xFFFFFFFFFFFFFFFF", config).next_token();
        assert_eq!(token.kind, TokenKind::IntLiteral(-1));
    }

    #[test]
    fn test_strings() {
        let token = single(r#""a \"quoted\" \q word""#);
        assert_eq!(token.kind, TokenKind::StringLiteral);
        assert_eq!(token.lexeme, r#""a \"quoted\" \q word""#);

        let token = single("\"two\nlines\"");
        assert_eq!(token.kind, TokenKind::StringLiteral);
    }

    #[test]
    fn test_unterminated_string_with_trailing_backslash() {
        let token = single("\"abc\\");
        assert_eq!(token.kind, TokenKind::Error(LexError::UnterminatedString));
        assert_eq!(token.lexeme, "\"abc\\");
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(single("'a'").kind, TokenKind::CharLiteral('a'));
        assert_eq!(single(r"'\n'").kind, TokenKind::CharLiteral('\n'));
        assert_eq!(single(r"'\t'").kind, TokenKind::CharLiteral('\t'));
        assert_eq!(single(r"'\r'").kind, TokenKind::CharLiteral('\r'));
        assert_eq!(single(r"'\0'").kind, TokenKind::CharLiteral('\0'));
        assert_eq!(single(r"'\\'").kind, TokenKind::CharLiteral('\\'));
        assert_eq!(single(r"'\''").kind, TokenKind::CharLiteral('\''));
        assert_eq!(single(r"'\q'").kind, TokenKind::CharLiteral('q'));
        assert_eq!(single(r"'\q'").lexeme, r"'\q'");
    }

    #[test]
    fn test_char_errors() {
        assert_eq!(single("''").kind, TokenKind::Error(LexError::EmptyChar));
        assert_eq!(single("'").kind, TokenKind::Error(LexError::UnterminatedChar));
        assert_eq!(single("'\\").kind, TokenKind::Error(LexError::UnterminatedChar));

        let tokens = tokenize("'ab'");
        assert_eq!(tokens[0].kind, TokenKind::Error(LexError::UnterminatedChar));
        assert_eq!(tokens[0].lexeme, "'a");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].kind, TokenKind::Error(LexError::UnterminatedChar));
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn test_operators_prefer_two_chars() {
        assert_eq!(
            kinds("<= < >= > == = != ! && || / %"),
            vec![
                TokenKind::Operator(Operator::Le),
                TokenKind::Operator(Operator::Lt),
                TokenKind::Operator(Operator::Ge),
                TokenKind::Operator(Operator::Gt),
                TokenKind::Operator(Operator::Eq),
                TokenKind::Operator(Operator::Assign),
                TokenKind::Operator(Operator::Ne),
                TokenKind::Operator(Operator::Not),
                TokenKind::Operator(Operator::And),
                TokenKind::Operator(Operator::Or),
                TokenKind::Operator(Operator::Divide),
                TokenKind::Operator(Operator::Modulo),
                TokenKind::Eof,
            ]
        );
        // No space needed between operators
        assert_eq!(
            kinds("a<=-b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Operator(Operator::Le),
                TokenKind::Operator(Operator::Minus),
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lone_ampersand_and_pipe_are_illegal() {
        assert_eq!(
            kinds("& |"),
            vec![
                TokenKind::Error(LexError::IllegalCharacter('&')),
                TokenKind::Error(LexError::IllegalCharacter('|')),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        let tokens = tokenize("(){}[],;");
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(lexemes, vec!["(", ")", "{", "}", "[", "]", ",", ";", ""]);
        for token in &tokens[..8] {
            assert!(matches!(token.kind, TokenKind::Delimiter(_)));
        }
    }

    #[test]
    fn test_block_comments() {
        let tokens = tokenize("a /* x\n * y */ b");
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[1].line, tokens[1].column), (2, 9));

        // Comments do not nest
        assert_eq!(
            kinds("/* /* */ */"),
            vec![
                TokenKind::Operator(Operator::Multiply),
                TokenKind::Operator(Operator::Divide),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens = tokenize("x\n  /* never closed");
        assert_eq!(tokens[1].kind, TokenKind::Error(LexError::UnterminatedComment));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
        assert_eq!(tokens[1].lexeme, "/* never closed");

        let config = ScannerConfig::default().with_unterminated_comment(CommentPolicy::Skip);
        let mut scanner = Scanner::with_config("x /* never closed", config);
        assert_eq!(scanner.next_token().kind, TokenKind::Identifier);
        assert!(scanner.next_token().is_eof());
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        assert_eq!(kinds("// nothing else"), vec![TokenKind::Eof]);
        assert_eq!(kinds("a // b"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("int main() {\n\treturn 0;\n}\n");
        let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(
            positions,
            vec![
                (1, 1),
                (1, 5),
                (1, 9),
                (1, 10),
                (1, 12),
                (2, 2),
                (2, 9),
                (2, 10),
                (3, 1),
                (4, 1),
            ]
        );
    }

    #[test]
    fn test_non_ascii_is_illegal() {
        let tokens = tokenize("é x");
        assert_eq!(tokens[0].kind, TokenKind::Error(LexError::IllegalCharacter('é')));
        assert_eq!(tokens[0].lexeme, "é");
        assert_eq!((tokens[1].line, tokens[1].column), (1, 3));
    }

    #[test]
    fn test_iterator_stops_before_eof() {
        let scanner = Scanner::new("a = b;");
        let lexemes: Vec<&str> = scanner.map(|t| t.lexeme).collect();
        assert_eq!(lexemes, vec!["a", "=", "b", ";"]);

        let mut scanner = Scanner::new("");
        assert_eq!(scanner.next(), None);
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_scanning_continues_after_errors() {
        let tokens = tokenize("a @ b # c");
        let errors = tokens.iter().filter(|t| t.is_error()).count();
        let identifiers = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .count();
        assert_eq!(errors, 2);
        assert_eq!(identifiers, 3);
    }
}
