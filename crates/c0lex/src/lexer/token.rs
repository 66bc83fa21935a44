//! Token types produced by the scanner.

use crate::lexer::error::LexError;
use std::fmt;

/// Reserved words of C0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Const,
    Int,
    Double,
    Char,
    Void,
    If,
    Else,
    While,
    For,
    Return,
    Break,
    Continue,
    Struct,
}

impl Keyword {
    pub const ALL: [Keyword; 13] = [
        Keyword::Const,
        Keyword::Int,
        Keyword::Double,
        Keyword::Char,
        Keyword::Void,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::For,
        Keyword::Return,
        Keyword::Break,
        Keyword::Continue,
        Keyword::Struct,
    ];

    /// Look up an identifier lexeme. Matching is exact and case sensitive.
    pub fn from_ident(ident: &str) -> Option<Keyword> {
        let keyword = match ident {
            "const" => Keyword::Const,
            "int" => Keyword::Int,
            "double" => Keyword::Double,
            "char" => Keyword::Char,
            "void" => Keyword::Void,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "for" => Keyword::For,
            "return" => Keyword::Return,
            "break" => Keyword::Break,
            "continue" => Keyword::Continue,
            "struct" => Keyword::Struct,
            _ => return None,
        };
        Some(keyword)
    }

    /// Source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Const => "const",
            Keyword::Int => "int",
            Keyword::Double => "double",
            Keyword::Char => "char",
            Keyword::Void => "void",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Return => "return",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Struct => "struct",
        }
    }

    /// Report name, e.g. `INT` for `int`.
    pub fn name(self) -> &'static str {
        match self {
            Keyword::Const => "CONST",
            Keyword::Int => "INT",
            Keyword::Double => "DOUBLE",
            Keyword::Char => "CHAR",
            Keyword::Void => "VOID",
            Keyword::If => "IF",
            Keyword::Else => "ELSE",
            Keyword::While => "WHILE",
            Keyword::For => "FOR",
            Keyword::Return => "RETURN",
            Keyword::Break => "BREAK",
            Keyword::Continue => "CONTINUE",
            Keyword::Struct => "STRUCT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Assign,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::Assign => "=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Plus => "PLUS",
            Operator::Minus => "MINUS",
            Operator::Multiply => "MULTIPLY",
            Operator::Divide => "DIVIDE",
            Operator::Modulo => "MODULO",
            Operator::Assign => "ASSIGN",
            Operator::Eq => "EQ",
            Operator::Ne => "NE",
            Operator::Lt => "LT",
            Operator::Le => "LE",
            Operator::Gt => "GT",
            Operator::Ge => "GE",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Semicolon => ";",
            Delimiter::Comma => ",",
            Delimiter::LParen => "(",
            Delimiter::RParen => ")",
            Delimiter::LBrace => "{",
            Delimiter::RBrace => "}",
            Delimiter::LBracket => "[",
            Delimiter::RBracket => "]",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Semicolon => "SEMICOLON",
            Delimiter::Comma => "COMMA",
            Delimiter::LParen => "LPAREN",
            Delimiter::RParen => "RPAREN",
            Delimiter::LBrace => "LBRACE",
            Delimiter::RBrace => "RBRACE",
            Delimiter::LBracket => "LBRACKET",
            Delimiter::RBracket => "RBRACKET",
        }
    }
}

/// Token classification. Literal kinds carry their decoded value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(char),
    /// The lexeme keeps the quotes and any escapes undecoded
    StringLiteral,
    Operator(Operator),
    Delimiter(Delimiter),
    Eof,
    Error(LexError),
}

impl TokenKind {
    /// Upper-case category name used by token listings.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(keyword) => keyword.name(),
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::IntLiteral(_) => "INT_CONST",
            TokenKind::FloatLiteral(_) => "DOUBLE_CONST",
            TokenKind::CharLiteral(_) => "CHAR_CONST",
            TokenKind::StringLiteral => "STRING_CONST",
            TokenKind::Operator(op) => op.name(),
            TokenKind::Delimiter(delim) => delim.name(),
            TokenKind::Eof => "EOF",
            TokenKind::Error(_) => "ERROR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified slice of the source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The exact source text the token was recognized from
    pub lexeme: &'src str,
    /// 1-based line of the first char
    pub line: usize,
    /// 1-based column of the first char
    pub column: usize,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme,
            line,
            column,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }

    /// The diagnostic of an error token.
    pub fn error(&self) -> Option<LexError> {
        match self.kind {
            TokenKind::Error(err) => Some(err),
            _ => None,
        }
    }
}
