const NEWLINE: char = '\n';

/// A saved cursor position, used to remember where a token started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Read position over borrowed source text.
///
/// Lines and columns are 1-based. Every consumed char moves the column by
/// one; a newline moves to column 1 of the next line.
#[derive(Clone, Debug)]
pub struct Cursor<'src> {
    source: &'src str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn mark(&self) -> Mark {
        Mark {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// The char under the cursor.
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The char right after the one under the cursor.
    pub fn peek(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Consume the current char and return it.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.offset += c.len_utf8();

        if c == NEWLINE {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    /// Consume the current char if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume chars while `predicate` holds; returns how many were consumed.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while self.current().is_some_and(&predicate) {
            self.advance();
            count += 1;
        }
        count
    }

    /// Source text from `start` up to the cursor.
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.offset]
    }

    fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }
}
