use crate::error::{Error, Result};

/// Single-character pull over decoded text, with one character of pushback
/// and 1-based line/column tracking.
///
/// The pushback slot is the decoder's only lookahead; asking for a second
/// step back is a hard error. `\n`, lone `\r`, and `\r\n` all advance the
/// line counter, so mixed line endings keep positions honest.
pub(crate) struct Source<'a> {
    chars: std::str::Chars<'a>,
    index: usize,
    line: usize,
    column: usize,
    previous: Option<char>,
    use_previous: bool,
    replay_line: usize,
    replay_column: usize,
}

impl<'a> Source<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            index: 0,
            line: 1,
            column: 1,
            previous: None,
            use_previous: false,
            replay_line: 1,
            replay_column: 1,
        }
    }

    /// The next character, or `None` past the end of input.
    pub fn next(&mut self) -> Option<char> {
        if self.use_previous {
            self.use_previous = false;
            self.index += 1;
            self.line = self.replay_line;
            self.column = self.replay_column;
            return self.previous;
        }
        let c = self.chars.next();
        self.index += 1;
        if self.previous == Some('\r') {
            self.line += 1;
            self.column = if c == Some('\n') { 0 } else { 1 };
        } else if c == Some('\n') {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        self.previous = c;
        c
    }

    /// The next character past any whitespace (≤ 0x20).
    pub fn next_clean(&mut self) -> Option<char> {
        loop {
            match self.next() {
                Some(c) if c <= ' ' => continue,
                other => return other,
            }
        }
    }

    /// Step back one character so it is seen again by the next pull.
    pub fn back(&mut self) -> Result<()> {
        if self.use_previous || self.index == 0 {
            return Err(self.error("Stepping back two steps is not supported"));
        }
        self.replay_line = self.line;
        self.replay_column = self.column;
        self.index -= 1;
        self.column = self.column.saturating_sub(1);
        self.use_previous = true;
        Ok(())
    }

    /// A syntax error at the current position.
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::syntax(message, self.line, self.column)
    }

    #[cfg(test)]
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}
