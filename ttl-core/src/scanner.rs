//! Scanner Primitives: the small set of cursor operations the Grammar
//! Engine composes into every production. Every primitive here operates
//! on the current logical line and advances to the next one through the
//! [`LineBuffer`] when it runs out of input.

use crate::error::TurtleSyntaxError;
use crate::line_buffer::LineBuffer;
use std::io::Read;

/// The cursor state shared by the Scanner Primitives and the Grammar
/// Engine: a line buffer plus the position within its current logical
/// line.
pub(crate) struct Cursor<R> {
    pub(crate) lines: LineBuffer<R>,
}

impl<R: Read> Cursor<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            lines: LineBuffer::new(reader),
        }
    }

    pub(crate) fn line_number(&self) -> u64 {
        self.lines.line_number().max(1)
    }

    fn rest(&self) -> &str {
        let line = self.lines.current_line();
        char_slice(line, self.lines.current_index(), line.chars().count())
    }

    /// Returns the code point under the cursor without consuming it,
    /// advancing to the next logical line first if the current one is
    /// exhausted. `Ok(None)` means end of input.
    pub(crate) fn peek_char(&mut self) -> Result<Option<char>, TurtleSyntaxError> {
        loop {
            if self.lines.current_index() < self.lines.current_line().chars().count() {
                return Ok(self.rest().chars().next());
            }
            if !self
                .lines
                .advance_line()
                .map_err(|e| TurtleSyntaxError::new(self.line_number(), e))?
            {
                return Ok(None);
            }
        }
    }

    /// Reads and consumes the code point under the cursor, advancing
    /// lines as needed. This is `readCodePoint` in the source design.
    pub(crate) fn read_char(&mut self) -> Result<Option<char>, TurtleSyntaxError> {
        let c = self.peek_char()?;
        if c.is_some() {
            self.lines.set_current_index(self.lines.current_index() + 1);
        }
        Ok(c)
    }

    /// Consumes the code point under the cursor if it equals `expected`.
    pub(crate) fn eat(&mut self, expected: char) -> Result<bool, TurtleSyntaxError> {
        if self.peek_char()? == Some(expected) {
            self.read_char()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Raises a fatal error unless the code point under the cursor is
    /// `expected`, then consumes it.
    pub(crate) fn verify_char_or_fail(&mut self, expected: char) -> Result<(), TurtleSyntaxError> {
        match self.read_char()? {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(TurtleSyntaxError::new(
                self.line_number(),
                format!("expected '{expected}' but found '{c}'"),
            )),
            None => Err(TurtleSyntaxError::new(
                self.line_number(),
                format!("expected '{expected}' but reached end of input"),
            )),
        }
    }

    /// Advances past whitespace on the current logical line only; does
    /// not cross a line boundary or skip comments.
    pub(crate) fn skip_inline_wsc(&mut self) -> Result<(), TurtleSyntaxError> {
        while let Some(c) = self.peek_char_on_current_line() {
            if c.is_whitespace() {
                self.read_char()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn peek_char_on_current_line(&self) -> Option<char> {
        if self.lines.current_index() < self.lines.current_line().chars().count() {
            self.rest().chars().next()
        } else {
            None
        }
    }

    /// Advances past whitespace and `#`-to-end-of-line comments,
    /// crossing as many line boundaries as needed. Each comment found is
    /// reported through `on_comment`. If `strict` and input ends while
    /// still only whitespace/comments were seen, raises a fatal EOF.
    pub(crate) fn skip_multiline_wsc(
        &mut self,
        strict: bool,
        mut on_comment: impl FnMut(&str),
    ) -> Result<(), TurtleSyntaxError> {
        loop {
            self.skip_inline_wsc()?;
            match self.peek_char()? {
                Some('#') => {
                    let comment = self.process_comment()?;
                    on_comment(&comment);
                }
                Some(c) if c == '\n' || c == '\r' => {
                    self.read_char()?;
                }
                Some(_) => return Ok(()),
                None => {
                    return if strict {
                        Err(TurtleSyntaxError::new(
                            self.line_number(),
                            "unexpected end of input",
                        ))
                    } else {
                        Ok(())
                    };
                }
            }
        }
    }

    /// Consumes a `#` comment and returns its text (without the leading
    /// `#`). This is `processComment` in the source design; the caller
    /// reports the text to the handler.
    pub(crate) fn process_comment(&mut self) -> Result<String, TurtleSyntaxError> {
        self.verify_char_or_fail('#')?;
        let mut text = String::new();
        loop {
            match self.peek_char()? {
                Some(c) if c != '\n' && c != '\r' => {
                    text.push(c);
                    self.read_char()?;
                }
                _ => return Ok(text),
            }
        }
    }

    /// Reads characters up to (not including) the first occurrence of `c`
    /// or of any whitespace, returning the collected text.
    pub(crate) fn read_up_to_char_or_wsc(
        &mut self,
        c: char,
    ) -> Result<String, TurtleSyntaxError> {
        let mut out = String::new();
        loop {
            match self.peek_char()? {
                Some(next) if next != c && !next.is_whitespace() => {
                    out.push(next);
                    self.read_char()?;
                }
                _ => return Ok(out),
            }
        }
    }

    pub(crate) fn next_quote_end(&mut self) -> Option<usize> {
        self.lines.next_quote_end()
    }

    pub(crate) fn current_line_str(&self) -> &str {
        self.lines.current_line()
    }

    pub(crate) fn current_index(&self) -> usize {
        self.lines.current_index()
    }

    pub(crate) fn set_current_index(&mut self, index: usize) {
        self.lines.set_current_index(index);
    }
}

fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let start_byte = s
        .char_indices()
        .nth(start)
        .map_or(s.len(), |(idx, _)| idx);
    let end_byte = s.char_indices().nth(end).map_or(s.len(), |(idx, _)| idx);
    &s[start_byte..end_byte]
}
