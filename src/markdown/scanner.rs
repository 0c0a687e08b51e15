//! Character cursor over borrowed text.

/// Forward-only cursor over an immutable string.
///
/// The cursor is a byte offset that always sits on a char boundary, so
/// multi-byte characters are consumed as single units. Every method either
/// advances past what it returns or leaves the cursor untouched. The
/// scanner is `Copy`, which lets callers probe ahead on a copy and only
/// commit it back when a construct matches.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns true when no characters remain.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Current byte offset into the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Input between `start` and the cursor.
    ///
    /// `start` must be an offset previously returned by [`Scanner::position`].
    pub fn since(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }

    /// Next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character immediately before the cursor.
    pub fn previous_char(&self) -> Option<char> {
        self.input[..self.pos].chars().next_back()
    }

    /// Consumes `literal` if the remaining text starts with it.
    ///
    /// Returns false and leaves the cursor unchanged otherwise.
    pub fn try_consume_literal(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consumes everything up to, not including, the next delimiter.
    ///
    /// Stops at end of input when no delimiter follows. The returned run is
    /// empty when the cursor already sits on a delimiter.
    pub fn consume_until_any(&mut self, delimiters: &[char]) -> &'a str {
        let rest = self.rest();
        let len = rest.find(delimiters).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consumes everything up to, not including, the next `literal`.
    ///
    /// Returns `None` without moving when `literal` never occurs again, so
    /// callers can tell an unterminated construct from an empty one.
    pub fn consume_until_literal(&mut self, literal: &str) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest.find(literal)?;
        self.pos += len;
        Some(&rest[..len])
    }

    /// Consumes the remainder of the input.
    pub fn consume_rest(&mut self) -> &'a str {
        let rest = self.rest();
        self.pos = self.input.len();
        rest
    }

    /// Consumes a maximal run of characters matching `class`.
    ///
    /// Returns `None` when the next character does not match.
    pub fn consume_run_of(&mut self, class: impl Fn(char) -> bool) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !class(c))
            .map_or(rest.len(), |(i, _)| i);

        if len == 0 {
            return None;
        }

        self.pos += len;
        Some(&rest[..len])
    }

    /// Consumes exactly one character.
    pub fn consume_one_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_consume_literal_match() {
        // Arrange
        let mut scanner = Scanner::new("**bold");

        // Act
        let matched = scanner.try_consume_literal("**");

        // Assert
        assert!(matched);
        assert_eq!(scanner.rest(), "bold");
    }

    #[test]
    fn test_try_consume_literal_mismatch_keeps_cursor() {
        let mut scanner = Scanner::new("*x");

        assert!(!scanner.try_consume_literal("**"));
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_consume_until_any_stops_at_delimiter() {
        let mut scanner = Scanner::new("plain `code`");

        let run = scanner.consume_until_any(&['`', '*', '#']);

        assert_eq!(run, "plain ");
        assert_eq!(scanner.peek(), Some('`'));
    }

    #[test]
    fn test_consume_until_any_empty_on_delimiter() {
        let mut scanner = Scanner::new("#tag");

        let run = scanner.consume_until_any(&['#']);

        assert_eq!(run, "");
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_consume_until_any_reaches_end() {
        let mut scanner = Scanner::new("no delimiters");

        assert_eq!(scanner.consume_until_any(&['`']), "no delimiters");
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_consume_until_literal_missing() {
        let mut scanner = Scanner::new("never closed");

        assert_eq!(scanner.consume_until_literal("**"), None);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_consume_run_of_whitespace() {
        let mut scanner = Scanner::new(" \t title");

        let run = scanner.consume_run_of(|c| c == ' ' || c == '\t');

        assert_eq!(run, Some(" \t "));
        assert_eq!(scanner.rest(), "title");
        assert_eq!(scanner.consume_run_of(char::is_whitespace), None);
    }

    #[test]
    fn test_multibyte_characters_are_atomic() {
        // Arrange
        let mut scanner = Scanner::new("ü→x");

        // Act
        let first = scanner.consume_one_char();
        let second = scanner.consume_one_char();

        // Assert
        assert_eq!(first, Some('ü'));
        assert_eq!(second, Some('→'));
        assert_eq!(scanner.previous_char(), Some('→'));
        assert_eq!(scanner.rest(), "x");
    }

    #[test]
    fn test_consume_one_char_at_end() {
        let mut scanner = Scanner::new("");

        assert!(scanner.is_at_end());
        assert_eq!(scanner.consume_one_char(), None);
        assert_eq!(scanner.previous_char(), None);
    }
}
