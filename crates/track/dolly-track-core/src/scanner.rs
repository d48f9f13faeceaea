//! Backtracking cursor over track text.
//!
//! Grammar mismatches that a caller may want to recover from come back as
//! `bool`/`Option` with the cursor untouched. Hard failures (`expect`,
//! `finish`, `fail`) produce a [`TrackError::Parse`] carrying an excerpt of the
//! remaining input.

use crate::error::TrackError;

/// Longest excerpt of remaining input attached to a parse error.
pub const CONTEXT_CHARS: usize = 32;

/// Handle for an open transaction; must be committed or aborted in LIFO order.
#[derive(Debug)]
#[must_use = "a checkpoint has to be committed or aborted"]
pub struct Checkpoint {
    depth: usize,
}

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    offset: usize,
    checkpoints: Vec<usize>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            checkpoints: Vec::new(),
        }
    }

    /// Byte offset of the cursor.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    /// Advance past spaces and newlines. Tabs and other whitespace are significant.
    pub fn skip_whitespace(&mut self) {
        let skipped = self
            .rest()
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\n')
            .count();
        self.offset += skipped;
    }

    pub fn begin(&mut self) -> Checkpoint {
        self.checkpoints.push(self.offset);
        Checkpoint {
            depth: self.checkpoints.len() - 1,
        }
    }

    /// Close a transaction, keeping everything consumed since `begin`.
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        debug_assert_eq!(
            checkpoint.depth + 1,
            self.checkpoints.len(),
            "checkpoints must be closed in reverse order"
        );
        self.checkpoints.truncate(checkpoint.depth);
    }

    /// Close a transaction and rewind the cursor to where it was opened.
    pub fn abort(&mut self, checkpoint: Checkpoint) {
        debug_assert_eq!(
            checkpoint.depth + 1,
            self.checkpoints.len(),
            "checkpoints must be closed in reverse order"
        );
        if let Some(&offset) = self.checkpoints.get(checkpoint.depth) {
            self.offset = offset;
        }
        self.checkpoints.truncate(checkpoint.depth);
    }

    /// Case-sensitive lookahead; consumes nothing.
    #[inline]
    pub fn starts_with(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    pub fn expect(&mut self, literal: &str) -> Result<(), TrackError> {
        self.skip_whitespace();
        if !self.starts_with(literal) {
            return Err(self.fail(format!("Bad input: expected '{literal}'")));
        }
        self.offset += literal.len();
        Ok(())
    }

    pub fn accept(&mut self, literal: &str) -> bool {
        self.skip_whitespace();
        self.eat(literal)
    }

    /// Signed decimal integer without redundant leading zeros.
    pub fn read_integer(&mut self) -> Option<i64> {
        let cp = self.begin();
        self.skip_whitespace();
        let start = self.offset;
        self.eat("-");
        if !self.scan_unsigned() {
            self.abort(cp);
            return None;
        }
        match self.text[start..self.offset].parse::<i64>() {
            Ok(value) => {
                self.commit(cp);
                Some(value)
            }
            Err(_) => {
                self.abort(cp);
                None
            }
        }
    }

    /// Signed decimal float, or the literal `NaN`.
    ///
    /// The integer part follows the integer grammar; it may be left out only
    /// when at least one fractional digit follows the dot (`.5`). A trailing
    /// dot without digits after an integer part is accepted (`3.`).
    pub fn read_float(&mut self) -> Option<f64> {
        let cp = self.begin();
        self.skip_whitespace();
        if self.eat("NaN") {
            self.commit(cp);
            return Some(f64::NAN);
        }

        let start = self.offset;
        self.eat("-");
        let fraction_required = if self.scan_unsigned() {
            false
        } else if self.starts_with(".") {
            true
        } else {
            self.abort(cp);
            return None;
        };

        if self.eat(".") {
            let digits = self.scan_digits();
            if fraction_required && digits == 0 {
                self.abort(cp);
                return None;
            }
        }

        match self.text[start..self.offset].parse::<f64>() {
            Ok(value) => {
                self.commit(cp);
                Some(value)
            }
            Err(_) => {
                self.abort(cp);
                None
            }
        }
    }

    /// Succeeds only when no transaction is open and nothing but whitespace remains.
    pub fn finish(&mut self) -> Result<(), TrackError> {
        if !self.checkpoints.is_empty() {
            return Err(self.fail("Parsing ended, but transactions were still open."));
        }
        self.skip_whitespace();
        if self.offset < self.text.len() {
            return Err(self.fail("Parsing ended, but text was left over"));
        }
        Ok(())
    }

    /// Build a parse error localized by an excerpt of the remaining input.
    pub fn fail(&self, message: impl Into<String>) -> TrackError {
        let context: String = self.rest().chars().take(CONTEXT_CHARS).collect();
        TrackError::parse(message, context)
    }

    #[inline]
    fn eat(&mut self, literal: &str) -> bool {
        if !self.starts_with(literal) {
            return false;
        }
        self.offset += literal.len();
        true
    }

    fn scan_digits(&mut self) -> usize {
        let count = self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        self.offset += count;
        count
    }

    /// `0` alone, or `1`-`9` followed by digits. Leaves the cursor untouched on failure.
    fn scan_unsigned(&mut self) -> bool {
        let bytes = self.rest().as_bytes();
        match bytes.first() {
            Some(b'0') => {
                if bytes.get(1).is_some_and(u8::is_ascii_digit) {
                    return false;
                }
                self.offset += 1;
                true
            }
            Some(b'1'..=b'9') => {
                self.scan_digits();
                true
            }
            _ => false,
        }
    }
}
