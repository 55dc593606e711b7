//! Module `scanner` implements a one‑pass, streaming lexer.
//!
//! It transforms source text into a sequence of owned [`Token`]s, skipping
//! whitespace and comments, and emitting exactly one `EOF` token at the end.
//! Designed as a `FusedIterator`, it can be chained safely with other
//! iterator adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &str) -> Scanner<'_>`
//! - `impl Iterator for Scanner<'_>` yielding `Result<Token, LoxError>`; an
//!   `Err` reports a lexing error and scanning continues after it.
//! - [`scan`] collects a whole source into tokens or all lexical errors.
//!
//! Token boundaries always fall on ASCII bytes, so lexemes are sliced out of
//! the `&str` directly without re‑validating UTF‑8.

use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};
use log::{debug, info, trace};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"class"  => TokenType::CLASS,
    b"else"   => TokenType::ELSE,
    b"false"  => TokenType::FALSE,
    b"fun"    => TokenType::FUN,
    b"for"    => TokenType::FOR,
    b"if"     => TokenType::IF,
    b"nil"    => TokenType::NIL,
    b"or"     => TokenType::OR,
    b"return" => TokenType::RETURN,
    b"super"  => TokenType::SUPER,
    b"this"   => TokenType::THIS,
    b"true"   => TokenType::TRUE,
    b"var"    => TokenType::VAR,
    b"while"  => TokenType::WHILE,
};

/// A single pass **scanner / lexer** over a source string.
pub struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    start: usize, // first byte of the lexeme being scanned
    curr: usize,  // one past the last byte consumed
    line: usize,  // 1‑based
    done: bool,   // EOF token already emitted
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            bytes: src.as_bytes(),
            start: 0,
            curr: 0,
            line: 1,
            done: false,
        }
    }

    // ───────────────────────────── byte cursor ─────────────────────────────

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.bytes.len()
    }

    /// Byte `offset` positions ahead of the cursor, `0` past the end.
    #[inline(always)]
    fn byte_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.curr + offset).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn peek(&self) -> u8 {
        self.byte_at(0)
    }

    /// Callers guard with [`Self::is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes[self.curr];
        self.curr += 1;
        b
    }

    /// `long` if the next byte is `=` (consuming it), `short` otherwise.
    #[inline(always)]
    fn with_equals(&mut self, long: TokenType, short: TokenType) -> TokenType {
        if self.peek() == b'=' {
            self.curr += 1;
            long
        } else {
            short
        }
    }

    fn advance_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_at_end() && pred(self.peek()) {
            self.curr += 1;
        }
    }

    fn lexeme(&self) -> &'a str {
        &self.src[self.start..self.curr]
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Consume one lexeme starting at `self.curr`. Whitespace and comments
    /// yield `Ok(None)`.
    fn scan_token(&mut self) -> Result<Option<TokenType>> {
        let kind = match self.advance() {
            b'(' => TokenType::LEFT_PAREN,
            b')' => TokenType::RIGHT_PAREN,
            b'{' => TokenType::LEFT_BRACE,
            b'}' => TokenType::RIGHT_BRACE,
            b',' => TokenType::COMMA,
            b'.' => TokenType::DOT,
            b'-' => TokenType::MINUS,
            b'+' => TokenType::PLUS,
            b';' => TokenType::SEMICOLON,
            b'*' => TokenType::STAR,
            b':' => TokenType::COLON,

            b'!' => self.with_equals(TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.with_equals(TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.with_equals(TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.with_equals(TokenType::GREATER_EQUAL, TokenType::GREATER),

            b'/' if self.peek() == b'/' => {
                // Stop on the newline itself so the line counter still sees it.
                self.curr = memchr(b'\n', &self.bytes[self.curr..])
                    .map_or(self.bytes.len(), |pos| self.curr + pos);
                return Ok(None);
            }
            b'/' => TokenType::SLASH,

            b' ' | b'\r' | b'\t' => return Ok(None),

            b'\n' => {
                self.line += 1;
                return Ok(None);
            }

            b'"' => self.string()?,

            b'0'..=b'9' => self.number(),

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(),

            _ => return Err(self.unexpected_character()),
        };

        Ok(Some(kind))
    }

    /// Report the character starting at `self.start`, consuming all of its
    /// UTF‑8 continuation bytes so it produces a single error.
    fn unexpected_character(&mut self) -> LoxError {
        self.advance_while(|b| b & 0xC0 == 0x80);

        let ch = self
            .lexeme()
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);

        LoxError::lex(self.line, format!("Unexpected character: {}", ch))
    }

    /// Double‑quoted string; may span lines. The opening quote is consumed.
    fn string(&mut self) -> Result<TokenType> {
        let first_line = self.line;

        while !self.is_at_end() && self.peek() != b'"' {
            if self.advance() == b'\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            debug!("String opened on line {} never closed", first_line);
            return Err(LoxError::lex(self.line, "Unterminated string."));
        }

        self.curr += 1; // closing quote

        let contents = &self.src[self.start + 1..self.curr - 1];
        Ok(TokenType::STRING(contents.to_owned()))
    }

    /// `123` or `3.14`; a trailing `.` is left for the next token.
    fn number(&mut self) -> TokenType {
        self.advance_while(|b| b.is_ascii_digit());

        if self.peek() == b'.' && self.byte_at(1).is_ascii_digit() {
            self.curr += 1;
            self.advance_while(|b| b.is_ascii_digit());
        }

        // Only ASCII digits and at most one interior dot reach here.
        TokenType::NUMBER(self.lexeme().parse().unwrap_or(0.0))
    }

    fn identifier(&mut self) -> TokenType {
        self.advance_while(|b| b.is_ascii_alphanumeric() || b == b'_');

        KEYWORDS
            .get(self.lexeme().as_bytes())
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER)
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl Iterator for Scanner<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.is_at_end() {
            self.start = self.curr;

            match self.scan_token() {
                Ok(Some(kind)) => {
                    trace!("Scanned {} on line {}", kind.name(), self.line);
                    return Some(Ok(Token::new(kind, self.lexeme(), self.line)));
                }
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }

        // Exactly one EOF, then the iterator is exhausted.
        if self.done {
            return None;
        }
        self.done = true;

        Some(Ok(Token::new(TokenType::EOF, "", self.line)))
    }
}

impl FusedIterator for Scanner<'_> {}

/// Scan a whole source text. Returns every token (ending in `EOF`) or, if
/// anything failed to lex, every lexical error.
pub fn scan(source: &str) -> std::result::Result<Vec<Token>, Vec<LoxError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in Scanner::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }

    debug!(
        "Scan finished: {} token(s), {} error(s)",
        tokens.len(),
        errors.len()
    );

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}
