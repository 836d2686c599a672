//! Lexer.
//!
//! [`Scanner`] walks a borrowed `&str` byte by byte and yields one
//! `Result<Token, Diagnostic>` per lexeme.  A bad character or an
//! unterminated string produces an `Err` item and scanning carries on, so a
//! caller sees every lexical problem in one pass.  The stream always finishes
//! with a single `EOF` token.
//!
//! ```rust
//! use rox::scanner::scan_tokens;
//!
//! let (tokens, diagnostics) = scan_tokens("print 1 + 2; // sum");
//! assert_eq!(tokens.len(), 6);
//! assert!(diagnostics.is_empty());
//! ```

use std::iter::FusedIterator;

use log::{debug, info};
use memchr::memchr;
use phf::phf_map;

use crate::error::{Diagnostic, LoxError};
use crate::token::{Token, TokenType};

static KEYWORDS: phf::Map<&'static str, TokenType> = phf_map! {
    "and"    => TokenType::AND,
    "class"  => TokenType::CLASS,
    "else"   => TokenType::ELSE,
    "false"  => TokenType::FALSE,
    "fun"    => TokenType::FUN,
    "for"    => TokenType::FOR,
    "if"     => TokenType::IF,
    "nil"    => TokenType::NIL,
    "or"     => TokenType::OR,
    "print"  => TokenType::PRINT,
    "return" => TokenType::RETURN,
    "super"  => TokenType::SUPER,
    "this"   => TokenType::THIS,
    "true"   => TokenType::TRUE,
    "var"    => TokenType::VAR,
    "while"  => TokenType::WHILE,
};

/// `Ok(None)` means the lexeme was trivia (whitespace, newline, comment).
type Lexed = Result<Option<TokenType>, Diagnostic>;

pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    start: usize,
    current: usize,
    line: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        info!("Scanner created over {} bytes", source.len());

        Scanner {
            source,
            bytes: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
            done: false,
        }
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.current >= self.bytes.len()
    }

    /// Byte `offset` positions ahead of the cursor, `0` past the end.
    #[inline]
    fn look(&self, offset: usize) -> u8 {
        self.bytes.get(self.current + offset).copied().unwrap_or(0)
    }

    #[inline]
    fn bump(&mut self) -> u8 {
        let byte: u8 = self.look(0);
        self.current += 1;
        byte
    }

    /// `matched` if the next byte is `second` (consuming it), else `single`.
    fn either(&mut self, second: u8, matched: TokenType, single: TokenType) -> TokenType {
        if self.look(0) == second {
            self.current += 1;
            matched
        } else {
            single
        }
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn lex(&mut self) -> Lexed {
        let kind: TokenType = match self.bump() {
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

            b'!' => self.either(b'=', TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.either(b'=', TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.either(b'=', TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.either(b'=', TokenType::GREATER_EQUAL, TokenType::GREATER),

            b'/' if self.look(0) == b'/' => {
                // Stop on the newline so the line counter still sees it.
                self.current += memchr(b'\n', &self.bytes[self.current..])
                    .unwrap_or(self.bytes.len() - self.current);
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

            _ => return Err(self.unexpected()),
        };

        Ok(Some(kind))
    }

    /// Consume the whole offending code point so the next lexeme starts on a
    /// character boundary.
    fn unexpected(&mut self) -> Diagnostic {
        let ch: char = self.source[self.start..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.current = self.start + ch.len_utf8();

        LoxError::lex(self.line, format!("Unexpected character: {}", ch))
    }

    /// Strings run to the next `"` verbatim and may span lines.
    fn string(&mut self) -> Result<TokenType, Diagnostic> {
        while !self.at_end() && self.look(0) != b'"' {
            if self.bump() == b'\n' {
                self.line += 1;
            }
        }

        if self.at_end() {
            return Err(LoxError::lex(self.line, "Unterminated string."));
        }
        self.current += 1;

        let body: &str = &self.source[self.start + 1..self.current - 1];
        Ok(TokenType::STRING(body.to_owned()))
    }

    fn number(&mut self) -> TokenType {
        while self.look(0).is_ascii_digit() {
            self.current += 1;
        }

        if self.look(0) == b'.' && self.look(1).is_ascii_digit() {
            self.current += 1;
            while self.look(0).is_ascii_digit() {
                self.current += 1;
            }
        }

        // Digits with at most one interior dot always parse.
        TokenType::NUMBER(self.lexeme().parse().unwrap_or(0.0))
    }

    fn identifier(&mut self) -> TokenType {
        while matches!(self.look(0), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            self.current += 1;
        }

        KEYWORDS
            .get(self.lexeme())
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while !self.at_end() {
            self.start = self.current;

            match self.lex() {
                Ok(Some(kind)) => {
                    debug!("Scanned {} on line {}", kind.name(), self.line);
                    return Some(Ok(Token::new(kind, self.lexeme(), self.line)));
                }
                Ok(None) => {}
                Err(diagnostic) => return Some(Err(diagnostic)),
            }
        }

        self.done = true;
        Some(Ok(Token::new(TokenType::EOF, "", self.line)))
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Drain a scanner, keeping tokens and diagnostics apart.  The token list
/// ends with `EOF` even when diagnostics were produced.
pub fn scan_tokens(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let (tokens, diagnostics): (Vec<_>, Vec<_>) = Scanner::new(source).partition(Result::is_ok);

    let tokens: Vec<Token> = tokens.into_iter().filter_map(Result::ok).collect();
    let diagnostics: Vec<Diagnostic> = diagnostics.into_iter().filter_map(Result::err).collect();

    info!(
        "Scanned {} token(s) with {} diagnostic(s)",
        tokens.len(),
        diagnostics.len()
    );

    (tokens, diagnostics)
}
