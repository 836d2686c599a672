//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! Static phases (scanner, parser, resolver) never abort on the first problem:
//! they collect [`Diagnostic`]s and hand the whole list back to the caller.
//! Evaluation is different: a [`RuntimeError`] unwinds the interpreter's call
//! stack immediately and at most one is reported per run.
//!
//! The module **does not** print diagnostics itself

use std::fmt;

use log::info;
use thiserror::Error;

use crate::token::{Token, TokenType};

/// Where on its line a [`Diagnostic`] points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The whole line (scanner errors).
    Line,

    /// The synthetic end‑of‑file token.
    AtEnd,

    /// A concrete lexeme.
    At(String),
}

impl Location {
    /// Location hint for an offending token.
    pub fn of(token: &Token) -> Self {
        if token.token_type == TokenType::EOF {
            Location::AtEnd
        } else {
            Location::At(token.lexeme.clone())
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Line => Ok(()),
            Location::AtEnd => write!(f, " at end"),
            Location::At(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

/// A compile‑time (scan, parse or resolve) problem with its source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Diagnostic {
    /// 1‑based line where the error occurred.
    pub line: usize,

    pub location: Location,

    /// Human‑readable description.
    pub message: String,
}

/// An unrecovered evaluation failure, carrying the offending token's line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}\n[line {line}]")]
pub struct RuntimeError {
    pub line: usize,
    pub message: String,
}

impl RuntimeError {
    pub fn new<S: Into<String>>(token: &Token, msg: S) -> Self {
        RuntimeError {
            line: token.line,
            message: msg.into(),
        }
    }
}

/// Canonical error type returned by the embedding API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// One or more static diagnostics; the program was not executed.
    #[error("{}", render_all(.0))]
    Compile(Vec<Diagnostic>),

    /// Runtime evaluation error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

fn render_all(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl LoxError {
    /// Helper constructor for the **scanner**: whole‑line diagnostics.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Diagnostic {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        Diagnostic {
            line,
            location: Location::Line,
            message,
        }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Diagnostic {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", token.line, message);

        Diagnostic {
            line: token.line,
            location: Location::of(token),
            message,
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Diagnostic {
        let message: String = msg.into();

        info!("Creating Resolve error: line={}, msg={}", token.line, message);

        Diagnostic {
            line: token.line,
            location: Location::of(token),
            message,
        }
    }

    /// Static diagnostics carried by this error, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            LoxError::Compile(diagnostics) => diagnostics,
            _ => &[],
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
