//! A tree‑walking interpreter for the Lox scripting language.
//!
//! Source text flows through four stages: [`scanner`] → [`parser`] →
//! [`resolver`] → [`interpreter`].  The [`Lox`] session wires them together
//! and keeps global state alive between submissions, so a host can feed it a
//! whole file once or a prompt one line at a time.
//!
//! ```
//! use rox::Lox;
//!
//! let mut lox = Lox::with_output(Vec::new());
//! lox.run("fun add(a, b) { return a + b; }").unwrap();
//! lox.run("print add(1, 2);").unwrap();
//!
//! assert_eq!(lox.into_output(), b"3\n");
//! ```

pub mod ast;
pub mod callable;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod token;
pub mod value;

use std::io::{self, Write};

use log::{debug, info};

use crate::ast::Stmt;
use crate::error::{Diagnostic, LoxError, Result};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;

/// An embedding session: one interpreter whose globals persist across calls.
pub struct Lox<W: Write> {
    interpreter: Interpreter<W>,
}

impl Lox<io::Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Lox<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Lox<W> {
    /// A session whose `print` output goes to `out`.
    pub fn with_output(out: W) -> Self {
        Lox {
            interpreter: Interpreter::new(out),
        }
    }

    /// Scan, parse, resolve and execute `source`.
    ///
    /// Nothing runs if any static diagnostic was reported; all of them are
    /// returned together in [`LoxError::Compile`].  Otherwise execution stops
    /// at the first [`LoxError::Runtime`].
    pub fn run(&mut self, source: &str) -> Result<()> {
        let statements: Vec<Stmt> = self.compile(source)?;

        self.interpreter.interpret(&statements)?;
        Ok(())
    }

    /// [`run`](Self::run) for an interactive prompt: top‑level expression
    /// statements print their value.
    pub fn run_line(&mut self, source: &str) -> Result<()> {
        let statements: Vec<Stmt> = self.compile(source)?;

        self.interpreter.interpret_repl(&statements)?;
        Ok(())
    }

    pub fn interpreter(&self) -> &Interpreter<W> {
        &self.interpreter
    }

    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }

    /// Front half of the pipeline.  Lexical and syntax diagnostics are
    /// reported together; the resolver only sees a well‑formed tree.
    fn compile(&mut self, source: &str) -> Result<Vec<Stmt>> {
        info!("Compiling {} byte(s) of source", source.len());

        let (tokens, mut diagnostics) = scanner::scan_tokens(source);

        let statements: Vec<Stmt> = match Parser::new(&tokens).parse() {
            Ok(statements) => statements,
            Err(parse_diagnostics) => {
                diagnostics.extend(parse_diagnostics);
                return Err(compile_error(diagnostics));
            }
        };

        if !diagnostics.is_empty() {
            return Err(compile_error(diagnostics));
        }

        let locals = Resolver::with_globals(self.interpreter.global_names())
            .resolve(&statements)
            .map_err(compile_error)?;

        self.interpreter.resolve(locals);

        debug!("Compiled {} top-level statement(s)", statements.len());

        Ok(statements)
    }
}

/// Diagnostics in source order, scanner and parser findings interleaved.
fn compile_error(mut diagnostics: Vec<Diagnostic>) -> LoxError {
    diagnostics.sort_by_key(|diagnostic| diagnostic.line);
    LoxError::Compile(diagnostics)
}
