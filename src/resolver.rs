//! Static resolver pass for the **Lox** interpreter.
//!
//! This resolver does three things in one AST walk:
//! 1. Build lexical scopes (stack of `HashMap<&str,bool>` tracking declared/defined).
//! 2. Report static errors (redeclaration, forward‑read in initializer, invalid
//!    `return`, misplaced `this`/`super`, self‑inheritance).
//! 3. Record, for *each* variable occurrence, whether it is a local (and at
//!    what depth) or a global, so the interpreter never falls back to dynamic
//!    lookup that would see a later shadowing local.
//!
//! Errors never stop the walk; every diagnostic for the submission is
//! returned together.

use std::collections::{HashMap, HashSet};

use crate::ast::{ClassDecl, Expr, ExprId, FunctionDecl, Stmt};
use crate::error::{Diagnostic, LoxError};
use crate::token::Token;
use log::{debug, info};

/// Binding distance of every resolved local reference, keyed by node identity.
/// References absent from the table are globals.
pub type Locals = HashMap<ExprId, usize>;

/// Are we inside a user function?  Used to validate `return`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
}

/// Are we inside a class body?  Used to validate `this` and `super`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// Resolver: tracks scopes, enforces static rules, and records binding
/// distances into a [`Locals`] table.
pub struct Resolver<'a> {
    scopes: Vec<HashMap<&'a str, bool>>, // false=declared, true=defined
    globals: HashSet<String>,
    locals: Locals,
    diagnostics: Vec<Diagnostic>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a> Default for Resolver<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Resolver<'a> {
    pub fn new() -> Self {
        Self::with_globals(std::iter::empty())
    }

    /// A resolver that already knows some global names, e.g. those defined
    /// by earlier REPL submissions.
    pub fn with_globals<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        info!("Resolver instantiated");
        Resolver {
            scopes: Vec::new(),
            globals: names.into_iter().collect(),
            locals: Locals::new(),
            diagnostics: Vec::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    /// Walk all top‑level statements and hand back the distance table, or
    /// every diagnostic found.
    pub fn resolve(mut self, statements: &'a [Stmt]) -> Result<Locals, Vec<Diagnostic>> {
        info!(
            "Beginning resolve pass over {} statement(s)",
            statements.len()
        );

        self.globals.extend(top_level_names(statements));
        self.resolve_stmts(statements);

        if self.diagnostics.is_empty() {
            info!("Resolved {} local reference(s)", self.locals.len());

            Ok(self.locals)
        } else {
            info!(
                "Resolve pass found {} diagnostic(s)",
                self.diagnostics.len()
            );

            Err(self.diagnostics)
        }
    }

    fn resolve_stmts(&mut self, statements: &'a [Stmt]) {
        for stmt in statements {
            self.resolve_stmt(stmt);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statement resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::Class(class) => self.resolve_class(class),

            Stmt::Block(statements) => {
                self.begin_scope();
                self.resolve_stmts(statements);
                self.end_scope();
            }

            Stmt::Var { name, initializer } => {
                // declare → resolve initializer → define
                self.declare(name);
                if let Some(expr) = initializer {
                    self.resolve_expr(expr);
                }
                self.define(name);
            }

            Stmt::Function(function) => {
                // the name is visible *inside* its own body
                self.declare(&function.name);
                self.define(&function.name);
                self.resolve_function(function, FunctionType::Function);
            }

            Stmt::Expression(expr) | Stmt::Print(expr) => {
                self.resolve_expr(expr);
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(eb) = else_branch.as_deref() {
                    self.resolve_stmt(eb);
                }
            }

            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }

            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.error(keyword, "Can't return from top-level code.");
                }
                if let Some(expr) = value {
                    self.resolve_expr(expr);
                }
            }
        }
    }

    /// Scopes opened for a class, outermost first: `super` (subclasses only),
    /// then `this`, then one parameter scope per method.
    fn resolve_class(&mut self, class: &'a ClassDecl) {
        let enclosing_class = self.current_class;
        self.current_class = ClassType::Class;

        self.declare(&class.name);
        self.define(&class.name);

        if let Some(superclass) = &class.superclass {
            if let Expr::Variable { name, .. } = superclass {
                if name.lexeme == class.name.lexeme {
                    self.error(name, "A class can't inherit from itself.");
                }
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            self.begin_scope();
            self.define_implicit("super");
        }

        self.begin_scope();
        self.define_implicit("this");

        for method in &class.methods {
            self.resolve_function(method, FunctionType::Function);
        }

        self.end_scope();

        if class.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expression resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Literal(_) => {}

            Expr::Grouping(inner) => self.resolve_expr(inner),

            Expr::Unary { right, .. } => self.resolve_expr(right),

            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }

            Expr::Variable { id, name } => {
                let in_own_initializer: bool = self
                    .scopes
                    .last()
                    .is_some_and(|scope| scope.get(name.lexeme.as_str()) == Some(&false));

                if !in_own_initializer {
                    self.resolve_local(*id, name);
                } else if !self.resolve_shadowed(*id, name) {
                    self.error(name, "Can't read local variable in its own initializer.");
                }
            }

            Expr::Assign { id, name, value } => {
                // First resolve RHS, then bind LHS
                self.resolve_expr(value);
                self.resolve_local(*id, name);
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee);
                for arg in arguments {
                    self.resolve_expr(arg);
                }
            }

            Expr::Get { object, .. } => self.resolve_expr(object),

            Expr::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }

            Expr::This { id, keyword } => {
                if self.current_class == ClassType::None {
                    self.error(keyword, "Can't use 'this' outside of a class.");
                }
                self.resolve_local(*id, keyword);
            }

            Expr::Super { id, keyword, .. } => match self.current_class {
                ClassType::None => {
                    self.error(keyword, "Can't use 'super' outside of a class.");
                }
                ClassType::Class => {
                    self.error(keyword, "Can't use 'super' in a class with no superclass.");
                }
                ClassType::Subclass => self.resolve_local(*id, keyword),
            },
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Function helper
    // ─────────────────────────────────────────────────────────────────────────

    /// Enter a fresh scope for a function's parameters + body.
    fn resolve_function(&mut self, function: &'a FunctionDecl, kind: FunctionType) {
        let enclosing = self.current_function;
        self.current_function = kind;

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_stmts(&function.body);
        self.end_scope();

        self.current_function = enclosing;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scope management
    // ─────────────────────────────────────────────────────────────────────────

    #[inline]
    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    #[inline]
    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &'a Token) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };

        if scope.contains_key(name.lexeme.as_str()) {
            self.error(name, "Already a variable with this name in this scope.");
            return;
        }

        scope.insert(name.lexeme.as_str(), false);
    }

    fn define(&mut self, name: &'a Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.as_str(), true);
        }
    }

    /// Bind a keyword (`this`/`super`) in the innermost scope.
    fn define_implicit(&mut self, keyword: &'static str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(keyword, true);
        }
    }

    fn error(&mut self, token: &Token, message: &str) {
        debug!("Resolve error at line {}: {}", token.line, message);

        self.diagnostics.push(LoxError::resolve(token, message));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Binding‑distance helper
    // ─────────────────────────────────────────────────────────────────────────

    /// Record this occurrence as a local at depth `d`, or leave it out of the
    /// table (global) if no scope declares it.
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name.lexeme.as_str()) {
                debug!("Resolved '{}' at depth {}", name.lexeme, depth);
                self.locals.insert(id, depth);
                return;
            }
        }

        debug!("Resolved '{}' as global", name.lexeme);
    }

    /// Inside `var x = <init>`, `x` names the binding the new one is about
    /// to shadow: an outer local, or any global of this submission or an
    /// earlier one, wherever it is declared.  Returns `false` when there is
    /// no such binding.
    fn resolve_shadowed(&mut self, id: ExprId, name: &Token) -> bool {
        for (depth, scope) in self.scopes.iter().rev().enumerate().skip(1) {
            if scope.contains_key(name.lexeme.as_str()) {
                debug!("Resolved shadowed '{}' at depth {}", name.lexeme, depth);
                self.locals.insert(id, depth);
                return true;
            }
        }

        self.globals.contains(name.lexeme.as_str())
    }
}

/// Names the submission declares at top level, in any order.
fn top_level_names(statements: &[Stmt]) -> impl Iterator<Item = String> + '_ {
    statements.iter().filter_map(|stmt| match stmt {
        Stmt::Var { name, .. } => Some(name.lexeme.clone()),
        Stmt::Function(function) => Some(function.name.lexeme.clone()),
        Stmt::Class(class) => Some(class.name.lexeme.clone()),
        _ => None,
    })
}
