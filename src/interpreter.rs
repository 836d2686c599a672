//! Tree‑walking evaluator.
//!
//! Statements execute for effect and report how control left them through
//! [`Flow`]; a `return` travels back up as `Flow::Return` until the enclosing
//! call boundary consumes it.  Runtime errors are the only abrupt unwind and
//! propagate with `?` all the way out of [`Interpreter::interpret`].

use std::io::Write;
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{ClassDecl, Expr, ExprId, LiteralValue, Stmt};
use crate::callable::{Callable, LoxClass, LoxFunction, NativeFunction, INITIALIZER};
use crate::environment::{EnvRef, Environment};
use crate::error::RuntimeError;
use crate::resolver::Locals;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Fell off the end; continue with the next statement.
    Normal,

    /// A `return` is unwinding to the nearest call boundary.
    Return(Value),
}

/// Convenient alias for interpreter results.
pub type IResult<T> = Result<T, RuntimeError>;

/// Deepest chain of active Lox calls before a call fails with
/// "Stack overflow.".
pub const MAX_CALL_DEPTH: usize = 1024;

/// Keep this much native stack free before entering a call, growing onto a
/// fresh segment otherwise.
const RED_ZONE: usize = 128 * 1024;

/// Size of each extra stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

pub struct Interpreter<W: Write> {
    globals: EnvRef,
    environment: EnvRef,
    locals: Locals,
    depth: usize,
    out: W,
}

impl<W: Write> Interpreter<W> {
    /// Creates a new Interpreter writing `print` output to `out`, with the
    /// native `clock` defined globally.
    pub fn new(out: W) -> Self {
        info!("Initializing Interpreter");

        let globals: EnvRef = Environment::new().into_shared();

        debug!("Defining native function 'clock'");

        globals.borrow_mut().define(
            "clock",
            Value::NativeFunction(Rc::new(NativeFunction::clock())),
        );

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: Locals::new(),
            depth: 0,
            out,
        }
    }

    /// Everything printed so far.
    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Every name currently bound in the global scope.
    pub fn global_names(&self) -> Vec<String> {
        self.globals.borrow().names().map(str::to_owned).collect()
    }

    /// Merge binding distances from a resolver run.  Earlier entries are
    /// kept: closures from previous submissions still refer to them.
    pub fn resolve(&mut self, locals: Locals) {
        debug!("Recording {} resolved local(s)", locals.len());

        self.locals.extend(locals);
    }

    /// Interprets a list of statements (a "program").  Stops at the first
    /// runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> IResult<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            self.execute(stmt)?;
        }

        info!("Interpretation completed successfully");
        Ok(())
    }

    /// Like [`interpret`](Self::interpret), but a top‑level expression
    /// statement prints its value, as an interactive prompt would.
    pub fn interpret_repl(&mut self, statements: &[Stmt]) -> IResult<()> {
        for stmt in statements {
            match stmt {
                Stmt::Expression(expr) => {
                    let value: Value = self.evaluate(expr)?;
                    self.emit(&value)?;
                }
                _ => {
                    self.execute(stmt)?;
                }
            }
        }

        Ok(())
    }

    // ───────────────────────────── statements ─────────────────────────────

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> IResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;
                self.emit(&value)?;
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Defining variable '{}' = {}", name.lexeme, value);

                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let environment: EnvRef = Environment::child_of(&self.environment);
                self.execute_block(statements, environment)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_stmt) = else_branch {
                    self.execute(else_stmt)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }

                Ok(Flow::Normal)
            }

            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name.lexeme);

                let function = LoxFunction::new(
                    Rc::clone(declaration),
                    Rc::clone(&self.environment),
                    false,
                );
                self.environment.borrow_mut().define(
                    &declaration.name.lexeme,
                    Value::Function(Rc::new(function)),
                );
                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Returning value: {}", value);

                Ok(Flow::Return(value))
            }

            Stmt::Class(class) => self.execute_class(class),
        }
    }

    /// Run `statements` inside `environment`, restoring the current
    /// environment on every exit path.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: EnvRef) -> IResult<Flow> {
        let previous: EnvRef = std::mem::replace(&mut self.environment, environment);

        let mut result: IResult<Flow> = Ok(Flow::Normal);
        for stmt in statements {
            result = self.execute(stmt);
            if !matches!(result, Ok(Flow::Normal)) {
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn execute_class(&mut self, class: &ClassDecl) -> IResult<Flow> {
        debug!("Defining class '{}'", class.name.lexeme);

        let superclass: Option<Rc<LoxClass>> = match &class.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(superclass) => Some(superclass),
                _ => {
                    let token: &Token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => &class.name,
                    };
                    return Err(RuntimeError::new(token, "Superclass must be a class."));
                }
            },
            None => None,
        };

        // Methods may mention the class by name before it exists.
        self.environment
            .borrow_mut()
            .define(&class.name.lexeme, Value::Nil);

        let method_env: EnvRef = match &superclass {
            Some(superclass) => {
                let environment: EnvRef = Environment::child_of(&self.environment);
                environment
                    .borrow_mut()
                    .define("super", Value::Class(Rc::clone(superclass)));
                environment
            }
            None => Rc::clone(&self.environment),
        };

        let methods = class
            .methods
            .iter()
            .map(|method| {
                let function = LoxFunction::new(
                    Rc::clone(method),
                    Rc::clone(&method_env),
                    method.name.lexeme == INITIALIZER,
                );
                (method.name.lexeme.clone(), Rc::new(function))
            })
            .collect();

        let lox_class = LoxClass::new(class.name.lexeme.clone(), superclass, methods);

        self.environment
            .borrow_mut()
            .define(&class.name.lexeme, Value::Class(Rc::new(lox_class)));

        info!(
            "Class '{}' defined with {} method(s)",
            class.name.lexeme,
            class.methods.len()
        );
        Ok(Flow::Normal)
    }

    fn emit(&mut self, value: &Value) -> IResult<()> {
        writeln!(self.out, "{}", value).map_err(|e| RuntimeError {
            line: 0,
            message: format!("Failed to write output: {}", e),
        })
    }

    // ──────────────────────────── expressions ─────────────────────────────

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> IResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::from(s.as_str()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left_val: Value = self.evaluate(left)?;

                let short_circuit: bool = if operator.token_type == TokenType::OR {
                    left_val.is_truthy()
                } else {
                    !left_val.is_truthy()
                };

                if short_circuit {
                    Ok(left_val)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => {
                        Environment::assign_at(&self.environment, distance, name, value.clone())?
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee: Value = self.evaluate(callee)?;

                let mut values: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                match &callee {
                    Value::NativeFunction(function) => self.invoke(function.as_ref(), paren, values),
                    Value::Function(function) => self.invoke(function.as_ref(), paren, values),
                    Value::Class(class) => self.invoke(class, paren, values),
                    _ => Err(RuntimeError::new(
                        paren,
                        "Can only call functions and classes.",
                    )),
                }
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => instance.get(name),
                _ => Err(RuntimeError::new(name, "Only instances have properties.")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(RuntimeError::new(name, "Only instances have fields."));
                };

                let value: Value = self.evaluate(value)?;
                instance.set(name, value.clone());
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> IResult<Value> {
        let right_val: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right_val {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
            },
            TokenType::BANG => Ok(Value::Bool(!right_val.is_truthy())),
            _ => Err(RuntimeError::new(operator, "Invalid unary operator.")),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> IResult<Value> {
        let left_val: Value = self.evaluate(left)?;
        let right_val: Value = self.evaluate(right)?;

        debug!(
            "Binary '{}': left={}, right={}",
            operator.lexeme, left_val, right_val
        );

        match operator.token_type {
            TokenType::PLUS => match (left_val, right_val) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::from(format!("{a}{b}"))),
                (a @ Value::String(_), b) | (a, b @ Value::String(_)) => {
                    Ok(Value::from(format!("{a}{b}")))
                }
                _ => Err(RuntimeError::new(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::SLASH => {
                let (a, b) = number_operands(operator, &left_val, &right_val)?;
                if b == 0.0 {
                    return Err(RuntimeError::new(operator, "Division by zero."));
                }
                Ok(Value::Number(a / b))
            }

            TokenType::MINUS => {
                let (a, b) = number_operands(operator, &left_val, &right_val)?;
                Ok(Value::Number(a - b))
            }

            TokenType::STAR => {
                let (a, b) = number_operands(operator, &left_val, &right_val)?;
                Ok(Value::Number(a * b))
            }

            TokenType::GREATER => {
                let (a, b) = number_operands(operator, &left_val, &right_val)?;
                Ok(Value::Bool(a > b))
            }

            TokenType::GREATER_EQUAL => {
                let (a, b) = number_operands(operator, &left_val, &right_val)?;
                Ok(Value::Bool(a >= b))
            }

            TokenType::LESS => {
                let (a, b) = number_operands(operator, &left_val, &right_val)?;
                Ok(Value::Bool(a < b))
            }

            TokenType::LESS_EQUAL => {
                let (a, b) = number_operands(operator, &left_val, &right_val)?;
                Ok(Value::Bool(a <= b))
            }

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left_val == right_val)),

            TokenType::BANG_EQUAL => Ok(Value::Bool(left_val != right_val)),

            _ => Err(RuntimeError::new(operator, "Invalid binary operator.")),
        }
    }

    fn evaluate_super(&mut self, id: ExprId, keyword: &Token, method: &Token) -> IResult<Value> {
        let distance: usize = *self
            .locals
            .get(&id)
            .ok_or_else(|| RuntimeError::new(keyword, "Can't use 'super' here."))?;

        let Value::Class(superclass) = Environment::get_at(&self.environment, distance, keyword)?
        else {
            return Err(RuntimeError::new(keyword, "Superclass must be a class."));
        };

        // `this` lives in the scope directly inside the one holding `super`.
        let instance = Environment::ancestor(&self.environment, distance.saturating_sub(1))
            .and_then(|frame| frame.borrow().lookup("this"));
        let Some(Value::Instance(instance)) = instance else {
            return Err(RuntimeError::new(keyword, "Can't use 'super' here."));
        };

        let Some(found) = superclass.find_method(&method.lexeme) else {
            return Err(RuntimeError::new(
                method,
                format!("Undefined property '{}'.", method.lexeme),
            ));
        };

        Ok(Value::Function(Rc::new(found.bind(instance))))
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> IResult<Value> {
        match self.locals.get(&id) {
            Some(&distance) => Environment::get_at(&self.environment, distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    /// Check arity, then hand control to the callee.
    fn invoke<C: Callable>(
        &mut self,
        callee: &C,
        paren: &Token,
        arguments: Vec<Value>,
    ) -> IResult<Value> {
        if arguments.len() != callee.arity() {
            return Err(RuntimeError::new(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    callee.arity(),
                    arguments.len()
                ),
            ));
        }

        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::new(paren, "Stack overflow."));
        }

        self.depth += 1;
        let result: IResult<Value> =
            stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || callee.call(self, arguments));
        self.depth -= 1;

        result
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> IResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
    }
}
