use std::io::Write;

use crate::{
    ast::{
        ast::Program,
        expressions::{BinaryOperator, Expr, Identifier, Literal, UnaryOperator},
        statements::{Block, Decl, DeclKind, FnDecl, Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
    resolver::resolver::Resolutions,
    scope::scope_stack::{Address, ScopeStack},
};

use super::{
    stack::ensure_sufficient_stack,
    value::{Closure, Value},
};

/// How a statement finished.
#[derive(Debug)]
enum Flow<'a> {
    Normal,
    Return(Value<'a>),
}

fn invalid_operands(operator: BinaryOperator, left: &Value, right: &Value, line: u32) -> Error {
    Error::new(
        ErrorImpl::InvalidOperands {
            operator: operator.to_string(),
            left: left.kind_name().to_string(),
            right: right.kind_name().to_string(),
        },
        line,
    )
}

/// Largest string, in bytes, that `string * number` may produce.
pub const MAX_REPEAT_LEN: usize = 1 << 28;

/// Repeats `string` `count` times, with the count truncated toward zero.
fn repeat_string(string: &str, count: f64, line: u32) -> Result<String, Error> {
    if !count.is_finite() || count < 1.0 || string.is_empty() {
        return Ok(String::new());
    }

    let times = count.trunc() as usize;
    match string.len().checked_mul(times) {
        Some(len) if len <= MAX_REPEAT_LEN => Ok(string.repeat(times)),
        _ => Err(Error::new(
            ErrorImpl::RepeatTooLarge {
                count: count.trunc().to_string(),
                limit: MAX_REPEAT_LEN,
            },
            line,
        )),
    }
}

pub fn apply_binary<'a>(
    operator: BinaryOperator,
    left: Value<'a>,
    right: Value<'a>,
    line: u32,
) -> Result<Value<'a>, Error> {
    use BinaryOperator::*;

    let value = match (operator, &left, &right) {
        (Equal, _, _) => Value::Boolean(left == right),
        (NotEqual, _, _) => Value::Boolean(left != right),
        (Plus, Value::String(l), Value::String(r)) => Value::String(format!("{}{}", l, r)),
        (Multiply, Value::String(l), Value::Number(r)) => {
            Value::String(repeat_string(l, *r, line)?)
        }
        (Divide | Modulo, Value::Number(_), Value::Number(r)) if *r == 0.0 => {
            return Err(Error::new(ErrorImpl::DivisionByZero, line));
        }
        (Plus, Value::Number(l), Value::Number(r)) => Value::Number(l + r),
        (Minus, Value::Number(l), Value::Number(r)) => Value::Number(l - r),
        (Multiply, Value::Number(l), Value::Number(r)) => Value::Number(l * r),
        (Divide, Value::Number(l), Value::Number(r)) => Value::Number(l / r),
        (Modulo, Value::Number(l), Value::Number(r)) => Value::Number(l % r),
        (Greater, Value::Number(l), Value::Number(r)) => Value::Boolean(l > r),
        (GreaterEqual, Value::Number(l), Value::Number(r)) => Value::Boolean(l >= r),
        (Less, Value::Number(l), Value::Number(r)) => Value::Boolean(l < r),
        (LessEqual, Value::Number(l), Value::Number(r)) => Value::Boolean(l <= r),
        (And, Value::Boolean(l), Value::Boolean(r)) => Value::Boolean(*l && *r),
        (Or, Value::Boolean(l), Value::Boolean(r)) => Value::Boolean(*l || *r),
        _ => return Err(invalid_operands(operator, &left, &right, line)),
    };

    Ok(value)
}

pub fn apply_unary<'a>(
    operator: UnaryOperator,
    operand: Value<'a>,
    line: u32,
) -> Result<Value<'a>, Error> {
    match (operator, &operand) {
        (UnaryOperator::Negate, Value::Number(number)) => Ok(Value::Number(-number)),
        (UnaryOperator::Not, Value::Boolean(boolean)) => Ok(Value::Boolean(!boolean)),
        _ => Err(Error::new(
            ErrorImpl::InvalidOperand {
                operator: operator.to_string(),
                operand: operand.kind_name().to_string(),
            },
            line,
        )),
    }
}

/// Default cap on nested function calls.
pub const MAX_CALL_DEPTH: usize = 10_000;

pub struct Interpreter<'a, W: Write> {
    resolutions: &'a Resolutions,
    scopes: ScopeStack<Value<'a>>,
    out: W,
    call_depth: usize,
    max_call_depth: usize,
}

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn new(resolutions: &'a Resolutions, out: W) -> Self {
        Interpreter {
            resolutions,
            scopes: ScopeStack::new(),
            out,
            call_depth: 0,
            max_call_depth: MAX_CALL_DEPTH,
        }
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Runs every top-level declaration of `program` in the global frame.
    pub fn run(&mut self, program: &'a Program) -> Result<(), Error> {
        self.execute_declarations(&program.declarations)?;

        tracing::debug!(declarations = program.declarations.len(), "interpreted program");
        Ok(())
    }

    fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R, Error>) -> Result<R, Error> {
        self.scopes.enter_scope();
        let result = f(self);
        self.scopes.exit_scope();
        result
    }

    fn address(&self, identifier: &Identifier, line: u32) -> Result<Address, Error> {
        self.resolutions.get(identifier.id).ok_or_else(|| {
            Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: identifier.name.clone(),
                },
                line,
            )
        })
    }

    fn undefined(identifier: &Identifier, line: u32) -> Error {
        Error::new(
            ErrorImpl::UndefinedVariable {
                variable: identifier.name.clone(),
            },
            line,
        )
    }

    fn define(&mut self, identifier: &Identifier, value: Value<'a>, line: u32) -> Result<(), Error> {
        let address = self.address(identifier, line)?;
        self.scopes.define(address.slot, value);
        Ok(())
    }

    /// Runs the contents of one frame. Functions with a body are bound before
    /// anything runs so they can be called ahead of their declaration.
    fn execute_declarations(&mut self, declarations: &'a [Decl]) -> Result<Flow<'a>, Error> {
        for declaration in declarations {
            if let DeclKind::Function(function) = &declaration.kind {
                if let Some(body) = &function.body {
                    // Binding the closure in the frame it captures forms an Rc
                    // cycle, so this frame is never freed
                    let closure = Closure {
                        declaration: function,
                        body,
                        frame: self.scopes.current_frame(),
                    };
                    self.define(&function.identifier, Value::Function(closure), declaration.line)?;
                }
            }
        }

        for declaration in declarations {
            if let Flow::Return(value) = self.execute_declaration(declaration)? {
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    fn execute_declaration(&mut self, declaration: &'a Decl) -> Result<Flow<'a>, Error> {
        match &declaration.kind {
            DeclKind::Variable(variable) => {
                let value = self.evaluate(&variable.value, declaration.line)?;
                self.define(&variable.identifier, value, declaration.line)?;
                Ok(Flow::Normal)
            }
            DeclKind::Function(_) => Ok(Flow::Normal),
            DeclKind::Statement(stmt) => self.execute(stmt),
        }
    }

    fn condition(&mut self, condition: &'a Expr, line: u32) -> Result<bool, Error> {
        match self.evaluate(condition, line)? {
            Value::Boolean(value) => Ok(value),
            other => Err(Error::new(
                ErrorImpl::InvalidConditionValue {
                    value: other.kind_name().to_string(),
                },
                line,
            )),
        }
    }

    fn execute(&mut self, stmt: &'a Stmt) -> Result<Flow<'a>, Error> {
        ensure_sufficient_stack(|| self.execute_stmt(stmt))
    }

    fn execute_stmt(&mut self, stmt: &'a Stmt) -> Result<Flow<'a>, Error> {
        let line = stmt.line;

        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.evaluate(expr, line)?;
                Ok(Flow::Normal)
            }
            StmtKind::Print(expr) => {
                let value = self.evaluate(expr, line)?;
                writeln!(self.out, "{}", value).map_err(|error| {
                    Error::new(
                        ErrorImpl::OutputFailed {
                            message: error.to_string(),
                        },
                        line,
                    )
                })?;
                Ok(Flow::Normal)
            }
            StmtKind::Block(block) => {
                self.scoped(|interpreter| interpreter.execute_declarations(&block.declarations))
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.condition(condition, line)? {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            StmtKind::While { condition, body } => {
                while self.condition(condition, line)? {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            StmtKind::For {
                init,
                condition,
                increment,
                body,
            } => self.scoped(|interpreter| {
                if let Flow::Return(value) =
                    interpreter.execute_declarations(std::slice::from_ref(init.as_ref()))?
                {
                    return Ok(Flow::Return(value));
                }

                while interpreter.condition(condition, line)? {
                    if let Flow::Return(value) = interpreter.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                    interpreter.execute(increment)?;
                }
                Ok(Flow::Normal)
            }),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(value) => self.evaluate(value, line)?,
                    None => Value::Void,
                };
                Ok(Flow::Return(value))
            }
        }
    }

    pub fn evaluate(&mut self, expr: &'a Expr, line: u32) -> Result<Value<'a>, Error> {
        ensure_sufficient_stack(|| self.evaluate_expr(expr, line))
    }

    fn evaluate_expr(&mut self, expr: &'a Expr, line: u32) -> Result<Value<'a>, Error> {
        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                // Both operands are always evaluated, `&&` and `||` included
                let left = self.evaluate(left, line)?;
                let right = self.evaluate(right, line)?;
                apply_binary(*operator, left, right, line)
            }
            Expr::Unary { operator, operand } => {
                let operand = self.evaluate(operand, line)?;
                apply_unary(*operator, operand, line)
            }
            Expr::Assign { target, value } => {
                let value = self.evaluate(value, line)?;
                let address = self.address(target, line)?;
                if !self.scopes.assign(address, value.clone()) {
                    return Err(Self::undefined(target, line));
                }
                Ok(value)
            }
            Expr::Literal(literal) => Ok(match literal {
                Literal::Number(number) => Value::Number(*number),
                Literal::Boolean(boolean) => Value::Boolean(*boolean),
                Literal::String(string) => Value::String(string.clone()),
            }),
            Expr::Identifier(identifier) => {
                let address = self.address(identifier, line)?;
                self.scopes
                    .get(address)
                    .ok_or_else(|| Self::undefined(identifier, line))
            }
            Expr::Call { callee, arguments } => {
                let closure = match self.evaluate(callee, line)? {
                    Value::Function(closure) => closure,
                    other => {
                        return Err(Error::new(
                            ErrorImpl::NotAFunction {
                                value: other.to_string(),
                            },
                            line,
                        ))
                    }
                };

                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument, line)?);
                }

                self.call(closure, values, line)
            }
        }
    }

    fn run_body(
        &mut self,
        declaration: &'a FnDecl,
        body: &'a Block,
        arguments: Vec<Value<'a>>,
        line: u32,
    ) -> Result<Flow<'a>, Error> {
        // Parameters without an argument stay unbound
        for (parameter, argument) in declaration.parameters.iter().zip(arguments) {
            self.define(&parameter.identifier, argument, line)?;
        }

        self.execute_declarations(&body.declarations)
    }

    fn call(&mut self, closure: Closure<'a>, arguments: Vec<Value<'a>>, line: u32) -> Result<Value<'a>, Error> {
        if self.call_depth >= self.max_call_depth {
            return Err(Error::new(
                ErrorImpl::RecursionLimitExceeded {
                    limit: self.max_call_depth,
                },
                line,
            ));
        }

        let declaration = closure.declaration;
        tracing::trace!(
            function = closure.name(),
            arguments = arguments.len(),
            depth = self.call_depth,
            "calling function"
        );

        self.call_depth += 1;
        let saved = self.scopes.enter_frame(&closure.frame);
        let flow = self.run_body(declaration, closure.body, arguments, line);
        self.scopes.restore(saved);
        self.call_depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal if declaration.function_type.return_type.is_void() => Ok(Value::Void),
            Flow::Normal => Err(Error::new(
                ErrorImpl::MissingReturn {
                    function: closure.name().to_string(),
                },
                line,
            )),
        }
    }
}

/// Runs a resolved program, writing everything it prints to `out`.
///
/// Output produced before a runtime error stays written.
pub fn interpret<W: Write>(program: &Program, resolutions: &Resolutions, out: W) -> Result<(), Error> {
    Interpreter::new(resolutions, out).run(program)
}
