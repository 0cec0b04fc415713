use crate::{
    ast::{
        ast::Program,
        expressions::{BinaryOperator, Expr, Identifier, UnaryOperator},
        statements::{Block, Decl, DeclKind, FnDecl, Stmt, StmtKind, VarDecl},
        types::{FunctionType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    resolver::resolver::Resolutions,
    scope::scope_stack::{Address, ScopeStack},
};

/// Result type of a binary operation, or `None` when the operand types are
/// not accepted by the operator.
pub fn binary_result_type(operator: BinaryOperator, left: &Type, right: &Type) -> Option<Type> {
    use BinaryOperator::*;

    match (operator, left, right) {
        (Plus, Type::String, Type::String) => Some(Type::String),
        (Multiply, Type::String, Type::Number) => Some(Type::String),
        (Plus | Minus | Multiply | Divide | Modulo, Type::Number, Type::Number) => {
            Some(Type::Number)
        }
        (Greater | GreaterEqual | Less | LessEqual, Type::Number, Type::Number) => {
            Some(Type::Boolean)
        }
        (And | Or, Type::Boolean, Type::Boolean) => Some(Type::Boolean),
        (Equal | NotEqual, left, right) if left == right => Some(Type::Boolean),
        _ => None,
    }
}

pub fn unary_result_type(operator: UnaryOperator, operand: &Type) -> Option<Type> {
    match (operator, operand) {
        (UnaryOperator::Negate, Type::Number) => Some(Type::Number),
        (UnaryOperator::Not, Type::Boolean) => Some(Type::Boolean),
        _ => None,
    }
}

pub struct TypeChecker<'r> {
    resolutions: &'r Resolutions,
    scopes: ScopeStack<Type>,
    /// Declared return types of the functions being checked, innermost last.
    return_types: Vec<Type>,
}

impl<'r> TypeChecker<'r> {
    pub fn new(resolutions: &'r Resolutions) -> Self {
        TypeChecker {
            resolutions,
            scopes: ScopeStack::new(),
            return_types: Vec::new(),
        }
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

    fn define(&mut self, identifier: &Identifier, type_: Type, line: u32) -> Result<(), Error> {
        let address = self.address(identifier, line)?;
        self.scopes.define(address.slot, type_);
        Ok(())
    }

    fn lookup(&self, identifier: &Identifier, line: u32) -> Result<Type, Error> {
        let address = self.address(identifier, line)?;
        self.scopes.get(address).ok_or_else(|| {
            Error::new(
                ErrorImpl::TypeNotKnown {
                    variable: identifier.name.clone(),
                },
                line,
            )
        })
    }

    /// Checks the contents of one frame: function signatures first, then
    /// every declaration in order.
    pub fn check_declarations(&mut self, declarations: &[Decl]) -> Result<(), Error> {
        for declaration in declarations {
            if let DeclKind::Function(function) = &declaration.kind {
                self.declare_function(function, declaration.line)?;
            }
        }

        for declaration in declarations {
            self.check_declaration(declaration)?;
        }

        Ok(())
    }

    fn declare_function(&mut self, function: &FnDecl, line: u32) -> Result<(), Error> {
        let address = self.address(&function.identifier, line)?;
        let function_type = function.get_type();

        if let Some(previous) = self.scopes.get(address) {
            if previous != function_type {
                return Err(Error::new(
                    ErrorImpl::FunctionRedeclarationMismatch {
                        previous: previous.to_string(),
                        received: function_type.to_string(),
                    },
                    line,
                ));
            }
        }

        self.scopes.define(address.slot, function_type);
        Ok(())
    }

    fn check_declaration(&mut self, declaration: &Decl) -> Result<(), Error> {
        let line = declaration.line;

        match &declaration.kind {
            DeclKind::Variable(variable) => self.check_variable(variable, line),
            DeclKind::Function(function) => match &function.body {
                Some(body) => self.check_function_body(function, body, line),
                None => Ok(()),
            },
            DeclKind::Statement(stmt) => self.check_stmt(stmt),
        }
    }

    fn check_variable(&mut self, variable: &VarDecl, line: u32) -> Result<(), Error> {
        let value_type = self.check_value_expr(&variable.value, line)?;

        if value_type != variable.var_type {
            return Err(Error::new(
                ErrorImpl::DeclarationTypeMismatch {
                    expected: variable.var_type.to_string(),
                    received: value_type.to_string(),
                },
                line,
            ));
        }

        // Closures already checked against this slot must keep seeing its type
        let address = self.address(&variable.identifier, line)?;
        if let Some(previous) = self.scopes.get(address) {
            if previous != variable.var_type {
                return Err(Error::new(
                    ErrorImpl::VariableRedeclarationMismatch {
                        variable: variable.identifier.name.clone(),
                        previous: previous.to_string(),
                        received: variable.var_type.to_string(),
                    },
                    line,
                ));
            }
        }

        self.scopes.define(address.slot, variable.var_type.clone());
        Ok(())
    }

    fn check_function_body(&mut self, function: &FnDecl, body: &Block, line: u32) -> Result<(), Error> {
        tracing::trace!(function = function.identifier.name.as_str(), "checking function body");

        self.return_types
            .push(function.function_type.return_type.as_ref().clone());

        let result = self.scoped(|checker| {
            for parameter in &function.parameters {
                checker.define(&parameter.identifier, parameter.param_type.clone(), line)?;
            }
            checker.check_declarations(&body.declarations)
        });

        self.return_types.pop();
        result
    }

    fn check_condition(&mut self, condition: &Expr, line: u32) -> Result<(), Error> {
        let condition_type = self.check_expr(condition, line)?;

        if condition_type != Type::Boolean {
            return Err(Error::new(
                ErrorImpl::InvalidCondition {
                    type_: condition_type.to_string(),
                },
                line,
            ));
        }

        Ok(())
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        let line = stmt.line;

        match &stmt.kind {
            StmtKind::Expression(expr) => {
                self.check_expr(expr, line)?;
                Ok(())
            }
            StmtKind::Print(expr) => {
                self.check_value_expr(expr, line)?;
                Ok(())
            }
            StmtKind::Block(block) => {
                self.scoped(|checker| checker.check_declarations(&block.declarations))
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.check_condition(condition, line)?;
                self.check_stmt(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch)?;
                }
                Ok(())
            }
            StmtKind::While { condition, body } => {
                self.check_condition(condition, line)?;
                self.check_stmt(body)
            }
            StmtKind::For {
                init,
                condition,
                increment,
                body,
            } => self.scoped(|checker| {
                checker.check_declarations(std::slice::from_ref(init.as_ref()))?;
                checker.check_condition(condition, line)?;
                checker.check_stmt(increment)?;
                checker.check_stmt(body)
            }),
            StmtKind::Return(value) => self.check_return(value.as_ref(), line),
        }
    }

    fn check_return(&mut self, value: Option<&Expr>, line: u32) -> Result<(), Error> {
        let Some(expected) = self.return_types.last().cloned() else {
            return Err(Error::new(ErrorImpl::ReturnOutsideFunction, line));
        };

        let received = match value {
            Some(value) => self.check_expr(value, line)?,
            None => Type::Void,
        };

        if received != expected {
            return Err(Error::new(
                ErrorImpl::ReturnTypeMismatch {
                    expected: expected.to_string(),
                    received: received.to_string(),
                },
                line,
            ));
        }

        Ok(())
    }

    /// Like `check_expr`, for positions that need an actual value.
    fn check_value_expr(&mut self, expr: &Expr, line: u32) -> Result<Type, Error> {
        let expr_type = self.check_expr(expr, line)?;

        if expr_type.is_void() {
            return Err(Error::new(ErrorImpl::VoidValue, line));
        }

        Ok(expr_type)
    }

    pub fn check_expr(&mut self, expr: &Expr, line: u32) -> Result<Type, Error> {
        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.check_value_expr(left, line)?;
                let right = self.check_value_expr(right, line)?;

                binary_result_type(*operator, &left, &right).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::InvalidBinaryOperation {
                            operator: operator.to_string(),
                            left: left.to_string(),
                            right: right.to_string(),
                        },
                        line,
                    )
                })
            }
            Expr::Unary { operator, operand } => {
                let operand = self.check_value_expr(operand, line)?;

                unary_result_type(*operator, &operand).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::InvalidUnaryOperation {
                            operator: operator.to_string(),
                            operand: operand.to_string(),
                        },
                        line,
                    )
                })
            }
            Expr::Assign { target, value } => {
                let value_type = self.check_value_expr(value, line)?;
                let target_type = self.lookup(target, line)?;

                if value_type != target_type {
                    return Err(Error::new(
                        ErrorImpl::AssignmentTypeMismatch {
                            expected: target_type.to_string(),
                            received: value_type.to_string(),
                        },
                        line,
                    ));
                }

                Ok(target_type)
            }
            Expr::Literal(literal) => Ok(literal.get_type()),
            Expr::Identifier(identifier) => self.lookup(identifier, line),
            Expr::Call { callee, arguments } => {
                let callee_type = self.check_value_expr(callee, line)?;
                let FunctionType {
                    parameters,
                    return_type,
                } = match callee_type {
                    Type::Function(function_type) => function_type,
                    other => {
                        return Err(Error::new(
                            ErrorImpl::NotCallable {
                                type_: other.to_string(),
                            },
                            line,
                        ))
                    }
                };

                // Only the overlapping prefix is checked; arity is not enforced
                for (parameter, argument) in parameters.iter().zip(arguments) {
                    let argument_type = self.check_value_expr(argument, line)?;
                    if &argument_type != parameter {
                        return Err(Error::new(
                            ErrorImpl::ArgumentTypeMismatch {
                                expected: parameter.to_string(),
                                received: argument_type.to_string(),
                            },
                            line,
                        ));
                    }
                }

                Ok(*return_type)
            }
        }
    }
}

/// Type checks a resolved program, stopping at the first violation.
pub fn type_check(program: &Program, resolutions: &Resolutions) -> Result<(), Error> {
    let mut checker = TypeChecker::new(resolutions);
    checker.check_declarations(&program.declarations)?;

    tracing::debug!(declarations = program.declarations.len(), "type checked program");
    Ok(())
}
