use std::fmt::Display;

use thiserror::Error;

/// The phase-level category an error belongs to.
///
/// Every [`ErrorImpl`] variant maps to exactly one kind, and the kind is what
/// prefixes the rendered message (`TypeError: ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Resolve,
    Type,
    Runtime,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Resolve => "ResolveError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Runtime => "RuntimeError",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    line: u32,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: u32) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::InvalidAssignmentTarget => ErrorKind::Syntax,
            ErrorImpl::VariableNotDeclared { .. } => ErrorKind::Resolve,
            ErrorImpl::InvalidBinaryOperation { .. }
            | ErrorImpl::InvalidUnaryOperation { .. }
            | ErrorImpl::AssignmentTypeMismatch { .. }
            | ErrorImpl::DeclarationTypeMismatch { .. }
            | ErrorImpl::FunctionRedeclarationMismatch { .. }
            | ErrorImpl::VariableRedeclarationMismatch { .. }
            | ErrorImpl::NotCallable { .. }
            | ErrorImpl::ArgumentTypeMismatch { .. }
            | ErrorImpl::InvalidCondition { .. }
            | ErrorImpl::ReturnTypeMismatch { .. }
            | ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::VoidValue
            | ErrorImpl::TypeNotKnown { .. } => ErrorKind::Type,
            ErrorImpl::DivisionByZero
            | ErrorImpl::UndefinedVariable { .. }
            | ErrorImpl::NotAFunction { .. }
            | ErrorImpl::InvalidOperands { .. }
            | ErrorImpl::InvalidOperand { .. }
            | ErrorImpl::InvalidConditionValue { .. }
            | ErrorImpl::MissingReturn { .. }
            | ErrorImpl::RepeatTooLarge { .. }
            | ErrorImpl::RecursionLimitExceeded { .. }
            | ErrorImpl::OutputFailed { .. } => ErrorKind::Runtime,
        }
    }

    pub fn get_error_name(&self) -> &'static str {
        self.get_kind().name()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} at line {}",
            self.get_error_name(),
            self.internal_error,
            self.line
        )
    }
}

impl std::error::Error for Error {}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Syntax
    #[error("unrecognised token {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token {token:?}, {message}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("invalid number {token:?}")]
    NumberParseError { token: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    // Resolve
    #[error("variable {variable:?} is not declared")]
    VariableNotDeclared { variable: String },

    // Type
    #[error("invalid {operator} operation between {left} and {right}")]
    InvalidBinaryOperation {
        operator: String,
        left: String,
        right: String,
    },
    #[error("invalid {operator} operation for {operand}")]
    InvalidUnaryOperation { operator: String, operand: String },
    #[error("invalid variable assignment with type {received} for type {expected}")]
    AssignmentTypeMismatch { expected: String, received: String },
    #[error("invalid variable declaration with type {expected} for type {received}")]
    DeclarationTypeMismatch { expected: String, received: String },
    #[error("invalid function declaration with type {received} for type {previous}")]
    FunctionRedeclarationMismatch { previous: String, received: String },
    #[error("invalid redeclaration of {variable:?} with type {received}, already declared as {previous}")]
    VariableRedeclarationMismatch {
        variable: String,
        previous: String,
        received: String,
    },
    #[error("invalid {type_} type is not a function")]
    NotCallable { type_: String },
    #[error("invalid argument of type {received} for parameter of type {expected}")]
    ArgumentTypeMismatch { expected: String, received: String },
    #[error("invalid type for condition: {type_}")]
    InvalidCondition { type_: String },
    #[error("invalid return of type {received} for function returning {expected}")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("return outside of function")]
    ReturnOutsideFunction,
    #[error("void value can not be used")]
    VoidValue,
    #[error("type of {variable:?} is not known at this point")]
    TypeNotKnown { variable: String },

    // Runtime
    #[error("can not do division by zero")]
    DivisionByZero,
    #[error("variable {variable:?} is not defined")]
    UndefinedVariable { variable: String },
    #[error("{value} is not a function")]
    NotAFunction { value: String },
    #[error("invalid {operator} operation between {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("invalid {operator} operation for {operand}")]
    InvalidOperand { operator: String, operand: String },
    #[error("condition must be a boolean, found {value}")]
    InvalidConditionValue { value: String },
    #[error("function {function} ended without returning a value")]
    MissingReturn { function: String },
    #[error("string repeated {count} times would exceed {limit} bytes")]
    RepeatTooLarge { count: String, limit: usize },
    #[error("maximum call depth of {limit} exceeded")]
    RecursionLimitExceeded { limit: usize },
    #[error("failed to write output: {message}")]
    OutputFailed { message: String },
}
