use super::{
    expressions::{Expr, Identifier},
    types::{FunctionType, Type},
};

/// Statement
///
/// A statement together with the source line it starts on. The line is the
/// one reported by any error raised while processing the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

/// Statement Types
///
/// Defines the various kinds of statements in the AST.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expression(Expr),
    Print(Expr),
    Block(Block),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    /// The init declaration lives in a scope of its own wrapping the loop.
    For {
        init: Box<Decl>,
        condition: Expr,
        increment: Box<Stmt>,
        body: Box<Stmt>,
    },
    Return(Option<Expr>),
}

/// Block Statement
///
/// An ordered list of declarations evaluated in a fresh scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub declarations: Vec<Decl>,
}

/// Declaration
///
/// Anything that may appear directly inside a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Decl {
    pub kind: DeclKind,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    Variable(VarDecl),
    Function(FnDecl),
    Statement(Stmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub identifier: Identifier,
    pub var_type: Type,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub identifier: Identifier,
    pub param_type: Type,
}

/// Function Declaration
///
/// A declaration without a body only announces the function's type so it
/// can be referenced before its definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub identifier: Identifier,
    pub function_type: FunctionType,
    pub parameters: Vec<Parameter>,
    pub body: Option<Block>,
}

impl FnDecl {
    pub fn get_type(&self) -> Type {
        Type::Function(self.function_type.clone())
    }
}

impl Decl {
    pub fn statement(stmt: Stmt) -> Self {
        Decl {
            line: stmt.line,
            kind: DeclKind::Statement(stmt),
        }
    }
}
