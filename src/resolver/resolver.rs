//! Static name resolution.
//!
//! Walks the program once, mirroring the frames the type checker and the
//! interpreter will push, and records an [`Address`] for every identifier
//! node: references get the address of the declaration they see, and
//! declaration names get the slot they occupy in their own frame.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::{NodeId, Program},
        expressions::{Expr, Identifier},
        statements::{Block, Decl, DeclKind, FnDecl, Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
    scope::scope_stack::Address,
};

/// Side table from identifier node to its static address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolutions {
    addresses: HashMap<NodeId, Address>,
}

impl Resolutions {
    pub fn with_capacity(capacity: usize) -> Self {
        Resolutions {
            addresses: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<Address> {
        self.addresses.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    fn insert(&mut self, id: NodeId, address: Address) {
        self.addresses.insert(id, address);
    }
}

pub struct Resolver {
    /// Name to slot, one map per open frame. The first map is the global frame.
    scopes: Vec<HashMap<String, usize>>,
    resolutions: Resolutions,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            scopes: vec![HashMap::new()],
            resolutions: Resolutions::default(),
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
        tracing::trace!(depth = self.scopes.len() - 1, "resolver entered scope");
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R, Error>) -> Result<R, Error> {
        self.begin_scope();
        let result = f(self);
        self.end_scope();
        result
    }

    /// Registers a name in the current frame. Redeclaring a name reuses its slot.
    fn declare(&mut self, identifier: &Identifier) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        let next_slot = scope.len();
        let slot = *scope.entry(identifier.name.clone()).or_insert(next_slot);

        self.resolutions.insert(identifier.id, Address::new(0, slot));
    }

    fn resolve_identifier(&mut self, identifier: &Identifier, line: u32) -> Result<(), Error> {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if let Some(&slot) = scope.get(&identifier.name) {
                let address = Address::new(distance, slot);
                tracing::trace!(
                    name = identifier.name.as_str(),
                    id = %identifier.id,
                    %address,
                    "resolved identifier"
                );
                self.resolutions.insert(identifier.id, address);
                return Ok(());
            }
        }

        Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: identifier.name.clone(),
            },
            line,
        ))
    }

    /// Resolves the contents of one frame. Function names are registered
    /// before anything else so they can be referenced ahead of their
    /// declaration.
    pub fn resolve_declarations(&mut self, declarations: &[Decl]) -> Result<(), Error> {
        for declaration in declarations {
            if let DeclKind::Function(function) = &declaration.kind {
                self.declare(&function.identifier);
            }
        }

        for declaration in declarations {
            self.resolve_declaration(declaration)?;
        }

        Ok(())
    }

    fn resolve_declaration(&mut self, declaration: &Decl) -> Result<(), Error> {
        match &declaration.kind {
            DeclKind::Variable(variable) => {
                self.resolve_expr(&variable.value, declaration.line)?;
                self.declare(&variable.identifier);
                Ok(())
            }
            DeclKind::Function(function) => self.resolve_function(function),
            DeclKind::Statement(stmt) => self.resolve_stmt(stmt),
        }
    }

    fn resolve_function(&mut self, function: &FnDecl) -> Result<(), Error> {
        let Some(body) = &function.body else {
            return Ok(());
        };

        // Parameters and the body's own declarations share one frame
        self.scoped(|resolver| {
            for parameter in &function.parameters {
                resolver.declare(&parameter.identifier);
            }
            resolver.resolve_declarations(&body.declarations)
        })
    }

    fn resolve_block(&mut self, block: &Block) -> Result<(), Error> {
        self.scoped(|resolver| resolver.resolve_declarations(&block.declarations))
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        let line = stmt.line;

        match &stmt.kind {
            StmtKind::Expression(expr) | StmtKind::Print(expr) => self.resolve_expr(expr, line),
            StmtKind::Block(block) => self.resolve_block(block),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition, line)?;
                self.resolve_stmt(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch)?;
                }
                Ok(())
            }
            StmtKind::While { condition, body } => {
                self.resolve_expr(condition, line)?;
                self.resolve_stmt(body)
            }
            StmtKind::For {
                init,
                condition,
                increment,
                body,
            } => self.scoped(|resolver| {
                resolver.resolve_declarations(std::slice::from_ref(init.as_ref()))?;
                resolver.resolve_expr(condition, line)?;
                resolver.resolve_stmt(increment)?;
                resolver.resolve_stmt(body)
            }),
            StmtKind::Return(value) => match value {
                Some(value) => self.resolve_expr(value, line),
                None => Ok(()),
            },
        }
    }

    fn resolve_expr(&mut self, expr: &Expr, line: u32) -> Result<(), Error> {
        match expr {
            Expr::Binary { left, right, .. } => {
                self.resolve_expr(left, line)?;
                self.resolve_expr(right, line)
            }
            Expr::Unary { operand, .. } => self.resolve_expr(operand, line),
            Expr::Assign { target, value } => {
                self.resolve_expr(value, line)?;
                self.resolve_identifier(target, line)
            }
            Expr::Literal(_) => Ok(()),
            Expr::Identifier(identifier) => self.resolve_identifier(identifier, line),
            Expr::Call { callee, arguments } => {
                self.resolve_expr(callee, line)?;
                for argument in arguments {
                    self.resolve_expr(argument, line)?;
                }
                Ok(())
            }
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the address of every identifier in `program`.
///
/// Fails with a `ResolveError` on the first reference to a name that no
/// enclosing frame has declared at that point.
pub fn resolve(program: &Program) -> Result<Resolutions, Error> {
    // Every identifier node gets exactly one address
    let mut resolver = Resolver {
        resolutions: Resolutions::with_capacity(program.node_count as usize),
        ..Resolver::new()
    };
    resolver.resolve_declarations(&program.declarations)?;

    tracing::debug!(
        addresses = resolver.resolutions.len(),
        "resolved program"
    );

    Ok(resolver.resolutions)
}
