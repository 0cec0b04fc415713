/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node identity and the program root
/// - expressions: Definitions for the expression sum type and operators
/// - statements: Definitions for statements, blocks and declarations
/// - types: Definitions for static type representations
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
