use std::fmt::Display;

use super::statements::Decl;

/// Node Identity
///
/// A stable identity handed out by the parser to every identifier node, both
/// references and declaration names. Passes that need per-node facts (the
/// resolver's addresses) key a side table by it instead of mutating the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Program
///
/// The root of a parsed source file: its top-level declarations in order.
/// The top level behaves like a block whose frame is the global scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<Decl>,
    /// Number of identifier nodes the parser created (`NodeId`s are `0..node_count`).
    pub node_count: u32,
}
