//! Resolver module.
//!
//! Computes a static `(distance, slot)` address for every identifier node and
//! stores it in a [`resolver::Resolutions`] side table keyed by node id. It is
//! the only pass that decides the shape of the scopes; the type checker and
//! the interpreter only follow the addresses it produced.

pub mod resolver;

#[cfg(test)]
mod tests;
