//! Semantic analysis.
//!
//! Builds the lexical scope tree for a parsed program and assigns a static
//! type to every expression and statement. Analysis runs in two passes:
//!
//! - a lenient pass that defines every symbol and records the scope each
//!   node was evaluated in, tolerating names it has not seen yet
//! - a strict pass that re-checks the program, falling back on the lenient
//!   pass's scope tree, and reports every remaining semantic error
//!
//! The second pass is what lets a function call another function declared
//! further down the file.

pub mod scope;
pub mod symbol;
pub mod type_checker;

#[cfg(test)]
mod tests;
