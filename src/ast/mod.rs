/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Statement/expression enums and the per-node semantic annotation
/// - expressions: Definitions for various expression types
/// - statements: Definitions for various statement types
/// - types: The static type model shared by the parser and the type checker
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
