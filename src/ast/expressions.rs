use crate::{lexer::tokens::Token, Span};

use super::ast::{Annotation, Expr};

// LITERALS

/// Literal Expression
/// Represents an integer, float, string or boolean literal. The token kind
/// decides the built-in type.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub token: Token,
    pub span: Span,
    pub annotation: Annotation,
}

/// Symbol Expression
/// Represents a reference to a variable or function by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
    pub annotation: Annotation,
}

// COMPLEX

/// Binary Expression
/// Represents a binary operation between two expressions, e.g. `a + b`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
    pub annotation: Annotation,
}

/// Prefix Expression
/// Represents a unary operation, `-x` or `!x`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: Box<Expr>,
    pub span: Span,
    pub annotation: Annotation,
}

/// Assignment Expression
/// `assignee = value`; its type is the type of `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: Box<Expr>,
    pub operator: Token,
    pub value: Box<Expr>,
    pub span: Span,
    pub annotation: Annotation,
}

/// Call Expression
/// Only named functions can be called.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: SymbolExpr,
    pub arguments: Vec<Expr>,
    pub span: Span,
    pub annotation: Annotation,
}
