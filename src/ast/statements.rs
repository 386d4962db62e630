use std::slice::{Iter, IterMut};

use crate::Span;

use super::{
    ast::{Annotation, Expr, Stmt},
    types::Type,
};

/// A braced list of statements. Every block except the program root opens
/// its own scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub id: i32,
    pub span: Span,
    pub annotation: Annotation,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, Stmt> {
        self.body.iter_mut()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
    pub annotation: Annotation,
}

/// `let name: ty = value;`
///
/// `explicit_type` holds `Literals::Inferred` when the annotation was left out.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub explicit_type: Type,
    pub assigned_value: Option<Expr>,
    pub span: Span,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
    pub span: Span,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub setup: Box<Stmt>,
    pub predicate: Expr,
    pub update: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
    pub annotation: Annotation,
}

/// Function declaration. Parameters and body statements share one scope.
///
/// `return_type` holds `Literals::Inferred` when no `->` clause was written.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<(String, Type)>,
    pub return_type: Type,
    pub body: Vec<Stmt>,
    pub id: i32,
    pub span: Span,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expression: Expr,
    pub span: Span,
    pub annotation: Annotation,
}
