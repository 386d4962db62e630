use crate::{type_checker::scope::ScopeId, Span};

use super::{
    expressions::{AssignmentExpr, BinaryExpr, CallExpr, LiteralExpr, PrefixExpr, SymbolExpr},
    statements::{
        BlockStmt, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt, PrintStmt, ReturnStmt,
        VarDeclStmt, WhileStmt,
    },
    types::Type,
};

/// Semantic annotation carried by every node.
///
/// Both fields start empty and are filled in by the type checker. The type
/// is re-derived by every pass; the scope is written once and then kept, so
/// a later pass can see where an earlier pass evaluated the node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    pub ty: Option<Type>,
    pub scope: Option<ScopeId>,
}

impl Annotation {
    pub fn set_type(&mut self, ty: Option<Type>) {
        self.ty = ty;
    }

    /// Records `scope` unless a scope was already recorded.
    pub fn record_scope(&mut self, scope: ScopeId) {
        self.scope.get_or_insert(scope);
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    Return(ReturnStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Print(PrintStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Block(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::Print(stmt) => &stmt.span,
        }
    }

    pub fn annotation(&self) -> &Annotation {
        match self {
            Stmt::Block(stmt) => &stmt.annotation,
            Stmt::Expression(stmt) => &stmt.annotation,
            Stmt::VarDecl(stmt) => &stmt.annotation,
            Stmt::FnDecl(stmt) => &stmt.annotation,
            Stmt::Return(stmt) => &stmt.annotation,
            Stmt::If(stmt) => &stmt.annotation,
            Stmt::While(stmt) => &stmt.annotation,
            Stmt::For(stmt) => &stmt.annotation,
            Stmt::Print(stmt) => &stmt.annotation,
        }
    }

    pub fn annotation_mut(&mut self) -> &mut Annotation {
        match self {
            Stmt::Block(stmt) => &mut stmt.annotation,
            Stmt::Expression(stmt) => &mut stmt.annotation,
            Stmt::VarDecl(stmt) => &mut stmt.annotation,
            Stmt::FnDecl(stmt) => &mut stmt.annotation,
            Stmt::Return(stmt) => &mut stmt.annotation,
            Stmt::If(stmt) => &mut stmt.annotation,
            Stmt::While(stmt) => &mut stmt.annotation,
            Stmt::For(stmt) => &mut stmt.annotation,
            Stmt::Print(stmt) => &mut stmt.annotation,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Assignment(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }

    pub fn annotation(&self) -> &Annotation {
        match self {
            Expr::Literal(expr) => &expr.annotation,
            Expr::Symbol(expr) => &expr.annotation,
            Expr::Binary(expr) => &expr.annotation,
            Expr::Prefix(expr) => &expr.annotation,
            Expr::Assignment(expr) => &expr.annotation,
            Expr::Call(expr) => &expr.annotation,
        }
    }

    pub fn annotation_mut(&mut self) -> &mut Annotation {
        match self {
            Expr::Literal(expr) => &mut expr.annotation,
            Expr::Symbol(expr) => &mut expr.annotation,
            Expr::Binary(expr) => &mut expr.annotation,
            Expr::Prefix(expr) => &mut expr.annotation,
            Expr::Assignment(expr) => &mut expr.annotation,
            Expr::Call(expr) => &mut expr.annotation,
        }
    }

    /// The resolved type, if the last pass over this node produced one.
    pub fn get_type(&self) -> Option<&Type> {
        self.annotation().ty.as_ref()
    }
}
