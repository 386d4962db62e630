use log::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::LiteralExpr,
        statements::{BlockStmt, FnDeclStmt, ForStmt, PrintStmt, ReturnStmt, VarDeclStmt},
        types::{Literals, Type},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    scope::{ScopeError, ScopeId, ScopeTree},
    symbol::{FunctionRef, Symbol},
};

/// The return statement seen most recently inside a function body.
#[derive(Debug)]
struct ReturnRecord {
    ty: Option<Type>,
    position: Position,
}

#[derive(Debug, Default)]
struct FunctionFrame {
    returned: Option<ReturnRecord>,
}

/// Result of a successful analysis.
///
/// `scopes` is the tree built by the strict pass. Every node of the program
/// also carries the scope it was evaluated in and its final type.
#[derive(Debug)]
pub struct Analysis {
    pub scopes: ScopeTree,
}

/// One traversal of the program.
///
/// A lenient checker treats names it cannot resolve as "type not known yet"
/// and keeps going. A strict checker reports them, and may be given the tree
/// of an earlier lenient pass to fall back on for names that are declared
/// later in the source than they are used.
#[derive(Debug)]
pub struct TypeChecker<'a> {
    strict: bool,
    previous: Option<&'a ScopeTree>,
    scopes: ScopeTree,
    functions: Vec<FunctionFrame>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(strict: bool, previous: Option<&'a ScopeTree>) -> Self {
        TypeChecker {
            strict,
            previous,
            scopes: ScopeTree::new(),
            functions: vec![],
        }
    }

    /// Runs this pass over `program` and hands back the scope tree it built.
    pub fn check_program(mut self, program: &mut BlockStmt) -> Result<ScopeTree, Error> {
        debug!("starting {} pass", if self.strict { "strict" } else { "lenient" });

        for stmt in program.iter_mut() {
            type_check_stmt(&mut self, stmt)?;
        }

        program.annotation.set_type(Some(Type::builtin(Literals::Void)));
        program.annotation.record_scope(self.scopes.root());

        debug!("{} pass created {} scopes", if self.strict { "strict" } else { "lenient" }, self.scopes.scope_count());
        Ok(self.scopes)
    }

    fn push_scope(&mut self) -> ScopeId {
        self.scopes.create_child()
    }

    fn pop_scope(&mut self, position: &Position) -> Result<(), Error> {
        self.scopes
            .pop()
            .map(|_| ())
            .map_err(|_| Error::new(ErrorImpl::ScopeUnderflow, position.clone()))
    }

    fn define(&mut self, symbol: Symbol) {
        self.scopes.define(symbol);
    }

    /// Finds `name` from the current scope, falling back to the previous
    /// pass's tree at the scope the node was recorded in.
    ///
    /// A symbol with a concrete type wins over one whose type is still
    /// being inferred.
    fn lookup(&self, name: &str, recorded: Option<ScopeId>) -> Result<Symbol, ScopeError> {
        let found = self.scopes.resolve(name, None);

        if let Ok(symbol) = &found {
            if !symbol.ty().is_inferred() {
                return Ok((*symbol).clone());
            }
        }

        let fallback = match (self.previous, recorded) {
            (Some(previous), Some(scope)) => previous.resolve(name, Some(scope)).ok(),
            _ => None,
        };

        match (found, fallback) {
            (_, Some(symbol)) if !symbol.ty().is_inferred() => Ok(symbol.clone()),
            (Ok(symbol), _) => Ok(symbol.clone()),
            (Err(_), Some(symbol)) => Ok(symbol.clone()),
            (Err(error), None) => Err(error),
        }
    }

    /// Resolves the type an identifier evaluates to.
    ///
    /// `Ok(None)` is only ever returned by a lenient pass.
    fn resolve_identifier(&self, name: &str, recorded: Option<ScopeId>, position: &Position, call: bool) -> Result<Option<Type>, Error> {
        let symbol = match self.lookup(name, recorded) {
            Ok(symbol) => symbol,
            Err(ScopeError::NotFound { .. }) if !self.strict => {
                trace!("deferring `{}` to the strict pass", name);
                return Ok(None);
            }
            Err(_) => {
                return Err(Error::new(ErrorImpl::UnresolvedIdentifier { identifier: name.to_string() }, position.clone()));
            }
        };

        if call && !symbol.is_callable() {
            if self.strict {
                return Err(Error::new(ErrorImpl::NotCallable { identifier: name.to_string() }, position.clone()));
            }
            return Ok(None);
        }

        if symbol.ty().is_inferred() {
            if self.strict {
                return Err(Error::new(ErrorImpl::UninferredType { identifier: name.to_string() }, position.clone()));
            }
            return Ok(None);
        }

        Ok(Some(symbol.ty().clone()))
    }
}

fn literal_type(literal: &LiteralExpr) -> Result<Type, Error> {
    match literal.token.kind {
        TokenKind::Integer => Ok(Type::builtin(Literals::Int)),
        TokenKind::Float => Ok(Type::builtin(Literals::Float)),
        TokenKind::String => Ok(Type::builtin(Literals::String)),
        TokenKind::True | TokenKind::False => Ok(Type::builtin(Literals::Boolean)),
        _ => Err(Error::new(ErrorImpl::UnexpectedTokenDetailed {
            token: literal.token.value.clone(),
            message: String::from("expected a literal value"),
        }, literal.span.start.clone())),
    }
}

/// Type of `left operator right`.
///
/// Relational and logical operators always give `Boolean`. Arithmetic needs
/// identical operand types and gives the left one. When an operand type is
/// not known yet the comparison waits for the strict pass.
fn binary_type(operator: &Token, left: Option<Type>, right: Option<Type>, position: &Position) -> Result<Option<Type>, Error> {
    if operator.kind.is_relational_or_logical() {
        return Ok(Some(Type::builtin(Literals::Boolean)));
    }

    match (left, right) {
        (Some(left), Some(right)) => {
            if left.matches(&right) {
                Ok(Some(left))
            } else {
                Err(Error::new(ErrorImpl::TypeMismatch { left: left.to_string(), right: right.to_string() }, position.clone()))
            }
        }
        (left, _) => Ok(left),
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &mut Expr) -> Result<Option<Type>, Error> {
    let ty = match expr {
        Expr::Literal(literal) => Some(literal_type(literal)?),
        Expr::Symbol(symbol) => {
            type_checker.resolve_identifier(&symbol.value, symbol.annotation.scope, &symbol.span.start, false)?
        }
        Expr::Binary(binary) => {
            let left = type_check_expr(type_checker, &mut binary.left)?;
            let right = type_check_expr(type_checker, &mut binary.right)?;

            binary_type(&binary.operator, left, right, &binary.span.start)?
        }
        Expr::Prefix(prefix) => {
            let operand = type_check_expr(type_checker, &mut prefix.right_expr)?;

            match prefix.operator.kind {
                TokenKind::Not => Some(Type::builtin(Literals::Boolean)),
                _ => operand,
            }
        }
        Expr::Assignment(assignment) => {
            type_check_expr(type_checker, &mut assignment.assignee)?;
            type_check_expr(type_checker, &mut assignment.value)?
        }
        Expr::Call(call) => {
            for argument in call.arguments.iter_mut() {
                type_check_expr(type_checker, argument)?;
            }

            let callee = &mut call.callee;
            let ty = type_checker.resolve_identifier(&callee.value, callee.annotation.scope, &callee.span.start, true)?;
            callee.annotation.set_type(ty.clone());
            callee.annotation.record_scope(type_checker.scopes.current());

            ty
        }
    };

    let annotation = expr.annotation_mut();
    annotation.set_type(ty.clone());
    annotation.record_scope(type_checker.scopes.current());

    Ok(ty)
}

fn type_check_var_decl(type_checker: &mut TypeChecker, decl: &mut VarDeclStmt) -> Result<Option<Type>, Error> {
    if !decl.explicit_type.is_inferred() {
        type_checker.define(Symbol::variable(&decl.identifier, decl.explicit_type.clone()));

        if let Some(value) = decl.assigned_value.as_mut() {
            type_check_expr(type_checker, value)?;
        }

        return Ok(Some(decl.explicit_type.clone()));
    }

    let Some(value) = decl.assigned_value.as_mut() else {
        return Err(Error::new(ErrorImpl::ExpectedExplicitValue, decl.span.start.clone()));
    };

    let ty = type_check_expr(type_checker, value)?;
    type_checker.define(Symbol::variable(&decl.identifier, ty.clone().unwrap_or(Type::builtin(Literals::Inferred))));

    Ok(ty)
}

/// Checks a function declaration and returns its effective return type.
///
/// The callable symbol is bound before the body is visited so recursive
/// calls resolve, then bound again once the return type is settled.
fn type_check_fn_decl(type_checker: &mut TypeChecker, function: &mut FnDeclStmt) -> Result<Option<Type>, Error> {
    let reference = FunctionRef {
        id: function.id,
        parameters: function.parameters.clone(),
    };
    type_checker.define(Symbol::callable(&function.identifier, function.return_type.clone(), reference.clone()));

    type_checker.push_scope();
    for (name, ty) in function.parameters.iter() {
        type_checker.define(Symbol::variable(name, ty.clone()));
    }

    type_checker.functions.push(FunctionFrame::default());
    for stmt in function.body.iter_mut() {
        type_check_stmt(type_checker, stmt)?;
    }
    let frame = type_checker.functions.pop().unwrap_or_default();

    type_checker.pop_scope(&function.span.end)?;

    let effective = if function.return_type.is_inferred() {
        match frame.returned {
            Some(record) => record.ty,
            None => Some(Type::builtin(Literals::Void)),
        }
    } else {
        if type_checker.strict {
            if let Some(ReturnRecord { ty: Some(received), position }) = &frame.returned {
                if !received.matches(&function.return_type) {
                    return Err(Error::new(ErrorImpl::ReturnTypeMismatch {
                        expected: function.return_type.to_string(),
                        received: received.to_string(),
                    }, position.clone()));
                }
            }
        }

        Some(function.return_type.clone())
    };

    debug!(
        "function `{}` returns {}",
        function.identifier,
        effective.as_ref().map_or(String::from("<unknown>"), |ty| ty.to_string())
    );

    let return_type = effective.clone().unwrap_or(Type::builtin(Literals::Inferred));
    type_checker.define(Symbol::callable(&function.identifier, return_type, reference));

    Ok(effective)
}

fn type_check_return(type_checker: &mut TypeChecker, stmt: &mut ReturnStmt) -> Result<Option<Type>, Error> {
    if type_checker.functions.is_empty() && type_checker.strict {
        return Err(Error::new(ErrorImpl::ReturnOutsideFunction, stmt.span.start.clone()));
    }

    let Some(value) = stmt.value.as_mut() else {
        return Ok(Some(Type::builtin(Literals::Void)));
    };

    let ty = type_check_expr(type_checker, value)?;

    if let Some(frame) = type_checker.functions.last_mut() {
        frame.returned = Some(ReturnRecord {
            ty: ty.clone(),
            position: stmt.span.start.clone(),
        });
    }

    Ok(ty)
}

fn type_check_for(type_checker: &mut TypeChecker, stmt: &mut ForStmt) -> Result<(), Error> {
    type_check_stmt(type_checker, &mut stmt.setup)?;

    let predicate = type_check_expr(type_checker, &mut stmt.predicate)?;
    if type_checker.strict && !predicate.as_ref().is_some_and(Type::is_boolean) {
        return Err(Error::new(ErrorImpl::NonBooleanPredicate {
            received: predicate.map_or(String::from("<unknown>"), |ty| ty.to_string()),
        }, stmt.predicate.get_span().start.clone()));
    }

    type_check_expr(type_checker, &mut stmt.update)?;
    type_check_body(type_checker, &mut stmt.body)
}

fn type_check_print(type_checker: &mut TypeChecker, stmt: &mut PrintStmt) -> Result<(), Error> {
    let ty = type_check_expr(type_checker, &mut stmt.expression)?;

    if type_checker.strict && ty.as_ref().is_some_and(Type::is_void) {
        return Err(Error::new(ErrorImpl::VoidPrint, stmt.span.start.clone()));
    }

    Ok(())
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &mut Stmt) -> Result<(), Error> {
    let void = Some(Type::builtin(Literals::Void));

    let ty = match stmt {
        Stmt::Block(block) => {
            type_check_block(type_checker, block)?;
            void
        }
        Stmt::Expression(expression) => type_check_expr(type_checker, &mut expression.expression)?,
        Stmt::VarDecl(decl) => type_check_var_decl(type_checker, decl)?,
        Stmt::FnDecl(function) => type_check_fn_decl(type_checker, function)?,
        Stmt::Return(stmt) => type_check_return(type_checker, stmt)?,
        Stmt::If(if_stmt) => {
            type_check_expr(type_checker, &mut if_stmt.condition)?;
            type_check_body(type_checker, &mut if_stmt.then_body)?;

            if let Some(else_body) = if_stmt.else_body.as_mut() {
                type_check_body(type_checker, else_body)?;
            }
            void
        }
        Stmt::While(while_stmt) => {
            type_check_expr(type_checker, &mut while_stmt.condition)?;
            type_check_body(type_checker, &mut while_stmt.body)?;
            void
        }
        Stmt::For(for_stmt) => {
            type_check_for(type_checker, for_stmt)?;
            void
        }
        Stmt::Print(print) => {
            type_check_print(type_checker, print)?;
            void
        }
    };

    let annotation = stmt.annotation_mut();
    annotation.set_type(ty);
    annotation.record_scope(type_checker.scopes.current());

    Ok(())
}

/// Checks the body of a conditional or loop.
///
/// A body always gets its own scope. Blocks open one themselves, any other
/// statement is wrapped in one here.
fn type_check_body(type_checker: &mut TypeChecker, body: &mut Stmt) -> Result<(), Error> {
    if matches!(body, Stmt::Block(_)) {
        return type_check_stmt(type_checker, body);
    }

    type_checker.push_scope();
    type_check_stmt(type_checker, body)?;
    type_checker.pop_scope(&body.get_span().end)
}

/// Checks a nested block inside a scope of its own.
pub fn type_check_block(type_checker: &mut TypeChecker, block: &mut BlockStmt) -> Result<(), Error> {
    type_checker.push_scope();

    for stmt in block.iter_mut() {
        type_check_stmt(type_checker, stmt)?;
    }

    type_checker.pop_scope(&block.span.end)
}

/// Runs the lenient pass only, returning the scope tree it built.
pub fn lenient_check(ast: &mut BlockStmt) -> Result<ScopeTree, Error> {
    TypeChecker::new(false, None).check_program(ast)
}

/// Analyses `ast` in two passes.
///
/// The lenient pass builds a complete scope tree, recording on each node the
/// scope it was evaluated in. The strict pass then re-checks everything with
/// that tree to fall back on, so uses that precede their declaration resolve.
pub fn type_check(ast: &mut BlockStmt) -> Result<Analysis, Error> {
    let lenient = lenient_check(ast)?;
    let scopes = TypeChecker::new(true, Some(&lenient)).check_program(ast)?;

    Ok(Analysis { scopes })
}
