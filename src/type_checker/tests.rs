//! Unit tests for the type checker module.
//!
//! This module contains tests for scope construction, symbol resolution
//! and the typing rules of both passes.

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Annotation, Expr, Stmt},
        statements::BlockStmt,
        types::{Literals, Type},
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::{
    scope::{ScopeError, ScopeId, ScopeTree},
    symbol::{FunctionRef, Symbol},
    type_checker::{lenient_check, type_check, Analysis, TypeChecker},
};

fn parse_source(source: &str) -> BlockStmt {
    let tokens = tokenize(source.to_string(), Some("test.lang".to_string())).unwrap();
    parse(tokens, Rc::new("test.lang".to_string())).unwrap()
}

fn check_source(source: &str) -> Result<(BlockStmt, Analysis), Error> {
    let mut program = parse_source(source);
    let analysis = type_check(&mut program)?;
    Ok((program, analysis))
}

fn int() -> Type {
    Type::builtin(Literals::Int)
}

fn expression_type(stmt: &Stmt) -> Option<&Type> {
    match stmt {
        Stmt::Expression(expression) => expression.expression.get_type(),
        other => panic!("Expected expression statement, found {:?}", other),
    }
}

#[test]
fn test_scope_tree_starts_at_root() {
    let tree = ScopeTree::new();

    assert_eq!(tree.current(), ScopeId::ROOT);
    assert_eq!(tree.scope_count(), 1);
    assert_eq!(tree.parent(ScopeId::ROOT), None);
}

#[test]
fn test_pop_root_scope_fails() {
    let mut tree = ScopeTree::new();

    assert_eq!(tree.pop(), Err(ScopeError::Underflow));
}

#[test]
fn test_child_scope_sees_parent_symbols() {
    let mut tree = ScopeTree::new();
    tree.define(Symbol::variable("x", int()));

    let child = tree.create_child();

    assert_eq!(tree.current(), child);
    assert_eq!(tree.resolve("x", None).unwrap().ty(), &int());
    assert!(tree.is_within(child, ScopeId::ROOT));
}

#[test]
fn test_sibling_scopes_are_isolated() {
    let mut tree = ScopeTree::new();

    let first = tree.create_child();
    tree.define(Symbol::variable("hidden", int()));
    tree.pop().unwrap();

    let second = tree.create_child();

    assert!(tree.resolve("hidden", Some(first)).is_ok());
    assert_eq!(
        tree.resolve("hidden", Some(second)),
        Err(ScopeError::NotFound { name: "hidden".to_string() })
    );
    assert!(tree.resolve("hidden", Some(ScopeId::ROOT)).is_err());
}

#[test]
fn test_popped_scope_keeps_its_symbols() {
    let mut tree = ScopeTree::new();

    let child = tree.create_child();
    tree.define(Symbol::variable("kept", int()));
    assert_eq!(tree.pop(), Ok(child));

    assert_eq!(tree.current(), ScopeId::ROOT);
    assert!(tree.get(child).unwrap().lookup("kept").is_some());
}

#[test]
fn test_inner_definition_shadows_outer() {
    let mut tree = ScopeTree::new();
    tree.define(Symbol::variable("x", int()));

    tree.create_child();
    tree.define(Symbol::variable("x", Type::builtin(Literals::String)));

    assert_eq!(tree.resolve("x", None).unwrap().ty(), &Type::builtin(Literals::String));
    assert_eq!(tree.resolve("x", Some(ScopeId::ROOT)).unwrap().ty(), &int());
}

#[test]
fn test_redefinition_replaces_in_same_scope() {
    let mut tree = ScopeTree::new();
    let function = FunctionRef { id: 1, parameters: vec![] };

    tree.define(Symbol::callable("f", Type::builtin(Literals::Inferred), function.clone()));
    let previous = tree.define(Symbol::callable("f", int(), function));

    assert!(previous.unwrap().ty().is_inferred());
    let symbol = tree.resolve("f", None).unwrap();
    assert_eq!(symbol.ty(), &int());
    assert_eq!(symbol.function().map(|function| function.id), Some(1));
}

#[test]
fn test_arithmetic_takes_operand_type() {
    let (program, _) = check_source("1 + 2;").unwrap();

    assert_eq!(expression_type(&program.body[0]), Some(&int()));
}

#[test]
fn test_relational_is_boolean() {
    let (program, _) = check_source("1 > 2;").unwrap();

    assert_eq!(expression_type(&program.body[0]), Some(&Type::builtin(Literals::Boolean)));
}

#[test]
fn test_not_is_boolean_and_negation_keeps_type() {
    let (program, _) = check_source("!true; -2.5;").unwrap();

    assert_eq!(expression_type(&program.body[0]), Some(&Type::builtin(Literals::Boolean)));
    assert_eq!(expression_type(&program.body[1]), Some(&Type::builtin(Literals::Float)));
}

#[test]
fn test_inferred_declaration_takes_value_type() {
    let (program, analysis) = check_source("let x = 5;").unwrap();

    assert_eq!(program.body[0].annotation().ty, Some(int()));
    assert_eq!(analysis.scopes.resolve("x", Some(ScopeId::ROOT)).unwrap().ty(), &int());
}

#[test]
fn test_operand_mismatch_fails() {
    let error = check_source("1 + \"a\";").unwrap_err();

    assert_eq!(error.get_error_name(), "TypeMismatch");
}

#[test]
fn test_operand_mismatch_fails_in_lenient_pass() {
    let mut program = parse_source("let s = \"a\"; s * 2;");
    let error = lenient_check(&mut program).unwrap_err();

    assert_eq!(error.get_error_name(), "TypeMismatch");
}

#[test]
fn test_forward_call_resolves() {
    let source = "
        fn a() -> int { return b(); }
        fn b() -> int { return 1; }
    ";

    assert!(check_source(source).is_ok());
}

#[test]
fn test_forward_call_fails_without_lenient_pass() {
    let mut program = parse_source("fn a() -> int { return b(); } fn b() -> int { return 1; }");
    let error = TypeChecker::new(true, None).check_program(&mut program).unwrap_err();

    assert_eq!(error.get_error_name(), "UnresolvedIdentifier");
}

#[test]
fn test_forward_call_infers_return_type() {
    let source = "
        fn a() { return b(); }
        fn b() { return 1; }
        let x = a();
    ";
    let (program, analysis) = check_source(source).unwrap();

    assert_eq!(program.body[2].annotation().ty, Some(int()));
    assert_eq!(analysis.scopes.resolve("a", Some(ScopeId::ROOT)).unwrap().ty(), &int());
}

#[test]
fn test_recursive_function_resolves() {
    let source = "
        fn fact(n: int) -> int {
            if n < 2 { return 1; }
            return n * fact(n - 1);
        }
        print fact(5);
    ";

    assert!(check_source(source).is_ok());
}

#[test]
fn test_unknown_identifier_fails() {
    let error = check_source("print missing;").unwrap_err();

    assert_eq!(error.get_error_name(), "UnresolvedIdentifier");
    assert!(error.get_tip().to_string().contains("`missing`"));
}

#[test]
fn test_unknown_identifier_accepted_by_lenient_pass() {
    let mut program = parse_source("print missing;");

    assert!(lenient_check(&mut program).is_ok());
    match &program.body[0] {
        Stmt::Print(print) => assert_eq!(print.expression.get_type(), None),
        other => panic!("Expected print statement, found {:?}", other),
    }
}

#[test]
fn test_return_type_mismatch() {
    let error = check_source("fn f() -> int { return \"s\"; }").unwrap_err();

    assert_eq!(error.get_error_name(), "ReturnTypeMismatch");
    let tip = error.get_tip().to_string();
    assert!(tip.contains("Int"));
    assert!(tip.contains("String"));
}

#[test]
fn test_function_without_return_is_void() {
    let (_, analysis) = check_source("fn f() { print 1; }").unwrap();

    assert!(analysis.scopes.resolve("f", Some(ScopeId::ROOT)).unwrap().ty().is_void());
}

#[test]
fn test_print_void_fails() {
    let error = check_source("fn g() { } print g();").unwrap_err();

    assert_eq!(error.get_error_name(), "VoidPrint");
}

#[test]
fn test_print_value_passes() {
    assert!(check_source("fn g() -> string { return \"hi\"; } print g();").is_ok());
}

#[test]
fn test_for_predicate_must_be_boolean() {
    let source = "for let i = 0; \"x\"; i = i + 1 { }";

    let error = check_source(source).unwrap_err();
    assert_eq!(error.get_error_name(), "NonBooleanPredicate");

    let mut program = parse_source(source);
    assert!(lenient_check(&mut program).is_ok());
}

#[test]
fn test_for_loop_with_boolean_predicate() {
    assert!(check_source("for let i = 0; i < 10; i = i + 1 { print i; }").is_ok());
}

#[test]
fn test_call_on_variable_fails() {
    let error = check_source("let f = 1; f();").unwrap_err();

    assert_eq!(error.get_error_name(), "NotCallable");
}

#[test]
fn test_return_outside_function_fails() {
    let error = check_source("return 1;").unwrap_err();

    assert_eq!(error.get_error_name(), "ReturnOutsideFunction");
}

#[test]
fn test_block_variable_not_visible_after_block() {
    let error = check_source("{ let inner = 1; } print inner;").unwrap_err();

    assert_eq!(error.get_error_name(), "UnresolvedIdentifier");
}

#[test]
fn test_nodes_record_their_scope() {
    let (program, analysis) = check_source("let x = 1; { let y = x; }").unwrap();

    assert_eq!(program.annotation.scope, Some(ScopeId::ROOT));
    assert_eq!(program.body[0].annotation().scope, Some(ScopeId::ROOT));

    let Stmt::Block(block) = &program.body[1] else {
        panic!("Expected block");
    };
    let inner = block.body[0].annotation().scope.unwrap();

    assert_ne!(inner, ScopeId::ROOT);
    assert_eq!(analysis.scopes.parent(inner), Some(ScopeId::ROOT));
    assert!(analysis.scopes.get(inner).unwrap().lookup("y").is_some());
}

#[test]
fn test_every_expression_is_typed() {
    let (program, _) = check_source("fn add(a: int, b: int) -> int { return a + b; } let total = add(1, 2) * 3;").unwrap();

    let Stmt::VarDecl(decl) = &program.body[1] else {
        panic!("Expected declaration");
    };
    let Some(Expr::Binary(binary)) = &decl.assigned_value else {
        panic!("Expected binary expression");
    };

    assert_eq!(binary.annotation.ty, Some(int()));
    assert_eq!(binary.left.get_type(), Some(&int()));
    assert_eq!(binary.right.get_type(), Some(&int()));
}

#[test]
fn test_parameters_share_function_scope() {
    let (program, analysis) = check_source("fn f(a: int) -> int { let b = a; return b; }").unwrap();

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("Expected function");
    };
    let scope = function.body[0].annotation().scope.unwrap();
    let function_scope = analysis.scopes.get(scope).unwrap();

    assert!(function_scope.lookup("a").is_some());
    assert!(function_scope.lookup("b").is_some());
    assert!(analysis.scopes.resolve("a", Some(ScopeId::ROOT)).is_err());
}

#[test]
fn test_user_types_compare_by_name() {
    assert!(check_source("let a: Point; let b: Point; a = b;").is_ok());

    let error = check_source("let a: Point; let b: Vector; a + b;").unwrap_err();
    assert_eq!(error.get_error_name(), "TypeMismatch");
}

#[test]
fn test_scope_tree_display_lists_symbols() {
    let (_, analysis) = check_source("let x = 1; fn f(a: int) -> int { return a; }").unwrap();
    let dump = analysis.scopes.to_string();

    assert!(dump.starts_with("scope #0\n"));
    assert!(dump.contains("  x: Int\n"));
    assert!(dump.contains("  fn f(a: Int) -> Int\n"));
    assert!(dump.contains("  scope #1\n"));
    assert!(dump.contains("    a: Int\n"));
}

#[test]
fn test_unbraced_if_body_gets_own_scope() {
    let error = check_source("if true let y = 1; print y;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnresolvedIdentifier");

    let (program, analysis) = check_source("if true let y = 1; else let y = \"s\";").unwrap();
    let Stmt::If(if_stmt) = &program.body[0] else {
        panic!("Expected if statement");
    };
    let then_scope = if_stmt.then_body.annotation().scope.unwrap();

    assert_ne!(then_scope, ScopeId::ROOT);
    assert_eq!(analysis.scopes.parent(then_scope), Some(ScopeId::ROOT));
    assert!(analysis.scopes.get(ScopeId::ROOT).unwrap().lookup("y").is_none());
}

#[test]
fn test_unbraced_loop_bodies_get_own_scope() {
    let error = check_source("while false let w = 1; print w;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnresolvedIdentifier");

    let error = check_source("for let i = 0; i < 3; i = i + 1 let k = i; print k;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnresolvedIdentifier");

    assert!(check_source("for let i = 0; i < 3; i = i + 1 print i;").is_ok());
}

#[test]
fn test_annotated_declaration_is_defined_before_initializer() {
    let (_, analysis) = check_source("let x: int = x + 1;").unwrap();

    assert_eq!(analysis.scopes.resolve("x", Some(ScopeId::ROOT)).unwrap().ty(), &int());
}

#[test]
fn test_last_return_decides_inferred_type() {
    let (program, analysis) = check_source("fn f() { return 1; return \"s\"; } let y = f();").unwrap();
    let string = Type::builtin(Literals::String);

    assert_eq!(analysis.scopes.resolve("f", Some(ScopeId::ROOT)).unwrap().ty(), &string);
    assert_eq!(program.body[1].annotation().ty, Some(string));
}

#[test]
fn test_last_return_is_checked_against_declared_type() {
    assert!(check_source("fn f() -> int { return \"s\"; return 1; }").is_ok());

    let error = check_source("fn f() -> int { return 1; return \"s\"; }").unwrap_err();
    assert_eq!(error.get_error_name(), "ReturnTypeMismatch");
}

#[test]
fn test_recorded_scope_is_never_overwritten() {
    let mut tree = ScopeTree::new();
    let child = tree.create_child();
    let mut annotation = Annotation::default();

    annotation.record_scope(ScopeId::ROOT);
    annotation.record_scope(child);

    assert_eq!(annotation.scope, Some(ScopeId::ROOT));

    annotation.set_type(Some(int()));
    annotation.set_type(None);
    assert_eq!(annotation.ty, None);
}
