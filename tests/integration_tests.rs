//! Integration tests for end-to-end analysis.
//!
//! These tests run the complete pipeline from source code through
//! tokenization, parsing and both type checking passes.

use scopecheck::{
    ast::{
        ast::Stmt,
        statements::BlockStmt,
        types::{Literals, Type},
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_error,
    type_checker::{
        scope::ScopeId,
        type_checker::{type_check, Analysis},
    },
};
use std::{path::Path, rc::Rc};

fn analyse(source: &str) -> Result<(BlockStmt, Analysis), Error> {
    let tokens = tokenize(source.to_string(), Some("test.lang".to_string()))?;
    let mut ast = parse(tokens, Rc::new("test.lang".to_string()))?;
    let analysis = type_check(&mut ast)?;

    Ok((ast, analysis))
}

#[test]
fn test_analyse_simple_program() {
    let (ast, analysis) = analyse("let x = 42;").unwrap();

    assert_eq!(ast.body.len(), 1);
    assert_eq!(analysis.scopes.scope_count(), 1);
    assert_eq!(
        analysis.scopes.resolve("x", Some(ScopeId::ROOT)).unwrap().ty(),
        &Type::builtin(Literals::Int)
    );
}

#[test]
fn test_analyse_program_with_functions_and_loops() {
    let source = r#"
        fn main() {
            let total = sum(10);
            print total;
            while total > 0 {
                total = total - 1;
            }
        }

        fn sum(limit: int) -> int {
            let acc = 0;
            for let i = 0; i < limit; i = i + 1 {
                acc = acc + i;
            }
            return acc;
        }

        main();
    "#;

    let (ast, analysis) = analyse(source).unwrap();

    // root, main, while body, sum, for body
    assert_eq!(analysis.scopes.scope_count(), 5);

    let Stmt::FnDecl(main) = &ast.body[0] else {
        panic!("Expected function declaration");
    };
    assert_eq!(main.annotation.ty, Some(Type::builtin(Literals::Void)));
    assert_eq!(main.body[0].annotation().ty, Some(Type::builtin(Literals::Int)));
}

#[test]
fn test_analysis_is_repeatable() {
    let source = "fn a() -> int { return b(); } fn b() -> int { return 2; } print a();";

    let (first_ast, first) = analyse(source).unwrap();
    let (second_ast, second) = analyse(source).unwrap();

    assert_eq!(first_ast, second_ast);
    assert_eq!(first.scopes.to_string(), second.scopes.to_string());
}

#[test]
fn test_shadowing_in_nested_blocks() {
    let source = r#"
        let value = 1;
        {
            let value = "text";
            print value;
        }
        print value + 1;
    "#;

    assert!(analyse(source).is_ok());
}

#[test]
fn test_lexer_error_surfaces() {
    let error = analyse("let x = 1 @ 2;").unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_semantic_error_renders_against_source() {
    let source = "let a = 1;\nlet b = a + \"two\";\n";
    let error = analyse(source).unwrap_err();

    assert_eq!(error.get_error_name(), "TypeMismatch");

    let rendered = render_error(&error, source, Path::new("test.lang"));
    assert!(rendered.starts_with("Error: TypeMismatch (Operand types `Int` and `String` do not match)"));
    assert!(rendered.contains("2 | let b = a + \"two\";"));
}
