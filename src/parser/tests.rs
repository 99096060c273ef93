//! Unit tests for the parser module.
//!
//! Covers statement classification, block capture (including `else` and
//! `else if` chains), class members and argument splitting.

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        statements::{
            CallStmt, ClassMember, ElseBranch, ReturnStmt, SourceLine, Stmt, StmtKind,
            VarDeclStmt,
        },
        types::TypeAnnotation,
    },
    errors::errors::ErrorImpl,
};

use super::{
    cursor::LineCursor,
    parser::{split_word, strip_keyword, Parser},
    stmt::split_arguments,
};

fn parse_all(source: &str) -> Vec<Result<Stmt, crate::errors::errors::Error>> {
    Parser::from_source(source).collect()
}

fn parse_one(source: &str) -> StmtKind {
    let mut stmts = parse_all(source);
    assert_eq!(stmts.len(), 1, "expected a single statement in {:?}", source);
    stmts.remove(0).unwrap().kind
}

fn texts(lines: &[SourceLine]) -> Vec<&str> {
    lines.iter().map(|line| line.text.trim()).collect()
}

#[test]
fn test_cursor_is_forward_only() {
    let mut cursor = LineCursor::from_source("a\nb");
    assert_eq!(cursor.peek_line().map(|line| line.number), Some(1));
    assert_eq!(cursor.next_line(), Some(SourceLine::new(1, "a")));
    assert_eq!(cursor.next_line(), Some(SourceLine::new(2, "b")));
    assert_eq!(cursor.next_line(), None);
    assert_eq!(cursor.peek_line(), None);
}

#[test]
fn test_comments_and_blank_lines() {
    assert_eq!(parse_one("// note"), StmtKind::Empty);
    assert_eq!(parse_one("   "), StmtKind::Empty);
}

#[test]
fn test_parse_variable_declaration() {
    assert_eq!(
        parse_one("let x = 42;"),
        StmtKind::VarDecl(VarDeclStmt {
            identifier: "x".to_string(),
            explicit_type: None,
            expr: "42".to_string(),
        })
    );
}

#[test]
fn test_parse_annotated_declaration() {
    assert_eq!(
        parse_one("let total: number = a == b;"),
        StmtKind::VarDecl(VarDeclStmt {
            identifier: "total".to_string(),
            explicit_type: Some(TypeAnnotation::Number),
            expr: "a == b".to_string(),
        })
    );
}

#[test]
fn test_malformed_declarations() {
    let missing_eq = parse_all("let x;").remove(0).unwrap_err();
    assert_eq!(missing_eq.kind(), &ErrorImpl::MissingAssignment);
    assert_eq!(missing_eq.get_line(), 1);

    let missing_name = parse_all("let = 5;").remove(0).unwrap_err();
    assert_eq!(missing_name.kind(), &ErrorImpl::MissingVariableName);
}

#[test]
fn test_parse_function_declaration() {
    let kind = parse_one("function add(a: number, b) {\n  return a + b;\n}");

    match kind {
        StmtKind::FnDecl(decl) => {
            assert_eq!(decl.name, "add");
            assert_eq!(decl.function.params, vec!["a", "b"]);
            assert_eq!(
                decl.function.param_types,
                vec![TypeAnnotation::Number, TypeAnnotation::Any]
            );
            assert_eq!(texts(&decl.function.body), vec!["return a + b;"]);
            assert_eq!(decl.function.body[0].number, 2);
        }
        other => panic!("expected a function declaration, got {:?}", other),
    }
}

#[test]
fn test_function_body_keeps_nested_blocks() {
    let source = "function f(x) {\n  if (x) {\n    console.log(x);\n  }\n}\nf(1);";
    let stmts = parse_all(source);
    assert_eq!(stmts.len(), 2);

    match &stmts[0].as_ref().unwrap().kind {
        StmtKind::FnDecl(decl) => {
            assert_eq!(texts(&decl.function.body), vec!["if (x) {", "console.log(x);", "}"]);
        }
        other => panic!("expected a function declaration, got {:?}", other),
    }
    assert_eq!(stmts[1].as_ref().unwrap().line, 6);
}

#[test]
fn test_single_line_function() {
    match parse_one("function one() { return 1; }") {
        StmtKind::FnDecl(decl) => {
            assert_eq!(decl.function.arity(), 0);
            assert_eq!(texts(&decl.function.body), vec!["return 1;"]);
        }
        other => panic!("expected a function declaration, got {:?}", other),
    }
}

#[test]
fn test_malformed_function_skips_its_block() {
    let stmts = parse_all("function (a) {\n  console.log(a);\n}\nlet y = 1;");
    assert_eq!(stmts.len(), 2);

    let error = stmts[0].as_ref().unwrap_err();
    assert_eq!(
        error.to_string(),
        "SyntaxError: malformed function declaration: function (a) {"
    );
    assert!(matches!(stmts[1].as_ref().unwrap().kind, StmtKind::VarDecl(_)));
}

#[test]
fn test_unterminated_block() {
    let error = parse_all("function f() {\n  let a = 1;").remove(0).unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::UnterminatedBlock {
            keyword: "function".to_string()
        }
    );
}

#[test]
fn test_parse_if_else() {
    let source = "if (x > 1) {\n  a(1);\n}\nelse {\n  b(2);\n}";
    match parse_one(source) {
        StmtKind::If(stmt) => {
            assert_eq!(stmt.condition, "x > 1");
            assert_eq!(texts(&stmt.then_block), vec!["a(1);"]);
            match stmt.else_branch {
                Some(ElseBranch::Block(lines)) => assert_eq!(texts(&lines), vec!["b(2);"]),
                other => panic!("expected an else block, got {:?}", other),
            }
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_else_if_chain_on_closing_line() {
    let source = "if (a) {\n  x(1);\n} else if (b) {\n  x(2);\n} else {\n  x(3);\n}";
    let stmt = match parse_one(source) {
        StmtKind::If(stmt) => stmt,
        other => panic!("expected an if statement, got {:?}", other),
    };

    let nested = match stmt.else_branch {
        Some(ElseBranch::If(nested)) => nested,
        other => panic!("expected else if, got {:?}", other),
    };
    assert_eq!(nested.condition, "b");
    assert_eq!(texts(&nested.then_block), vec!["x(2);"]);
    assert!(matches!(nested.else_branch, Some(ElseBranch::Block(_))));
}

#[test]
fn test_if_condition_with_nested_parens() {
    match parse_one("if ((a + 1) * 2 > f(3)) { g(); }") {
        StmtKind::If(stmt) => {
            assert_eq!(stmt.condition, "(a + 1) * 2 > f(3)");
            assert_eq!(texts(&stmt.then_block), vec!["g();"]);
            assert_eq!(stmt.else_branch, None);
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_malformed_if() {
    let stmts = parse_all("if x > 1 {\n  a();\n}\nb();");
    assert_eq!(stmts[0].as_ref().unwrap_err().kind(), &ErrorImpl::MalformedIf);
    assert_eq!(stmts.len(), 2);

    let error = parse_all("if (x > 1)").remove(0).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::IfWithoutBlock);
}

#[test]
fn test_parse_class() {
    let source = "class Point {\n  static origin = 0;\n  static dist(x: number, y: number) {\n    return Math.sqrt(x * x + y * y);\n  }\n  ignored();\n}";
    let stmt = match parse_one(source) {
        StmtKind::ClassDecl(stmt) => stmt,
        other => panic!("expected a class, got {:?}", other),
    };

    assert_eq!(stmt.name, "Point");
    assert_eq!(stmt.members.len(), 2);
    assert_eq!(
        stmt.members[0],
        ClassMember::Property {
            name: "origin".to_string(),
            expr: "0".to_string()
        }
    );
    match &stmt.members[1] {
        ClassMember::Method { name, function } => {
            assert_eq!(name, "dist");
            assert_eq!(function.params, vec!["x", "y"]);
            assert_eq!(texts(&function.body), vec!["return Math.sqrt(x * x + y * y);"]);
        }
        other => panic!("expected a method, got {:?}", other),
    }
}

#[test]
fn test_class_property_with_call_value() {
    match parse_one("class C {\n  static r = Math.sqrt(4);\n}") {
        StmtKind::ClassDecl(stmt) => assert_eq!(
            stmt.members,
            vec![ClassMember::Property {
                name: "r".to_string(),
                expr: "Math.sqrt(4)".to_string()
            }]
        ),
        other => panic!("expected a class, got {:?}", other),
    }
}

#[test]
fn test_parse_return() {
    assert_eq!(
        parse_one("return x * 2;"),
        StmtKind::Return(ReturnStmt {
            expr: Some("x * 2".to_string())
        })
    );
    assert_eq!(parse_one("return;"), StmtKind::Return(ReturnStmt { expr: None }));
}

#[test]
fn test_parse_call() {
    assert_eq!(
        parse_one("console.log(\"a, b\", f(1, 2), x);"),
        StmtKind::Call(CallStmt {
            callee: "console.log".to_string(),
            args: vec!["\"a, b\"".to_string(), "f(1, 2)".to_string(), "x".to_string()],
        })
    );
    assert_eq!(
        parse_one("tick()"),
        StmtKind::Call(CallStmt {
            callee: "tick".to_string(),
            args: vec![],
        })
    );
}

#[test]
fn test_unrecognised_statement() {
    let error = parse_all("x = 5;").remove(0).unwrap_err();
    assert_eq!(error.to_string(), "Error: Unrecognized statement: x = 5;");
}

#[test]
fn test_keyword_needs_word_boundary() {
    assert_eq!(split_word("letter = 1"), ("letter", " = 1"));
    assert_eq!(strip_keyword("if(x)", "if"), Some("(x)"));
    assert_eq!(strip_keyword("iffy(x)", "if"), None);
    assert!(matches!(parse_one("letter(1)"), StmtKind::Call(_)));
}

#[test]
fn test_split_arguments() {
    assert_eq!(split_arguments(""), Vec::<String>::new());
    assert_eq!(split_arguments(" 1 ,  2 "), vec!["1", "2"]);
    assert_eq!(split_arguments("'(', g(a, b)"), vec!["'('", "g(a, b)"]);
}
