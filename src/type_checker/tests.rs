use pretty_assertions::assert_eq;

use super::type_checker::{type_check, ArgShape, TypeError};

fn messages(source: &str) -> Vec<String> {
    type_check(source)
        .into_iter()
        .map(|error| error.to_string())
        .collect()
}

#[test]
fn test_string_passed_to_number_parameter() {
    let source = "function g(n: number) {\n  console.log(n);\n}\ng(\"x\");";
    assert_eq!(
        type_check(source),
        vec![TypeError {
            line: 4,
            message: "Argument 1 to g should be a number".to_string()
        }]
    );
}

#[test]
fn test_matching_literals_pass() {
    let source = "function f(a: number, b: string, c: boolean) {\n}\nf(1, 'two', true);\nf(3.5, \"x\", false);\nf(.5, '', true);";
    assert!(type_check(source).is_empty());
}

#[test]
fn test_unannotated_and_any_positions_are_unchecked() {
    let source = "function f(a, b: any, c: number) {\n}\nf(x, y, 1);";
    assert!(type_check(source).is_empty());
}

#[test]
fn test_variables_cannot_be_classified() {
    let source = "function f(a: string) {\n}\nlet s = 'x';\nf(s);";
    assert_eq!(messages(source), vec!["Line 4: Argument 1 to f should be a string"]);
}

#[test]
fn test_every_occurrence_is_checked() {
    let source = "function f(a: boolean) {\n}\nf(1); f('no');\nlet r = f(true) && f(0);";
    assert_eq!(
        messages(source),
        vec![
            "Line 3: Argument 1 to f should be a boolean",
            "Line 3: Argument 1 to f should be a boolean",
            "Line 4: Argument 1 to f should be a boolean",
        ]
    );
}

#[test]
fn test_identifier_boundary() {
    let source = "function f(a: number) {\n}\nfoo_f('x');\nobj.f('x');\nf(1);";
    assert!(type_check(source).is_empty());
}

#[test]
fn test_declaration_and_comments_are_skipped() {
    let source = "function f(a: number) {\n}\n// f('x')\nf(2);";
    assert!(type_check(source).is_empty());
}

#[test]
fn test_nested_call_arguments() {
    let source = "function f(a: number, b: number) {\n}\nf(Math.max(1, 2), 3);";
    assert_eq!(
        messages(source),
        vec!["Line 3: Argument 1 to f should be a number"]
    );
}

#[test]
fn test_calls_to_undeclared_functions_are_ignored() {
    assert!(type_check("console.log('x');\nmissing(1);").is_empty());
}

#[test]
fn test_arg_shapes() {
    assert_eq!(ArgShape::classify("'a'"), ArgShape::String);
    assert_eq!(ArgShape::classify("\"a\""), ArgShape::String);
    assert_eq!(ArgShape::classify("42"), ArgShape::Number);
    assert_eq!(ArgShape::classify("-1"), ArgShape::Unknown);
    assert_eq!(ArgShape::classify("+2"), ArgShape::Unknown);
    assert_eq!(ArgShape::classify(".5"), ArgShape::Number);
    assert_eq!(ArgShape::classify("false"), ArgShape::Boolean);
    assert_eq!(ArgShape::classify("x"), ArgShape::Unknown);
    assert_eq!(ArgShape::classify("-x"), ArgShape::Unknown);
}

#[test]
fn test_signed_literals_are_not_numbers() {
    let source = "function f(n: number) {\n}\nf(-1);\nf(x);\nf(7);";
    assert_eq!(
        type_check(source),
        vec![
            TypeError {
                line: 3,
                message: "Argument 1 to f should be a number".to_string()
            },
            TypeError {
                line: 4,
                message: "Argument 1 to f should be a number".to_string()
            },
        ]
    );
}

#[test]
fn test_calls_in_one_line_bodies_are_checked() {
    let source = "function g(n: number) { console.log(n); }\nfunction h() { g(\"x\"); }\nh();";
    assert_eq!(messages(source), vec!["Line 2: Argument 1 to g should be a number"]);
}

#[test]
fn test_recursive_call_on_header_line_is_checked() {
    let source = "function f(n: number) { return f('again'); }";
    assert_eq!(messages(source), vec!["Line 1: Argument 1 to f should be a number"]);
}
