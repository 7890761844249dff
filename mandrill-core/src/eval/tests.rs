use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    environment::prelude::{BuiltinFunction, Environment, Value},
    parser::prelude::parse_source
};

use super::Evaluator;

fn eval_source(src: &str) -> Option<Value> {
    let (program, errors) = parse_source(src);

    assert!(errors.is_empty(), "parse errors for {src:?}: {errors:?}");

    let evaluator = Evaluator::default();
    let env = Rc::new(RefCell::new(Environment::new()));

    evaluator.eval(&program, env)
}

fn eval_value(src: &str) -> Value {
    eval_source(src).unwrap_or_else(|| panic!("no value produced for {src:?}"))
}

fn assert_integer(src: &str, expected: i64) {
    match eval_value(src) {
        Value::Integer { value } => assert_eq!(value, expected, "for {src:?}"),
        other => panic!("expected Integer for {src:?}, got {other:?}")
    }
}

fn assert_boolean(src: &str, expected: bool) {
    match eval_value(src) {
        Value::Boolean { value } => assert_eq!(value, expected, "for {src:?}"),
        other => panic!("expected Boolean for {src:?}, got {other:?}")
    }
}

fn assert_string(src: &str, expected: &str) {
    match eval_value(src) {
        Value::String { value } => assert_eq!(value, expected, "for {src:?}"),
        other => panic!("expected String for {src:?}, got {other:?}")
    }
}

fn assert_null(src: &str) {
    match eval_value(src) {
        Value::Null => {},
        other => panic!("expected Null for {src:?}, got {other:?}")
    }
}

fn assert_error(src: &str, expected: &str) {
    match eval_value(src) {
        Value::Error { message } => assert_eq!(message, expected, "for {src:?}"),
        other => panic!("expected Error for {src:?}, got {other:?}")
    }
}

#[test]
fn test_integer_arithmetic() {
    let cases = vec![
        ("5", 5),
        ("-5", -5),
        ("--5", 5),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * 2 * 2 * 2 * 2", 32),
        ("5 * 2 + 10", 20),
        ("5 + 2 * 10", 25),
        ("20 + 2 * -10", 0),
        ("50 / 2 * 2 + 10", 60),
        ("2 * (5 + 10)", 30),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        ("-7 / 2", -3),
    ];

    for (src, expected) in cases {
        assert_integer(src, expected);
    }
}

#[test]
fn test_boolean_expressions() {
    let cases = vec![
        ("true", true),
        ("false", false),
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("true == true", true),
        ("false == true", false),
        ("true != false", true),
        ("null == null", true),
        ("null != null", false),
        ("(1 < 2) == true", true),
        ("(1 > 2) == true", false),
    ];

    for (src, expected) in cases {
        assert_boolean(src, expected);
    }
}

#[test]
fn test_bang_operator() {
    let cases = vec![
        ("!true", false),
        ("!false", true),
        ("!null", true),
        ("!5", false),
        ("!0", false),
        ("!!true", true),
        ("!\"\"", true),
        ("!\"x\"", false),
    ];

    for (src, expected) in cases {
        assert_boolean(src, expected);
    }
}

#[test]
fn test_aggregate_equality_is_structural() {
    assert_boolean("[1, 2] == [1, 2]", true);
    assert_boolean("[1, 2] == [1, 3]", false);
    assert_boolean("[1, 2] != [1, 3]", true);
    assert_boolean("{1: 2} == {1: 2}", true);
    assert_boolean(r#"{"a": 1} == {"a": 2}"#, false);
}

#[test]
fn test_function_equality_is_by_reference() {
    assert_boolean("let f = fn(x) { x }; f == f", true);
    assert_boolean("let f = fn(x) { x }; let g = f; f == g", true);
    assert_boolean("fn(x) { x } == fn(x) { x }", false);
}

#[test]
fn test_string_operations() {
    assert_string(r#""Hello" + " " + "World""#, "Hello World");
    assert_boolean(r#""a" == "a""#, true);
    assert_boolean(r#""a" == "b""#, false);
    assert_boolean(r#""a" != "b""#, true);
}

#[test]
fn test_if_else_expressions() {
    assert_integer("if (true) { 10 }", 10);
    assert_integer("if (1 < 2) { 10 } else { 20 }", 10);
    assert_integer("if (1 > 2) { 10 } else { 20 }", 20);
    assert_null("if (false) { 10 }");
    assert_null("if (null) { 10 }");
}

#[test]
fn test_truthiness_of_zero_and_empty_string() {
    // every integer is truthy, zero included
    assert_integer("if (0) { 1 } else { 2 }", 1);
    // a string is truthy only when non-empty
    assert_integer(r#"if ("") { 1 } else { 2 }"#, 2);
    assert_integer(r#"if ("x") { 1 } else { 2 }"#, 1);
}

#[test]
fn test_return_statements() {
    let cases = vec![
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
        ("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10),
    ];

    for (src, expected) in cases {
        assert_integer(src, expected);
    }
}

#[test]
fn test_let_statements() {
    let cases = vec![
        ("let a = 5; a;", 5),
        ("let a = 5 * 5; a;", 25),
        ("let a = 5; let b = a; b;", 5),
        ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
        ("let a = 5; let a = a + 1; a;", 6),
    ];

    for (src, expected) in cases {
        assert_integer(src, expected);
    }
}

#[test]
fn test_trailing_let_produces_no_value() {
    assert_eq!(eval_source("let a = 1;"), None);
}

#[test]
fn test_function_application() {
    let cases = vec![
        ("let identity = fn(x) { x; }; identity(5);", 5),
        ("let identity = fn(x) { return x; }; identity(5);", 5),
        ("let double = fn(x) { x * 2; }; double(5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
        ("fn(x) { x; }(5)", 5),
    ];

    for (src, expected) in cases {
        assert_integer(src, expected);
    }
}

#[test]
fn test_function_body_with_no_value_yields_null() {
    assert_null("fn() {}()");
    assert_null("fn() { let a = 1; }()");
}

#[test]
fn test_closures() {
    assert_integer(
        r#"
        let newAdder = fn(x) { fn(y) { x + y } };
        let addTwo = newAdder(2);
        addTwo(3)
        "#,
        5
    );
}

#[test]
fn test_closure_captures_environment_by_reference() {
    // the function resolves names at call time through the captured
    // frame, so a later top-level binding is visible
    assert_integer(
        r#"
        let f = fn() { x };
        let x = 5;
        f()
        "#,
        5
    );
}

#[test]
fn test_recursive_function() {
    assert_integer(
        r#"
        let fact = fn(n) { if (n < 2) { 1 } else { n * fact(n - 1) } };
        fact(5)
        "#,
        120
    );
}

#[test]
fn test_arity_mismatch_is_an_error() {
    assert_error(
        "fn(x) { x }()",
        "wrong number of arguments: expected 1, got 0"
    );
    assert_error(
        "fn(x) { x }(1, 2)",
        "wrong number of arguments: expected 1, got 2"
    );
}

#[test]
fn test_calling_a_non_function() {
    assert_error("5(1)", "not a function: INTEGER");
    assert_error("let x = true; x()", "not a function: BOOLEAN");
}

#[test]
fn test_error_messages() {
    let cases = vec![
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("1 == true", "type mismatch: INTEGER == BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
        (r#""a" - "b""#, "unknown operator: STRING - STRING"),
        ("foobar", "identifier not found: foobar"),
        ("5 / 0", "division by zero"),
    ];

    for (src, expected) in cases {
        assert_error(src, expected);
    }
}

#[test]
fn test_errors_stop_the_program() {
    assert_error("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN");
    assert_error("let x = 1 + true; x;", "type mismatch: INTEGER + BOOLEAN");
    assert_error(
        "if (10 > 1) { return true + false; } 5;",
        "unknown operator: BOOLEAN + BOOLEAN"
    );
}

#[test]
fn test_array_literals_and_indexing() {
    assert_integer("[1, 2 * 2, 3 + 3][2]", 6);
    assert_integer("let i = 0; [1][i];", 1);
    assert_integer("let a = [1, 2, 3]; a[1] + a[2];", 5);
}

#[test]
fn test_array_index_out_of_range() {
    assert_error("[1, 2, 3][5]", "index out of range: index 5, length 3");
    assert_error("[1, 2, 3][-1]", "index out of range: index -1, length 3");
    assert_error("[][0]", "index out of range: index 0, length 0");
}

#[test]
fn test_string_indexing() {
    assert_string(r#""hello"[1]"#, "e");
    assert_error(r#""hello"[5]"#, "index out of range: index 5, length 5");
}

#[test]
fn test_string_indexing_is_by_byte() {
    // "é" occupies bytes 1 and 2; index 1 selects its first byte,
    // decoded alone, and the following characters sit at byte offsets
    assert_string(r#""héllo"[1]"#, "\u{c3}");
    assert_string(r#""héllo"[3]"#, "l");
    assert_error(r#""héllo"[6]"#, "index out of range: index 6, length 6");
}

#[test]
fn test_index_type_errors() {
    assert_error("[1][true]", "could not index ARRAY with BOOLEAN");
    assert_error(r#""abc"["x"]"#, "could not index STRING with STRING");
    assert_error("5[0]", "could not index INTEGER");
}

#[test]
fn test_map_literals_and_retrieval() {
    let cases = vec![
        (r#"{"one": 10 - 9}["one"]"#, 1),
        (r#"let two = "two"; {two: 1 + 1}["two"]"#, 2),
        (r#"{"thr" + "ee": 6 / 2}["three"]"#, 3),
        ("{4: 4}[4]", 4),
        ("{true: 5}[true]", 5),
        ("{false: 6}[false]", 6),
        // retrieval is by value equality, not key identity
        (r#"{"foobar": 5}["foo" + "bar"]"#, 5),
    ];

    for (src, expected) in cases {
        assert_integer(src, expected);
    }
}

#[test]
fn test_missing_map_key_is_null() {
    assert_null(r#"{"a": 1}["b"]"#);
    assert_null(r#"{}["a"]"#);
}

#[test]
fn test_unhashable_map_keys() {
    assert_error(
        r#"{"name": "x"}[fn(x) { x }]"#,
        "invalid map key type: FUNCTION"
    );
    assert_error("{[1, 2]: 1}", "invalid map key type: ARRAY");
}

#[test]
fn test_builtin_len() {
    assert_integer(r#"len("")"#, 0);
    assert_integer(r#"len("four")"#, 4);
    assert_integer(r#"len("héllo")"#, 5);
    assert_integer("len([1, 2, 3])", 3);
    assert_integer(r#"len({"a": 1, "b": 2})"#, 2);

    assert_error("len(1)", "invalid argument for the `len` function, got INTEGER");
    assert_error(r#"len("a", "b")"#, "expected 1 argument, received 2");
}

#[test]
fn test_builtin_first_and_last() {
    assert_integer("first([1, 2, 3])", 1);
    assert_integer("last([1, 2, 3])", 3);
    assert_string(r#"first("héllo")"#, "h");
    assert_string(r#"last("héllo")"#, "o");

    assert_null("first([])");
    assert_null("last([])");
    assert_null(r#"first("")"#);

    assert_error("first(1)", "invalid argument for the `first` function, got INTEGER");
}

#[test]
fn test_builtin_skip() {
    assert_eq!(
        eval_value("skip([1, 2, 3], 1)"),
        Value::Array {
            elements: vec![Value::Integer { value: 2 }, Value::Integer { value: 3 }]
        }
    );
    assert_eq!(eval_value("skip([1, 2, 3], 5)"), Value::Array { elements: vec![] });
    assert_string(r#"skip("hello", 2)"#, "llo");
    assert_string(r#"skip("hello", 99)"#, "");

    assert_error("skip([1], true)", "invalid argument for the `skip` function, got BOOLEAN");
    assert_error("skip([1])", "expected 2 arguments, received 1");
}

#[test]
fn test_builtin_append() {
    assert_eq!(
        eval_value("append([1], 2, 3)"),
        Value::Array {
            elements: vec![
                Value::Integer { value: 1 },
                Value::Integer { value: 2 },
                Value::Integer { value: 3 },
            ]
        }
    );

    // arguments copy into a fresh array, the original is untouched
    assert_integer("let a = [1]; let b = append(a, 2); len(a);", 1);
    assert_integer("let a = [1]; let b = append(a, 2); len(b);", 2);

    assert_error("append([1])", "expected at least 2 arguments, received 1");
    assert_error("append(1, 2)", "invalid argument for the `append` function, got INTEGER");
}

#[test]
fn test_user_bindings_shadow_builtins() {
    assert_integer("let len = 99; len", 99);
    assert_integer(r#"let len = fn(x) { 7 }; len("abc")"#, 7);
}

#[test]
fn test_builtins_resolve_as_identifiers() {
    match eval_value("len") {
        Value::Builtin { .. } => {},
        other => panic!("expected a Builtin value, got {other:?}")
    }
}

#[test]
fn test_injected_builtin_table() {
    fn answer(_: Vec<Value>) -> Value {
        Value::Integer { value: 42 }
    }

    let evaluator = Evaluator::new(HashMap::from([("answer", answer as BuiltinFunction)]));
    let env = Rc::new(RefCell::new(Environment::new()));

    let (program, errors) = parse_source("answer()");
    assert!(errors.is_empty());

    assert_eq!(
        evaluator.eval(&program, env.clone()),
        Some(Value::Integer { value: 42 })
    );

    // the default table is not implied, only what was injected resolves
    let (program, errors) = parse_source("len");
    assert!(errors.is_empty());

    assert_eq!(
        evaluator.eval(&program, env),
        Some(Value::Error { message: "identifier not found: len".to_string() })
    );
}

#[test]
fn test_builtin_errors_propagate() {
    assert_error(
        "len(1) + 1",
        "invalid argument for the `len` function, got INTEGER"
    );
}
