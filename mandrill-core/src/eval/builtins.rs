use std::collections::HashMap;

use crate::environment::prelude::{BuiltinFunction, Value, NULL};

/// The default native callables. `Evaluator::new` takes the table as a
/// plain argument, so embedders can extend or replace it.
pub fn default_builtins() -> HashMap<&'static str, BuiltinFunction> {
    HashMap::from([
        ("len", builtin_len as BuiltinFunction),
        ("first", builtin_first as BuiltinFunction),
        ("last", builtin_last as BuiltinFunction),
        ("skip", builtin_skip as BuiltinFunction),
        ("append", builtin_append as BuiltinFunction),
        ("print", builtin_print as BuiltinFunction),
    ])
}

// String builtins count and slice by character, not by byte.

fn builtin_len(arguments: Vec<Value>) -> Value {
    if arguments.len() != 1 {
        return argument_number_error(1, arguments.len(), false);
    }

    match &arguments[0] {
        Value::String { value } => Value::Integer { value: value.chars().count() as i64 },
        Value::Array { elements } => Value::Integer { value: elements.len() as i64 },
        Value::Map { pairs } => Value::Integer { value: pairs.len() as i64 },
        argument => invalid_argument_error("len", argument)
    }
}

fn builtin_first(arguments: Vec<Value>) -> Value {
    if arguments.len() != 1 {
        return argument_number_error(1, arguments.len(), false);
    }

    match &arguments[0] {
        Value::Array { elements } => elements.first().cloned().unwrap_or(NULL),
        Value::String { value } => match value.chars().next() {
            Some(first) => Value::String { value: first.to_string() },
            None => NULL
        },
        argument => invalid_argument_error("first", argument)
    }
}

fn builtin_last(arguments: Vec<Value>) -> Value {
    if arguments.len() != 1 {
        return argument_number_error(1, arguments.len(), false);
    }

    match &arguments[0] {
        Value::Array { elements } => elements.last().cloned().unwrap_or(NULL),
        Value::String { value } => match value.chars().last() {
            Some(last) => Value::String { value: last.to_string() },
            None => NULL
        },
        argument => invalid_argument_error("last", argument)
    }
}

// Skipping past the end yields an empty array or string, never an error.
fn builtin_skip(arguments: Vec<Value>) -> Value {
    if arguments.len() != 2 {
        return argument_number_error(2, arguments.len(), false);
    }

    let skip = match &arguments[1] {
        Value::Integer { value } => (*value).max(0) as usize,
        argument => return invalid_argument_error("skip", argument)
    };

    match &arguments[0] {
        Value::Array { elements } => Value::Array {
            elements: elements.iter().skip(skip).cloned().collect()
        },
        Value::String { value } => Value::String {
            value: value.chars().skip(skip).collect()
        },
        argument => invalid_argument_error("skip", argument)
    }
}

fn builtin_append(mut arguments: Vec<Value>) -> Value {
    if arguments.len() < 2 {
        return argument_number_error(2, arguments.len(), true);
    }

    let rest = arguments.split_off(1);

    match arguments.remove(0) {
        Value::Array { mut elements } => {
            elements.extend(rest);

            Value::Array { elements }
        },
        argument => invalid_argument_error("append", &argument)
    }
}

fn builtin_print(arguments: Vec<Value>) -> Value {
    let arguments = arguments.iter()
        .map(|argument| argument.to_string())
        .collect::<Vec<String>>();

    println!("{}", arguments.join(" "));

    NULL
}

fn invalid_argument_error(function_name: &str, argument: &Value) -> Value {
    Value::Error {
        message: format!(
            "invalid argument for the `{function_name}` function, got {}",
            argument._type()
        )
    }
}

fn argument_number_error(expected: usize, received: usize, can_be_more: bool) -> Value {
    let qualifier = if can_be_more { "at least " } else { "" };
    let noun = if expected == 1 { "argument" } else { "arguments" };

    Value::Error {
        message: format!("expected {qualifier}{expected} {noun}, received {received}")
    }
}
