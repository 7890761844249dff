pub mod builtins;

#[cfg(test)]
mod tests;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    environment::prelude::{BuiltinFunction, Environment, Value, FALSE, NULL, TRUE},
    lexer::prelude::Token,
    parser::prelude::{
        ArrayLiteral, Block, Call, Expression, If, Index, Infix, MapLiteral,
        Prefix, Program, Statement
    }
};

pub mod prelude {
    pub use super::{builtins::default_builtins, Evaluator};
}

/// The tree-walking evaluator. Runtime failures are ordinary
/// `Value::Error` objects carried back up the recursion by value return;
/// evaluation itself never panics.
pub struct Evaluator {
    builtins: HashMap<&'static str, BuiltinFunction>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(builtins::default_builtins())
    }
}

impl Evaluator {
    /// The builtin table is fixed at construction. Embedders that want
    /// extra native callables pass their own table here.
    pub fn new(builtins: HashMap<&'static str, BuiltinFunction>) -> Self {
        Self { builtins }
    }

    /// Evaluates a program top to bottom. A `return` at the top level
    /// unwraps and ends the program, an error ends it immediately.
    /// `None` means the program produced no value (empty, or it ended
    /// on a `let`).
    pub fn eval(&self, program: &Program, env: Rc<RefCell<Environment>>) -> Option<Value> {
        let mut result = None;

        for statement in &program.statements {
            match self.eval_statement(statement, env.clone()) {
                Some(Value::ReturnValue { value }) => return Some(*value),
                Some(value @ Value::Error { .. }) => return Some(value),
                value => result = value
            }
        }

        result
    }

    fn eval_statement(
        &self,
        statement: &Statement,
        env: Rc<RefCell<Environment>>
    ) -> Option<Value> {
        match statement {
            Statement::Let(let_) => {
                let value = self.eval_expression(&let_.value, env.clone());
                if value.is_error() {
                    return Some(value);
                }

                env.borrow_mut().set(let_.name.value.clone(), value);

                None
            },
            Statement::Return(return_) => {
                let value = self.eval_expression(&return_.value, env);
                if value.is_error() {
                    return Some(value);
                }

                Some(Value::ReturnValue { value: Box::new(value) })
            },
            Statement::Expression(statement) => {
                Some(self.eval_expression(&statement.expression, env))
            }
        }
    }

    // A block's value is its last statement's value. `ReturnValue` and
    // `Error` pass through unchanged so nested blocks do not swallow them.
    fn eval_block(&self, block: &Block, env: Rc<RefCell<Environment>>) -> Option<Value> {
        let mut result = None;

        for statement in &block.statements {
            match self.eval_statement(statement, env.clone()) {
                Some(value @ (Value::ReturnValue { .. } | Value::Error { .. })) => {
                    return Some(value)
                },
                value => result = value
            }
        }

        result
    }

    fn eval_expression(
        &self,
        expression: &Expression,
        env: Rc<RefCell<Environment>>
    ) -> Value {
        match expression {
            Expression::Identifier(identifier) => self.eval_identifier(&identifier.value, env),
            Expression::Integer(integer) => Value::Integer { value: integer.value },
            Expression::Boolean(boolean) => bool_to_value(boolean.value),
            Expression::Null(_) => NULL,
            Expression::String(string) => Value::String { value: string.value.clone() },
            Expression::Array(array) => self.eval_array_literal(array, env),
            Expression::Map(map) => self.eval_map_literal(map, env),
            Expression::Prefix(prefix) => self.eval_prefix(prefix, env),
            Expression::Infix(infix) => self.eval_infix(infix, env),
            Expression::If(if_) => self.eval_if(if_, env),
            Expression::Function(function) => Value::Function {
                parameters: function.parameters.clone(),
                body: function.body.clone(),
                env
            },
            Expression::Call(call) => self.eval_call(call, env),
            Expression::Index(index) => self.eval_index(index, env)
        }
    }

    // Environment chain first, builtin table second; user bindings
    // shadow builtins.
    fn eval_identifier(&self, name: &str, env: Rc<RefCell<Environment>>) -> Value {
        if let Some(value) = env.borrow().get(name) {
            return value;
        }

        match self.builtins.get(name) {
            Some(function) => Value::Builtin { function: *function },
            None => Value::Error {
                message: format!("identifier not found: {name}")
            }
        }
    }

    fn eval_prefix(&self, prefix: &Prefix, env: Rc<RefCell<Environment>>) -> Value {
        let right = self.eval_expression(&prefix.right, env);
        if right.is_error() {
            return right;
        }

        match &prefix.operator {
            Token::Bang => bool_to_value(!is_truthy(&right)),
            Token::Minus => match right {
                Value::Integer { value } => Value::Integer { value: value.wrapping_neg() },
                right => Value::Error {
                    message: format!("unknown operator: -{}", right._type())
                }
            },
            operator => Value::Error {
                message: format!("unknown operator: {}{}", operator.as_literal(), right._type())
            }
        }
    }

    fn eval_infix(&self, infix: &Infix, env: Rc<RefCell<Environment>>) -> Value {
        let left = self.eval_expression(&infix.left, env.clone());
        if left.is_error() {
            return left;
        }

        let right = self.eval_expression(&infix.right, env);
        if right.is_error() {
            return right;
        }

        let operator = &infix.operator;

        match (left, right) {
            (
                Value::Integer { value: left },
                Value::Integer { value: right }
            ) => eval_integer_infix(operator, left, right),
            (
                Value::String { value: left },
                Value::String { value: right }
            ) => match operator {
                Token::Plus => Value::String { value: format!("{left}{right}") },
                Token::Equal => bool_to_value(left == right),
                Token::NotEqual => bool_to_value(left != right),
                _ => Value::Error {
                    message: format!(
                        "unknown operator: STRING {} STRING",
                        operator.as_literal()
                    )
                }
            },
            (left, right) if left._type() != right._type() => Value::Error {
                message: format!(
                    "type mismatch: {} {} {}",
                    left._type(), operator.as_literal(), right._type()
                )
            },
            // Remaining same-type operands support equality only:
            // booleans and null by variant, arrays and maps structurally,
            // functions by reference. Values are cloned rather than
            // shared, so reference identity of aggregates is not
            // observable from the language.
            (left, right) => match operator {
                Token::Equal => bool_to_value(left == right),
                Token::NotEqual => bool_to_value(left != right),
                _ => Value::Error {
                    message: format!(
                        "unknown operator: {} {} {}",
                        left._type(), operator.as_literal(), right._type()
                    )
                }
            }
        }
    }

    fn eval_if(&self, if_: &If, env: Rc<RefCell<Environment>>) -> Value {
        let condition = self.eval_expression(&if_.condition, env.clone());
        if condition.is_error() {
            return condition;
        }

        if is_truthy(&condition) {
            self.eval_block(&if_.consequence, env).unwrap_or(NULL)
        } else {
            match &if_.alternative {
                Some(alternative) => self.eval_block(alternative, env).unwrap_or(NULL),
                None => NULL
            }
        }
    }

    fn eval_call(&self, call: &Call, env: Rc<RefCell<Environment>>) -> Value {
        let function = self.eval_expression(&call.function, env.clone());
        if function.is_error() {
            return function;
        }

        let mut arguments = Vec::with_capacity(call.arguments.len());

        for argument in &call.arguments {
            let value = self.eval_expression(argument, env.clone());
            if value.is_error() {
                return value;
            }

            arguments.push(value);
        }

        match function {
            Value::Function { parameters, body, env: captured } => {
                if parameters.len() != arguments.len() {
                    return Value::Error {
                        message: format!(
                            "wrong number of arguments: expected {}, got {}",
                            parameters.len(),
                            arguments.len()
                        )
                    };
                }

                let mut scope = Environment::new_enclosed(captured);

                for (parameter, argument) in parameters.iter().zip(arguments) {
                    scope.set(parameter.value.clone(), argument);
                }

                match self.eval_block(&body, Rc::new(RefCell::new(scope))) {
                    Some(Value::ReturnValue { value }) => *value,
                    Some(value) => value,
                    None => NULL
                }
            },
            Value::Builtin { function } => function(arguments),
            function => Value::Error {
                message: format!("not a function: {}", function._type())
            }
        }
    }

    fn eval_index(&self, index: &Index, env: Rc<RefCell<Environment>>) -> Value {
        let left = self.eval_expression(&index.left, env.clone());
        if left.is_error() {
            return left;
        }

        let key = self.eval_expression(&index.index, env);
        if key.is_error() {
            return key;
        }

        match (left, key) {
            (Value::Array { elements }, Value::Integer { value }) => {
                let length = elements.len();

                match usize::try_from(value).ok().and_then(|i| elements.get(i)) {
                    Some(element) => element.clone(),
                    None => Value::Error {
                        message: format!("index out of range: index {value}, length {length}")
                    }
                }
            },
            // Strings index by byte, yielding a single-char string. A
            // byte inside a multibyte character decodes on its own, not
            // as the character containing it.
            (Value::String { value }, Value::Integer { value: index }) => {
                let length = value.len();

                match usize::try_from(index).ok().and_then(|i| value.as_bytes().get(i)) {
                    Some(byte) => Value::String { value: (*byte as char).to_string() },
                    None => Value::Error {
                        message: format!("index out of range: index {index}, length {length}")
                    }
                }
            },
            (Value::Map { pairs }, key) => match key.hash_key() {
                Some(hash_key) => match pairs.get(&hash_key) {
                    Some((_, value)) => value.clone(),
                    None => NULL
                },
                None => Value::Error {
                    message: format!("invalid map key type: {}", key._type())
                }
            },
            (left @ (Value::Array { .. } | Value::String { .. }), key) => Value::Error {
                message: format!("could not index {} with {}", left._type(), key._type())
            },
            (left, _) => Value::Error {
                message: format!("could not index {}", left._type())
            }
        }
    }

    fn eval_array_literal(
        &self,
        array: &ArrayLiteral,
        env: Rc<RefCell<Environment>>
    ) -> Value {
        let mut elements = Vec::with_capacity(array.elements.len());

        for element in &array.elements {
            let value = self.eval_expression(element, env.clone());
            if value.is_error() {
                return value;
            }

            elements.push(value);
        }

        Value::Array { elements }
    }

    // Pairs evaluate in written order; a repeated key overwrites the
    // earlier pair.
    fn eval_map_literal(&self, map: &MapLiteral, env: Rc<RefCell<Environment>>) -> Value {
        let mut pairs = HashMap::with_capacity(map.pairs.len());

        for (key_expression, value_expression) in &map.pairs {
            let key = self.eval_expression(key_expression, env.clone());
            if key.is_error() {
                return key;
            }

            let hash_key = match key.hash_key() {
                Some(hash_key) => hash_key,
                None => return Value::Error {
                    message: format!("invalid map key type: {}", key._type())
                }
            };

            let value = self.eval_expression(value_expression, env.clone());
            if value.is_error() {
                return value;
            }

            let _ = pairs.insert(hash_key, (key, value));
        }

        Value::Map { pairs }
    }
}

fn eval_integer_infix(operator: &Token, left: i64, right: i64) -> Value {
    match operator {
        Token::Plus => Value::Integer { value: left.wrapping_add(right) },
        Token::Minus => Value::Integer { value: left.wrapping_sub(right) },
        Token::Asterisk => Value::Integer { value: left.wrapping_mul(right) },
        Token::Slash => {
            if right == 0 {
                return Value::Error { message: "division by zero".to_string() };
            }

            // wrapping_div covers i64::MIN / -1
            Value::Integer { value: left.wrapping_div(right) }
        },
        Token::LessThan => bool_to_value(left < right),
        Token::GreaterThan => bool_to_value(left > right),
        Token::Equal => bool_to_value(left == right),
        Token::NotEqual => bool_to_value(left != right),
        operator => Value::Error {
            message: format!("unknown operator: INTEGER {} INTEGER", operator.as_literal())
        }
    }
}

/// `null` and `false` are falsy, every integer is truthy (zero
/// included), a string is truthy iff non-empty, everything else is
/// truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Boolean { value } => *value,
        Value::String { value } => !value.is_empty(),
        _ => true
    }
}

fn bool_to_value(value: bool) -> Value {
    if value { TRUE } else { FALSE }
}
