use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use crate::parser::prelude::{Block, Identifier};

use super::prelude::Environment;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };
pub const NULL: Value = Value::Null;

pub type BuiltinFunction = fn(Vec<Value>) -> Value;

#[derive(Clone)]
pub enum Value {
    Integer {
        value: i64
    },
    Boolean {
        value: bool
    },
    String {
        value: String,
    },
    Null,
    Array {
        elements: Vec<Value>
    },
    Map {
        pairs: HashMap<HashKey, (Value, Value)>
    },
    Function {
        parameters: Vec<Identifier>,
        body: Rc<Block>,
        env: Rc<RefCell<Environment>>
    },
    Builtin {
        function: BuiltinFunction
    },
    // Control-flow carrier for `return`; unwrapped at call and program
    // boundaries, never observable from the language.
    ReturnValue {
        value: Box<Value>
    },
    Error {
        message: String
    },
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::String { value } => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
            Value::Array { elements } => {
                let elements = elements.iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>();

                write!(f, "[{}]", elements.join(", "))
            },
            Value::Map { pairs } => {
                let pairs = pairs.values()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<String>>();

                write!(f, "{{{}}}", pairs.join(", "))
            },
            Value::Function { parameters, body, .. } => {
                let parameters = parameters.iter()
                    .map(|parameter| parameter.to_string())
                    .collect::<Vec<String>>();

                write!(f, "fn({}) {{ {} }}", parameters.join(", "), body)
            },
            Value::Builtin { .. } => write!(f, "built-in function"),
            Value::ReturnValue { value } => write!(f, "{value}"),
            Value::Error { message } => write!(f, "ERROR: {message}")
        }
    }
}

// Function values close over the environment that created them, and that
// environment usually holds the function itself. Derived Debug/PartialEq
// would recurse through the cycle, so both are written out by hand:
// functions compare and print by reference, not by structure.
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => f.debug_struct("Integer").field("value", value).finish(),
            Value::Boolean { value } => f.debug_struct("Boolean").field("value", value).finish(),
            Value::String { value } => f.debug_struct("String").field("value", value).finish(),
            Value::Null => write!(f, "Null"),
            Value::Array { elements } => f.debug_struct("Array").field("elements", elements).finish(),
            Value::Map { pairs } => f.debug_struct("Map").field("pairs", pairs).finish(),
            Value::Function { parameters, body, .. } => f.debug_struct("Function")
                .field("parameters", parameters)
                .field("body", &format!("{body}"))
                .finish_non_exhaustive(),
            Value::Builtin { .. } => write!(f, "Builtin"),
            Value::ReturnValue { value } => f.debug_struct("ReturnValue").field("value", value).finish(),
            Value::Error { message } => f.debug_struct("Error").field("message", message).finish()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer { value: a }, Value::Integer { value: b }) => a == b,
            (Value::Boolean { value: a }, Value::Boolean { value: b }) => a == b,
            (Value::String { value: a }, Value::String { value: b }) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Array { elements: a }, Value::Array { elements: b }) => a == b,
            (Value::Map { pairs: a }, Value::Map { pairs: b }) => a == b,
            (
                Value::Function { body: a, env: ea, .. },
                Value::Function { body: b, env: eb, .. }
            ) => Rc::ptr_eq(a, b) && Rc::ptr_eq(ea, eb),
            (Value::Builtin { function: a }, Value::Builtin { function: b }) => {
                std::ptr::eq(*a as *const (), *b as *const ())
            },
            (Value::ReturnValue { value: a }, Value::ReturnValue { value: b }) => a == b,
            (Value::Error { message: a }, Value::Error { message: b }) => a == b,
            _ => false
        }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::String { .. } => ValueType::String,
            Self::Null => ValueType::Null,
            Self::Array { .. } => ValueType::Array,
            Self::Map { .. } => ValueType::Map,
            Self::Function { .. } => ValueType::Function,
            Self::Builtin { .. } => ValueType::Builtin,
            Self::ReturnValue { .. } => ValueType::ReturnValue,
            Self::Error { .. } => ValueType::Error
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Map keys for the hashable value kinds. Integers hash to their own
    /// bit pattern, booleans to 0/1, strings to an FNV-1a content hash.
    /// Distinct strings that collide on the 64-bit hash alias one slot;
    /// collisions are not disambiguated further.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Self::Integer { value } => *value as u64,
            Self::Boolean { value } => *value as u64,
            Self::String { value } => fnv1a(value.as_bytes()),
            _ => return None
        };

        Some(HashKey { tag: self._type(), value })
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;

    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }

    hash
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Integer,
    Boolean,
    String,
    Null,
    Array,
    Map,
    Function,
    Builtin,
    ReturnValue,
    Error,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Null => "NULL",
            Self::Array => "ARRAY",
            Self::Map => "MAP",
            Self::Function => "FUNCTION",
            Self::Builtin => "BUILTIN",
            Self::ReturnValue => "RETURN_VALUE",
            Self::Error => "ERROR"
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub tag: ValueType,
    pub value: u64
}
