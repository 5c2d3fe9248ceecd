//! A self-contained host: insertion-ordered maps, plain vectors, and a
//! closed scalar set.

mod encoders;

pub use encoders::{
    BooleanEncoder, LiteralEncoder, MappingEncoder, NullEncoder, NumberEncoder, SequenceEncoder,
    StringEncoder,
};

use indexmap::IndexMap;

use crate::codec::Codec;
use crate::factory::ValueFactory;
use crate::literal::Literal;

/// A decoded JSON value in the generic host representation.
///
/// Objects keep key insertion order; `Int` holds what fits a 32-bit
/// signed range, `Long` the rest of the 64-bit range, and `Double`
/// everything with a fractional or exponent part.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
    Literal(Literal),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer and Long widen; Double does not.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(i64::from(*value)),
            Value::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Any numeric kind, widened to a double.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(f64::from(*value)),
            Value::Long(value) => Some(*value as f64),
            Value::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key on an object; `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|entries| entries.get(key))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Object(entries)
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Value::Literal(literal)
    }
}

/// The value factory for the generic host.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericFactory;

impl ValueFactory for GenericFactory {
    type Value = Value;

    fn create_object(&self) -> Value {
        Value::Object(IndexMap::new())
    }

    fn put_in_object(&self, object: &mut Value, key: String, value: Value) {
        match object {
            Value::Object(entries) => {
                entries.insert(key, value);
            }
            _ => panic!("put_in_object on a non-object value"),
        }
    }

    fn create_array(&self, capacity: usize) -> Value {
        Value::Array(Vec::with_capacity(capacity))
    }

    fn set_in_array(&self, array: &mut Value, index: usize, value: Value) {
        match array {
            Value::Array(items) => {
                if index == items.len() {
                    items.push(value);
                } else {
                    items[index] = value;
                }
            }
            _ => panic!("set_in_array on a non-array value"),
        }
    }

    fn create_string(&self, value: String) -> Value {
        Value::String(value)
    }

    fn create_integer(&self, value: i32) -> Value {
        Value::Int(value)
    }

    fn create_long(&self, value: i64) -> Value {
        Value::Long(value)
    }

    fn create_double(&self, value: f64) -> Value {
        Value::Double(value)
    }

    fn create_boolean(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn create_null(&self) -> Value {
        Value::Null
    }
}

/// A codec preloaded with the built-in encoder set for this host.
pub fn codec() -> Codec<GenericFactory> {
    Codec::new(GenericFactory, Box::new(NullEncoder))
        .with_encoder(Box::new(BooleanEncoder))
        .with_encoder(Box::new(StringEncoder))
        .with_encoder(Box::new(SequenceEncoder))
        .with_encoder(Box::new(MappingEncoder))
        .with_encoder(Box::new(NullEncoder))
        .with_encoder(Box::new(NumberEncoder))
        .with_encoder(Box::new(LiteralEncoder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Long(1 << 40).as_i64(), Some(1 << 40));
        assert_eq!(Value::Double(2.5).as_i64(), None);
        assert_eq!(Value::Double(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
    }

    #[rstest::rstest]
    fn test_object_get() {
        let mut entries = IndexMap::new();
        entries.insert("a".to_string(), Value::Int(1));
        let object = Value::Object(entries);
        assert_eq!(object.get("a"), Some(&Value::Int(1)));
        assert_eq!(object.get("b"), None);
        assert_eq!(Value::Null.get("a"), None);
    }

    #[rstest::rstest]
    fn test_factory_array_grows_and_overwrites() {
        let factory = GenericFactory;
        let mut array = factory.create_array(2);
        factory.set_in_array(&mut array, 0, Value::Int(1));
        factory.set_in_array(&mut array, 1, Value::Int(2));
        factory.set_in_array(&mut array, 0, Value::Int(9));
        assert_eq!(
            array,
            Value::Array(vec![Value::Int(9), Value::Int(2)])
        );
    }

    #[rstest::rstest]
    fn test_factory_object_last_write_wins() {
        let factory = GenericFactory;
        let mut object = factory.create_object();
        factory.put_in_object(&mut object, "k".to_string(), Value::Int(1));
        factory.put_in_object(&mut object, "k".to_string(), Value::Int(2));
        assert_eq!(object.get("k"), Some(&Value::Int(2)));
        assert_eq!(object.as_object().unwrap().len(), 1);
    }
}
