//! A host backed by `serde_json::Value`.
//!
//! The `preserve_order` feature keeps object keys in insertion order, so
//! the decode-side ordering invariant holds. Integer and Long collapse
//! into `serde_json::Number`'s `i64` form, and a double the host cannot
//! represent (NaN, the infinities) materializes as `Null`; both are host
//! decisions the factory contract leaves open.

use serde_json::{Map, Number, Value};

use crate::codec::Codec;
use crate::encode::{EncodeContext, Encoder};
use crate::error::Result;
use crate::factory::ValueFactory;
use crate::num;

/// The value factory for the `serde_json::Value` host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeValueFactory;

impl ValueFactory for SerdeValueFactory {
    type Value = Value;

    fn create_object(&self) -> Value {
        Value::Object(Map::new())
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
        Value::Number(Number::from(value))
    }

    fn create_long(&self, value: i64) -> Value {
        Value::Number(Number::from(value))
    }

    fn create_double(&self, value: f64) -> Value {
        match Number::from_f64(value) {
            Some(number) => Value::Number(number),
            None => Value::Null,
        }
    }

    fn create_boolean(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn create_null(&self) -> Value {
        Value::Null
    }
}

/// Writes `true` and `false`.
pub struct BooleanEncoder;

impl Encoder<Value> for BooleanEncoder {
    fn can_encode(&self, value: &Value, _ctx: &EncodeContext<'_, Value>) -> bool {
        matches!(value, Value::Bool(_))
    }

    fn encode(&self, value: &Value, ctx: &mut EncodeContext<'_, Value>) -> Result<()> {
        let Value::Bool(value) = value else {
            return ctx.write_str("null");
        };
        ctx.write_str(if *value { "true" } else { "false" })
    }
}

/// Writes quoted, escaped strings.
pub struct StringEncoder;

impl Encoder<Value> for StringEncoder {
    fn can_encode(&self, value: &Value, _ctx: &EncodeContext<'_, Value>) -> bool {
        matches!(value, Value::String(_))
    }

    fn encode(&self, value: &Value, ctx: &mut EncodeContext<'_, Value>) -> Result<()> {
        let Value::String(text) = value else {
            return ctx.write_str("null");
        };
        ctx.quoted(text)
    }
}

/// Writes numbers through the shared formatting discipline.
pub struct NumberEncoder;

impl Encoder<Value> for NumberEncoder {
    fn can_encode(&self, value: &Value, _ctx: &EncodeContext<'_, Value>) -> bool {
        matches!(value, Value::Number(_))
    }

    fn encode(&self, value: &Value, ctx: &mut EncodeContext<'_, Value>) -> Result<()> {
        let Value::Number(number) = value else {
            return ctx.write_str("null");
        };
        ctx.write_str(&num::format_json_number(number))
    }
}

/// Writes `null`; doubles as the mandatory fallback.
pub struct NullEncoder;

impl Encoder<Value> for NullEncoder {
    fn can_encode(&self, value: &Value, _ctx: &EncodeContext<'_, Value>) -> bool {
        matches!(value, Value::Null)
    }

    fn encode(&self, _value: &Value, ctx: &mut EncodeContext<'_, Value>) -> Result<()> {
        ctx.write_str("null")
    }
}

/// Writes arrays, expanding one element per line.
pub struct SequenceEncoder;

impl Encoder<Value> for SequenceEncoder {
    fn can_encode(&self, value: &Value, _ctx: &EncodeContext<'_, Value>) -> bool {
        matches!(value, Value::Array(_))
    }

    fn encode(&self, value: &Value, ctx: &mut EncodeContext<'_, Value>) -> Result<()> {
        let Value::Array(items) = value else {
            return ctx.write_str("null");
        };
        ctx.write_char('[')?;
        if !items.is_empty() {
            ctx.newline()?;
            let last = items.len() - 1;
            for (index, item) in items.iter().enumerate() {
                ctx.indent_nested()?;
                ctx.nest().encode(item)?;
                if index < last {
                    ctx.comma()?;
                }
            }
            ctx.newline()?;
            ctx.indent()?;
        }
        ctx.write_char(']')
    }
}

/// Writes objects, expanding one pair per line in insertion order.
pub struct MappingEncoder;

impl Encoder<Value> for MappingEncoder {
    fn can_encode(&self, value: &Value, _ctx: &EncodeContext<'_, Value>) -> bool {
        matches!(value, Value::Object(_))
    }

    fn encode(&self, value: &Value, ctx: &mut EncodeContext<'_, Value>) -> Result<()> {
        let Value::Object(entries) = value else {
            return ctx.write_str("null");
        };
        ctx.write_char('{')?;
        if !entries.is_empty() {
            ctx.newline()?;
            let last = entries.len() - 1;
            for (index, (key, item)) in entries.iter().enumerate() {
                ctx.indent_nested()?;
                ctx.quoted(key)?;
                ctx.colon()?;
                ctx.nest().encode(item)?;
                if index < last {
                    ctx.comma()?;
                }
            }
            ctx.newline()?;
            ctx.indent()?;
        }
        ctx.write_char('}')
    }
}

/// A codec preloaded with the encoder set for this host.
pub fn codec() -> Codec<SerdeValueFactory> {
    Codec::new(SerdeValueFactory, Box::new(NullEncoder))
        .with_encoder(Box::new(BooleanEncoder))
        .with_encoder(Box::new(StringEncoder))
        .with_encoder(Box::new(SequenceEncoder))
        .with_encoder(Box::new(MappingEncoder))
        .with_encoder(Box::new(NullEncoder))
        .with_encoder(Box::new(NumberEncoder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_factory_scalars() {
        let factory = SerdeValueFactory;
        assert_eq!(factory.create_integer(16), serde_json::json!(16));
        assert_eq!(
            factory.create_long(1 << 40),
            serde_json::json!(1099511627776i64)
        );
        assert_eq!(factory.create_double(2.5), serde_json::json!(2.5));
        assert_eq!(factory.create_double(f64::NAN), Value::Null);
        assert_eq!(factory.create_boolean(true), Value::Bool(true));
        assert_eq!(factory.create_null(), Value::Null);
    }

    #[rstest::rstest]
    fn test_factory_array_grows_and_overwrites() {
        let factory = SerdeValueFactory;
        let mut array = factory.create_array(1);
        factory.set_in_array(&mut array, 0, serde_json::json!(1));
        factory.set_in_array(&mut array, 0, serde_json::json!(2));
        factory.set_in_array(&mut array, 1, serde_json::json!(3));
        assert_eq!(array, serde_json::json!([2, 3]));
    }
}
