//! The built-in encoder set for the generic host.

use crate::encode::{EncodeContext, Encoder};
use crate::error::Result;
use crate::num;

use super::Value;

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

/// Writes all numeric kinds through the number formatting discipline.
/// Doubles keep a fractional marker so they re-decode as doubles.
pub struct NumberEncoder;

impl Encoder<Value> for NumberEncoder {
    fn can_encode(&self, value: &Value, _ctx: &EncodeContext<'_, Value>) -> bool {
        matches!(value, Value::Int(_) | Value::Long(_) | Value::Double(_))
    }

    fn encode(&self, value: &Value, ctx: &mut EncodeContext<'_, Value>) -> Result<()> {
        match value {
            Value::Int(value) => {
                let mut buffer = itoa::Buffer::new();
                ctx.write_str(buffer.format(*value))
            }
            Value::Long(value) => {
                let mut buffer = itoa::Buffer::new();
                ctx.write_str(buffer.format(*value))
            }
            Value::Double(value) => ctx.write_str(&num::format_double(*value)),
            _ => ctx.write_str("null"),
        }
    }
}

/// Writes `null`; doubles as the mandatory fallback for values nothing
/// else claims.
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

/// Emits stored text verbatim. Only claims a value when extended literals
/// are enabled, so the fallback's `null` covers literals otherwise.
pub struct LiteralEncoder;

impl Encoder<Value> for LiteralEncoder {
    fn can_encode(&self, value: &Value, ctx: &EncodeContext<'_, Value>) -> bool {
        ctx.allow_literal() && matches!(value, Value::Literal(_))
    }

    fn encode(&self, value: &Value, ctx: &mut EncodeContext<'_, Value>) -> Result<()> {
        let Value::Literal(literal) = value else {
            return ctx.write_str("null");
        };
        ctx.write_str(&literal.indented(ctx.depth()))
    }
}
