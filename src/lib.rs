//! Conversion between JSON text and pluggable host value models.
//!
//! The decoder reads a deliberately lenient superset of JSON (unquoted
//! keys, single-quoted strings, `=`/`=>` separators, trailing commas,
//! `(...)` arrays, `0x` integers) and materializes host-native values
//! through a [`ValueFactory`], reporting every violation with a 1-based
//! line and column. The encoder walks host values through an ordered
//! chain of capability-tested [`Encoder`]s with a mandatory `null`
//! fallback, so an encode call never fails on value content, only on a
//! sink write failure.
//!
//! Two hosts ship with the crate: [`generic`] (a self-contained,
//! insertion-ordered value enum) and [`serde`] (materializing
//! `serde_json::Value` trees). The convenience functions below operate on
//! the generic host; build a [`Codec`] directly to use another host or to
//! register extra encoders and transformers.
//!
//! # Examples
//! ```
//! use hostjson::generic::Value;
//!
//! let value = hostjson::from_str("{count: 0x10, tags: [a, b,]}")?;
//! assert_eq!(value.get("count"), Some(&Value::Int(16)));
//!
//! let text = hostjson::to_string(&value)?;
//! assert_eq!(text, r#"{"count":16,"tags":["a","b"]}"#);
//! # Ok::<(), hostjson::Error>(())
//! ```

pub mod codec;
mod decode;
pub mod encode;
pub mod error;
pub mod factory;
pub mod generic;
pub mod literal;
pub mod num;
pub mod options;
pub mod serde;

use std::io::{Read, Write};

pub use codec::Codec;
pub use encode::{EncodeContext, Encoder};
pub use error::{Error, Result};
pub use factory::{Transformer, ValueFactory};
pub use literal::Literal;
pub use options::{DecodeOptions, EncodeOptions};

/// Decode a JSON object or array into a generic host value.
pub fn from_str(input: &str) -> Result<generic::Value> {
    from_str_with_options(input, &DecodeOptions::default())
}

pub fn from_str_with_options(input: &str, options: &DecodeOptions) -> Result<generic::Value> {
    generic::codec().decode(input, options)
}

/// Read a stream to its end, then decode it as a generic host value.
pub fn from_reader<R: Read>(reader: R) -> Result<generic::Value> {
    from_reader_with_options(reader, &DecodeOptions::default())
}

pub fn from_reader_with_options<R: Read>(
    reader: R,
    options: &DecodeOptions,
) -> Result<generic::Value> {
    generic::codec().decode_from_reader(reader, options)
}

/// Encode a generic host value as compact JSON text.
pub fn to_string(value: &generic::Value) -> Result<String> {
    to_string_with_options(value, &EncodeOptions::default())
}

pub fn to_string_with_options(
    value: &generic::Value,
    options: &EncodeOptions,
) -> Result<String> {
    generic::codec().encode(value, options)
}

/// Encode a generic host value, writing JSON text to `writer`.
pub fn to_writer<W: Write>(writer: W, value: &generic::Value) -> Result<()> {
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

pub fn to_writer_with_options<W: Write>(
    writer: W,
    value: &generic::Value,
    options: &EncodeOptions,
) -> Result<()> {
    generic::codec().encode_to_writer(writer, value, options)
}
