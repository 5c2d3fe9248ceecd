//! A caller-owned codec: one value factory plus ordered encoder and
//! transformer registrations.

use std::io::{Read, Write};

use crate::decode::Decoder;
use crate::encode::{self, Encoder};
use crate::error::Result;
use crate::factory::{Transformer, ValueFactory};
use crate::options::{DecodeOptions, EncodeOptions};

/// Converts between JSON text and one host's native values.
///
/// Registration order is priority order: the first encoder whose
/// predicate accepts a value wins, and the first transformer returning a
/// replacement wins. Register everything up front; decode and encode
/// borrow the codec immutably, so a configured codec can serve
/// independent calls concurrently.
///
/// # Examples
/// ```
/// use hostjson::generic;
/// use hostjson::{DecodeOptions, EncodeOptions};
///
/// let codec = generic::codec();
/// let value = codec.decode("{'tags': (a, b,)}", &DecodeOptions::default())?;
/// let text = codec.encode(&value, &EncodeOptions::default())?;
/// assert_eq!(text, r#"{"tags":["a","b"]}"#);
/// # Ok::<(), hostjson::Error>(())
/// ```
pub struct Codec<F: ValueFactory> {
    factory: F,
    encoders: Vec<Box<dyn Encoder<F::Value>>>,
    fallback: Box<dyn Encoder<F::Value>>,
    transformers: Vec<Box<dyn Transformer<F>>>,
}

impl<F: ValueFactory> Codec<F> {
    /// A codec with no registrations beyond the mandatory fallback
    /// encoder.
    pub fn new(factory: F, fallback: Box<dyn Encoder<F::Value>>) -> Self {
        Self {
            factory,
            encoders: Vec::new(),
            fallback,
            transformers: Vec::new(),
        }
    }

    /// Append an encoder; earlier registrations win.
    pub fn with_encoder(mut self, encoder: Box<dyn Encoder<F::Value>>) -> Self {
        self.encoders.push(encoder);
        self
    }

    /// Append a post-decode transformer; earlier registrations win.
    pub fn with_transformer(mut self, transformer: Box<dyn Transformer<F>>) -> Self {
        self.transformers.push(transformer);
        self
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Decode one top-level object or array from JSON text.
    pub fn decode(&self, text: &str, options: &DecodeOptions) -> Result<F::Value> {
        let mut decoder = Decoder::new(
            &self.factory,
            &self.transformers,
            text,
            options.allow_transform,
        );
        decoder.decode()
    }

    /// Read the stream to its end, then decode. Read failures surface as
    /// [`crate::Error::Io`].
    pub fn decode_from_reader<R: Read>(
        &self,
        mut reader: R,
        options: &DecodeOptions,
    ) -> Result<F::Value> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.decode(&text, options)
    }

    /// Encode a host value as JSON text.
    pub fn encode(&self, value: &F::Value, options: &EncodeOptions) -> Result<String> {
        let mut out = Vec::new();
        self.encode_to_writer(&mut out, value, options)?;
        Ok(String::from_utf8(out).expect("encoders write valid UTF-8"))
    }

    /// Encode a host value, writing JSON text to `out`.
    pub fn encode_to_writer<W: Write>(
        &self,
        mut out: W,
        value: &F::Value,
        options: &EncodeOptions,
    ) -> Result<()> {
        encode::encode_value(
            &mut out,
            &self.encoders,
            self.fallback.as_ref(),
            options,
            value,
        )
    }
}
