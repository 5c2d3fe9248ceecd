//! Lenient JSON decoding through a host value factory.
//!
//! The grammar is deliberately more permissive than strict JSON so that
//! hand-authored and legacy documents still decode:
//!
//! - `'...'` strings alongside `"..."`
//! - unquoted keys and bare-word values
//! - `=` and `=>` as key/value separators, `;` as a pair separator
//! - trailing separators before a closing bracket
//! - `(...)` arrays (the bracket kinds must match)
//! - case-insensitive `true`/`false`/`null`
//! - `0x` hexadecimal integers
//! - a failed numeric parse falls back to a plain string
//!
//! Every violation that remains is reported as [`crate::Error::Syntax`]
//! with the 1-based position of the offending character.

mod source;

use source::Source;

use crate::error::Result;
use crate::factory::{Transformer, ValueFactory};
use crate::num;

/// Characters that end an unquoted literal run.
const STRUCTURAL: &str = ",:]}/\\\"[{;=#";

pub(crate) struct Decoder<'a, F: ValueFactory> {
    factory: &'a F,
    transformers: &'a [Box<dyn Transformer<F>>],
    allow_transform: bool,
    source: Source<'a>,
}

/// An unquoted run resolved to its decoded kind, before the host
/// materializes it.
enum Scalar {
    Bool(bool),
    Null,
    Int(i32),
    Long(i64),
    Double(f64),
    Text(String),
}

impl<'a, F: ValueFactory> Decoder<'a, F> {
    pub fn new(
        factory: &'a F,
        transformers: &'a [Box<dyn Transformer<F>>],
        text: &'a str,
        allow_transform: bool,
    ) -> Self {
        Self {
            factory,
            transformers,
            allow_transform,
            source: Source::new(text),
        }
    }

    /// Decode one top-level object or array.
    pub fn decode(&mut self) -> Result<F::Value> {
        match self.source.next_clean() {
            Some('{') => {
                self.source.back()?;
                self.decode_object()
            }
            Some('[') => {
                self.source.back()?;
                self.decode_array()
            }
            _ => Err(self
                .source
                .error("JSON text must begin with either a '{' or a '['")),
        }
    }

    fn decode_object(&mut self) -> Result<F::Value> {
        let mut object = self.factory.create_object();
        if self.source.next_clean() != Some('{') {
            return Err(self.source.error("A JSON object text must begin with '{'"));
        }
        loop {
            match self.source.next_clean() {
                None => return Err(self.source.error("A JSON object text must end with '}'")),
                Some('}') => return Ok(self.transform(object)),
                Some(_) => self.source.back()?,
            }
            let key = self.next_key()?;

            // A key is followed by ':'; '=' and '=>' are tolerated.
            match self.source.next_clean() {
                Some('=') => {
                    if self.source.next() != Some('>') {
                        self.source.back()?;
                    }
                }
                Some(':') => {}
                _ => return Err(self.source.error("Expected a ':' after a key")),
            }
            let value = self.next_value()?;
            self.factory.put_in_object(&mut object, key, value);

            // Pairs are separated by ','; ';' is tolerated, as is a
            // trailing separator before the closing brace.
            match self.source.next_clean() {
                Some(';') | Some(',') => {
                    if self.source.next_clean() == Some('}') {
                        return Ok(self.transform(object));
                    }
                    self.source.back()?;
                }
                Some('}') => return Ok(self.transform(object)),
                _ => return Err(self.source.error("Expected a ',' or '}'")),
            }
        }
    }

    fn decode_array(&mut self) -> Result<F::Value> {
        let mut items: Vec<F::Value> = Vec::new();
        let close = match self.source.next_clean() {
            Some('[') => ']',
            Some('(') => ')',
            _ => return Err(self.source.error("A JSON array text must start with '['")),
        };
        match self.source.next_clean() {
            Some(c) if c == close => {
                let array = self.items_to_array(items);
                return Ok(self.transform(array));
            }
            _ => self.source.back()?,
        }
        loop {
            if self.source.next_clean() == Some(',') {
                // A stray separator makes an empty slot; drop it.
                self.source.back()?;
            } else {
                self.source.back()?;
                let value = self.next_value()?;
                items.push(value);
            }
            match self.source.next_clean() {
                Some(';') | Some(',') => {
                    if self.source.next_clean() == Some(close) {
                        let array = self.items_to_array(items);
                        return Ok(self.transform(array));
                    }
                    self.source.back()?;
                }
                Some(c @ (']' | ')')) => {
                    if c != close {
                        return Err(self.source.error(format!("Expected a '{close}'")));
                    }
                    let array = self.items_to_array(items);
                    return Ok(self.transform(array));
                }
                _ => return Err(self.source.error("Expected a ',' or ']'")),
            }
        }
    }

    /// The next value: a string, a nested object or array, or an unquoted
    /// run resolved to a scalar.
    fn next_value(&mut self) -> Result<F::Value> {
        match self.source.next_clean() {
            Some(q @ ('"' | '\'')) => {
                let text = self.next_string(q)?;
                Ok(self.factory.create_string(text))
            }
            Some('{') => {
                self.source.back()?;
                self.decode_object()
            }
            Some('[') | Some('(') => {
                self.source.back()?;
                self.decode_array()
            }
            first => {
                let run = self.unquoted_run(first)?;
                Ok(self.scalar_to_value(classify(run)))
            }
        }
    }

    /// An object key: read like a value, then stringified, so unquoted
    /// keys (and numeric or boolean spellings) are accepted.
    fn next_key(&mut self) -> Result<String> {
        match self.source.next_clean() {
            Some(q @ ('"' | '\'')) => self.next_string(q),
            Some('{') | Some('[') | Some('(') => Err(self.source.error("Expected a key")),
            first => {
                let run = self.unquoted_run(first)?;
                Ok(key_text(classify(run)))
            }
        }
    }

    /// Accumulate an unquoted run starting with the already-pulled `first`
    /// character, until a structural character or whitespace ends it. The
    /// terminating structural character is pushed back for the caller.
    fn unquoted_run(&mut self, first: Option<char>) -> Result<String> {
        let mut run = String::new();
        let mut current = first;
        while let Some(c) = current {
            if c > ' ' && !STRUCTURAL.contains(c) {
                run.push(c);
                current = self.source.next();
            } else {
                break;
            }
        }
        if run.is_empty() {
            return Err(self.source.error("Missing value"));
        }
        if matches!(current, Some(c) if c > ' ') {
            self.source.back()?;
        }
        Ok(run)
    }

    fn next_string(&mut self, quote: char) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.source.next() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.source.error("Unterminated string"))
                }
                Some('\\') => match self.source.next() {
                    Some('b') => text.push('\u{8}'),
                    Some('t') => text.push('\t'),
                    Some('n') => text.push('\n'),
                    Some('f') => text.push('\u{c}'),
                    Some('r') => text.push('\r'),
                    Some('u') => text.push(self.next_unicode_escape()?),
                    Some(c @ ('"' | '\'' | '\\' | '/')) => text.push(c),
                    _ => return Err(self.source.error("Illegal escape")),
                },
                Some(c) if c == quote => return Ok(text),
                Some(c) => text.push(c),
            }
        }
    }

    /// Decode `\uXXXX`, composing a surrogate pair when the first unit is
    /// a high surrogate.
    fn next_unicode_escape(&mut self) -> Result<char> {
        let unit = self.next_hex_unit()?;
        if !(0xD800..=0xDFFF).contains(&unit) {
            return char::from_u32(unit).ok_or_else(|| self.source.error("Illegal escape"));
        }
        if unit >= 0xDC00 {
            return Err(self.source.error("Illegal escape"));
        }
        if self.source.next() != Some('\\') || self.source.next() != Some('u') {
            return Err(self.source.error("Illegal escape"));
        }
        let low = self.next_hex_unit()?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(self.source.error("Illegal escape"));
        }
        let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or_else(|| self.source.error("Illegal escape"))
    }

    fn next_hex_unit(&mut self) -> Result<u32> {
        let mut unit = 0u32;
        for _ in 0..4 {
            match self.source.next().and_then(|c| c.to_digit(16)) {
                Some(digit) => unit = unit * 16 + digit,
                None => return Err(self.source.error("Illegal escape")),
            }
        }
        Ok(unit)
    }

    fn scalar_to_value(&self, scalar: Scalar) -> F::Value {
        match scalar {
            Scalar::Bool(value) => self.factory.create_boolean(value),
            Scalar::Null => self.factory.create_null(),
            Scalar::Int(value) => self.factory.create_integer(value),
            Scalar::Long(value) => self.factory.create_long(value),
            Scalar::Double(value) => self.factory.create_double(value),
            Scalar::Text(value) => self.factory.create_string(value),
        }
    }

    fn items_to_array(&self, items: Vec<F::Value>) -> F::Value {
        let mut array = self.factory.create_array(items.len());
        for (index, item) in items.into_iter().enumerate() {
            self.factory.set_in_array(&mut array, index, item);
        }
        array
    }

    fn transform(&self, value: F::Value) -> F::Value {
        if self.allow_transform {
            for transformer in self.transformers {
                if let Some(replacement) = transformer.transform(&value, self.factory) {
                    return replacement;
                }
            }
        }
        value
    }
}

/// Resolve an unquoted run. `true`/`false`/`null` match case-insensitively;
/// numeric-looking text is classified Integer/Long/Double by range and
/// shape; anything that fails to parse stays a plain string.
fn classify(run: String) -> Scalar {
    if run.eq_ignore_ascii_case("true") {
        return Scalar::Bool(true);
    }
    if run.eq_ignore_ascii_case("false") {
        return Scalar::Bool(false);
    }
    if run.eq_ignore_ascii_case("null") {
        return Scalar::Null;
    }

    let first = run.as_bytes()[0];
    if !matches!(first, b'0'..=b'9' | b'.' | b'-' | b'+') {
        return Scalar::Text(run);
    }

    // The non-standard 0x form, unsigned only.
    if first == b'0' && run.len() > 2 && matches!(run.as_bytes()[1], b'x' | b'X') {
        if let Ok(value) = i64::from_str_radix(&run[2..], 16) {
            return integer_scalar(value);
        }
    }

    if run.contains('.') || run.contains('e') || run.contains('E') {
        let value = num::parse(&run);
        if !value.is_nan() {
            return Scalar::Double(value);
        }
    } else if let Ok(value) = run.parse::<i64>() {
        return integer_scalar(value);
    }

    Scalar::Text(run)
}

fn integer_scalar(value: i64) -> Scalar {
    match i32::try_from(value) {
        Ok(int) => Scalar::Int(int),
        Err(_) => Scalar::Long(value),
    }
}

/// The canonical key spelling of a scalar, mirroring value resolution so
/// `{0x10: 1}` keys the same entry as `{16: 1}`.
fn key_text(scalar: Scalar) -> String {
    match scalar {
        Scalar::Bool(true) => "true".to_string(),
        Scalar::Bool(false) => "false".to_string(),
        Scalar::Null => "null".to_string(),
        Scalar::Int(value) => value.to_string(),
        Scalar::Long(value) => value.to_string(),
        Scalar::Double(value) => num::format(value),
        Scalar::Text(text) => text,
    }
}
