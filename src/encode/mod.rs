//! Extensible JSON encoding over an ordered encoder chain.
//!
//! Encoders are consulted in registration order; the first whose
//! capability predicate accepts a value writes it, and a mandatory
//! fallback emits `null` for anything nothing claims. Malformed or
//! unknown host values therefore never abort an encode call; only a sink
//! write failure can.

mod context;

pub use context::EncodeContext;

use std::io::Write;

use crate::error::Result;
use crate::options::EncodeOptions;

/// A type-specific JSON writer, tested by capability rather than by type.
///
/// Implementations are stateless and reentrant; they write children
/// through `ctx.nest().encode(child)` so extensions registered by a host
/// compose uniformly with the built-in set.
pub trait Encoder<V> {
    /// Whether this encoder can write `value`.
    fn can_encode(&self, value: &V, ctx: &EncodeContext<'_, V>) -> bool;

    /// Write `value` as JSON text to the context's sink.
    fn encode(&self, value: &V, ctx: &mut EncodeContext<'_, V>) -> Result<()>;
}

pub(crate) fn encode_value<V>(
    out: &mut dyn Write,
    encoders: &[Box<dyn Encoder<V>>],
    fallback: &dyn Encoder<V>,
    options: &EncodeOptions,
    value: &V,
) -> Result<()> {
    let mut ctx = EncodeContext::new(out, encoders, fallback, options);
    ctx.encode(value)
}
