use std::io::Write;

use crate::encode::Encoder;
use crate::error::Result;
use crate::options::EncodeOptions;

/// The indent unit for one depth level.
const INDENTER: &str = "  ";

/// Carries the output sink and formatting state for one encode call.
///
/// A context is fixed at construction. `nest` reborrows the sink into a
/// context one level deeper for a child value; when compact, depth is
/// irrelevant and left alone. Encoders write children through
/// `ctx.nest().encode(child)` so user-supplied encoders compose with the
/// built-in set.
pub struct EncodeContext<'a, V> {
    out: &'a mut dyn Write,
    encoders: &'a [Box<dyn Encoder<V>>],
    fallback: &'a dyn Encoder<V>,
    expand: bool,
    allow_literal: bool,
    depth: usize,
}

impl<'a, V> EncodeContext<'a, V> {
    pub(crate) fn new(
        out: &'a mut dyn Write,
        encoders: &'a [Box<dyn Encoder<V>>],
        fallback: &'a dyn Encoder<V>,
        options: &EncodeOptions,
    ) -> Self {
        Self {
            out,
            encoders,
            fallback,
            expand: options.expand,
            allow_literal: options.allow_literal,
            depth: options.depth,
        }
    }

    /// Whether output is expanded with newlines and indents.
    pub fn expand(&self) -> bool {
        self.expand
    }

    /// Whether extended literals may be emitted.
    pub fn allow_literal(&self) -> bool {
        self.allow_literal
    }

    /// The current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Write `value` through the first registered encoder that accepts it;
    /// the fallback runs when none do.
    pub fn encode(&mut self, value: &V) -> Result<()> {
        let encoders = self.encoders;
        for encoder in encoders {
            if encoder.can_encode(value, self) {
                return encoder.encode(value, self);
            }
        }
        let fallback = self.fallback;
        fallback.encode(value, self)
    }

    /// A context for one nesting level deeper.
    pub fn nest(&mut self) -> EncodeContext<'_, V> {
        EncodeContext {
            out: &mut *self.out,
            encoders: self.encoders,
            fallback: self.fallback,
            expand: self.expand,
            allow_literal: self.allow_literal,
            depth: if self.expand {
                self.depth + 1
            } else {
                self.depth
            },
        }
    }

    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn write_char(&mut self, c: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.out.write_all(c.encode_utf8(&mut buf).as_bytes())?;
        Ok(())
    }

    /// Indent to this context's own level; a no-op when compact.
    pub fn indent(&mut self) -> Result<()> {
        if self.expand {
            for _ in 0..self.depth {
                self.write_str(INDENTER)?;
            }
        }
        Ok(())
    }

    /// Indent one level past this context, for a nested child.
    pub fn indent_nested(&mut self) -> Result<()> {
        if self.expand {
            for _ in 0..=self.depth {
                self.write_str(INDENTER)?;
            }
        }
        Ok(())
    }

    /// A line break when expanded; nothing when compact.
    pub fn newline(&mut self) -> Result<()> {
        if self.expand {
            self.write_str("\n")?;
        }
        Ok(())
    }

    /// An element separator: `,` plus a conditional line break.
    pub fn comma(&mut self) -> Result<()> {
        self.write_str(",")?;
        self.newline()
    }

    /// A key/value separator: `": "` expanded, `":"` compact.
    pub fn colon(&mut self) -> Result<()> {
        self.write_str(if self.expand { ": " } else { ":" })
    }

    /// Write a double-quoted, escaped string.
    pub fn quoted(&mut self, text: &str) -> Result<()> {
        self.write_char('"')?;
        for c in text.chars() {
            match c {
                '\\' => self.write_str("\\\\")?,
                '"' => self.write_str("\\\"")?,
                '\n' => self.write_str("\\n")?,
                '\r' => self.write_str("\\r")?,
                '\t' => self.write_str("\\t")?,
                '\u{c}' => self.write_str("\\f")?,
                _ => self.write_char(c)?,
            }
        }
        self.write_char('"')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverEncoder;

    impl Encoder<()> for NeverEncoder {
        fn can_encode(&self, _value: &(), _ctx: &EncodeContext<'_, ()>) -> bool {
            false
        }

        fn encode(&self, _value: &(), ctx: &mut EncodeContext<'_, ()>) -> Result<()> {
            ctx.write_str("null")
        }
    }

    fn with_context<R>(
        options: EncodeOptions,
        body: impl FnOnce(&mut EncodeContext<'_, ()>) -> R,
    ) -> (R, String) {
        let mut out = Vec::new();
        let fallback = NeverEncoder;
        let result = {
            let mut ctx = EncodeContext::new(&mut out, &[], &fallback, &options);
            body(&mut ctx)
        };
        (result, String::from_utf8(out).unwrap())
    }

    #[rstest::rstest]
    fn test_compact_primitives_stay_flat() {
        let (_, text) = with_context(EncodeOptions::default(), |ctx| {
            ctx.write_char('{').unwrap();
            ctx.newline().unwrap();
            ctx.indent_nested().unwrap();
            ctx.quoted("a").unwrap();
            ctx.colon().unwrap();
            ctx.write_str("1").unwrap();
            ctx.comma().unwrap();
            ctx.write_char('}').unwrap();
        });
        assert_eq!(text, "{\"a\":1,}");
    }

    #[rstest::rstest]
    fn test_expanded_primitives_indent() {
        let options = EncodeOptions::new().with_expand(true).with_depth(1);
        let (_, text) = with_context(options, |ctx| {
            ctx.indent().unwrap();
            ctx.write_str("x").unwrap();
            ctx.newline().unwrap();
            ctx.indent_nested().unwrap();
            ctx.write_str("y").unwrap();
            ctx.colon().unwrap();
        });
        assert_eq!(text, "  x\n    y: ");
    }

    #[rstest::rstest]
    fn test_nest_deepens_only_when_expanded() {
        let options = EncodeOptions::new().with_expand(true);
        let ((), text) = with_context(options, |ctx| {
            assert_eq!(ctx.nest().depth(), 1);
            assert_eq!(ctx.depth(), 0);
        });
        assert!(text.is_empty());

        let ((), _) = with_context(EncodeOptions::default(), |ctx| {
            assert_eq!(ctx.nest().depth(), 0);
        });
    }

    #[rstest::rstest]
    fn test_quoted_escapes() {
        let (_, text) = with_context(EncodeOptions::default(), |ctx| {
            ctx.quoted("a\"b\\c\nd\te\u{c}f\r").unwrap();
        });
        assert_eq!(text, "\"a\\\"b\\\\c\\nd\\te\\ff\\r\"");
    }

    #[rstest::rstest]
    fn test_fallback_runs_when_nothing_accepts() {
        let (_, text) = with_context(EncodeOptions::default(), |ctx| {
            ctx.encode(&()).unwrap();
        });
        assert_eq!(text, "null");
    }
}
