/// Options for a decode call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Whether completed objects and arrays are offered to the codec's
    /// transformer chain.
    pub allow_transform: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform(mut self, allow_transform: bool) -> Self {
        self.allow_transform = allow_transform;
        self
    }
}

/// Options for an encode call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Expand the output with newlines and two-space indents.
    pub expand: bool,
    /// Let encoders emit extended literals that are not valid JSON.
    pub allow_literal: bool,
    /// Starting indentation depth, normally 0.
    pub depth: usize,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn with_literal(mut self, allow_literal: bool) -> Self {
        self.allow_literal = allow_literal;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_defaults_are_conservative() {
        let decode = DecodeOptions::default();
        assert!(!decode.allow_transform);

        let encode = EncodeOptions::default();
        assert!(!encode.expand);
        assert!(!encode.allow_literal);
        assert_eq!(encode.depth, 0);
    }

    #[rstest::rstest]
    fn test_builders_chain() {
        let options = EncodeOptions::new().with_expand(true).with_depth(2);
        assert!(options.expand);
        assert_eq!(options.depth, 2);

        let options = DecodeOptions::new().with_transform(true);
        assert!(options.allow_transform);
    }
}
