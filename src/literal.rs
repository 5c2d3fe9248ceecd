use std::fmt;

/// A container for verbatim text written in place of a JSON value.
///
/// Literals only reach the output when the encode call opts into extended
/// literals; the result is not valid JSON, which is the caller's explicit
/// trade-off.
///
/// # Examples
/// ```
/// use hostjson::Literal;
///
/// let literal = Literal::new("function () { return 1; }");
/// assert_eq!(literal.value(), "function () { return 1; }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    value: String,
}

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Render for output at the given depth, indenting every line after
    /// the first so multi-line literals stay aligned with their container.
    pub fn indented(&self, depth: usize) -> String {
        if !self.value.contains('\n') {
            return self.value.clone();
        }
        let prefix = "  ".repeat(depth);
        let mut out = String::with_capacity(self.value.len());
        for (index, line) in self.value.split('\n').enumerate() {
            if index > 0 {
                out.push('\n');
                out.push_str(&prefix);
            }
            out.push_str(line);
        }
        out
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
