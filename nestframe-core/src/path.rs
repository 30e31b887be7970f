//! Dotted nested-field paths.

use std::fmt;

/// An ordered sequence of field names addressing a leaf value inside
/// nested struct columns.
///
/// Depth-1 paths name top-level columns; deeper paths descend through
/// struct members, e.g. `profile.contact.email`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NestedPath {
    segments: Vec<String>,
}

impl NestedPath {
    /// Create a depth-1 path naming a top-level column.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![root.into()],
        }
    }

    /// Parse a dotted path string (`"a.b.c"` becomes `["a", "b", "c"]`).
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }

    /// Extend this path by one segment, returning the child path.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// The path segments, in root-to-leaf order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The top-level column this path descends from.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// The final segment (the leaf field name).
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether this path descends into a struct (depth above one).
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl fmt::Display for NestedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
