//! Cache keys identifying query results.

use std::fmt;

/// Ordered, immutable key identifying one cached query result.
///
/// Segments are compared by value; two keys name the same cache identity iff
/// every segment matches. Parameter segments encode as `name=value`, so every
/// variable that affects a response must be folded into the key for
/// deduplication to be sound.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct QueryKey {
    segments: Vec<String>,
}

impl QueryKey {
    /// Creates a key with a single root segment, e.g. `products`.
    pub fn root(segment: &str) -> Self {
        Self {
            segments: vec![segment.to_string()],
        }
    }

    /// Appends a literal segment.
    pub fn with_segment(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Appends a `name=value` parameter segment.
    pub fn with_param(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.segments.push(format!("{}={}", name, value));
        self
    }

    /// Whether `prefix` matches the leading segments of this key. Used for
    /// prefix-scoped invalidation and cancellation.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// The key's segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
