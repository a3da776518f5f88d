//! Directed, weighted edges.

use std::cmp::Ordering;
use std::fmt;

use super::Node;

/// Weight assigned when none is given. The graph carries weights but never
/// interprets them.
pub const DEFAULT_WEIGHT: u32 = 1;

/// A directed edge `from → to`: "`from` depends on `to`".
///
/// Equality and ordering cover `(from, to, weight)`. The graph itself treats
/// two edges with the same endpoints as parallel regardless of weight.
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: Node,
    pub to: Node,
    pub weight: u32,
}

impl Edge {
    #[must_use]
    pub fn new(from: impl Into<Node>, to: impl Into<Node>) -> Self {
        Self::with_weight(from, to, DEFAULT_WEIGHT)
    }

    #[must_use]
    pub fn with_weight(from: impl Into<Node>, to: impl Into<Node>, weight: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// The same edge pointing the other way.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            weight: self.weight,
        }
    }

    /// `true` if this edge connects `from` to `to` (by identifier).
    #[must_use]
    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from.identifier() == from && self.to.identifier() == to
    }

    fn key(&self) -> (&str, &str, u32) {
        (self.from.identifier(), self.to.identifier(), self.weight)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weight_is_one() {
        assert_eq!(Edge::new(":a", ":b").weight, 1);
    }

    #[test]
    fn weight_participates_in_equality() {
        assert_eq!(Edge::new(":a", ":b"), Edge::with_weight(":a", ":b", 1));
        assert_ne!(Edge::new(":a", ":b"), Edge::with_weight(":a", ":b", 2));
    }

    #[test]
    fn ordering_is_by_from_then_to_then_weight() {
        let mut edges = vec![
            Edge::new("b", "a"),
            Edge::with_weight("a", "c", 2),
            Edge::new("a", "c"),
            Edge::new("a", "b"),
        ];
        edges.sort();
        let rendered: Vec<String> = edges
            .iter()
            .map(|e| format!("{}:{}", e, e.weight))
            .collect();
        assert_eq!(rendered, ["a -> b:1", "a -> c:1", "a -> c:2", "b -> a:1"]);
    }

    #[test]
    fn reversed_keeps_weight() {
        let edge = Edge::with_weight(":app", "okio", 7).reversed();
        assert!(edge.connects("okio", ":app"));
        assert_eq!(edge.weight, 7);
    }
}
