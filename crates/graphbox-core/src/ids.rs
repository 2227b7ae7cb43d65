use std::fmt;

/// Stable identity of a knot. Never reused within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KnotId(pub u64);

/// Stable identity of an edge. Never reused within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

impl fmt::Display for KnotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Monotonic id source shared by the knots and edges of one graph.
#[derive(Debug, Clone)]
pub(crate) struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    fn next_raw(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    pub(crate) fn knot(&mut self) -> KnotId {
        KnotId(self.next_raw())
    }

    pub(crate) fn edge(&mut self) -> EdgeId {
        EdgeId(self.next_raw())
    }

    /// Makes sure ids handed out later are strictly greater than `raw`.
    pub(crate) fn observe(&mut self, raw: u64) {
        if raw >= self.next {
            self.next = raw.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_skips_past_imported_ids() {
        let mut ids = IdSequence::default();
        assert_eq!(ids.knot(), KnotId(1));
        ids.observe(41);
        assert_eq!(ids.edge(), EdgeId(42));
        ids.observe(3);
        assert_eq!(ids.knot(), KnotId(43));
    }
}
