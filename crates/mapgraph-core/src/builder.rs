use crate::store::Edge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// First endpoint recorded; waiting for the second.
    Pending(usize),
    /// Second endpoint received; the pair is ready to commit.
    Completed(Edge),
    /// Second endpoint repeated the first; nothing to commit.
    SelfLoopDiscarded(usize),
}

/// Two-click edge accumulator. Holds at most one pending endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeBuilder {
    pending: Option<usize>,
}

impl EdgeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    pub fn select(&mut self, index: usize) -> Selection {
        match self.pending.take() {
            None => {
                self.pending = Some(index);
                Selection::Pending(index)
            }
            Some(first) if first == index => Selection::SelfLoopDiscarded(index),
            Some(first) => Selection::Completed(Edge::new(first, index)),
        }
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Drops the pending endpoint if it no longer names a node.
    pub fn forget_from(&mut self, node_count: usize) {
        if self.pending.is_some_and(|index| index >= node_count) {
            self.pending = None;
        }
    }
}
