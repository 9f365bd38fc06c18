use crate::model::ids::RecordingId;
use crate::model::recording_set::RecordingSet;

/// Circular cursor over a `RecordingSet`.
///
/// The cursor always satisfies `0 <= position < len`. Stepping past either
/// end wraps around, so paging never fails once the navigator exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    set: RecordingSet,
    state: usize,
}

impl Navigator {
    /// Start at the first recording of the set.
    #[must_use]
    pub fn new(set: RecordingSet) -> Self {
        Self { set, state: 0 }
    }

    /// Build a fresh navigator and replay cumulative click counts on it.
    #[must_use]
    pub fn replayed(set: RecordingSet, forward_count: u32, backward_count: u32) -> Self {
        let mut navigator = Self::new(set);
        navigator.advance_by(forward_count, backward_count);
        navigator
    }

    #[must_use]
    pub fn set(&self) -> &RecordingSet {
        &self.set
    }

    /// Zero-based cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.state
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Move one recording forward, wrapping to the first after the last.
    pub fn forward(&mut self) {
        if self.state + 1 < self.set.len() {
            self.state += 1;
        } else {
            self.state = 0;
        }
    }

    /// Move one recording back, wrapping to the last before the first.
    pub fn backward(&mut self) {
        if self.state > 0 {
            self.state -= 1;
        } else {
            self.state = self.set.len().saturating_sub(1);
        }
    }

    /// Apply `forward_count` single forward steps, then `backward_count`
    /// single backward steps.
    pub fn advance_by(&mut self, forward_count: u32, backward_count: u32) {
        for _ in 0..forward_count {
            self.forward();
        }
        for _ in 0..backward_count {
            self.backward();
        }
    }

    #[must_use]
    pub fn current(&self) -> &RecordingId {
        // `state < len` and the set is never empty.
        &self.set.as_slice()[self.state]
    }

    pub fn step_next(&mut self) -> &RecordingId {
        self.forward();
        self.current()
    }

    pub fn step_prev(&mut self) -> &RecordingId {
        self.backward();
        self.current()
    }
}
