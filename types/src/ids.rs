use std::fmt;

/// Identity of a captured thought, stable for the thought's lifetime.
///
/// Issued by the store from a monotonic counter, so ids stay unique even when
/// a whole batch of thoughts is created in the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThoughtId(u64);

impl ThoughtId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ThoughtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
