//! Actor identifiers.

use std::fmt;

/// Identifies an actor within one session.
///
/// Assigned sequentially in row-major order of the start markers, so
/// `ActorId(n)` is the n-th marker of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ActorId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
