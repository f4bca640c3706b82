//! Dense sibling ranks and the scopes they are allocated in.

use super::{BoardDomainError, ColumnId, CycleId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One-based rank of an item among the siblings sharing its parent.
///
/// Columns are ranked within their cycle and tasks within their column.
/// After every completed operation the ranks of a sibling group are expected
/// to form `1..=n`; see [`is_dense`].
///
/// # Examples
///
/// ```
/// use percurso::board::domain::Sequence;
///
/// let seq = Sequence::new(2).expect("positive sequence");
/// assert_eq!(seq.next().value(), 3);
/// assert!(Sequence::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Sequence(u32);

impl Sequence {
    /// Rank of the first item in a sibling group.
    pub const FIRST: Self = Self(1);

    /// Creates a validated sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidSequence`] for zero.
    pub const fn new(value: u32) -> Result<Self, BoardDomainError> {
        if value == 0 {
            return Err(BoardDomainError::InvalidSequence(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying rank.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the following rank, saturating at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the append position after the current maximum, or
    /// [`Sequence::FIRST`] for an empty sibling group.
    #[must_use]
    pub fn after(current_max: Option<Self>) -> Self {
        current_max.map_or(Self::FIRST, Self::next)
    }

    /// Returns the dense ranks `1..=count` in order.
    pub fn dense(count: usize) -> impl Iterator<Item = Self> {
        (1..=u32::try_from(count).unwrap_or(u32::MAX)).map(Self)
    }
}

impl TryFrom<u32> for Sequence {
    type Error = BoardDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Sequence> for u32 {
    fn from(value: Sequence) -> Self {
        value.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns whether the given ranks are a permutation of `1..=n`.
#[must_use]
pub fn is_dense(sequences: impl IntoIterator<Item = Sequence>) -> bool {
    let mut values: Vec<u32> = sequences.into_iter().map(Sequence::value).collect();
    values.sort_unstable();
    values
        .iter()
        .zip(1_u32..)
        .all(|(value, expected)| *value == expected)
}

/// Parent scope in which sibling ranks are allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceScope {
    /// Columns within a cycle.
    Cycle(CycleId),
    /// Tasks within a column.
    Column(ColumnId),
}
