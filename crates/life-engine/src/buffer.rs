//! Two-slot generation arena.
//!
//! [`DoubleBuffer`] owns exactly two cell buffers of equal length and a flag
//! naming the slot that holds the current generation. [`DoubleBuffer::split`]
//! hands out the current slot read-only and the other slot writable, so a
//! step can never read from the buffer it is writing. [`DoubleBuffer::swap`]
//! flips the flag; no cells are moved.

use life_grid::Cell;

/// Which of the two slots holds the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    First,
    Second,
}

impl Slot {
    const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Current and scratch buffers for generation stepping.
///
/// `B` is any owned cell buffer: a plain `Vec<Cell>` or a shaped
/// [`life_grid::Grid`].
#[derive(Debug, Clone)]
pub struct DoubleBuffer<B = Vec<Cell>> {
    first: B,
    second: B,
    current: Slot,
}

impl<B> DoubleBuffer<B>
where
    B: Clone + AsRef<[Cell]> + AsMut<[Cell]>,
{
    /// Take `initial` as the current generation. The scratch slot starts as
    /// a copy and is fully overwritten by the first step.
    pub fn new(initial: B) -> Self {
        let scratch = initial.clone();
        Self {
            first: initial,
            second: scratch,
            current: Slot::First,
        }
    }

    /// The current generation.
    pub fn current(&self) -> &B {
        match self.current {
            Slot::First => &self.first,
            Slot::Second => &self.second,
        }
    }

    /// The current generation read-only and the scratch buffer writable.
    pub fn split(&mut self) -> (&[Cell], &mut [Cell]) {
        match self.current {
            Slot::First => (self.first.as_ref(), self.second.as_mut()),
            Slot::Second => (self.second.as_ref(), self.first.as_mut()),
        }
    }

    /// Promote the scratch buffer to current.
    pub const fn swap(&mut self) {
        self.current = self.current.other();
    }

    /// Cells per buffer.
    pub fn len(&self) -> usize {
        self.first.as_ref().len()
    }

    /// Whether the buffers hold no cells.
    pub fn is_empty(&self) -> bool {
        self.first.as_ref().is_empty()
    }

    /// Drop the scratch buffer and return the current generation.
    pub fn into_current(self) -> B {
        match self.current {
            Slot::First => self.first,
            Slot::Second => self.second,
        }
    }
}
