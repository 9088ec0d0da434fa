//! The two-state cell value.
//!
//! On disk a cell is a single byte: `0` for dead, `1` for alive. In memory it
//! is a [`Cell`], so a third state cannot exist once bytes have been admitted
//! through [`Cell::from_byte`].

/// State of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    /// No organism. Stored as byte `0`.
    #[default]
    Dead = 0,
    /// A live organism. Stored as byte `1`.
    Alive = 1,
}

impl Cell {
    /// Decode a stored byte. Returns `None` for anything other than 0 or 1.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Dead),
            1 => Some(Self::Alive),
            _ => None,
        }
    }

    /// The on-disk byte for this cell.
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Whether the cell holds a live organism.
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.as_byte()
    }
}
