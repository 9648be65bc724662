//! The canonical heading table and the per-cell direction symbol.
//!
//! Both flood-fill discovery and path walking derive their offsets from
//! [`Heading::offset`]. Discovery assigns a newly found cell the
//! [`reverse`](Heading::reverse) of the probe heading, so walking the
//! stored heading always moves one step closer to a goal.

use std::fmt;

use smallvec::SmallVec;

use crate::coord::Coord;

/// One of the four orthogonal movement headings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Row + 1.
    Down,
    /// Row - 1.
    Up,
    /// Col + 1.
    Right,
    /// Col - 1.
    Left,
}

impl Heading {
    /// All headings in flood-fill discovery order.
    ///
    /// When a cell has several shortest routes, the first discoverer in this
    /// order wins the tie.
    pub const ALL: [Heading; 4] = [Heading::Down, Heading::Up, Heading::Right, Heading::Left];

    /// The `(d_row, d_col)` offset of one step in this heading.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Heading::Down => (1, 0),
            Heading::Up => (-1, 0),
            Heading::Right => (0, 1),
            Heading::Left => (0, -1),
        }
    }

    /// The opposite heading.
    pub const fn reverse(self) -> Heading {
        match self {
            Heading::Down => Heading::Up,
            Heading::Up => Heading::Down,
            Heading::Right => Heading::Left,
            Heading::Left => Heading::Right,
        }
    }

    /// The cell `steps` cells away from `from` in this heading.
    pub const fn step_from(self, from: Coord, steps: i32) -> Coord {
        let (dr, dc) = self.offset();
        from.offset(dr * steps, dc * steps)
    }

    /// Debug map character: `v ^ > <`.
    pub const fn symbol(self) -> char {
        match self {
            Heading::Down => 'v',
            Heading::Up => '^',
            Heading::Right => '>',
            Heading::Left => '<',
        }
    }
}

/// Per-cell entry of the direction field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Step this way to get one hop closer to the nearest goal.
    Move(Heading),
    /// The cell is a goal.
    Goal,
    /// The cell is impassable.
    Wall,
    /// Free cell with no route to any goal.
    Unreachable,
}

impl Direction {
    /// The heading to follow, if this is a directional entry.
    pub const fn heading(self) -> Option<Heading> {
        match self {
            Direction::Move(h) => Some(h),
            _ => None,
        }
    }

    /// Whether an actor may be placed on a cell with this entry.
    pub const fn is_placeable(self) -> bool {
        matches!(self, Direction::Move(_) | Direction::Goal)
    }

    /// Debug map character: one of `^ v < > X #` or a space.
    pub const fn symbol(self) -> char {
        match self {
            Direction::Move(h) => h.symbol(),
            Direction::Goal => 'X',
            Direction::Wall => '#',
            Direction::Unreachable => ' ',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// In-bounds orthogonal neighbours of `at`, in discovery order.
pub(crate) fn neighbours(at: Coord, rows: usize, cols: usize) -> SmallVec<[(Heading, Coord); 4]> {
    let mut result = SmallVec::new();
    for heading in Heading::ALL {
        let n = heading.step_from(at, 1);
        if n.row >= 0 && n.col >= 0 && (n.row as usize) < rows && (n.col as usize) < cols {
            result.push((heading, n));
        }
    }
    result
}
