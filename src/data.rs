use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

/// Rows and columns are stored in a `u8` and 255 is never a valid index
/// so stepping off the grid never lands back on it.
pub(crate) const MAX_SIZE: usize = 255;

/// The heuristic enumerates box to goal assignments, anything above this
/// would make every state prohibitively expensive to score.
pub(crate) const MAX_BOXES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapCell {
    Empty,
    Goal,
    Wall,
}

impl Default for MapCell {
    fn default() -> Self {
        MapCell::Empty
    }
}

impl Display for MapCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MapCell::Empty => write!(f, " "),
            MapCell::Goal => write!(f, "."),
            MapCell::Wall => write!(f, "#"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

/// A grid coordinate.
///
/// The derived ordering is row-major which is what region normalization relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance
    pub(crate) fn dist(self, other: Pos) -> u16 {
        let dr = (i16::from(self.r) - i16::from(other.r)).abs();
        let dc = (i16::from(self.c) - i16::from(other.c)).abs();
        (dr + dc) as u16
    }

    pub(crate) fn dir_to(self, other: Pos) -> Dir {
        for &dir in &DIRECTIONS {
            if self + dir == other {
                return dir;
            }
        }
        panic!("{:?} and {:?} are not adjacent", self, other);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

/// Order in which pushes are generated, keeps search traces reproducible.
pub(crate) const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

impl Dir {
    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
            Dir::Right => write!(f, "r"),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    // wrapping so that stepping off the top or left edge yields an out of bounds pos instead of a panic
    fn add(self, dir: Dir) -> Pos {
        match dir {
            Dir::Up => Pos::new(self.r.wrapping_sub(1), self.c),
            Dir::Down => Pos::new(self.r.wrapping_add(1), self.c),
            Dir::Left => Pos::new(self.r, self.c.wrapping_sub(1)),
            Dir::Right => Pos::new(self.r, self.c.wrapping_add(1)),
        }
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}
