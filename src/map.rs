use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Contents, MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Clone)]
pub(crate) struct GoalMap {
    pub(crate) grid: Vec2d<MapCell>,
    pub(crate) goals: Vec<Pos>,
}

impl GoalMap {
    pub(crate) fn new(grid: Vec2d<MapCell>, goals: Vec<Pos>) -> Self {
        GoalMap { grid, goals }
    }

    /// Anything outside the grid counts as wall.
    pub(crate) fn is_wall(&self, pos: Pos) -> bool {
        self.grid.get(pos).map_or(true, |&cell| cell == MapCell::Wall)
    }

    pub(crate) fn is_goal(&self, pos: Pos) -> bool {
        self.grid.get(pos) == Some(&MapCell::Goal)
    }

    pub(crate) fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(self, state)
    }

    pub(crate) fn write_with_state(&self, state: &State, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid = self.grid.scratchpad_with_default(Contents::Empty);
        for &b in &state.boxes {
            state_grid[b] = Contents::Box;
        }
        state_grid[state.player_pos] = Contents::Player;
        self.write(&state_grid, f)
    }

    fn write(&self, state_grid: &Vec2d<Contents>, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.grid.rows() {
            // don't print trailing empty cells to match the input level strings
            let last_non_empty = (0..self.grid.cols())
                .map(|c| Pos::new(r, c))
                .filter(|&pos| {
                    self.grid[pos] != MapCell::Empty || state_grid[pos] != Contents::Empty
                })
                .map(|pos| pos.c)
                .last();

            if let Some(last) = last_non_empty {
                for c in 0..=last {
                    let pos = Pos::new(r, c);
                    Self::write_xsb(self.grid[pos], state_grid[pos], f)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_xsb(cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (cell, contents) {
            (MapCell::Wall, Contents::Empty) => write!(f, "#"),
            (MapCell::Wall, _) => unreachable!(),
            (MapCell::Empty, Contents::Empty) => write!(f, " "),
            (MapCell::Empty, Contents::Box) => write!(f, "$"),
            (MapCell::Empty, Contents::Player) => write!(f, "@"),
            (MapCell::Goal, Contents::Empty) => write!(f, "."),
            (MapCell::Goal, Contents::Box) => write!(f, "*"),
            (MapCell::Goal, Contents::Player) => write!(f, "+"),
        }
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state_grid = self.grid.scratchpad_with_default(Contents::Empty);
        self.write(&state_grid, f)
    }
}

impl Debug for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
