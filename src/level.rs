use std::fmt::{self, Debug, Display, Formatter};

use log::debug;

use crate::data::Pos;
use crate::map::GoalMap;
use crate::map_formatter::MapFormatter;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::solver::preprocessing;
use crate::state::State;
use crate::vec2d::Vec2d;

/// A parsed level - everything that doesn't change while solving.
///
/// Also holds the initial (literal, not normalized) player position and boxes.
#[derive(Clone)]
pub struct Level {
    pub(crate) map: GoalMap,
    pub(crate) state: State,
    /// Walls and cells from which a lone box can never be pushed to any goal.
    pub(crate) dead_ends: Vec2d<bool>,
}

impl Level {
    pub(crate) fn new(map: GoalMap, state: State) -> Self {
        let dead_ends = preprocessing::find_dead_ends(&map);
        debug!("Dead ends:\n{}", dead_ends);
        Level {
            map,
            state,
            dead_ends,
        }
    }

    pub fn rows(&self) -> u8 {
        self.map.grid.rows()
    }

    pub fn cols(&self) -> u8 {
        self.map.grid.cols()
    }

    pub fn player_pos(&self) -> Pos {
        self.state.player_pos
    }

    /// Sorted in row-major order.
    pub fn boxes(&self) -> &[Pos] {
        &self.state.boxes
    }

    pub fn goals(&self) -> &[Pos] {
        &self.map.goals
    }

    /// Positions outside the map are walls.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.map.is_wall(pos)
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.map.is_goal(pos)
    }

    /// True for floor cells where a box can never reach any goal,
    /// regardless of other boxes and the player.
    pub fn is_static_deadlock(&self, pos: Pos) -> bool {
        !self.is_wall(pos) && self.dead_ends[pos]
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.map.format_with_state(&self.state)
    }

    /// Replays `moves` from the initial state, one board per push
    /// (or per move when `include_steps` is set).
    pub fn solution<'a>(&'a self, moves: &'a Moves, include_steps: bool) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.map, &self.state, moves, include_steps)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
