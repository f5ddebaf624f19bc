use std::collections::VecDeque;

use crate::data::{Pos, DIRECTIONS};
use crate::map::GoalMap;
use crate::state::NO_BOX;
use crate::vec2d::Vec2d;

/// The area the player can walk to without pushing anything.
///
/// Remembers how each cell was first reached by the BFS
/// so it also gives the shortest walk to any cell in the area.
pub(crate) struct Reachable {
    prevs: Vec2d<Option<Pos>>,
    start: Pos,
    top_left: Pos,
}

impl Reachable {
    pub(crate) fn new(map: &GoalMap, box_grid: &Vec2d<u8>, start: Pos) -> Self {
        let mut prevs = map.grid.scratchpad();
        prevs[start] = Some(start);
        let mut top_left = start;

        let mut to_visit = VecDeque::new();
        to_visit.push_back(start);

        while let Some(player_pos) = to_visit.pop_front() {
            for &dir in &DIRECTIONS {
                let new_pos = player_pos + dir;
                // out of bounds is a wall so the grid is only indexed inside
                if map.is_wall(new_pos)
                    || box_grid[new_pos] != NO_BOX
                    || prevs[new_pos].is_some()
                {
                    continue;
                }
                prevs[new_pos] = Some(player_pos);
                if new_pos < top_left {
                    top_left = new_pos;
                }
                to_visit.push_back(new_pos);
            }
        }

        Reachable {
            prevs,
            start,
            top_left,
        }
    }

    pub(crate) fn contains(&self, pos: Pos) -> bool {
        match self.prevs.get(pos) {
            Some(prev) => prev.is_some(),
            None => false,
        }
    }

    /// The minimal cell in row-major order - identifies the area.
    pub(crate) fn top_left(&self) -> Pos {
        self.top_left
    }

    /// Cells from start to `dest`, both included.
    pub(crate) fn path_to(&self, dest: Pos) -> Option<Vec<Pos>> {
        if !self.contains(dest) {
            return None;
        }

        let mut path = vec![dest];
        let mut cur = dest;
        while cur != self.start {
            cur = self.prevs[cur]?;
            path.push(cur);
        }
        path.reverse();
        Some(path)
    }
}
