use std::collections::VecDeque;

use crate::data::DIRECTIONS;
use crate::map::GoalMap;
use crate::vec2d::Vec2d;

/// Marks walls and every cell from which a lone box can't be pushed to any goal.
///
/// Pulls boxes backwards from all goals at once: a box on `pos` could have been pushed there
/// in direction `dir` if both the cell it came from and the cell the player stood on are floor.
/// This ignores whether the player can walk around the box between pushes
/// so it can only miss dead ends, never report a live cell as dead.
#[inline(never)] // this is called only once and this way it's easier to see in callgrind
pub(crate) fn find_dead_ends(map: &GoalMap) -> Vec2d<bool> {
    let mut alive = map.grid.scratchpad();

    let mut to_visit = VecDeque::new();
    for &goal in &map.goals {
        alive[goal] = true;
        to_visit.push_back(goal);
    }

    while let Some(box_pos) = to_visit.pop_front() {
        for &dir in &DIRECTIONS {
            let prev_box_pos = box_pos - dir;
            if map.is_wall(prev_box_pos) || alive[prev_box_pos] {
                continue;
            }
            let player_pos = prev_box_pos - dir;
            if map.is_wall(player_pos) {
                continue;
            }
            alive[prev_box_pos] = true;
            to_visit.push_back(prev_box_pos);
        }
    }

    let mut dead_ends = map.grid.scratchpad();
    for pos in map.grid.positions() {
        dead_ends[pos] = !alive[pos];
    }
    dead_ends
}
