use log::trace;

use crate::data::{Dir, Pos};
use crate::level::Level;
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deadlock {
    /// A box is on a cell from which no goal can be reached.
    Static,
    /// A box not on a goal can never be moved again.
    Freeze,
}

/// Checks a state right after `moved_box` was pushed to its position.
///
/// Only the moved box can have entered a dead end, everything else was checked before.
pub(crate) fn find_deadlock(level: &Level, state: &State, moved_box: Pos) -> Option<Deadlock> {
    if level.is_static_deadlock(moved_box) {
        trace!("Static deadlock at {:?}", moved_box);
        return Some(Deadlock::Static);
    }
    if freeze_deadlock(level, &state.boxes) {
        trace!("Freeze deadlock after pushing to {:?}", moved_box);
        return Some(Deadlock::Freeze);
    }
    None
}

/// Checks every box - used for the initial state.
pub(crate) fn find_any_deadlock(level: &Level, state: &State) -> Option<Deadlock> {
    if state.boxes.iter().any(|&b| level.is_static_deadlock(b)) {
        return Some(Deadlock::Static);
    }
    if freeze_deadlock(level, &state.boxes) {
        return Some(Deadlock::Freeze);
    }
    None
}

/// True if some box that isn't on a goal can never move again.
///
/// Starts with all boxes marked frozen and unmarks those with a free axis
/// until nothing changes. What's left is a set of boxes that hold each other
/// (and walls) in place on both axes.
/// `boxes` must be sorted.
pub(crate) fn freeze_deadlock(level: &Level, boxes: &[Pos]) -> bool {
    let mut frozen = vec![true; boxes.len()];

    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..boxes.len() {
            if !frozen[i] {
                continue;
            }
            let blocked = |dir: Dir| {
                let neighbor = boxes[i] + dir;
                level.is_wall(neighbor)
                    || match boxes.binary_search(&neighbor) {
                        Ok(index) => frozen[index],
                        Err(_) => false,
                    }
            };
            let vertical = blocked(Dir::Up) || blocked(Dir::Down);
            let horizontal = blocked(Dir::Left) || blocked(Dir::Right);
            if !vertical || !horizontal {
                frozen[i] = false;
                changed = true;
            }
        }
    }

    boxes
        .iter()
        .zip(&frozen)
        .any(|(&b, &is_frozen)| is_frozen && !level.is_goal(b))
}
