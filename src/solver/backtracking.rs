use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::level::Level;
use crate::moves::{Move, Moves};
use crate::solver::reachability::Reachable;
use crate::solver::Push;
use crate::state::State;

// Terminology:
// move = changing player position by one cell
// push = a move that changes a box position
// walk = a move that doesn't change a box position

/// Follows the links back to the initial state (the one without a prev)
/// and returns the pushes in the order they were made.
pub(crate) fn backtrack_pushes<'a, H: BuildHasher>(
    prevs: &HashMap<&'a State, Option<(&'a State, Push)>, H>,
    final_state: &'a State,
) -> Vec<Push> {
    let mut pushes = Vec::new();
    let mut cur = final_state;
    while let Some((prev, push)) = prevs[cur] {
        pushes.push(push);
        cur = prev;
    }
    pushes.reverse();
    pushes
}

/// Turns pushes into walks and pushes starting from where the player actually stands.
///
/// States in the search only know the player's area so the walks have to be recomputed
/// by replaying the pushes on the real board.
pub(crate) fn reconstruct_moves(level: &Level, pushes: &[Push]) -> Moves {
    let mut moves = Moves::default();
    let mut state = level.state.clone();

    for push in pushes {
        let box_grid = state.box_grid(&level.map.grid);
        let reachable = Reachable::new(&level.map, &box_grid, state.player_pos);
        let pusher_pos = push.box_pos - push.dir;
        let path = reachable
            .path_to(pusher_pos)
            .expect("The player must be able to reach the pushing position");
        for step in path.windows(2) {
            moves.add(Move::new(step[0].dir_to(step[1]), false));
        }
        moves.add(Move::new(push.dir, true));

        let box_index = state
            .boxes
            .binary_search(&push.box_pos)
            .expect("There must be a box to push");
        state = state.push(box_index, push.dir);
    }

    moves
}
