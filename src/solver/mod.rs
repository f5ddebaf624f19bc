pub(crate) mod a_star;
pub(crate) mod backtracking;
pub(crate) mod deadlocks;
pub(crate) mod heuristic;
pub(crate) mod preprocessing;
pub(crate) mod reachability;

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fnv::FnvHashMap;
use log::{debug, info};
use typed_arena::Arena;

use crate::config::Config;
use crate::data::{Dir, Pos, DIRECTIONS};
use crate::level::Level;
use crate::moves::Moves;
use crate::state::{State, NO_BOX};

use self::a_star::SearchNode;
use self::backtracking::{backtrack_pushes, reconstruct_moves};
use self::deadlocks::Deadlock;
use self::heuristic::push_lower_bound;
use self::reachability::Reachable;

pub use self::a_star::Stats;

/// The box that was on `box_pos` moved one cell in `dir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Push {
    pub(crate) box_pos: Pos,
    pub(crate) dir: Dir,
}

impl Push {
    pub(crate) fn new(box_pos: Pos, dir: Dir) -> Self {
        Push { box_pos, dir }
    }

    fn dest(self) -> Pos {
        self.box_pos + self.dir
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// `moves` contain exactly `push_count` pushes and no other solution has fewer.
    Solved {
        push_count: usize,
        states_explored: usize,
        moves: Moves,
    },
    /// Either there is no solution or the search ran out of its expansion budget.
    Unsolved { states_explored: usize },
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        match self {
            SolveResult::Solved { .. } => true,
            SolveResult::Unsolved { .. } => false,
        }
    }

    pub fn states_explored(&self) -> usize {
        match *self {
            SolveResult::Solved {
                states_explored, ..
            }
            | SolveResult::Unsolved { states_explored } => states_explored,
        }
    }

    pub fn moves(&self) -> Option<&Moves> {
        match self {
            SolveResult::Solved { moves, .. } => Some(moves),
            SolveResult::Unsolved { .. } => None,
        }
    }
}

/// Finds a solution with the lowest possible number of pushes.
///
/// `on_progress` is called with the number of expanded states
/// every `config.progress_interval` expansions.
pub fn solve(
    level: &Level,
    config: &Config,
    on_progress: Option<&mut dyn FnMut(usize)>,
) -> SolveResult {
    solve_with_stats(level, config, on_progress).0
}

pub fn solve_with_stats(
    level: &Level,
    config: &Config,
    on_progress: Option<&mut dyn FnMut(usize)>,
) -> (SolveResult, Stats) {
    debug!("Search called");
    let (result, stats) = search(level, config, on_progress);
    match result {
        SolveResult::Solved {
            push_count,
            states_explored,
            ..
        } => info!(
            "Solved with {} pushes after expanding {} states",
            push_count, states_explored
        ),
        SolveResult::Unsolved { states_explored } => {
            info!("No solution after expanding {} states", states_explored)
        }
    }
    (result, stats)
}

fn search(
    level: &Level,
    config: &Config,
    mut on_progress: Option<&mut dyn FnMut(usize)>,
) -> (SolveResult, Stats) {
    let mut stats = Stats::new();

    let arena = Arena::new();
    let mut to_visit = BinaryHeap::new();
    let mut prevs = FnvHashMap::default();
    let mut best_dists = FnvHashMap::default();
    let mut seq = 0;
    let mut expanded = 0;

    let start: &State = arena.alloc(normalized(level, &level.state));
    if let Some(deadlock) = deadlocks::find_any_deadlock(level, start) {
        debug!("Initial state is a {:?} deadlock", deadlock);
        return (SolveResult::Unsolved { states_explored: 0 }, stats);
    }

    let start_node = SearchNode::new(
        start,
        None,
        0,
        push_lower_bound(&level.map.goals, &start.boxes),
        seq,
    );
    best_dists.insert(start, 0);
    stats.add_created(&start_node);
    to_visit.push(Reverse(start_node));

    while let Some(Reverse(cur_node)) = to_visit.pop() {
        if prevs.contains_key(cur_node.state) {
            stats.add_duplicate(&cur_node);
            continue;
        }

        // insert here and not as soon as we discover it
        // otherwise we overwrite the shortest path with longer ones
        prevs.insert(cur_node.state, cur_node.prev);

        if solved(level, cur_node.state) {
            debug!("Solved, backtracking path");
            let pushes = backtrack_pushes(&prevs, cur_node.state);
            let moves = reconstruct_moves(level, &pushes);
            let result = SolveResult::Solved {
                push_count: pushes.len(),
                states_explored: expanded,
                moves,
            };
            return (result, stats);
        }

        if expanded >= config.max_expansions {
            debug!("Reached the limit of {} expansions", config.max_expansions);
            return (
                SolveResult::Unsolved {
                    states_explored: expanded,
                },
                stats,
            );
        }
        expanded += 1;
        if stats.add_expanded(&cur_node) {
            debug!("Expanded new depth: {}", cur_node.dist);
        }
        if config.progress_interval > 0 && expanded % config.progress_interval == 0 {
            if let Some(ref mut callback) = on_progress {
                callback(expanded);
            }
        }

        for (new_state, push) in expand_pushes(level, cur_node.state) {
            if prevs.contains_key(&new_state) {
                continue;
            }
            match deadlocks::find_deadlock(level, &new_state, push.dest()) {
                Some(Deadlock::Static) => {
                    stats.add_static_deadlock();
                    continue;
                }
                Some(Deadlock::Freeze) => {
                    stats.add_freeze_deadlock();
                    continue;
                }
                None => {}
            }

            let dist = cur_node.dist + 1;
            let new_state: &State = match best_dists.get_key_value(&new_state) {
                Some((_, &best)) if best <= dist => continue,
                Some((&known, _)) => known,
                None => arena.alloc(new_state),
            };
            best_dists.insert(new_state, dist);

            seq += 1;
            let h = push_lower_bound(&level.map.goals, &new_state.boxes);
            let next_node = SearchNode::new(new_state, Some((cur_node.state, push)), dist, h, seq);
            stats.add_created(&next_node);
            to_visit.push(Reverse(next_node));
        }
    }

    debug!("Frontier exhausted");
    (
        SolveResult::Unsolved {
            states_explored: expanded,
        },
        stats,
    )
}

/// All states reachable with exactly one push, already normalized.
///
/// Boxes are tried in the order they're stored, directions in `DIRECTIONS` order.
/// Pushes into dead ends are included, the caller decides what to prune.
pub(crate) fn expand_pushes(level: &Level, state: &State) -> Vec<(State, Push)> {
    let box_grid = state.box_grid(&level.map.grid);
    let reachable = Reachable::new(&level.map, &box_grid, state.player_pos);

    let mut new_states = Vec::new();
    for (box_index, &box_pos) in state.boxes.iter().enumerate() {
        for &dir in &DIRECTIONS {
            let push_dest = box_pos + dir;
            if !reachable.contains(box_pos - dir)
                || level.is_wall(push_dest)
                || box_grid[push_dest] != NO_BOX
            {
                continue;
            }
            let new_state = normalized(level, &state.push(box_index, dir));
            new_states.push((new_state, Push::new(box_pos, dir)));
        }
    }
    new_states
}

/// Replaces the player position with the top-left cell of the player's area.
pub(crate) fn normalized(level: &Level, state: &State) -> State {
    let box_grid = state.box_grid(&level.map.grid);
    let reachable = Reachable::new(&level.map, &box_grid, state.player_pos);
    State {
        player_pos: reachable.top_left(),
        boxes: state.boxes.clone(),
    }
}

fn solved(level: &Level, state: &State) -> bool {
    // all boxes on a goal, box and goal counts are equal so all goals are covered too
    state.boxes.iter().all(|&b| level.is_goal(b))
}
