use crate::data::{Pos, MAX_BOXES};

/// Lower bound on the number of pushes needed to solve the state.
///
/// Each box needs at least its Manhattan distance to whichever goal it ends on
/// and each goal takes exactly one box, so the cheapest box to goal matching
/// can never overestimate. With at most `MAX_BOXES` boxes a depth-first search
/// over matchings with pruning is fast enough.
pub(crate) fn push_lower_bound(goals: &[Pos], boxes: &[Pos]) -> u32 {
    debug_assert_eq!(goals.len(), boxes.len());
    debug_assert!(boxes.len() <= MAX_BOXES);

    let dists: Vec<Vec<u32>> = boxes
        .iter()
        .map(|&b| goals.iter().map(|&g| u32::from(b.dist(g))).collect())
        .collect();

    // greedy matching as the first upper bound so pruning kicks in early
    let mut best = greedy(&dists);
    assign(&dists, 0, 0, 0, &mut best);
    best
}

fn greedy(dists: &[Vec<u32>]) -> u32 {
    let mut used = 0u32;
    let mut total = 0;
    for row in dists {
        let (goal, dist) = row
            .iter()
            .enumerate()
            .filter(|&(g, _)| used & (1 << g) == 0)
            .min_by_key(|&(_, &d)| d)
            .map(|(g, &d)| (g, d))
            .unwrap_or((0, 0));
        used |= 1 << goal;
        total += dist;
    }
    total
}

fn assign(dists: &[Vec<u32>], box_index: usize, used: u32, cost: u32, best: &mut u32) {
    if cost >= *best {
        return;
    }
    if box_index == dists.len() {
        *best = cost;
        return;
    }

    for (goal, &dist) in dists[box_index].iter().enumerate() {
        if used & (1 << goal) != 0 {
            continue;
        }
        assign(dists, box_index + 1, used | (1 << goal), cost + dist, best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(coords: &[(u8, u8)]) -> Vec<Pos> {
        coords.iter().map(|&(r, c)| Pos::new(r, c)).collect()
    }

    #[test]
    fn all_on_goals() {
        let boxes = positions(&[(1, 1), (2, 5), (7, 3)]);
        assert_eq!(push_lower_bound(&boxes, &boxes), 0);
    }

    #[test]
    fn single_box() {
        let goals = positions(&[(5, 5)]);
        let boxes = positions(&[(2, 3)]);
        assert_eq!(push_lower_bound(&goals, &boxes), 5);
    }

    #[test]
    fn matching_beats_nearest_goal() {
        // both boxes are nearest to the first goal, summing nearest distances would give 1 + 2
        // but one of them has to take the far goal
        let goals = positions(&[(1, 1), (1, 9)]);
        let boxes = positions(&[(1, 2), (1, 3)]);
        assert_eq!(push_lower_bound(&goals, &boxes), 1 + 6);
    }

    #[test]
    fn greedy_is_not_optimal() {
        let goals = positions(&[(1, 1), (1, 4)]);
        let boxes = positions(&[(1, 2), (1, 0)]);
        // greedy matches (1,2) with (1,1) which leaves (1,0) 4 pushes from (1,4)
        assert_eq!(greedy(&[vec![1, 2], vec![1, 4]]), 1 + 4);
        assert_eq!(push_lower_bound(&goals, &boxes), 2 + 1);
    }

    #[test]
    fn max_boxes() {
        let goals: Vec<_> = (0..MAX_BOXES as u8).map(|c| Pos::new(1, c)).collect();
        let boxes: Vec<_> = (0..MAX_BOXES as u8).rev().map(|c| Pos::new(3, c)).collect();
        assert_eq!(push_lower_bound(&goals, &boxes), 2 * MAX_BOXES as u32);
    }
}
