use crate::data::{Dir, MapCell, Pos};
use crate::vec2d::Vec2d;

/// Marks cells without a box in the grids returned by `State::box_grid`.
pub(crate) const NO_BOX: u8 = 255;

/// Boxes are kept sorted so two states with the same boxes compare and hash equal
/// regardless of which box moved where.
///
/// Inside the search `player_pos` is the normalized position - the top-left cell
/// of the area the player can reach - not where the player actually stands.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub(crate) struct State {
    pub(crate) player_pos: Pos,
    pub(crate) boxes: Vec<Pos>,
}

impl State {
    pub(crate) fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort();
        State { player_pos, boxes }
    }

    /// Grid with the index of the box on each cell or `NO_BOX`.
    pub(crate) fn box_grid(&self, grid: &Vec2d<MapCell>) -> Vec2d<u8> {
        let mut box_grid = grid.scratchpad_with_default(NO_BOX);
        for (i, &b) in self.boxes.iter().enumerate() {
            box_grid[b] = i as u8;
        }
        box_grid
    }

    /// The box at `box_index` moves one cell, the player ends up where it was.
    /// The result is not normalized.
    pub(crate) fn push(&self, box_index: usize, dir: Dir) -> State {
        let mut boxes = self.boxes.clone();
        let box_pos = boxes[box_index];
        boxes[box_index] = box_pos + dir;
        State::new(box_pos, boxes)
    }
}
