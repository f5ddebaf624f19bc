use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use log::debug;

use crate::data::{MapCell, Pos, MAX_BOXES, MAX_SIZE};
use crate::level::Level;
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Why a level was rejected. Nothing is searched for a malformed level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedLevel {
    InvalidCell(usize, usize),
    TooLarge,
    EmptyBoard,
    MultiplePlayers,
    NoPlayer,
    NoBoxes,
    BoxesGoals { boxes: usize, goals: usize },
    TooManyBoxes,
}

impl Display for MalformedLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MalformedLevel::InvalidCell(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            MalformedLevel::TooLarge => write!(f, "Map larger than {} rows/columns", MAX_SIZE),
            MalformedLevel::EmptyBoard => write!(f, "Empty board"),
            MalformedLevel::MultiplePlayers => write!(f, "More than one player"),
            MalformedLevel::NoPlayer => write!(f, "No player"),
            MalformedLevel::NoBoxes => write!(f, "No boxes"),
            MalformedLevel::BoxesGoals { boxes, goals } => write!(
                f,
                "Different number of boxes ({}) and goals ({})",
                boxes, goals
            ),
            MalformedLevel::TooManyBoxes => write!(f, "More than {} boxes", MAX_BOXES),
        }
    }
}

impl Error for MalformedLevel {}

impl FromStr for Level {
    type Err = MalformedLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

pub(crate) fn parse(level: &str) -> Result<Level, MalformedLevel> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let (grid, goals, boxes, player_pos) = parse_xsb(level)?;
    if grid.is_empty() {
        return Err(MalformedLevel::EmptyBoard);
    }
    let player_pos = player_pos.ok_or(MalformedLevel::NoPlayer)?;
    if boxes.is_empty() {
        return Err(MalformedLevel::NoBoxes);
    }
    if boxes.len() != goals.len() {
        return Err(MalformedLevel::BoxesGoals {
            boxes: boxes.len(),
            goals: goals.len(),
        });
    }
    if boxes.len() > MAX_BOXES {
        return Err(MalformedLevel::TooManyBoxes);
    }

    // no border check - cells outside the grid count as walls
    // and boxes the player can't get to just make the level unsolvable
    let grid = Vec2d::new(&grid);
    debug!(
        "Parsed {}x{} level with {} boxes",
        grid.rows(),
        grid.cols(),
        boxes.len()
    );
    Ok(Level::new(
        GoalMap::new(grid, goals),
        State::new(player_pos, boxes),
    ))
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
#[allow(clippy::type_complexity)]
fn parse_xsb(
    level: &str,
) -> Result<(Vec<Vec<MapCell>>, Vec<Pos>, Vec<Pos>, Option<Pos>), MalformedLevel> {
    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    if level.is_empty() {
        return Ok((grid, goals, boxes, player_pos));
    }

    for (r, line) in level.lines().enumerate() {
        if r >= MAX_SIZE {
            return Err(MalformedLevel::TooLarge);
        }
        let line = line.trim_end_matches('\r');
        let mut line_tiles = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(MalformedLevel::TooLarge);
            }
            let pos = Pos::new(r as u8, c as u8);

            let tile = match cur_char {
                '#' => MapCell::Wall,
                'p' | '@' => {
                    if player_pos.is_some() {
                        return Err(MalformedLevel::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    MapCell::Empty
                }
                'P' | '+' => {
                    if player_pos.is_some() {
                        return Err(MalformedLevel::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                'b' | '$' => {
                    boxes.push(pos);
                    MapCell::Empty
                }
                'B' | '*' => {
                    boxes.push(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                ' ' | '-' | '_' => MapCell::Empty,
                _ => return Err(MalformedLevel::InvalidCell(r, c)),
            };
            line_tiles.push(tile);
        }
        grid.push(line_tiles)
    }

    Ok((grid, goals, boxes, player_pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_empty() {
        assert_failure("", MalformedLevel::EmptyBoard);
        assert_failure("\n\n   \n", MalformedLevel::EmptyBoard);
    }

    #[test]
    fn fail_no_player() {
        let level = r"
####
#.$#
####
";
        assert_failure(level, MalformedLevel::NoPlayer);
    }

    #[test]
    fn fail_two_players() {
        let level = r"
######
#@$.@#
######
";
        assert_failure(level, MalformedLevel::MultiplePlayers);
        let err = level.parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("player"));
    }

    #[test]
    fn fail_no_boxes() {
        let level = r"
####
#@ #
####
";
        assert_failure(level, MalformedLevel::NoBoxes);
    }

    #[test]
    fn fail_boxes_goals() {
        let level = r"
#####
#.$.#
# @ #
#####
";
        assert_failure(level, MalformedLevel::BoxesGoals { boxes: 1, goals: 2 });
    }

    #[test]
    fn fail_pos() {
        let level = r"
#####
#@X.#
#####
";
        assert_failure(level, MalformedLevel::InvalidCell(1, 2));
    }

    #[test]
    fn open_edges() {
        assert_success("@$ .\n");
        let level = r"
#####
#@$.
#####
";
        assert_success(level);
        let level: Level = level.parse().unwrap();
        assert!(level.is_wall(Pos::new(1, 5)));
        assert!(!level.is_wall(Pos::new(1, 4)));
    }

    #[test]
    fn unreachable_boxes_and_goals() {
        let level = r"
########
#@$.#$.#
########
";
        assert_success(level);

        let level = r"
########
#@$$.#.#
#   ####
########
";
        assert_success(level);
    }

    #[test]
    fn fail_too_many_boxes() {
        let level = format!(
            "{0}\n#@{1}#\n# {2}#\n{0}",
            "#".repeat(14),
            "$".repeat(11),
            ".".repeat(11)
        );
        assert_failure(&level, MalformedLevel::TooManyBoxes);
    }

    #[test]
    fn simplest() {
        let level = r"
#####
#@$.#
#####
";
        assert_success(level);
    }

    #[test]
    fn corner_boxes() {
        // boxes on goals outside the walls are allowed
        let level = r"
*###*
#@$.#
*###*
";
        assert_success(level);
        let level: Level = level.parse().unwrap();
        assert_eq!(level.boxes().len(), 5);
    }

    #[test]
    fn alternative_characters() {
        let level = "-#####\r\n-#__B#\r\n##bb.#\r\n#P-b.#\r\n######";
        let level: Level = level.parse().unwrap();
        assert_eq!(level.player_pos(), Pos::new(3, 1));
        assert_eq!(
            level.boxes(),
            &[Pos::new(1, 4), Pos::new(2, 2), Pos::new(2, 3), Pos::new(3, 3)][..]
        );
        assert_eq!(level.goals().len(), 4);
        assert!(level.is_goal(Pos::new(3, 1)));
    }

    #[test]
    fn classic_level_1() {
        let level = r"
    #####
    #   #
    #$  #
  ###  $##
  #  $ $ #
### # ## #   ######
#   # ## #####  ..#
# $  $          ..#
##### ### #@##  ..#
    #     #########
    #######
";
        assert_success(level);
    }

    fn assert_failure(input_level: &str, expected_err: MalformedLevel) {
        assert_eq!(input_level.parse::<Level>().unwrap_err(), expected_err);
    }

    fn assert_success(input_level: &str) {
        let level: Level = input_level.parse().unwrap();
        assert_eq!(level.to_string(), input_level.trim_start_matches('\n'));
    }
}
