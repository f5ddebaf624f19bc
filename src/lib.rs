// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod config;
pub mod level;
pub mod map_formatter;
pub mod moves;
pub mod solution_formatter;
pub mod solver;

mod data;
mod fs;
mod map;
mod parser;
mod state;
mod vec2d;

use std::error::Error;
use std::path::Path;

use crate::config::Config;
use crate::level::Level;

pub use crate::data::{Dir, Pos};
pub use crate::parser::MalformedLevel;
pub use crate::solver::{solve, solve_with_stats, SolveResult, Stats};

/// Parses a level in XSB format.
///
/// Fails if the level is malformed, the search is never started for such levels.
pub fn parse_level(text: &str) -> Result<Level, MalformedLevel> {
    parser::parse(text)
}

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

impl<P: AsRef<Path> + ?Sized> LoadLevel for P {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let level = fs::read_file(self)?;
        Ok(parse_level(&level)?)
    }
}

pub trait Solve {
    fn solve(&self, config: &Config) -> SolveResult;
}

impl Solve for Level {
    fn solve(&self, config: &Config) -> SolveResult {
        solver::solve(self, config, None)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use separator::Separatable;

    use crate::moves::Moves;

    use super::*;

    #[test]
    fn test_levels() {
        // expected pushes, None means no solution
        let levels = [
            ("custom", "00-solved.txt", Some(0)),
            ("custom", "01-one-push.txt", Some(1)),
            ("custom", "02-no-border.txt", Some(2)),
            ("custom", "no-solution-corner.txt", None),
            ("builtin", "01-one-box.txt", Some(1)),
            ("builtin", "02-one-box-wide.txt", Some(2)),
            ("builtin", "03-two-box-line.txt", Some(2)),
            ("builtin", "04-two-box-across.txt", Some(4)),
            ("builtin", "05-three-down.txt", Some(6)),
            ("builtin", "06-three-box-l.txt", Some(9)),
            ("builtin", "07-four-down.txt", Some(8)),
            ("builtin", "08-four-spread.txt", Some(14)),
            ("builtin", "09-five-in-a-row.txt", Some(10)),
            ("builtin", "10-five-scatter.txt", Some(10)),
        ];

        let succeeded = levels
            .iter()
            .filter(|&&(level_pack, level_name, expected)| {
                test_level(level_pack, level_name, expected)
            })
            .count();
        assert_eq!(succeeded, levels.len());
    }

    fn test_level(level_pack: &str, level_name: &str, expected_pushes: Option<usize>) -> bool {
        let level_path = format!("levels/{}/{}", level_pack, level_name);
        println!("Solving {}", level_path);
        let started = Instant::now();

        let level = level_path.load_level().unwrap();
        let (result, stats) = solve_with_stats(&level, &Config::default(), None);

        // inaccurate, only useful to quickly see which levels are difficult
        println!(
            "Solved {} in approximately {} ms",
            level_path,
            (started.elapsed().as_millis() as u64).separated_string(), // separator doesn't support u128
        );
        println!("{:?}", stats);

        match result {
            SolveResult::Solved {
                push_count,
                states_explored,
                ref moves,
            } => {
                println!("{}", moves);
                assert_eq!(states_explored, stats.total_expanded());
                assert_eq!(push_count, moves.push_cnt());
                validate_moves(&level, moves);
                if Some(push_count) != expected_pushes {
                    println!(
                        "{}: expected {:?} pushes, got {}",
                        level_path, expected_pushes, push_count
                    );
                    return false;
                }
                true
            }
            SolveResult::Unsolved { .. } => {
                if expected_pushes.is_some() {
                    println!("{}: no solution found", level_path);
                    return false;
                }
                true
            }
        }
    }

    /// Replays the moves by the rules of the game and checks they solve the level.
    fn validate_moves(level: &Level, moves: &Moves) {
        let mut player_pos = level.player_pos();
        let mut boxes = level.boxes().to_vec();
        for (i, mov) in moves.iter().enumerate() {
            let new_pos = player_pos + mov.dir();
            assert!(!level.is_wall(new_pos), "move {} walks into a wall", i);
            let pushed = boxes.iter().position(|&b| b == new_pos);
            match (pushed, mov.is_push()) {
                (Some(box_index), true) => {
                    let dest = new_pos + mov.dir();
                    assert!(!level.is_wall(dest), "move {} pushes into a wall", i);
                    assert!(!boxes.contains(&dest), "move {} pushes into a box", i);
                    boxes[box_index] = dest;
                }
                (None, false) => {}
                (Some(_), false) => panic!("move {} walks into a box", i),
                (None, true) => panic!("move {} pushes nothing", i),
            }
            player_pos = new_pos;
        }
        assert!(boxes.iter().all(|&b| level.is_goal(b)));
    }

    #[test]
    fn deterministic() {
        let level = "levels/builtin/06-three-box-l.txt".load_level().unwrap();
        let first = solve_with_stats(&level, &Config::default(), None);
        let second = solve_with_stats(&level, &Config::default(), None);
        assert_eq!(first, second);
        assert_eq!(level.solve(&Config::default()), first.0);
    }

    #[test]
    fn already_solved() {
        let level = parse_level(
            r"
#####
#@ *#
#####
",
        )
        .unwrap();
        let result = level.solve(&Config::default());
        assert_eq!(
            result,
            SolveResult::Solved {
                push_count: 0,
                states_explored: 0,
                moves: Moves::default(),
            }
        );
    }

    #[test]
    fn one_push() {
        let level = "levels/custom/01-one-push.txt".load_level().unwrap();
        let result = level.solve(&Config::default());
        assert_eq!(result.states_explored(), 1);
        assert_eq!(result.moves().unwrap().to_string(), "U");

        // the player has to walk around first
        let level = parse_level(
            r"
#####
# . #
# $ #
#@  #
#####
",
        )
        .unwrap();
        match level.solve(&Config::default()) {
            SolveResult::Solved {
                push_count, moves, ..
            } => {
                assert_eq!(push_count, 1);
                assert_eq!(moves.to_string(), "rU");
            }
            SolveResult::Unsolved { .. } => panic!("no solution"),
        }
    }

    #[test]
    fn unsolvable_corner() {
        let level = "levels/custom/no-solution-corner.txt".load_level().unwrap();
        let result = level.solve(&Config::default());
        assert_eq!(result, SolveResult::Unsolved { states_explored: 0 });
        assert!(!result.is_solved());
        assert_eq!(result.moves(), None);
    }

    #[test]
    fn open_edges() {
        let level = parse_level("@$ .").unwrap();
        match level.solve(&Config::default()) {
            SolveResult::Solved {
                push_count, moves, ..
            } => {
                assert_eq!(push_count, 2);
                assert_eq!(moves.to_string(), "RR");
                validate_moves(&level, &moves);
            }
            SolveResult::Unsolved { .. } => panic!("no solution"),
        }
    }

    #[test]
    fn unreachable_boxes() {
        // every box is on a dead end so the search doesn't even start
        let level = parse_level(
            r"
#######
#@ . .#
#######
# $  $#
#######
",
        )
        .unwrap();
        assert_eq!(
            level.solve(&Config::default()),
            SolveResult::Unsolved { states_explored: 0 }
        );

        // the box could reach its goal but the player can't get to it
        let level = parse_level(
            r"
#########
#@ #    #
#  # $. #
#  #    #
#########
",
        )
        .unwrap();
        assert_eq!(
            level.solve(&Config::default()),
            SolveResult::Unsolved { states_explored: 1 }
        );
    }

    #[test]
    fn malformed() {
        let err = "levels/custom/two-players.txt".load_level().unwrap_err();
        assert!(err.to_string().contains("player"));
        assert!("levels/custom/does-not-exist.txt".load_level().is_err());
    }

    #[test]
    fn progress() {
        let level = "levels/builtin/06-three-box-l.txt".load_level().unwrap();
        let config = Config {
            progress_interval: 2,
            ..Config::default()
        };
        let mut reported = Vec::new();
        let result = solve(&level, &config, Some(&mut |explored: usize| reported.push(explored)));
        let expected: Vec<_> = (1..=result.states_explored())
            .filter(|explored| explored % 2 == 0)
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(reported, expected);

        let config = Config {
            progress_interval: 0,
            ..Config::default()
        };
        let mut called = false;
        solve(&level, &config, Some(&mut |_: usize| called = true));
        assert!(!called);
    }

    #[test]
    fn expansion_limit() {
        let level = "levels/builtin/08-four-spread.txt".load_level().unwrap();
        for &max_expansions in &[0, 1, 5] {
            let config = Config {
                max_expansions,
                ..Config::default()
            };
            assert_eq!(
                level.solve(&config),
                SolveResult::Unsolved {
                    states_explored: max_expansions
                }
            );
        }
    }
}
