use std::env;
use std::process;

use clap::{App, Arg};
use separator::Separatable;

use sokobot::config::Config;
use sokobot::{solve_with_stats, LoadLevel, SolveResult};

fn main() {
    env_logger::init();

    let matches = App::new("sokobot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds push-optimal solutions of sokoban levels")
        .arg(
            Arg::with_name("max-expansions")
                .short("m")
                .long("max-expansions")
                .takes_value(true)
                .value_name("N")
                .help("give up after expanding this many states"),
        )
        .arg(
            Arg::with_name("progress")
                .short("p")
                .long("progress")
                .help("print the number of expanded states periodically"),
        )
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .help("print the board after every move instead of after every push"),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .help("level in XSB format"),
        )
        .get_matches();

    let mut config = Config::default();
    if let Some(max) = matches.value_of("max-expansions") {
        config.max_expansions = max.parse().unwrap_or_else(|err| {
            eprintln!("Invalid value for --max-expansions: {}", err);
            process::exit(1);
        });
    }
    let print_progress = matches.is_present("progress");
    let include_steps = matches.is_present("steps");
    // required by clap
    let path = matches.value_of("file").unwrap_or_default();

    let level = path.load_level().unwrap_or_else(|err| {
        match env::current_dir() {
            Ok(current_dir) => eprintln!(
                "Can't load level {} in {}: {}",
                path,
                current_dir.display(),
                err
            ),
            Err(_) => eprintln!("Can't load level {}: {}", path, err),
        }
        process::exit(1);
    });

    println!("Solving {}...", path);
    let mut report = |explored: usize| {
        println!("Expanded {} states", (explored as u64).separated_string());
    };
    let on_progress: Option<&mut dyn FnMut(usize)> = if print_progress {
        Some(&mut report)
    } else {
        None
    };
    let (result, stats) = solve_with_stats(&level, &config, on_progress);
    println!("{}", stats);

    match result {
        SolveResult::Solved {
            push_count, moves, ..
        } => {
            println!("Found solution:");
            print!("{}", level.solution(&moves, include_steps));
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", push_count);
        }
        SolveResult::Unsolved { .. } => println!("No solution"),
    }
}
