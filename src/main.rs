#[macro_use]
extern crate log;

use std::fs;
use std::io::{self, Read};
use std::process;

use ansi_term::Colour::{Green, Red, Yellow};
use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;

use sokoban_engine::{Level, SokobanError};

fn cli() -> Command<'static> {
    Command::new("sokoban")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Replay moves on a Sokoban level and print the result")
        .arg(
            Arg::new("level")
                .required(true)
                .value_name("LEVEL")
                .help("File containing the level, or - to read it from stdin"),
        )
        .arg(
            Arg::new("moves")
                .short('m')
                .long("moves")
                .takes_value(true)
                .value_name("MOVES")
                .help("Moves to perform, as letters from UDLR or udlr"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the resulting state as JSON"),
        )
        .arg(
            Arg::new("solve")
                .long("solve")
                .takes_value(true)
                .value_name("MAX_PUSHES")
                .help("Search for a solution from the resulting state using at most MAX_PUSHES pushes"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .help("Increase the log level, may be repeated"),
        )
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = colog::default_builder();
    builder.filter(None, level);
    builder.init();
}

fn read_level(path: &str) -> Result<Level, SokobanError> {
    let content = if path == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        content
    } else {
        fs::read_to_string(path)?
    };
    Level::parse(&content)
}

fn run(matches: &ArgMatches) -> Result<bool, SokobanError> {
    let path = matches.value_of("level").unwrap_or("-");
    let mut level = read_level(path)?;
    info!(
        "Loaded {} with {} crates",
        path,
        level.number_of_crates()
    );

    let mut all_moves_ok = true;
    if let Some(moves) = matches.value_of("moves") {
        if let Err(e) = level.replay(moves) {
            error!("{}", e);
            all_moves_ok = false;
        }
    }

    if matches.is_present("solve") {
        let max_pushes = matches
            .value_of_t::<usize>("solve")
            .unwrap_or_else(|e| e.exit());
        let message = match level.solve(max_pushes) {
            Some(solution) => format!("Solution: {}", solution),
            None => Yellow
                .paint(format!("No solution with at most {} pushes", max_pushes))
                .to_string(),
        };
        // Keep stdout valid JSON.
        if matches.is_present("json") {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }

    if matches.is_present("json") {
        match serde_json::to_string_pretty(&level.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize the level state: {}", e),
        }
    } else {
        print!("{}", level);
        println!(
            "{} moves, {} pushes, {}/{} crates on goals",
            level.number_of_moves(),
            level.number_of_pushes(),
            level.crates_on_goal(),
            level.number_of_crates()
        );
        if level.is_solved() {
            println!("{}", Green.bold().paint("Level solved!"));
        } else {
            println!("{}", Yellow.paint("Not solved yet"));
        }
    }

    Ok(all_moves_ok)
}

fn main() {
    let matches = cli().get_matches();
    init_logging(&matches);

    match run(&matches) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("{} {}", Red.bold().paint("error:"), e);
            process::exit(1);
        }
    }
}
