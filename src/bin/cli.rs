//! This is the command line tool that loads a model and prints the language of
//! each input file, or of the standard input.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{Arg, ArgAction, Command};
use sabir::{Config, Label, Model};

use std::fs::File;
use std::io::{self, Read};
use std::process::exit;
use std::time::Instant;

/// The size of the chunks that are fed to the classifier.
const CHUNK_SIZE: usize = 8192;

/// The model that is used when no model is given.
const DEFAULT_MODEL: &str = "model.sb";

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::debug!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

/// Stream 'input' through the classifier and return the best label.
fn classify<R: Read>(model: &mut Model, mut input: R) -> io::Result<Label> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    model.init();
    loop {
        match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => model.feed(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(model.finish().clone())
}

fn classify_path(model: &mut Model, path: &str) -> Option<Label> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::error!("cannot open '{}': {}", path, err);
            return None;
        }
    };

    match classify(model, file) {
        Ok(label) => Some(label),
        Err(err) => {
            log::error!("cannot read '{}': {}", path, err);
            None
        }
    }
}

fn main() {
    let matches = Command::new("sabir")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Detects the language of text files")
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("Path of the model file")
                .num_args(1),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("Print the languages of the model and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log the score of every feature")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("FILES")
                .help("The files to classify (default: standard input)")
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .get_matches();

    let cli_verbose = matches.get_flag("verbose");
    let cli_list = matches.get_flag("list");
    let cli_model = matches
        .get_one::<String>("model")
        .cloned()
        .or_else(|| std::env::var("SABIR_MODEL").ok())
        .unwrap_or_else(|| String::from(DEFAULT_MODEL));
    let files: Vec<String> = matches
        .get_many::<String>("FILES")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    let level = if cli_verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .format_timestamp(None)
        .filter_level(level)
        .parse_default_env()
        .init();

    let x = Timer::new();

    let mut model =
        match Model::load_with_config(&cli_model, Config::new(cli_verbose)) {
            Ok(model) => model,
            Err(err) => {
                log::error!("cannot load model from '{}': {}", cli_model, err);
                exit(1);
            }
        };

    if cli_list {
        for label in model.labels() {
            println!("{}", label);
        }
        return;
    }

    let mut failed = false;
    match files.as_slice() {
        [] => match classify(&mut model, io::stdin().lock()) {
            Ok(label) => println!("{}", label),
            Err(err) => {
                log::error!("cannot read the standard input: {}", err);
                failed = true;
            }
        },
        [path] => match classify_path(&mut model, path) {
            Some(label) => println!("{}", label),
            None => failed = true,
        },
        paths => {
            for path in paths {
                match classify_path(&mut model, path) {
                    Some(label) => println!("{}:{}", path, label),
                    None => failed = true,
                }
            }
        }
    }

    drop(x);
    if failed {
        exit(1);
    }
}
