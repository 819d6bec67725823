use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use avl::script::run_script;
use avl::BalancedTree;
use clap::{ArgAction, Parser};
use log::{error, info};

/// Runs a script of tree commands (`insert`, `remove`, `update`, `search`, `preorder`,
/// `keys`, `height`, `print`, `check`) against an AVL tree of integers.
#[derive(Parser, Debug)]
#[command(name = "avl", version)]
struct Cli {
    /// File of commands, one per line. Reads stdin when omitted.
    #[arg(name = "script", index(1))]
    script: Option<PathBuf>,
    /// Raise the log level (warn, info, debug, trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Validate every tree invariant after each command.
    #[arg(long)]
    check: bool,
}

fn initialize_logging(verbose: u8) {
    use simplelog::*;

    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn open(script: Option<&PathBuf>) -> io::Result<Box<dyn BufRead>> {
    Ok(match script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logging(cli.verbose);

    let reader = match open(cli.script.as_ref()) {
        Ok(reader) => reader,
        Err(err) => {
            error!("cannot open script: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut tree = BalancedTree::<i64>::new();
    match run_script(reader, &mut tree, cli.check, io::stdout().lock()) {
        Ok(()) => {
            info!("final tree holds {} keys", tree.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
