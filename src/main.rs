pub mod coffee_maker;
pub mod config_reader;
pub mod constants;
pub mod container;
pub mod dispenser;
pub mod errors;
pub mod ledger;
pub mod payment;
pub mod prompt;
pub mod recipe;
pub mod reservoir;
pub mod statistics;

use std::{io, path::PathBuf, process};

use clap::Parser;
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

use coffee_maker::CoffeeMaker;
use config_reader::{default_machine, read_machine_from_file};
use prompt::Prompter;

/// Coffee vending machine driven from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with the menu and the reservoir. The built-in machine is used when omitted.
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("Could not start the logger: {}", err);
    }

    let machine = match cli.config {
        Some(path) => read_machine_from_file(path),
        None => Ok(default_machine()),
    };
    let (menu, reservoir) = match machine {
        Ok(machine) => machine,
        Err(err) => {
            error!("[MACHINE] {}", err);
            process::exit(1);
        }
    };

    let mut coffee_maker = CoffeeMaker::new(menu, reservoir);
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    if let Err(err) = coffee_maker.run(&mut prompter) {
        error!("[MACHINE] {}", err);
    }
}
