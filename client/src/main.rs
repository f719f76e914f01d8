use std::process;

use common::{config::Config, game::Outcome};

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    match client::run_client(&config) {
        Ok(Some(Outcome::Victory)) => println!("You escaped the maze."),
        Ok(Some(Outcome::Defeat)) => println!("Time ran out."),
        Ok(None) => println!("Goodbye."),
        Err(e) => {
            eprintln!("Terminal error: {}", e);
            process::exit(1);
        }
    }
}
