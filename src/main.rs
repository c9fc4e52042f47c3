//! Interactive terminal companion for a tabletop battle.
//!
//! Reads one command per line from stdin and prints the response.

use std::io::{self, BufRead, Write};

use clap::Parser;
use pokemon_campaign::config::CliArgs;
use pokemon_campaign::interface::BattleSession;
use pokemon_campaign::logging::init_tracing;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let config = args.resolve()?;
    let mut session = BattleSession::from_config(&config)?;

    println!("{}", session.status());
    println!("Type 'help' for commands, 'quit' to leave.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let command = line.trim();

        if matches!(command, "quit" | "exit" | "q") {
            break;
        }
        if command.is_empty() {
            continue;
        }
        println!("{}", session.handle_command(command));
    }

    info!("session ended");
    Ok(())
}
