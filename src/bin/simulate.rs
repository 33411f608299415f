use std::env;
use std::error::Error;
use std::process;

use cybersys::{
    Bot, Game, GameError, create_bot_from_spec, describe_action, label_for_spec, render_state,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut visualize = false;
    let mut seed = DEFAULT_SEED;
    let mut max_turns: Option<usize> = None;
    let mut bot_specs: Vec<String> = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--visualize" => visualize = true,
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed value: {value}"))?;
            }
            "--max-turns" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--max-turns requires a value".to_string())?;
                max_turns = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("invalid max-turns value: {value}"))?,
                );
            }
            "--help" => {
                print_usage();
                return Ok(());
            }
            other => bot_specs.push(other.to_string()),
        }
    }

    if bot_specs.is_empty() {
        bot_specs = vec![String::from("human"), String::from("heuristic")];
    }
    if bot_specs.len() < 2 || bot_specs.len() > 6 {
        return Err(format!(
            "expected between 2 and 6 players, received {}",
            bot_specs.len()
        )
        .into());
    }

    let mut builder = Game::builder().with_seed(seed);
    for (index, spec) in bot_specs.iter().enumerate() {
        let label = label_for_spec(spec);
        let name = format!("{} {index}", capitalize(&label));
        if label == "human" {
            builder = builder.with_player(name);
        } else {
            builder = builder.with_bot(name);
        }
    }
    let mut game = builder.build()?;

    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(bot_specs.len());
    for (index, spec) in bot_specs.iter().enumerate() {
        bots.push(create_bot_from_spec(spec, index, seed)?);
    }

    println!(
        "Starting Cyber Systems simulation with {} players.\n",
        bot_specs.len()
    );
    let mut turns = 0usize;
    loop {
        if game.is_finished() {
            break;
        }
        if let Some(limit) = max_turns {
            if turns >= limit {
                println!("Max turn limit {limit} reached. Stopping simulation.");
                break;
            }
        }
        let current = game.current_player();
        let state = game.state().clone();
        let legal_actions = game.legal_actions(current)?;
        if legal_actions.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "no legal actions available for current player",
            )
            .into());
        }
        if visualize {
            println!("{}", render_state(&state));
        }
        let action = bots[current].select_action(&state, &legal_actions);
        if visualize {
            println!("Chosen action: {}\n", describe_action(&state, &action));
        }
        game.submit_action(current, action)?;
        turns += 1;
    }

    if let Some(winner) = game.winner() {
        println!(
            "Game finished. Winner: {}.",
            game.state().players[winner].name
        );
    } else {
        println!("Simulation stopped before completion.");
    }

    Ok(())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn print_usage() {
    println!("Usage: simulate [OPTIONS] [BOT ...]");
    println!("  --visualize           Show the board and chosen actions each turn");
    println!("  --seed <u64>          Seed for shuffling (default: {DEFAULT_SEED:#x})");
    println!("  --max-turns <usize>   Stop after the specified number of turns");
    println!("  --help                Show this help message");
    println!("Bot entries (2-6 total):");
    println!("  human[:name]          Interactive human-controlled player");
    println!("  random[:seed]         Random bot with optional per-bot seed");
    println!("  heuristic             Deterministic priority bot");
    println!("If no bots are provided, defaults to one human and one heuristic bot.");
}
