use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use plotters::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use cybersys::{Bot, Game, GameError, create_bot_from_spec, label_for_spec, winner_margin};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run multiple games and plot per-bot win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (deck and bot RNGs are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output chart file (PNG)
    #[arg(short = 'o', long = "out", default_value = "winrates.png")]
    out: PathBuf,

    /// Show a textual summary only (no chart)
    #[arg(long = "no-chart", action = ArgAction::SetTrue)]
    no_chart: bool,

    /// Safety cap on turns per game; games exceeding this are aborted
    /// (a drained deck with unplayable hands can cycle forever)
    #[arg(long = "max-turns", default_value_t = 2000)]
    max_turns: usize,

    /// Hand limit override (default rules when omitted)
    #[arg(long = "hand-limit")]
    hand_limit: Option<usize>,

    /// Player bot specs: e.g., heuristic random (2-6 total)
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.bots.len() < 2 || args.bots.len() > 6 {
        return Err(format!(
            "expected between 2 and 6 bot specs (e.g., heuristic random), received {}",
            args.bots.len()
        )
        .into());
    }

    // Disallow human in batch sims; it would block waiting for input.
    if args
        .bots
        .iter()
        .any(|s| s.to_ascii_lowercase().starts_with("human"))
    {
        return Err("human players are not supported in winrate runs".into());
    }

    let mut wins_per_label: HashMap<String, usize> = HashMap::new();
    let mut seats_per_label: HashMap<String, usize> = HashMap::new();
    let mut margin_per_label: HashMap<String, u64> = HashMap::new();
    let mut aborted_games: usize = 0;

    let base_seed = args.seed;
    let players_per_game = args.bots.len();
    let labels_for_spec: Vec<String> = args.bots.iter().map(|s| label_for_spec(s)).collect();

    for game_idx in 0..args.games {
        // Permute seating each game for fairness.
        let mut indices: Vec<usize> = (0..players_per_game).collect();
        let mut seat_rng = StdRng::seed_from_u64(base_seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        indices.shuffle(&mut seat_rng);

        let deck_seed = mix_seed(base_seed, game_idx as u64, 0x5EED_15);
        let mut builder = Game::builder().with_seed(deck_seed);
        if let Some(limit) = args.hand_limit {
            builder = builder.with_hand_limit(limit);
        }

        let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(players_per_game);
        let mut labels: Vec<String> = Vec::with_capacity(players_per_game);
        for (seat, src_idx) in indices.iter().enumerate() {
            let spec = &args.bots[*src_idx];
            let label = labels_for_spec[*src_idx].clone();
            let bot_seed = mix_seed(base_seed, game_idx as u64, seat as u64);
            bots.push(create_bot_from_spec(spec, seat, bot_seed)?);
            builder = builder.with_bot(format!("{label} {seat}"));
            labels.push(label);
        }
        let mut game = builder.build()?;

        for label in &labels {
            *seats_per_label.entry(label.clone()).or_default() += 1;
        }

        let mut turns = 0usize;
        loop {
            if game.is_finished() || turns >= args.max_turns {
                break;
            }
            let current = game.current_player();
            let state = game.state().clone();
            let legal = game.legal_actions(current)?;
            if legal.is_empty() {
                return Err(GameError::InvalidConfiguration("no legal actions available").into());
            }
            let action = bots[current].select_action(&state, &legal);
            game.submit_action(current, action)?;
            turns += 1;
        }

        if let Some(winner) = game.winner() {
            let label = labels[winner].clone();
            *wins_per_label.entry(label.clone()).or_default() += 1;
            *margin_per_label.entry(label).or_default() += winner_margin(game.state()) as u64;
        } else {
            aborted_games += 1;
        }
    }

    // Per-seat win probability per label.
    let mut results: Vec<(String, f64, usize, usize)> = Vec::new();
    for (label, &seats) in &seats_per_label {
        let wins = *wins_per_label.get(label).unwrap_or(&0);
        let rate = if seats > 0 {
            wins as f64 / seats as f64
        } else {
            0.0
        };
        results.push((label.clone(), rate, wins, seats));
    }
    results.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    println!("Win rates (per-seat):");
    for (label, rate, wins, seats) in &results {
        let total_margin = *margin_per_label.get(label).unwrap_or(&0u64);
        let avg_margin = if *wins > 0 {
            total_margin as f64 / (*wins as f64)
        } else {
            0.0
        };
        println!(
            "  {label:<12}  {wins}/{seats}  ({:.2}%)   avg win margin: {avg_margin:.2}",
            rate * 100.0
        );
    }
    if aborted_games > 0 {
        println!("\nNote: {aborted_games} game(s) ended without a winner (turn cap reached).");
    }

    if !args.no_chart {
        render_bar_chart(&args.out, &results)?;
        println!("\nChart written to {}", args.out.display());
    }

    Ok(())
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    // Simple reversible mixer (xorshift-like mix).
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}

fn render_bar_chart(
    out: &PathBuf,
    data: &[(String, f64, usize, usize)],
) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = data.iter().map(|(l, _, _, _)| l.clone()).collect();
    let values: Vec<f64> = data.iter().map(|(_, r, _, _)| r * 100.0).collect();
    let max_value = values.iter().cloned().fold(10.0_f64, f64::max);

    let root = BitMapBackend::new(out, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Cyber Systems Bot Win Rates (per-seat)",
            ("sans-serif", 28).into_font(),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..labels.len() as f64, 0.0f64..max_value)
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Win rate (%)")
        .x_desc("Bot type")
        .x_labels(labels.len())
        .x_label_formatter(&|x| {
            let idx = *x as usize;
            if *x >= 0.0 && idx < labels.len() {
                labels[idx].clone()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|v| format!("{v:.0}"))
        .light_line_style(&WHITE.mix(0.0))
        .draw()
        .map_err(|e| format!("{e}"))?;

    for (i, value) in values.iter().enumerate() {
        let rect = Rectangle::new(
            [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, *value)],
            BLUE.filled(),
        );
        chart
            .draw_series(std::iter::once(rect))
            .map_err(|e| format!("{e}"))?;
    }

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
