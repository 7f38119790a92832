//! Perft diagnostic runner.
//!
//! Usage:
//! `cargo run --release --bin perft_report`
//! `cargo run --release --bin perft_report -- --depth 4 --threads 8`
//! `cargo run --release --bin perft_report -- --fen "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -" --divide`

use std::time::Instant;

use chess_core::game_state::chess_rules::STARTING_POSITION_FEN;
use chess_core::move_generation::legal_move_generator::LegalMoveGenerator;
use chess_core::move_generation::perft::{perft_divide, perft_parallel};
use chess_core::utils::fen_parser::parse_fen;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(version, about = "Count legal move sequences from a position", long_about = None)]
struct PerftArgs {
    /// Position to count from
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,
    /// Plies to search
    #[arg(short, long, default_value_t = 4)]
    depth: u8,
    /// Print the count below each root move
    #[arg(long)]
    divide: bool,
    /// Worker threads for the root split
    #[arg(short = 'j', long, default_value_t = 1)]
    threads: usize,
}

fn install_tracing() {
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(filter_layer);

    tracing_subscriber::registry().with(fmt_layer).init();
}

fn main() -> Result<(), String> {
    install_tracing();
    let args = PerftArgs::parse();

    let mut game = parse_fen(&args.fen)?;
    let generator = LegalMoveGenerator;
    info!(fen = %game.get_fen(), depth = args.depth, threads = args.threads, "perft");

    if args.divide {
        let divide = perft_divide(&generator, &mut game, args.depth).map_err(|e| e.to_string())?;
        for (text, nodes) in &divide {
            println!("{text}: {nodes}");
        }
        println!("moves={} nodes={}", divide.len(), divide.iter().map(|(_, n)| n).sum::<u64>());
        return Ok(());
    }

    let started = Instant::now();
    let counts =
        perft_parallel(&generator, &game, args.depth, args.threads).map_err(|e| e.to_string())?;
    let elapsed = started.elapsed();
    let nps = (counts.nodes as f64 / elapsed.as_secs_f64().max(1e-9)) as u64;

    println!(
        "depth={} nodes={} captures={} ep={} castles={} promotions={} checks={} checkmates={} elapsed_ms={} nps={}",
        args.depth,
        counts.nodes,
        counts.captures,
        counts.en_passant,
        counts.castles,
        counts.promotions,
        counts.checks,
        counts.checkmates,
        elapsed.as_millis(),
        nps
    );
    Ok(())
}
