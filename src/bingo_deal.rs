// src/bingo_deal.rs
// Deals a stack of independent cards, e.g. for printing, as text or JSON.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use photo_bingo::card::{Card, CardDealer};
use photo_bingo::config::{BingoConfig, DEFAULT_CONFIG_PATH};
use photo_bingo::logging::{log_error, log_info};
use photo_bingo::pool::PhotoPool;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Photo Bingo Dealer - Deal a stack of cards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Number of cards to deal (defaults to players)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Photo folder (overrides photo_dir)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Priority sub-folder (overrides priority_folder)
    #[arg(long)]
    priority: Option<String>,

    /// Print the cards as JSON
    #[arg(long)]
    json: bool,
}

fn print_cards(cards: &[Card]) {
    for (i, card) in cards.iter().enumerate() {
        println!("=== CARD {} (ID: {:016X}) ===", i + 1, card.id());
        for row in card.rows() {
            println!("{}", row.join(" | "));
        }
        println!();
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = BingoConfig::load_from_or_default(&args.config);
    if let Some(dir) = args.dir {
        config.photo_dir = dir;
    }
    if let Some(priority) = args.priority {
        config.priority_folder = Some(priority);
    }

    let pool = PhotoPool::load(&config.photo_dir, config.priority_folder.as_deref(), config.verify_images)?;
    let count = args.count.unwrap_or(config.players);
    let cards = CardDealer::new().deal_cards(&pool, count)?;
    log_info(&format!("Dealt {} cards from {} photos", cards.len(), pool.len()));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        print_cards(&cards);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        log_error(&format!("{e}"));
        std::process::exit(1);
    }
}
