// src/bingo_sim.rs
// Imports a story page (its ordered photo links) and replays it against a
// table of players to see when the first bingos fall.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use photo_bingo::card::CardDealer;
use photo_bingo::config::{BingoConfig, DEFAULT_CONFIG_PATH};
use photo_bingo::logging::{log_error, log_info, log_warning};
use photo_bingo::pool::PhotoPool;
use photo_bingo::score::Milestone;
use photo_bingo::seed::today_seed;
use photo_bingo::simulation::{simulate, SimulationReport};
use photo_bingo::story::StorySequence;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Photo Bingo Simulator - Replay a story against many cards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Story HTML file whose <a href> links name pool photos
    story: PathBuf,

    /// Number of players (overrides players)
    #[arg(short, long)]
    players: Option<usize>,

    /// Shared candidate pool size; smaller means more overlap between cards
    #[arg(long)]
    day_pool_size: Option<usize>,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Photo folder (overrides photo_dir)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Priority sub-folder (overrides priority_folder)
    #[arg(long)]
    priority: Option<String>,

    /// Fixed seed for the shared candidate pool
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn print_report(report: &SimulationReport) {
    println!("Results per step:");
    for s in &report.steps {
        println!(
            "Step {} - {}: rows = {}, columns = {}, diagonals = {}, 1 line = {}, 2 lines = {}, full card = {}",
            s.step, s.label, s.rows, s.columns, s.diagonals, s.one_line, s.two_lines, s.full
        );
    }

    match &report.first_bingo {
        Some(first) => println!(
            "\nFirst bingo at step {} ({}) with {} winner(s).",
            first.step, first.label, first.winners
        ),
        None => println!("\nNo bingo within the imported story."),
    }

    if report.events.is_empty() {
        println!("No bingo events recorded.");
        return;
    }

    println!("\nMilestones:");
    for milestone in Milestone::ALL {
        if let Some(event) = report.first_event(milestone) {
            println!("  first {}: {}", milestone.label(), event.describe());
        }
    }

    println!("\nAll bingos in order:");
    for event in &report.events {
        println!("  {}", event.describe());
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
    if let Some(players) = args.players {
        config.players = players;
    }
    if let Some(size) = args.day_pool_size {
        config.day_pool_size = size;
    }

    let pool = PhotoPool::load(&config.photo_dir, config.priority_folder.as_deref(), config.verify_images)?;

    let story = StorySequence::from_file(&args.story, &pool)?;
    log_info(&format!(
        "Story {}: {} photo links, {} not in the pool",
        args.story.display(),
        story.valid().len(),
        story.unmatched().len()
    ));
    for href in story.unmatched() {
        log_warning(&format!("Ignoring link not in photo pool: {href}"));
    }

    let steps = story.steps(config.priority_folder.as_deref());
    let seed = args.seed.or_else(|| config.daily_seed.then(today_seed));

    let dealer = CardDealer::new();
    let day_pool = dealer.build_day_pool(&pool, config.day_pool_size, seed)?;
    let cards = dealer.deal_from_day_pool(&day_pool, config.players)?;
    log_info(&format!(
        "Simulating {} steps for {} cards from a day pool of {}",
        steps.len(),
        cards.len(),
        day_pool.len()
    ));

    let report = simulate(&steps, &cards);

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
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
