// src/bingo_player.rs
// Terminal player: deals today's card from the photo folder and lets the
// player mark spotted photos until the card is full or ESC is pressed.
//
// Interactive Controls:
// - 1-9: Mark or unmark the photo in that cell (row by row)
// - n: Deal a new card (marks and celebrations start over)
// - ESC / q: Exit

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use photo_bingo::board::CardSession;
use photo_bingo::card::CardDealer;
use photo_bingo::config::{BingoConfig, DEFAULT_CONFIG_PATH};
use photo_bingo::logging::{log_error, log_info};
use photo_bingo::pool::PhotoPool;
use photo_bingo::score::Milestone;
use photo_bingo::seed::today_seed;
use photo_bingo::terminal::{self, KeyAction};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Photo Bingo Player - Spot the photos on your card")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Photo folder (overrides photo_dir)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Priority sub-folder (overrides priority_folder)
    #[arg(long)]
    priority: Option<String>,

    /// Draw from the whole pool instead of today's shared candidates
    #[arg(long)]
    no_daily_seed: bool,
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = BingoConfig::load_from_or_default(&args.config);
    if let Some(dir) = args.dir {
        config.photo_dir = dir;
    }
    if let Some(priority) = args.priority {
        config.priority_folder = Some(priority);
    }
    if args.no_daily_seed {
        config.daily_seed = false;
    }

    let pool = PhotoPool::load(&config.photo_dir, config.priority_folder.as_deref(), config.verify_images)?;
    let seed = config.daily_seed.then(today_seed);
    let dealer = CardDealer::new();
    let card = dealer.deal_card(&pool, seed)?;
    log_info(&format!("Dealt card {:016X}", card.id()));

    let mut session = CardSession::new(card);
    let mut reached: Vec<Milestone> = Vec::new();

    loop {
        terminal::show_on_terminal(&session, &reached);

        if session.milestones().has_fired(Milestone::FullCard) {
            println!("The card is full. Thanks for playing!");
            break;
        }

        match terminal::wait_for_user_action()? {
            KeyAction::Toggle(index) => {
                reached = session.toggle(index)?.milestones;
            }
            KeyAction::NewCard => {
                let card = dealer.deal_card(&pool, seed)?;
                log_info(&format!("Dealt new card {:016X}", card.id()));
                session.replace_card(card);
                reached.clear();
            }
            KeyAction::Quit => {
                println!("Exiting the game.\n");
                break;
            }
            KeyAction::Ignore => reached.clear(),
        }
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
