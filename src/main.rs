//! xfboard - play a board session in the terminal
//!
//! Reads one command per line from stdin and redraws the board after each one.
//! The session is saved to a file slot after every move, so quitting and
//! starting again picks up the same game.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use xfboard::core::config::SessionConfig;
use xfboard::core::storage::FileStorage;
use xfboard::game::rules::ChessRules;
use xfboard::game::session::{ChessSession, MoveOutcome, SquareAction};
use xfboard::input::InteractionController;
use xfboard::rendering::TextBoard;

const HELP: &str = "\
commands:
  e2e4 | drag e2 e4   drop a piece
  click e2            tap a square
  promote q           choose the promotion piece (q r b n)
  cancel              cancel the promotion prompt
  undo | reset        take back / new game
  fen | pgn           print the game
  load fen <FEN>      start from a position
  load pgn <PGN>      replay a game
  flip | help | quit";

#[derive(Parser, Debug)]
#[command(name = "xfboard", version, about = "Chess board session in the terminal")]
struct Cli {
    /// Config file (defaults to config.json in the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session slot file (defaults to <storage_key>.json in the user data dir)
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Ignore and delete any saved session
    #[arg(long)]
    fresh: bool,

    /// Draw the board from Black's side
    #[arg(long)]
    flip: bool,
}

type Controller = InteractionController<ChessRules, FileStorage>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xfboard=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SessionConfig::load_from(path),
        None => SessionConfig::load(),
    };
    let storage = match &cli.storage {
        Some(path) => FileStorage::new(path),
        None => FileStorage::for_key(&config.storage_key),
    };
    tracing::info!(
        "xfboard v{} using slot {}",
        env!("CARGO_PKG_VERSION"),
        storage.path().display()
    );

    let mut session = ChessSession::mount(storage);
    if cli.fresh {
        session.reset();
    }

    let orientation = if cli.flip {
        config.orientation.opposite()
    } else {
        config.orientation
    };
    let mut board = TextBoard::new(io::stdout(), orientation);
    let mut controller = Controller::new(session, config);

    controller.render(&mut board);
    print_status(&controller)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["help"] => println!("{HELP}"),
            ["flip"] => board.flip(),
            ["fen"] => println!("{}", controller.session().fen()),
            ["pgn"] => println!("{}", controller.session().pgn()),
            ["undo"] => match controller.on_undo() {
                Some(record) => println!("undid {}", record.display()),
                None => println!("nothing to undo"),
            },
            ["reset"] => controller.on_reset(),
            ["cancel"] => {
                if !controller.on_promotion_cancel() {
                    println!("no promotion pending");
                }
            }
            ["promote", piece] => report(controller.on_promotion_choice(piece)),
            ["click", square] => match controller.on_square_click(square) {
                SquareAction::Move(outcome) => report(outcome),
                SquareAction::Ignored => println!("nothing to select there"),
                SquareAction::Selected(_) | SquareAction::Cleared => {}
            },
            ["drag", from, to] => drop_piece(&mut controller, from, to),
            ["load", "fen", fen @ ..] => {
                if let Err(e) = controller.session_mut().load_fen(&fen.join(" ")) {
                    println!("{e}");
                }
            }
            ["load", "pgn", pgn @ ..] => {
                if let Err(e) = controller.session_mut().load_pgn(&pgn.join(" ")) {
                    println!("{e}");
                }
            }
            [word] if word.len() == 4 && word.is_ascii() => {
                drop_piece(&mut controller, &word[..2], &word[2..]);
            }
            _ => {
                println!("unknown command '{line}' (try 'help')");
                continue;
            }
        }

        controller.render(&mut board);
        print_status(&controller)?;
    }

    Ok(())
}

fn drop_piece(controller: &mut Controller, from: &str, to: &str) {
    if controller.on_drop(from, to) {
        return;
    }
    if controller.session().pending_promotion().is_some() {
        println!("promote to? (promote q|r|b|n, or cancel)");
    } else {
        println!("illegal move {from}{to}");
    }
}

fn report(outcome: MoveOutcome) {
    match outcome {
        MoveOutcome::Committed(_) => {}
        MoveOutcome::PromotionPending(_) => println!("promote to? (promote q|r|b|n, or cancel)"),
        MoveOutcome::Rejected => println!("move rejected"),
    }
}

fn print_status(controller: &Controller) -> Result<()> {
    let session = controller.session();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", session.status())?;
    if let Some(last) = session.last_move() {
        writeln!(out, "last: {}", last.display())?;
    }
    let advantage = session.material_advantage();
    if advantage != 0 {
        writeln!(out, "material: {advantage:+}")?;
    }
    out.flush()?;
    Ok(())
}
