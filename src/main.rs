use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quiz_four::config::AppConfig;
use quiz_four::content::{
    load_quiz_items, load_word_categories, CategoryPool, ContentPool, QuizItem, WordCategories,
};
use quiz_four::flashcards::FlashcardDeck;
use quiz_four::game::GameState;
use quiz_four::quiz::{DropRequest, GateOutcome, QuizGate};
use quiz_four::round::{format_clock, TimedRoundController};

/// Validate game content and run a headless, seeded demo of each game.
#[derive(Parser)]
#[command(name = "quiz-four", about = "Quiz-gated four-in-a-row and word games")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Question collection (JSON list or category map)
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Vocabulary collection (JSON category map)
    #[arg(long)]
    words: Option<PathBuf>,

    /// Seed for every random draw
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let questions = match &cli.questions {
        Some(path) => load_quiz_items(path)
            .with_context(|| format!("loading questions from {}", path.display()))?,
        None => Vec::new(),
    };
    let words = match &cli.words {
        Some(path) => load_word_categories(path)
            .with_context(|| format!("loading words from {}", path.display()))?,
        None => WordCategories::new(),
    };
    info!(
        questions = questions.len(),
        categories = words.len(),
        words = words.values().map(Vec::len).sum::<usize>(),
        "content loaded"
    );

    play_board(&config, questions, cli.seed)?;
    play_round(&config, words.clone(), cli.seed)?;
    show_deck(&config, words)?;
    Ok(())
}

/// Play until someone wins or the board fills, answering every question
/// correctly and cycling through the columns.
fn play_board(config: &AppConfig, questions: Vec<QuizItem>, seed: u64) -> Result<()> {
    if config.board.quiz_gate && questions.is_empty() {
        println!("no questions loaded; skipping the board game");
        return Ok(());
    }

    let game =
        GameState::with_players(&config.board, config.roster()).context("seating players")?;
    let mut gate = QuizGate::new(&config.board, game, ContentPool::seeded(questions, seed));

    let cols = config.board.cols;
    let mut column = 0;
    while !gate.game().is_terminal() && !gate.game().board().is_full() {
        let outcome = match gate.request_drop(column)? {
            DropRequest::AwaitingAnswer => gate.mark_correct()?,
            DropRequest::Resolved(outcome) => outcome,
        };
        if let GateOutcome::Rejected(err) = outcome {
            info!(column, error = %err, "skipping column");
        }
        column = (column + 1) % cols;
    }

    match gate.game().winner_name() {
        Some(name) => println!("{name} wins!"),
        None => println!("board full, no winner"),
    }
    println!("{}", serde_json::to_string_pretty(&gate.board_snapshot())?);
    Ok(())
}

/// Run one word round on manual ticks, guessing every other word.
fn play_round(config: &AppConfig, words: WordCategories, seed: u64) -> Result<()> {
    let mut round =
        TimedRoundController::from_config(CategoryPool::seeded(words, seed), &config.round)
            .context("configuring word round")?;

    round.start();
    let mut turn = 0u32;
    while round.is_running() {
        if turn % 2 == 0 {
            round.mark_correct();
        } else {
            round.mark_skip();
        }
        round.tick();
        turn += 1;
    }

    let snapshot = round.snapshot();
    println!(
        "word round over at {}: {} correct, {} skipped",
        format_clock(snapshot.remaining),
        snapshot.score,
        snapshot.skipped.len()
    );
    Ok(())
}

fn show_deck(config: &AppConfig, words: WordCategories) -> Result<()> {
    let deck = FlashcardDeck::new(words, &config.flashcards);
    if let Some(category) = deck.selected() {
        println!("flashcards: {} ({} pages)", category, deck.total_pages());
        println!("{}", serde_json::to_string_pretty(&deck.snapshot())?);
    }
    Ok(())
}
