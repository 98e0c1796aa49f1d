use std::fs;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use quote_snake::config::{Difficulty, DIFFICULTIES};
use quote_snake::game::{CollisionKind, Phase};
use quote_snake::input::{decode_key, GameInput};
use quote_snake::quotes::{CannedQuotes, QuoteSource};
use quote_snake::renderer::{self, FrameInfo};
use quote_snake::score::{load_leaderboard, save_leaderboard, Leaderboard};
use quote_snake::session::{GameSession, TickEvent};

#[derive(Debug, Parser)]
#[command(name = "quote-snake", about = "Arcade snake where every food carries a quote")]
struct Cli {
    /// Starting difficulty (easy, medium, hard).
    #[arg(long, value_parser = parse_difficulty, default_value = "easy")]
    difficulty: Difficulty,

    /// RNG seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Name recorded on the leaderboard.
    #[arg(long, default_value = "Player")]
    player: String,

    /// JSON file with [{"content", "author"}] quote records, as produced by
    /// an external quote fetcher.
    #[arg(long)]
    quotes: Option<PathBuf>,

    /// Keep playing through power-ups instead of pausing on each quote.
    #[arg(long)]
    no_quote_pause: bool,
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, String> {
    DIFFICULTIES
        .iter()
        .copied()
        .find(|difficulty| difficulty.name.eq_ignore_ascii_case(raw))
        .ok_or_else(|| format!("unknown difficulty {raw:?} (expected easy, medium, or hard)"))
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Everything that may print a warning happens before raw mode.
    let quotes = load_quote_source(cli.quotes.as_deref());
    let leaderboard = load_leaderboard().unwrap_or_else(|error| {
        eprintln!("Failed to read leaderboard: {error}");
        Leaderboard::default()
    });

    install_panic_hook();

    let mut terminal = setup_terminal()?;
    let result = run(&cli, quotes, leaderboard, &mut terminal);
    cleanup_terminal()?;
    result
}

fn run(
    cli: &Cli,
    quotes: Box<dyn QuoteSource>,
    mut leaderboard: Leaderboard,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> io::Result<()> {
    let mut session = match cli.seed {
        Some(seed) => GameSession::with_seed(cli.difficulty, quotes, seed),
        None => GameSession::new(cli.difficulty, quotes),
    };
    if cli.no_quote_pause {
        session.set_pause_on_food(false);
    }

    let mut banner: Option<String> = None;
    let mut last_collision = None;
    let mut notice: Option<String> = None;
    let mut last_tick = Instant::now();

    loop {
        let difficulty_name = session.difficulty().name;
        terminal.draw(|frame| {
            renderer::render(
                frame,
                session.state(),
                &FrameInfo {
                    difficulty_name,
                    leaderboard: &leaderboard,
                    banner: banner.as_deref(),
                    last_collision,
                    notice: notice.as_deref(),
                },
            );
        })?;

        let timeout = if session.phase() == Phase::Running {
            session
                .tick_interval()
                .saturating_sub(last_tick.elapsed())
        } else {
            Duration::from_millis(50)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(input) = decode_key(key) {
                        if matches!(input, GameInput::Quit) {
                            break;
                        }
                        handle_input(
                            input,
                            &mut session,
                            &mut banner,
                            &mut last_collision,
                            &mut notice,
                            &mut last_tick,
                        );
                    }
                }
            }
        }

        if session.phase() == Phase::Running && last_tick.elapsed() >= session.tick_interval() {
            match session.tick() {
                Some(TickEvent::FoodConsumed(food)) => banner = Some(food.flavor),
                Some(TickEvent::GameOver {
                    reason,
                    score,
                    difficulty,
                }) => {
                    last_collision = Some(reason);
                    record_score(&mut leaderboard, &cli.player, score, difficulty);
                }
                Some(TickEvent::Advanced) | None => {}
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn handle_input(
    input: GameInput,
    session: &mut GameSession,
    banner: &mut Option<String>,
    last_collision: &mut Option<CollisionKind>,
    notice: &mut Option<String>,
    last_tick: &mut Instant,
) {
    match input {
        GameInput::Direction(direction) => session.set_direction(direction),
        GameInput::Pause => match session.phase() {
            Phase::Running => session.pause(),
            Phase::Paused => {
                *banner = None;
                session.resume();
                *last_tick = Instant::now();
            }
            _ => {}
        },
        GameInput::Confirm => match session.phase() {
            Phase::Idle => {
                *notice = start_or_notice(session);
                *last_tick = Instant::now();
            }
            Phase::Paused => {
                *banner = None;
                session.resume();
                *last_tick = Instant::now();
            }
            Phase::GameOver => {
                *banner = None;
                *last_collision = None;
                session.reset();
                *notice = start_or_notice(session);
                *last_tick = Instant::now();
            }
            Phase::Running => {}
        },
        GameInput::Reset => {
            *banner = None;
            *last_collision = None;
            *notice = None;
            session.reset();
        }
        GameInput::SelectDifficulty(index) => {
            if let Some(difficulty) = DIFFICULTIES.get(index) {
                *banner = None;
                session.change_difficulty(*difficulty);
            }
        }
        GameInput::Quit => {}
    }
}

fn start_or_notice(session: &mut GameSession) -> Option<String> {
    match session.start() {
        Ok(()) => None,
        Err(error) => Some(format!("Cannot start: {error}")),
    }
}

fn record_score(leaderboard: &mut Leaderboard, player: &str, score: u32, difficulty: Difficulty) {
    leaderboard.record(player, score, difficulty.name);
    if let Err(error) = save_leaderboard(leaderboard) {
        eprintln!("Failed to save leaderboard: {error}");
    }
}

fn load_quote_source(path: Option<&std::path::Path>) -> Box<dyn QuoteSource> {
    let Some(path) = path else {
        return Box::new(CannedQuotes::default());
    };

    let parsed = fs::read_to_string(path)
        .map_err(|error| error.to_string())
        .and_then(|raw| CannedQuotes::from_json(&raw).map_err(|error| error.to_string()));

    match parsed {
        Ok(quotes) if !quotes.is_empty() => Box::new(quotes),
        Ok(_) => {
            eprintln!(
                "Quote file {} is empty; using the built-in set",
                path.display()
            );
            Box::new(CannedQuotes::default())
        }
        Err(error) => {
            eprintln!(
                "Failed to load quotes from {}: {error}; using the built-in set",
                path.display()
            );
            Box::new(CannedQuotes::default())
        }
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn cleanup_terminal() -> io::Result<()> {
    disable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}

fn restore_terminal_after_panic() {
    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}
