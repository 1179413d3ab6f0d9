use std::fs::File;
use std::io;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use invaders::app::{App, TICK_RATE_MS};
use invaders::config::Cli;
use invaders::event::{Event, EventHandler};
use invaders::game::GameState;
use invaders::scores::HighScore;
use invaders::ui;

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let file = File::create(&cli.log_file)
        .with_context(|| format!("cannot open log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    let highscore = HighScore::load(cli.highscore_path());
    let game = GameState::with_seed(cli.screen(), highscore, seed)
        .context("cannot set up the game")?;
    tracing::info!(seed, "seeded random source");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let releases = supports_keyboard_enhancement().unwrap_or(false);
    if releases {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(game, seed, releases);
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    if releases {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(highscore = app.game.highscore(), "bye");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    let event_handler = EventHandler::new(TICK_RATE_MS);
    let started = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let now = started.elapsed().as_millis() as u64;
        match event_handler.next()? {
            Event::Tick => app.on_tick(now),
            Event::Key(key) => app.on_key(key, now),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
