//! Terminal UI for Strictly Memory

mod app;
mod input;
mod layout;
mod ui;

pub use app::{App, Control};
pub use input::{key_action, move_cursor, pointer_target, KeyAction};
pub use layout::{BoardLayout, UiTarget, CELL_HEIGHT, CELL_WIDTH};
pub use ui::draw;

use crate::config::AppConfig;
use crate::runtime::TokioScheduler;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use strictly_memory::TimerEvent;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

/// Runs the game until the player quits.
///
/// The board is generated before the terminal is touched, so a bad
/// configuration fails with a plain error message.
pub async fn run_tui(config: AppConfig) -> Result<()> {
    // Log to a file so tracing output does not tear the screen
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,strictly_memory=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(dimension = config.dimension(), "Starting Strictly Memory TUI");

    let (scheduler, mut timer_rx) = TokioScheduler::new();
    let engine = config.build_engine(scheduler)?;
    let app = App::new(engine);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, app, &mut timer_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }

    res
}

/// Draw, apply due timers, then wait briefly for input.
#[instrument(skip_all)]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App<TokioScheduler>,
    timer_rx: &mut mpsc::UnboundedReceiver<TimerEvent>,
) -> Result<()> {
    loop {
        let mut layout = BoardLayout::default();
        terminal.draw(|f| layout = draw(f, &app))?;
        app.set_layout(layout);

        while let Ok(event) = timer_rx.try_recv() {
            app.on_timer(event);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.on_key(key.code) == Control::Quit {
                        info!("Player quit");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        tokio::task::yield_now().await;
    }
}
