//! Terminal host: owns the screen, the frame loop and the session task.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{error, info, instrument};

use crate::{
    ClientConfig, GameController, HttpServerClient, Scheduler, ServerClient, Session, ui,
};

/// Plays one contest in the terminal until the user quits.
#[instrument(skip_all, fields(server_url = %config.server_url(), game = %config.game()))]
pub async fn run_terminal(config: ClientConfig) -> Result<()> {
    info!("Starting contest client");

    let client: Arc<dyn ServerClient> = Arc::new(HttpServerClient::connect(
        config.server_url(),
        config.poll_interval(),
    ));
    let (busy_tx, busy_rx) = watch::channel(false);
    let (session, status_rx) = Session::new(config.session_settings(), busy_rx);
    let session_handle = tokio::spawn(session.run(Arc::clone(&client)));

    let mut scheduler = Scheduler::new(
        client,
        GameController::new(*config.game()),
        config.language().clone(),
        status_rx,
        busy_tx,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_frames(&mut terminal, &mut scheduler, &config).await;

    session_handle.abort();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Frame loop error");
    }
    info!(
        status = %scheduler.status(),
        events = scheduler.events_applied(),
        "Contest client stopped"
    );
    res
}

async fn run_frames(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    scheduler: &mut Scheduler,
    config: &ClientConfig,
) -> Result<()> {
    let frame_interval = config.frame_interval();
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        let dt = now - last;
        last = now;

        let size = terminal.size()?;
        let board = ui::board_area(Rect::new(0, 0, size.width, size.height));
        scheduler.set_surface(ui::surface_for(board));
        scheduler.tick(dt);

        terminal.draw(|f| ui::draw(f, scheduler))?;

        while event::poll(std::time::Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if let Some(pointer) = ui::pointer_event(mouse, board) {
                        scheduler.handle_pointer(pointer);
                    }
                }
                _ => {}
            }
        }

        tokio::time::sleep_until(now + frame_interval).await;
    }
}
