pub mod action;
pub mod app;
mod render;

use std::sync::Arc;

use crossterm::ExecutableCommand;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use parcel_track::{Gateway, Request, TrackedPackage};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::time::{Duration, interval};

use crate::action::{Action, AppCommand};
use crate::app::App;

/// Launch the interactive TUI. Returns when the user quits.
pub async fn run(
    gateway: Arc<dyn Gateway>,
    packages: Vec<TrackedPackage>,
    backend_label: String,
) -> anyhow::Result<()> {
    // Terminal setup.
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, gateway, packages, backend_label).await;

    // Terminal teardown (always runs).
    disable_raw_mode()?;
    std::io::stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    gateway: Arc<dyn Gateway>,
    packages: Vec<TrackedPackage>,
    backend_label: String,
) -> anyhow::Result<()> {
    use futures::StreamExt;

    let mut app = App::new(packages, backend_label);

    let (action_tx, mut action_rx) = mpsc::channel::<Action>(32);
    let mut event_stream = EventStream::new();
    let mut tick_interval = interval(Duration::from_millis(250));

    loop {
        terminal.draw(|frame| render::render(frame, &app))?;

        // Wait for next event.
        let command = tokio::select! {
            Some(event_result) = event_stream.next() => {
                match event_result {
                    Ok(event) => {
                        // Only key presses; releases and repeats are dropped.
                        match &event {
                            Event::Key(key) if key.kind != KeyEventKind::Press => continue,
                            Event::Key(_) => {}
                            _ => continue,
                        }
                        app.handle_event(event)
                    }
                    Err(_) => continue,
                }
            }
            Some(action) = action_rx.recv() => {
                app.handle_action(action)
            }
            _ = tick_interval.tick() => {
                app.tick();
                AppCommand::None
            }
        };

        // Execute side effects.
        match command {
            AppCommand::None => {}
            AppCommand::Quit => break,
            AppCommand::Issue(request) => spawn_request(&gateway, request, &action_tx),
        }
    }

    Ok(())
}

/// Run `request` on a background task; its completion comes back as an action.
fn spawn_request(gateway: &Arc<dyn Gateway>, request: Request, tx: &mpsc::Sender<Action>) {
    let gateway = Arc::clone(gateway);
    let tx = tx.clone();
    tokio::spawn(async move {
        let completion = request.execute(gateway.as_ref()).await;
        if tx.send(Action::Completed(completion)).await.is_err() {
            tracing::debug!("event loop gone, completion dropped");
        }
    });
}
