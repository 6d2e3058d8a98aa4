use std::io::{self, Stdout};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use digest_core::{update, AppState, AppViewModel, Msg};
use digest_engine::EngineHandle;
use digest_logging::{digest_debug, digest_info, digest_trace};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::clipboard::SystemClipboard;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::keymap::{append_paste, map_key, KeyAction};
use super::ui::{render, UiState};

type Tui = Terminal<CrosstermBackend<Stdout>>;

// Input polling interval; also bounds how late a completion is drawn.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app(config: &AppConfig, initial_url: Option<String>) -> anyhow::Result<()> {
    let engine = EngineHandle::new(config.client_settings())?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut runner = EffectRunner::new(engine, Box::new(SystemClipboard::default()), msg_tx);

    let mut state = AppState::with_render_mode(config.render_mode.into());
    if let Some(url) = initial_url {
        state = update(state, Msg::InputChanged(url)).0;
    }

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, state, &mut runner, &msg_rx);
    restore_terminal(&mut terminal)?;
    digest_info!("Vibe Digest exiting");
    result
}

fn setup_terminal() -> io::Result<Tui> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    or_undo(
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste),
        || {
            let _ = terminal::disable_raw_mode();
        },
    )?;
    or_undo(Terminal::new(CrosstermBackend::new(stdout)), || {
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    })
}

/// Passes `step` through, running `undo` first when it failed.
fn or_undo<T>(step: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    step.inspect_err(|_| undo())
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()
}

fn event_loop(
    terminal: &mut Tui,
    mut state: AppState,
    runner: &mut EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> anyhow::Result<()> {
    let mut ui = UiState::default();
    let mut view = state.view();
    state.consume_dirty();
    let mut redraw = true;

    loop {
        if redraw {
            terminal.draw(|frame| render::draw(frame, &view, &ui))?;
            redraw = false;
        }

        let mut inbox = runner.poll_engine();
        inbox.extend(msg_rx.try_iter());

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    digest_trace!("Key {:?} {:?}", key.code, key.modifiers);
                    match map_key(key, &view) {
                        KeyAction::Dispatch(msg) => inbox.push(msg),
                        KeyAction::Scroll(delta) => {
                            ui.scroll_by(delta);
                            redraw = true;
                        }
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Ignore => {}
                    }
                }
                Event::Paste(text) => {
                    inbox.push(Msg::InputChanged(append_paste(&view.url, &text)));
                }
                Event::Resize(..) => redraw = true,
                _ => {}
            }
        } else {
            inbox.push(Msg::Tick);
        }

        for msg in inbox {
            if let Msg::SummaryReceived { request_id, .. } = &msg {
                if state.pending_request() != Some(*request_id) {
                    digest_debug!("Dropping stale completion request_id={}", request_id);
                }
            }
            let (next, effects) = update(state, msg);
            state = next;
            runner.run(effects);
        }

        if state.consume_dirty() {
            let next = state.view();
            if next.summary != view.summary {
                ui = UiState::default();
            }
            log_transition(&view, &next);
            view = next;
            redraw = true;
        }
    }
}

fn log_transition(previous: &AppViewModel, next: &AppViewModel) {
    if previous.phase != next.phase {
        digest_debug!("Phase {:?} -> {:?}", previous.phase, next.phase);
    }
    if previous.summary != next.summary {
        if let Some(title) = next.summary_document().and_then(|doc| doc.title()) {
            digest_info!("Summary ready: {}", title);
        }
    }
}
