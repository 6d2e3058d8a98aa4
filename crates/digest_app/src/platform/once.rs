//! Non-interactive mode: summarize one URL and print the result.

use std::io::Write;
use std::time::Duration;

use anyhow::bail;
use digest_core::{update, AppState, Effect, Msg, Phase, RenderMode};
use digest_engine::EngineHandle;

use super::config::AppConfig;
use super::effects::engine_event_to_msg;
use super::ui::render::{lines_to_string, summary_lines};

const POLL: Duration = Duration::from_millis(100);

/// Returns `Ok(false)` when the server or transport reported a failure.
pub fn run_once(
    config: &AppConfig,
    url: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<bool> {
    let engine = EngineHandle::new(config.client_settings())?;
    let state = AppState::with_render_mode(config.render_mode.into());
    summarize(&engine, state, url, out, err)
}

fn summarize(
    engine: &EngineHandle,
    state: AppState,
    url: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<bool> {
    let (state, _) = update(state, Msg::InputChanged(url.to_owned()));
    let (mut state, effects) = update(state, Msg::SubmitClicked);
    if effects.is_empty() {
        bail!("no URL to summarize");
    }
    for effect in effects {
        if let Effect::SubmitSummary { request_id, url } = effect {
            engine.submit(request_id, url);
        }
    }

    while state.phase() == Phase::Pending {
        if let Some(event) = engine.recv_timeout(POLL) {
            state = update(state, engine_event_to_msg(event)).0;
        }
    }

    let view = state.view();
    match (&view.summary, &view.error_message) {
        (Some(summary), _) => {
            match view.render_mode {
                RenderMode::Structured => {
                    write!(out, "{}", lines_to_string(&summary_lines(&view)))?
                }
                RenderMode::Plain => writeln!(out, "{summary}")?,
            }
            Ok(true)
        }
        (None, Some(message)) => {
            writeln!(err, "Error: {message}")?;
            Ok(false)
        }
        (None, None) => bail!("request ended without a result"),
    }
}
