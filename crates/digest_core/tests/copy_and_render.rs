use digest_core::{update, AppState, Effect, Msg, RenderMode, COPY_ACK_WINDOW};

fn succeeded_with(summary: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::InputChanged("https://example.com".into()));
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::SummaryReceived {
            request_id: 1,
            result: Ok(summary.to_string()),
        },
    );
    state
}

#[test]
fn copy_puts_raw_text_on_clipboard_and_acknowledges() {
    let state = succeeded_with("hello");
    let (state, effects) = update(state, Msg::CopyClicked);

    assert_eq!(
        effects,
        vec![
            Effect::CopyToClipboard {
                ack_id: 1,
                text: "hello".to_string()
            },
            Effect::ScheduleCopyAckReset {
                ack_id: 1,
                after: COPY_ACK_WINDOW,
            },
        ]
    );
    assert!(state.view().copy_acknowledged);

    let (state, _) = update(state, Msg::CopyAckExpired { ack_id: 1 });
    assert!(!state.view().copy_acknowledged);
}

#[test]
fn copy_window_is_two_seconds() {
    assert_eq!(COPY_ACK_WINDOW.as_secs(), 2);
}

#[test]
fn copy_uses_raw_markup_not_structured_text() {
    let raw = "**Title**\n\n- point\n\n*insight*";
    let (_state, effects) = update(succeeded_with(raw), Msg::CopyClicked);
    assert_eq!(
        effects[0],
        Effect::CopyToClipboard {
            ack_id: 1,
            text: raw.to_string()
        }
    );
}

#[test]
fn older_expiry_does_not_cut_a_newer_acknowledgement_short() {
    let state = succeeded_with("hello");
    let (state, _) = update(state, Msg::CopyClicked);
    let (state, effects) = update(state, Msg::CopyClicked);
    assert!(matches!(
        effects[1],
        Effect::ScheduleCopyAckReset { ack_id: 2, .. }
    ));

    let (state, _) = update(state, Msg::CopyAckExpired { ack_id: 1 });
    assert!(state.view().copy_acknowledged);
    let (state, _) = update(state, Msg::CopyAckExpired { ack_id: 2 });
    assert!(!state.view().copy_acknowledged);
}

#[test]
fn failed_clipboard_write_clears_acknowledgement() {
    let (state, _) = update(succeeded_with("hello"), Msg::CopyClicked);
    let (state, effects) = update(state, Msg::CopyFailed { ack_id: 1 });
    assert!(effects.is_empty());
    assert!(!state.view().copy_acknowledged);
}

#[test]
fn copy_without_summary_does_nothing() {
    let (state, effects) = update(AppState::new(), Msg::CopyClicked);
    assert!(effects.is_empty());
    assert!(!state.view().copy_acknowledged);
    assert!(!state.view().can_copy());
}

#[test]
fn render_mode_toggles_and_keeps_text() {
    let state = succeeded_with("**Bold headline**");
    assert_eq!(state.render_mode(), RenderMode::Structured);

    let (state, _) = update(state, Msg::ToggleRenderMode);
    let view = state.view();
    assert_eq!(view.render_mode, RenderMode::Plain);
    assert_eq!(view.summary.as_deref(), Some("**Bold headline**"));

    let (state, _) = update(state, Msg::ToggleRenderMode);
    assert_eq!(state.render_mode(), RenderMode::Structured);
}

#[test]
fn initial_render_mode_comes_from_construction() {
    let state = AppState::with_render_mode(RenderMode::Plain);
    assert_eq!(state.view().render_mode, RenderMode::Plain);
}

#[test]
fn view_exposes_structured_document() {
    let state = succeeded_with("**Headline**\n\n- a\n- b");
    let doc = state.view().summary_document().expect("document");
    assert_eq!(doc.title().as_deref(), Some("Headline"));
    assert_eq!(doc.blocks.len(), 3);
}
