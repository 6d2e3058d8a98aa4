use crate::{AppState, Effect, Msg, COPY_ACK_WINDOW};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(url) => {
            state.set_url(url);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !state.can_submit() {
                return (state, Vec::new());
            }
            let request_id = state.begin_request();
            vec![Effect::SubmitSummary {
                request_id,
                url: state.url().to_owned(),
            }]
        }
        Msg::CancelClicked => match state.cancel_request() {
            Some(request_id) => vec![Effect::CancelSummary { request_id }],
            None => Vec::new(),
        },
        Msg::SummaryReceived { request_id, result } => {
            // A stale completion (cancelled or superseded) is ignored.
            state.apply_response(request_id, result);
            Vec::new()
        }
        Msg::CopyClicked => match state.summary().map(ToOwned::to_owned) {
            Some(text) => {
                let ack_id = state.acknowledge_copy();
                vec![
                    Effect::CopyToClipboard { ack_id, text },
                    Effect::ScheduleCopyAckReset {
                        ack_id,
                        after: COPY_ACK_WINDOW,
                    },
                ]
            }
            None => Vec::new(),
        },
        Msg::CopyFailed { ack_id } | Msg::CopyAckExpired { ack_id } => {
            state.clear_copy_ack(ack_id);
            Vec::new()
        }
        Msg::ToggleRenderMode => {
            state.toggle_render_mode();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
