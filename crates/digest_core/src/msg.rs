#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input.
    InputChanged(String),
    /// User activated the Summarize trigger.
    SubmitClicked,
    /// User asked to abandon the pending request.
    CancelClicked,
    /// Engine completion for a request. `Err` carries the display message.
    SummaryReceived {
        request_id: crate::RequestId,
        result: Result<String, String>,
    },
    /// User asked to copy the current summary.
    CopyClicked,
    /// The clipboard write for a copy failed.
    CopyFailed { ack_id: crate::AckId },
    /// The acknowledgement window for a copy elapsed.
    CopyAckExpired { ack_id: crate::AckId },
    /// User switched between structured and plain rendering.
    ToggleRenderMode,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
