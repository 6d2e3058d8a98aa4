use std::time::Duration;

use crate::{AckId, RequestId};

/// How long the "copied" acknowledgement stays visible.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one summarize request for `url`.
    SubmitSummary { request_id: RequestId, url: String },
    /// Abandon the in-flight request, if it is still running.
    CancelSummary { request_id: RequestId },
    /// Place raw summary text on the system clipboard.
    CopyToClipboard { ack_id: AckId, text: String },
    /// Deliver `Msg::CopyAckExpired { ack_id }` once `after` has elapsed.
    ScheduleCopyAckReset { ack_id: AckId, after: Duration },
}
