use crate::view_model::AppViewModel;

pub type RequestId = u64;
pub type AckId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Structured,
    Plain,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Structured => RenderMode::Plain,
            RenderMode::Plain => RenderMode::Structured,
        }
    }
}

/// Result and error live in the variant that owns them, so they can never
/// both be present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Outcome {
    #[default]
    Idle,
    Pending { request_id: RequestId },
    Succeeded { summary: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url: String,
    outcome: Outcome,
    render_mode: RenderMode,
    copy_ack: Option<AckId>,
    last_request_id: RequestId,
    last_ack_id: AckId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_render_mode(render_mode: RenderMode) -> Self {
        Self {
            render_mode,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let (summary, error_message) = match &self.outcome {
            Outcome::Succeeded { summary } => (Some(summary.clone()), None),
            Outcome::Failed { message } => (None, Some(message.clone())),
            Outcome::Idle | Outcome::Pending { .. } => (None, None),
        };
        AppViewModel {
            url: self.url.clone(),
            phase: self.phase(),
            submit_enabled: self.can_submit(),
            summary,
            error_message,
            render_mode: self.render_mode,
            copy_acknowledged: self.copy_ack.is_some(),
            dirty: self.dirty,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn phase(&self) -> Phase {
        match self.outcome {
            Outcome::Idle => Phase::Idle,
            Outcome::Pending { .. } => Phase::Pending,
            Outcome::Succeeded { .. } => Phase::Succeeded,
            Outcome::Failed { .. } => Phase::Failed,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn summary(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Succeeded { summary } => Some(summary),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// The request whose completion will be applied, if one is in flight.
    pub fn pending_request(&self) -> Option<RequestId> {
        match self.outcome {
            Outcome::Pending { request_id } => Some(request_id),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.url.is_empty() && self.phase() != Phase::Pending
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_url(&mut self, url: String) {
        if self.url != url {
            self.url = url;
            self.mark_dirty();
        }
    }

    /// Clears result, error and copy acknowledgement, then enters `Pending`.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.copy_ack = None;
        self.outcome = Outcome::Pending { request_id };
        self.mark_dirty();
        request_id
    }

    /// Leaves `Pending` without an outcome. Returns the abandoned request.
    pub(crate) fn cancel_request(&mut self) -> Option<RequestId> {
        let request_id = self.pending_request()?;
        self.outcome = Outcome::Idle;
        self.mark_dirty();
        Some(request_id)
    }

    /// Applies a completion. Returns `false` when `request_id` is not the
    /// request currently in flight; such completions are dropped.
    pub(crate) fn apply_response(
        &mut self,
        request_id: RequestId,
        result: Result<String, String>,
    ) -> bool {
        if self.pending_request() != Some(request_id) {
            return false;
        }
        self.outcome = match result {
            Ok(summary) => Outcome::Succeeded { summary },
            Err(message) => Outcome::Failed { message },
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn acknowledge_copy(&mut self) -> AckId {
        self.last_ack_id += 1;
        self.copy_ack = Some(self.last_ack_id);
        self.mark_dirty();
        self.last_ack_id
    }

    /// Clears the acknowledgement only if `ack_id` is the most recent copy.
    pub(crate) fn clear_copy_ack(&mut self, ack_id: AckId) -> bool {
        if self.copy_ack != Some(ack_id) {
            return false;
        }
        self.copy_ack = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn toggle_render_mode(&mut self) {
        self.render_mode = self.render_mode.toggled();
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
