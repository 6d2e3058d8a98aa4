use crate::{Phase, RenderMode, SummaryDocument};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url: String,
    pub phase: Phase,
    pub submit_enabled: bool,
    pub summary: Option<String>,
    pub error_message: Option<String>,
    pub render_mode: RenderMode,
    pub copy_acknowledged: bool,
    pub dirty: bool,
}

impl AppViewModel {
    /// Structured reading of the summary, if there is one to show.
    pub fn summary_document(&self) -> Option<SummaryDocument> {
        self.summary.as_deref().map(SummaryDocument::parse)
    }

    pub fn can_copy(&self) -> bool {
        self.summary.is_some()
    }
}
