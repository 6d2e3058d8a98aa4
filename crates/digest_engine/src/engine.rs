use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use digest_logging::{digest_debug, digest_info, digest_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, ReqwestSummarizer, Summarizer};
use crate::{EngineError, EngineEvent, RequestId};

enum EngineCommand {
    Submit { request_id: RequestId, url: String },
    Cancel { request_id: RequestId },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs summarize requests on a background runtime and reports completions.
///
/// Dropping the handle stops the worker thread and abandons in-flight requests.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let summarizer = ReqwestSummarizer::new(settings)?;
        digest_info!("Summarize endpoint {}", summarizer.endpoint());
        Self::with_summarizer(Arc::new(summarizer))
    }

    pub fn with_summarizer(summarizer: Arc<dyn Summarizer>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("digest-engine".to_string())
            .spawn(move || {
                let in_flight = InFlight::default();
                while let Ok(command) = cmd_rx.recv() {
                    handle_command(&runtime, &summarizer, &in_flight, command, &event_tx);
                }
                digest_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            url: url.into(),
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    summarizer: &Arc<dyn Summarizer>,
    in_flight: &InFlight,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { request_id, url } => {
            let token = CancellationToken::new();
            if let Ok(mut map) = in_flight.lock() {
                map.insert(request_id, token.clone());
            }
            digest_info!(
                "Submitting request_id={} url_len={} url={}",
                request_id,
                url.len(),
                url
            );
            runtime.spawn(run_request(
                summarizer.clone(),
                request_id,
                url,
                token,
                in_flight.clone(),
                event_tx.clone(),
            ));
        }
        EngineCommand::Cancel { request_id } => {
            let token = in_flight
                .lock()
                .ok()
                .and_then(|mut map| map.remove(&request_id));
            match token {
                Some(token) => {
                    token.cancel();
                    digest_info!("Cancelled request_id={}", request_id);
                }
                None => digest_debug!("Cancel for finished request_id={}", request_id),
            }
        }
    }
}

async fn run_request(
    summarizer: Arc<dyn Summarizer>,
    request_id: RequestId,
    url: String,
    token: CancellationToken,
    in_flight: InFlight,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let outcome = tokio::select! {
        _ = token.cancelled() => None,
        result = summarizer.summarize(&url) => Some(result),
    };
    if let Ok(mut map) = in_flight.lock() {
        map.remove(&request_id);
    }

    let Some(result) = outcome else {
        digest_debug!("Dropped cancelled request_id={}", request_id);
        return;
    };
    match &result {
        Ok(summary) => digest_info!(
            "Request {} succeeded summary_len={}",
            request_id,
            summary.len()
        ),
        Err(err) => digest_warn!("Request {} failed ({}): {}", request_id, err.kind(), err),
    }
    let _ = event_tx.send(EngineEvent::SummaryCompleted { request_id, result });
}
