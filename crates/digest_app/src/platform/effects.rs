use std::sync::mpsc;
use std::thread;

use digest_core::{Effect, Msg};
use digest_engine::{EngineEvent, EngineHandle};
use digest_logging::{digest_debug, digest_info, digest_warn};

use super::clipboard::ClipboardSink;

/// Carries out effects produced by `update` and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn ClipboardSink>,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        clipboard: Box<dyn ClipboardSink>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        Self {
            engine,
            clipboard,
            msg_tx,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitSummary { request_id, url } => {
                    self.engine.submit(request_id, url);
                }
                Effect::CancelSummary { request_id } => {
                    self.engine.cancel(request_id);
                }
                Effect::CopyToClipboard { ack_id, text } => {
                    match self.clipboard.set_text(&text) {
                        Ok(()) => digest_info!("Copied summary ({} bytes)", text.len()),
                        Err(err) => {
                            digest_warn!("Copy failed: {}", err);
                            let _ = self.msg_tx.send(Msg::CopyFailed { ack_id });
                        }
                    }
                }
                Effect::ScheduleCopyAckReset { ack_id, after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = msg_tx.send(Msg::CopyAckExpired { ack_id });
                    });
                }
            }
        }
    }

    /// Drains completed requests without blocking.
    pub fn poll_engine(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(engine_event_to_msg)
            .collect()
    }
}

pub fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SummaryCompleted { request_id, result } => {
            digest_debug!("Completion for request_id={}", request_id);
            Msg::SummaryReceived {
                request_id,
                result: result.map_err(|err| err.user_message()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use digest_engine::{SummarizeError, Summarizer};

    use super::*;
    use crate::platform::clipboard::ClipboardError;

    struct FixedSummarizer;

    #[async_trait::async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, url: &str) -> Result<String, SummarizeError> {
            if url.contains("broken") {
                Err(SummarizeError::ServerError {
                    status: 500,
                    excerpt: "oops".to_string(),
                })
            } else {
                Ok(format!("digest of {url}"))
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingClipboard {
        texts: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::AccessFailed("no display".to_string()));
            }
            self.texts.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn runner_with(clipboard: RecordingClipboard) -> (EffectRunner, mpsc::Receiver<Msg>) {
        let engine = EngineHandle::with_summarizer(Arc::new(FixedSummarizer)).unwrap();
        let (msg_tx, msg_rx) = mpsc::channel();
        (
            EffectRunner::new(engine, Box::new(clipboard), msg_tx),
            msg_rx,
        )
    }

    fn wait_for_engine(runner: &EffectRunner) -> Vec<Msg> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let msgs = runner.poll_engine();
            if !msgs.is_empty() || Instant::now() > deadline {
                return msgs;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn submit_effect_comes_back_as_summary_message() {
        let (mut runner, _msg_rx) = runner_with(RecordingClipboard::default());
        runner.run(vec![Effect::SubmitSummary {
            request_id: 3,
            url: "https://example.com".to_string(),
        }]);

        assert_eq!(
            wait_for_engine(&runner),
            vec![Msg::SummaryReceived {
                request_id: 3,
                result: Ok("digest of https://example.com".to_string()),
            }]
        );
    }

    #[test]
    fn failed_request_carries_display_message() {
        let (mut runner, _msg_rx) = runner_with(RecordingClipboard::default());
        runner.run(vec![Effect::SubmitSummary {
            request_id: 1,
            url: "https://broken.example.com".to_string(),
        }]);

        assert_eq!(
            wait_for_engine(&runner),
            vec![Msg::SummaryReceived {
                request_id: 1,
                result: Err("Server Error (500): oops".to_string()),
            }]
        );
    }

    #[test]
    fn copy_writes_text_and_schedules_expiry() {
        let clipboard = RecordingClipboard::default();
        let texts = clipboard.texts.clone();
        let (mut runner, msg_rx) = runner_with(clipboard);

        runner.run(vec![
            Effect::CopyToClipboard {
                ack_id: 1,
                text: "hello".to_string(),
            },
            Effect::ScheduleCopyAckReset {
                ack_id: 1,
                after: Duration::from_millis(20),
            },
        ]);

        assert_eq!(*texts.lock().unwrap(), vec!["hello".to_string()]);
        assert_eq!(
            msg_rx.recv_timeout(Duration::from_secs(2)),
            Ok(Msg::CopyAckExpired { ack_id: 1 })
        );
    }

    #[test]
    fn clipboard_failure_is_reported() {
        let (mut runner, msg_rx) = runner_with(RecordingClipboard {
            fail: true,
            ..RecordingClipboard::default()
        });

        runner.run(vec![Effect::CopyToClipboard {
            ack_id: 4,
            text: "hello".to_string(),
        }]);

        assert_eq!(msg_rx.try_recv(), Ok(Msg::CopyFailed { ack_id: 4 }));
    }
}
