//! Slide generator form: draft buffer, counter, autosave and submission.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::GeneratorConfig;
use crate::deadline::with_deadline;
use crate::error::{GENERATION_FAILED, Result, SlideFormsError};
use crate::model::{ErrorPayload, GenerationRequest, GenerationResult};
use crate::storage::DraftStore;
use crate::transport::{GENERATE_PATH, Transport};
use crate::validate::{char_len, validate_content};
use crate::view::{GeneratorView, Phase, StatusView, counter_view};

/// Status shown while the server works.
pub const GENERATING_MESSAGE: &str = "AIがスライド構成を生成中です…";
/// Status shown after a successful generation.
pub const COMPLETED_MESSAGE: &str = "スライド生成が完了しました！";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

/// A key pressed while the text buffer has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn ctrl_enter() -> Self {
        Self {
            key: Key::Enter,
            ctrl: true,
        }
    }

    fn submits(&self) -> bool {
        self.ctrl && self.key == Key::Enter
    }
}

/// Cancels whichever submission is currently running.
///
/// A cancelled submission fails the same way an expired deadline does.
#[derive(Clone)]
pub struct AbortHandle {
    current: Arc<Mutex<CancellationToken>>,
}

impl AbortHandle {
    pub fn abort(&self) {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .cancel();
    }

    fn fresh(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = token.clone();
        token
    }
}

/// The slide generator form.
///
/// Holds the draft text, keeps it saved in a [`DraftStore`], and turns it
/// into a generation request on demand. Display state is published as a
/// [`GeneratorView`]; obtain a receiver with [`subscribe`](Self::subscribe).
///
/// Build one with [`SlideGeneratorBuilder`](crate::SlideGeneratorBuilder).
pub struct SlideGenerator<T: Transport, S: DraftStore> {
    transport: T,
    store: S,
    config: GeneratorConfig,
    text: String,
    view: Arc<watch::Sender<GeneratorView>>,
    submissions: Arc<AtomicU64>,
    abort: AbortHandle,
}

impl<T: Transport, S: DraftStore> SlideGenerator<T, S> {
    pub(crate) fn new(transport: T, store: S, config: GeneratorConfig) -> Self {
        let (view, _) = watch::channel(GeneratorView::new(&config.bounds));
        Self {
            transport,
            store,
            config,
            text: String::new(),
            view: Arc::new(view),
            submissions: Arc::new(AtomicU64::new(0)),
            abort: AbortHandle {
                current: Arc::new(Mutex::new(CancellationToken::new())),
            },
        }
    }

    /// Current buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Snapshot of the current display state.
    pub fn view(&self) -> GeneratorView {
        self.view.borrow().clone()
    }

    /// Receive every display state change.
    pub fn subscribe(&self) -> watch::Receiver<GeneratorView> {
        self.view.subscribe()
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Restore the saved draft into the buffer and refresh the counter.
    pub async fn load(&mut self) -> Result<()> {
        let saved = self.store.get(&self.config.storage_key).await;
        if let Ok(Some(draft)) = &saved {
            if !draft.is_empty() {
                self.text = draft.clone();
                tracing::debug!(len = char_len(draft), "Restored draft");
            }
        }
        self.refresh_counter();
        saved.map(|_| ())
    }

    /// Replace the buffer contents, as typing does.
    ///
    /// Updates the counter and saves the draft. A failed save is logged and
    /// otherwise ignored.
    pub async fn input(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.refresh_counter();

        if self.text.is_empty() {
            return;
        }
        if let Err(e) = self.store.set(&self.config.storage_key, &self.text).await {
            tracing::warn!("Failed to save draft: {e}");
        }
    }

    /// Handle a key press in the buffer. Ctrl+Enter submits.
    pub async fn key_down(&mut self, key: KeyPress) -> Option<Result<GenerationResult>> {
        if key.submits() {
            Some(self.generate().await)
        } else {
            None
        }
    }

    /// Validate the buffer and submit it for generation.
    ///
    /// Every outcome is also reflected in the published view: the status
    /// line carries the result message, the download link is revealed only
    /// on success, and the progress bar hides after the configured delay.
    pub async fn generate(&mut self) -> Result<GenerationResult> {
        self.update(|v| v.phase = Phase::Validating);
        let content = match validate_content(&self.text, &self.config.bounds) {
            Ok(content) => content.to_string(),
            Err(e) => {
                let message = e.to_string();
                self.update(|v| {
                    v.status = Some(StatusView::error(message));
                    v.phase = Phase::Idle;
                });
                return Err(e.into());
            }
        };

        let submission = self.submissions.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|v| {
            v.generate_enabled = false;
            v.hide_download();
            v.submission = submission;
            v.reset_progress();
            v.show_progress(30);
            v.status = Some(StatusView::info(GENERATING_MESSAGE));
            v.phase = Phase::Submitting;
        });

        let token = self.abort.fresh();
        let outcome = self.submit(&content, &token).await;

        match &outcome {
            Ok(result) => {
                tracing::info!(filename = %result.filename, "Slide generation completed");
                self.update(|v| {
                    v.show_progress(100);
                    v.status = Some(StatusView::success(COMPLETED_MESSAGE));
                    v.show_download(result.download_url.clone(), result.filename.clone());
                    v.phase = Phase::Success;
                });
                if let Err(e) = self.store.remove(&self.config.storage_key).await {
                    tracing::warn!("Failed to clear draft: {e}");
                }
            }
            Err(e) => {
                tracing::warn!("Slide generation failed: {e}");
                let phase = match e {
                    SlideFormsError::Timeout => Phase::TimedOut,
                    _ => Phase::Error,
                };
                let message = e.user_message();
                self.update(|v| {
                    v.hide_download();
                    v.status = Some(StatusView::error(message));
                    v.hide_progress();
                    v.phase = phase;
                });
            }
        }

        self.update(|v| v.generate_enabled = true);
        self.schedule_progress_hide(submission);
        outcome
    }

    async fn submit(&self, content: &str, token: &CancellationToken) -> Result<GenerationResult> {
        let body = serde_json::to_value(GenerationRequest { content })?;
        tracing::debug!(len = char_len(content), "Submitting generation request");

        self.update(|v| v.phase = Phase::AwaitingResponse);
        let request = self.transport.post_json(GENERATE_PATH, &body);
        let reply = match with_deadline(request, self.config.timeout, token).await {
            Ok(reply) => reply?,
            Err(aborted) => {
                tracing::warn!(?aborted, "Generation request aborted");
                return Err(SlideFormsError::Timeout);
            }
        };

        self.update(|v| v.show_progress(70));

        if !reply.is_success() {
            let payload: ErrorPayload = reply.json()?;
            return Err(SlideFormsError::Server {
                status: reply.status,
                message: non_empty(payload.message_text()),
            });
        }

        let result: GenerationResult = reply.json()?;
        if result.is_success() {
            Ok(result)
        } else {
            Err(SlideFormsError::Server {
                status: reply.status,
                message: non_empty(result.message),
            })
        }
    }

    fn schedule_progress_hide(&self, submission: u64) {
        let view = Arc::clone(&self.view);
        let submissions = Arc::clone(&self.submissions);
        let delay = self.config.progress_hide_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A newer submission owns the progress bar now.
            if submissions.load(Ordering::SeqCst) != submission {
                return;
            }
            view.send_modify(|v| {
                v.hide_progress();
                v.phase = Phase::Idle;
            });
        });
    }

    fn refresh_counter(&self) {
        let counter = counter_view(char_len(&self.text), &self.config.bounds);
        self.update(|v| v.counter = counter);
    }

    fn update(&self, f: impl FnOnce(&mut GeneratorView)) {
        self.view.send_modify(f);
    }
}

/// Log each progress stage a generator shows, until the generator is dropped.
///
/// Resolves to the stages of the last submission, in order.
pub fn log_progress(mut view: watch::Receiver<GeneratorView>) -> JoinHandle<Vec<u8>> {
    tokio::spawn(async move {
        let mut submission = 0;
        let mut logged: Vec<u8> = Vec::new();
        loop {
            let (current, history) = {
                let v = view.borrow_and_update();
                (v.submission, v.progress_history.clone())
            };
            if current != submission {
                submission = current;
                logged.clear();
            }
            for &percent in history.iter().skip(logged.len()) {
                tracing::info!(submission, percent, "Progress");
                logged.push(percent);
            }
            if view.changed().await.is_err() {
                return logged;
            }
        }
    })
}

fn non_empty(message: Option<String>) -> String {
    message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERATION_FAILED.to_string())
}
