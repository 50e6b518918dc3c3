//! Upload page: design file upload and slide content forms.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::error::{Result, SlideFormsError};
use crate::model::{
    Category, ErrorPayload, FileUpload, Quality, SlideRequest, SlidesReceipt, UploadReceipt,
    UploadRequest,
};
use crate::transport::{GENERATE_SLIDES_PATH, HttpReply, Transport, UPLOAD_DESIGN_PATH};
use crate::validate::ValidationError;
use crate::view::ResultPanel;

pub const UPLOADING_MESSAGE: &str = "デザインファイルをアップロード中...";
pub const UPLOADED_MESSAGE: &str = "デザインファイルが正常にアップロードされました。";
pub const UPLOAD_FAILED: &str = "アップロードに失敗しました。";
pub const GENERATING_MESSAGE: &str = "スライドを生成中...";
pub const GENERATED_MESSAGE: &str = "スライドが正常に生成されました。";
pub const GENERATE_FAILED: &str = "スライドの生成に失敗しました。";
/// Shown for transport failures and unreadable responses.
pub const GENERIC_ERROR: &str = "エラーが発生しました。";

/// What happens when a form is submitted while its previous submission is
/// still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Send it anyway; the two requests race and the last to finish wins
    /// the result area.
    #[default]
    Allow,
    /// Refuse it with [`ValidationError::Busy`].
    Reject,
}

/// Current state of the design upload form.
#[derive(Debug, Clone, Default)]
pub struct DesignForm {
    pub file: Option<FileUpload>,
    pub category: Option<Category>,
    pub quality: Option<Quality>,
}

impl DesignForm {
    fn into_request(self) -> std::result::Result<UploadRequest, ValidationError> {
        Ok(UploadRequest {
            file: self.file.ok_or(ValidationError::MissingFile)?,
            category: self.category.ok_or(ValidationError::MissingCategory)?,
            quality: self.quality.ok_or(ValidationError::MissingQuality)?,
        })
    }
}

/// Marks a form busy until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool, policy: OverlapPolicy) -> Option<Self> {
        let taken = flag.swap(true, Ordering::AcqRel);
        if taken && policy == OverlapPolicy::Reject {
            return None;
        }
        Some(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller for the upload page.
///
/// Both forms share one result area, published as a [`ResultPanel`].
/// Neither form retries, times out, or cancels; see [`OverlapPolicy`] for
/// concurrent submissions.
pub struct UploadController<T: Transport> {
    transport: T,
    policy: OverlapPolicy,
    design_preference: Option<String>,
    panel: watch::Sender<ResultPanel>,
    design_busy: AtomicBool,
    content_busy: AtomicBool,
}

impl<T: Transport> UploadController<T> {
    pub fn new(transport: T) -> Self {
        let (panel, _) = watch::channel(ResultPanel::default());
        Self {
            transport,
            policy: OverlapPolicy::default(),
            design_preference: None,
            panel,
            design_busy: AtomicBool::new(false),
            content_busy: AtomicBool::new(false),
        }
    }

    pub fn overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Design preference sent with slide content, e.g. `"auto"`.
    pub fn design_preference(mut self, preference: impl Into<String>) -> Self {
        self.design_preference = Some(preference.into());
        self
    }

    pub fn panel(&self) -> ResultPanel {
        self.panel.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResultPanel> {
        self.panel.subscribe()
    }

    /// Upload a design file with its category and quality.
    pub async fn submit_design(&self, form: DesignForm) -> Result<UploadReceipt> {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(e) => return Err(self.reject(e)),
        };
        let Some(_guard) = InFlight::acquire(&self.design_busy, self.policy) else {
            return Err(self.reject(ValidationError::Busy));
        };

        self.panel.send_modify(|p| p.loading(UPLOADING_MESSAGE));
        let reply = self
            .transport
            .post_multipart(UPLOAD_DESIGN_PATH, &request)
            .await;
        let (status, body) = self.read_reply(reply, "Upload error")?;

        if is_success(status) {
            let receipt = serde_json::from_value(body).unwrap_or_default();
            self.panel.send_modify(|p| p.success(UPLOADED_MESSAGE));
            tracing::info!(file = %request.file.name, "Design file uploaded");
            Ok(receipt)
        } else {
            Err(self.server_error(status, body, UPLOAD_FAILED))
        }
    }

    /// Generate slides from free text and show a download link.
    pub async fn submit_content(&self, content: &str) -> Result<SlidesReceipt> {
        if content.trim().is_empty() {
            return Err(self.reject(ValidationError::EmptyPresentation));
        }
        let Some(_guard) = InFlight::acquire(&self.content_busy, self.policy) else {
            return Err(self.reject(ValidationError::Busy));
        };

        self.panel.send_modify(|p| p.loading(GENERATING_MESSAGE));
        let body = serde_json::to_value(SlideRequest {
            content,
            design_preference: self.design_preference.as_deref(),
        })?;
        let reply = self.transport.post_json(GENERATE_SLIDES_PATH, &body).await;
        let (status, body) = self.read_reply(reply, "Generation error")?;

        if !is_success(status) {
            return Err(self.server_error(status, body, GENERATE_FAILED));
        }
        match serde_json::from_value::<SlidesReceipt>(body) {
            Ok(receipt) => {
                self.panel.send_modify(|p| {
                    p.success(GENERATED_MESSAGE);
                    p.append_download(receipt.download_url.clone());
                });
                tracing::info!(url = %receipt.download_url, "Slides generated");
                Ok(receipt)
            }
            Err(e) => Err(self.unexpected(e.into(), "Generation error")),
        }
    }

    /// Turn a transport result into a status code and parsed JSON body.
    fn read_reply(
        &self,
        reply: Result<HttpReply>,
        context: &str,
    ) -> Result<(u16, serde_json::Value)> {
        let reply = reply.map_err(|e| self.unexpected(e, context))?;
        let body: serde_json::Value = reply.json().map_err(|e| self.unexpected(e, context))?;
        Ok((reply.status, body))
    }

    fn reject(&self, e: ValidationError) -> SlideFormsError {
        let message = e.to_string();
        self.panel.send_modify(|p| p.error(message));
        e.into()
    }

    fn unexpected(&self, e: SlideFormsError, context: &str) -> SlideFormsError {
        tracing::error!("{context}: {e}");
        self.panel.send_modify(|p| p.error(GENERIC_ERROR));
        e
    }

    fn server_error(&self, status: u16, body: serde_json::Value, fallback: &str) -> SlideFormsError {
        let payload: ErrorPayload = serde_json::from_value(body).unwrap_or_default();
        let message = payload
            .error_text()
            .unwrap_or_else(|| fallback.to_string());
        tracing::warn!(status, "Server rejected submission: {message}");
        self.panel.send_modify(|p| p.error(message.clone()));
        SlideFormsError::Server { status, message }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
