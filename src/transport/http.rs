//! `reqwest`-backed transport.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};

use crate::error::{Result, SlideFormsError};
use crate::model::{HealthReport, UploadRequest};
use crate::transport::{HEALTH_PATH, HttpReply, Transport};

/// Environment variable read by [`HttpTransport::from_env`].
pub const BASE_URL_ENV: &str = "SLIDE_FORMS_BASE_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Transport that sends requests to a slide API server.
///
/// # Example
///
/// ```rust,no_run
/// use slide_forms::HttpTransport;
///
/// let transport = HttpTransport::new("http://localhost:5000").unwrap();
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport with a fresh [`Client`].
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a transport around an existing [`Client`].
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SlideFormsError::Config(format!("invalid base url {base_url:?}: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Read the base URL from `SLIDE_FORMS_BASE_URL`, falling back to
    /// `http://localhost:5000`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path or URL returned by the server against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SlideFormsError::Config(format!("invalid path {path:?}: {e}")))
    }

    /// Fetch `/api/health`.
    pub async fn health(&self) -> Result<HealthReport> {
        let reply = self.get(HEALTH_PATH).await?;
        if !reply.is_success() {
            return Err(SlideFormsError::Server {
                status: reply.status,
                message: reply.body,
            });
        }
        reply.json()
    }

    /// Download a generated file into `dest_dir`, naming it `filename`.
    ///
    /// `url` may be relative, as the generation endpoints return it.
    pub async fn download(&self, url: &str, dest_dir: &Path, filename: &str) -> Result<PathBuf> {
        let url = self.resolve(url)?;
        tracing::debug!(%url, "Downloading generated file");

        let response = self.client.get(url.clone()).send().await.map_err(network)?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlideFormsError::Server {
                status,
                message: body,
            });
        }
        let bytes = response.bytes().await.map_err(network)?;

        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|e| SlideFormsError::Storage(Box::new(e)))?;
        let path = dest_dir.join(filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| SlideFormsError::Storage(Box::new(e)))?;

        tracing::info!(%url, bytes = bytes.len(), path = %path.display(), "Download complete");
        Ok(path)
    }

    async fn finish(&self, request: reqwest::RequestBuilder, url: &Url) -> Result<HttpReply> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(%url, error = %e, "HTTP request failed");
            network(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(network)?;

        tracing::debug!(%url, status, response_len = body.len(), "HTTP request completed");
        Ok(HttpReply { status, body })
    }
}

fn network(e: reqwest::Error) -> SlideFormsError {
    SlideFormsError::Network(e.to_string())
}

impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply> {
        let url = self.resolve(path)?;
        tracing::debug!(%url, "POST json");
        let request = self.client.post(url.clone()).json(body);
        self.finish(request, &url).await
    }

    async fn post_multipart(&self, path: &str, upload: &UploadRequest) -> Result<HttpReply> {
        let url = self.resolve(path)?;
        let part = Part::bytes(upload.file.bytes.clone())
            .file_name(upload.file.name.clone())
            .mime_str(&upload.file.mime)
            .map_err(|e| SlideFormsError::Config(format!("invalid mime type: {e}")))?;
        let form = Form::new()
            .part("files", part)
            .text("category", upload.category.as_str().to_string())
            .text("quality", upload.quality.as_str());

        tracing::debug!(%url, file = %upload.file.name, size = upload.file.bytes.len(), "POST multipart");
        let request = self.client.post(url.clone()).multipart(form);
        self.finish(request, &url).await
    }

    async fn get(&self, path: &str) -> Result<HttpReply> {
        let url = self.resolve(path)?;
        let request = self.client.get(url.clone());
        self.finish(request, &url).await
    }
}
