//! HTTP plumbing between the controllers and the slide API.
//!
//! The controllers only see the [`Transport`] trait, so tests can swap the
//! network for a scripted fake. [`HttpTransport`] is the `reqwest`-backed
//! implementation used in production.

mod http;

pub use http::HttpTransport;

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::model::UploadRequest;

/// Design file upload endpoint.
pub const UPLOAD_DESIGN_PATH: &str = "/api/upload-design";
/// Slide generation endpoint used by the upload page.
pub const GENERATE_SLIDES_PATH: &str = "/api/generate-slides";
/// Slide generation endpoint used by the generator page.
pub const GENERATE_PATH: &str = "/api/generate";
/// Server health endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Raw response: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Trait for sending requests to the slide API.
///
/// Paths are absolute API paths such as [`GENERATE_PATH`]; the transport
/// decides which host they go to. Implementations report transport-level
/// failures as [`SlideFormsError::Network`](crate::SlideFormsError::Network)
/// and return every HTTP status, including errors, as an [`HttpReply`].
pub trait Transport: Send + Sync + 'static {
    /// POST a JSON body.
    fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpReply>> + Send;

    /// POST a multipart form carrying an uploaded file.
    fn post_multipart(
        &self,
        path: &str,
        upload: &UploadRequest,
    ) -> impl Future<Output = Result<HttpReply>> + Send;

    /// GET a path.
    fn get(&self, path: &str) -> impl Future<Output = Result<HttpReply>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(HttpReply::new(200, "").is_success());
        assert!(HttpReply::new(204, "").is_success());
        assert!(!HttpReply::new(302, "").is_success());
        assert!(!HttpReply::new(400, "").is_success());
    }

    #[test]
    fn bad_json_is_unexpected() {
        let err = HttpReply::new(200, "<html>")
            .json::<serde_json::Value>()
            .unwrap_err();
        assert!(matches!(err, crate::SlideFormsError::Unexpected(_)));
    }
}
