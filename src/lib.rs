//! # slide_forms
//!
//! Async client-side controllers for a slide-generation API: validation,
//! draft autosave, progress reporting and download links, with pluggable
//! storage and transport.
//!
//! ## Overview
//!
//! Two independent controllers drive the API:
//!
//! - [`SlideGenerator`] keeps a draft buffer saved in a [`DraftStore`],
//!   checks its length, and posts it to `/api/generate` under a deadline.
//! - [`UploadController`] uploads design files to `/api/upload-design` and
//!   posts slide content to `/api/generate-slides`.
//!
//! Neither touches a page. Each publishes a view model ([`GeneratorView`],
//! [`ResultPanel`]) over a `tokio::sync::watch` channel, and [`render`]
//! turns view models into HTML fragments.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use slide_forms::{HttpTransport, MemoryDraftStore, SlideGeneratorBuilder};
//!
//! # async fn example() -> slide_forms::Result<()> {
//! let mut generator = SlideGeneratorBuilder::new(
//!     HttpTransport::new("http://localhost:5000")?,
//!     MemoryDraftStore::new(),
//! )
//! .build()?;
//!
//! generator.load().await?;
//! generator.input("四半期の売上報告 ...").await;
//! match generator.generate().await {
//!     Ok(result) => println!("download: {}", result.download_url),
//!     Err(e) => println!("{}", e.user_message()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod deadline;
pub mod error;
pub mod generator;
pub mod model;
pub mod render;
pub mod storage;
pub mod transport;
pub mod upload;
pub mod validate;
pub mod view;

pub use config::{GeneratorConfig, SlideGeneratorBuilder};
pub use error::{Result, SlideFormsError};
pub use generator::{AbortHandle, Key, KeyPress, SlideGenerator};
pub use model::{
    Category, FileUpload, GenerationResult, HealthReport, Quality, SlidesReceipt, UploadReceipt,
    UploadRequest,
};
pub use storage::{DraftStore, FsDraftStore, MemoryDraftStore};
pub use transport::{HttpReply, HttpTransport, Transport};
pub use upload::{DesignForm, OverlapPolicy, UploadController};
pub use validate::{ContentBounds, ValidationError};
pub use view::{GeneratorView, Phase, ResultPanel};
