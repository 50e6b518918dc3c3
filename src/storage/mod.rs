//! Pluggable single-slot stores for draft text.
//!
//! The crate ships with two built-in backends:
//!
//! - [`MemoryDraftStore`] -- keeps drafts in process memory.
//! - [`FsDraftStore`] -- keeps each key in a file under a base directory, so
//!   drafts survive restarts.
//!
//! Implement the [`DraftStore`] trait to add your own backend.

mod fs;
mod memory;

pub use fs::FsDraftStore;
pub use memory::MemoryDraftStore;

use crate::error::Result;

use std::future::Future;

/// Key under which the generator keeps its draft unless configured otherwise.
pub const DEFAULT_DRAFT_KEY: &str = "bcg_slide_content";

/// Trait for key-value backends holding draft text.
///
/// Every key holds at most one value; [`set`](DraftStore::set) overwrites.
///
/// # Implementing a custom backend
///
/// ```rust,no_run
/// use slide_forms::{DraftStore, Result};
///
/// struct NullStore;
///
/// impl DraftStore for NullStore {
///     async fn get(&self, _key: &str) -> Result<Option<String>> { Ok(None) }
///     async fn set(&self, _key: &str, _value: &str) -> Result<()> { Ok(()) }
///     async fn remove(&self, _key: &str) -> Result<()> { Ok(()) }
/// }
/// ```
pub trait DraftStore: Send + Sync + 'static {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Forget `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}
