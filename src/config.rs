//! Builder for configuring a [`SlideGenerator`].

use std::time::Duration;

use crate::error::{Result, SlideFormsError};
use crate::generator::SlideGenerator;
use crate::storage::{DEFAULT_DRAFT_KEY, DraftStore};
use crate::transport::Transport;
use crate::validate::{ContentBounds, MAX_CHARS, MIN_CHARS};

/// Time a generation request may take before it is aborted.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(300_000);
/// Delay between the end of a submission and hiding the progress bar.
pub const DEFAULT_PROGRESS_HIDE_DELAY: Duration = Duration::from_millis(1200);

/// Settings shared by every submission of one generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub bounds: ContentBounds,
    pub timeout: Duration,
    pub progress_hide_delay: Duration,
    pub storage_key: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bounds: ContentBounds::new(MIN_CHARS, MAX_CHARS),
            timeout: DEFAULT_TIMEOUT,
            progress_hide_delay: DEFAULT_PROGRESS_HIDE_DELAY,
            storage_key: DEFAULT_DRAFT_KEY.to_string(),
        }
    }
}

/// Builder for a [`SlideGenerator`].
///
/// # Example
///
/// ```rust,no_run
/// use slide_forms::{HttpTransport, MemoryDraftStore, SlideGeneratorBuilder};
/// use std::time::Duration;
///
/// # fn example() -> slide_forms::Result<()> {
/// let generator = SlideGeneratorBuilder::new(
///     HttpTransport::new("http://localhost:5000")?,
///     MemoryDraftStore::new(),
/// )
/// .bounds(100, 8000)
/// .timeout(Duration::from_secs(120))
/// .storage_key("team_deck")
/// .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SlideGeneratorBuilder<T: Transport, S: DraftStore> {
    transport: T,
    store: S,
    config: GeneratorConfig,
}

impl<T: Transport, S: DraftStore> SlideGeneratorBuilder<T, S> {
    /// Create a new builder with the given transport and draft store.
    ///
    /// Defaults: bounds 100..=8000 characters, timeout 300 s, progress hide
    /// delay 1.2 s, draft key `bcg_slide_content`.
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            store,
            config: GeneratorConfig::default(),
        }
    }

    /// Accepted draft length in characters, both ends inclusive.
    pub fn bounds(mut self, min: usize, max: usize) -> Self {
        self.config.bounds = ContentBounds::new(min, max);
        self
    }

    /// Deadline for a single generation request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// How long the progress bar stays up after a submission ends.
    pub fn progress_hide_delay(mut self, delay: Duration) -> Self {
        self.config.progress_hide_delay = delay;
        self
    }

    /// Key the draft is saved under.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Consume the builder and return the generator.
    pub fn build(self) -> Result<SlideGenerator<T, S>> {
        let bounds = &self.config.bounds;
        if bounds.min() > bounds.max() {
            return Err(SlideFormsError::Config(format!(
                "minimum length {} exceeds maximum {}",
                bounds.min(),
                bounds.max()
            )));
        }
        if self.config.storage_key.is_empty() {
            return Err(SlideFormsError::Config("storage key is empty".into()));
        }
        Ok(SlideGenerator::new(self.transport, self.store, self.config))
    }
}
