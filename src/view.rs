//! Display state for both forms, computed without touching any page.
//!
//! Controllers mutate these values and publish them; [`crate::render`] turns
//! them into markup.

use crate::validate::ContentBounds;

/// Counter color class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Alert,
}

impl Tone {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Normal => "#2E7D32",
            Self::Alert => "#C62828",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterView {
    pub text: String,
    pub tone: Tone,
}

/// Counter for an input of `len` characters.
pub fn counter_view(len: usize, bounds: &ContentBounds) -> CounterView {
    let tone = if bounds.contains(len) {
        Tone::Normal
    } else {
        Tone::Alert
    };
    CounterView {
        text: format!("{len}文字 / {}文字", bounds.max()),
        tone,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub message: String,
    pub kind: StatusKind,
}

impl StatusView {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressView {
    pub visible: bool,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: String,
}

/// Where a generator submission currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
    AwaitingResponse,
    Success,
    Error,
    TimedOut,
}

/// Everything the slide generator page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorView {
    pub counter: CounterView,
    pub status: Option<StatusView>,
    pub progress: ProgressView,
    pub download: Option<DownloadLink>,
    pub generate_enabled: bool,
    pub phase: Phase,
    /// Number of the submission the progress belongs to; 0 before the first.
    pub submission: u64,
    /// Every percentage shown since the current submission started.
    ///
    /// Watchers can miss intermediate sends, so the stages are kept here.
    pub progress_history: Vec<u8>,
}

impl GeneratorView {
    pub fn new(bounds: &ContentBounds) -> Self {
        Self {
            counter: counter_view(0, bounds),
            status: None,
            progress: ProgressView::default(),
            download: None,
            generate_enabled: true,
            phase: Phase::Idle,
            submission: 0,
            progress_history: Vec::new(),
        }
    }

    /// Forget the stages of the previous submission.
    pub fn reset_progress(&mut self) {
        self.hide_progress();
        self.progress_history.clear();
    }

    pub fn show_progress(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.progress = ProgressView {
            visible: true,
            percent,
        };
        if self.progress_history.last() != Some(&percent) {
            self.progress_history.push(percent);
        }
    }

    pub fn hide_progress(&mut self) {
        self.progress = ProgressView::default();
    }

    pub fn show_download(&mut self, href: impl Into<String>, filename: impl Into<String>) {
        self.download = Some(DownloadLink {
            href: href.into(),
            filename: filename.into(),
        });
    }

    pub fn hide_download(&mut self) {
        self.download = None;
    }
}

/// Banner shown in the upload page's result area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Loading(String),
    Success(String),
    Error(String),
}

/// The upload page's result area: one banner and at most one download link.
///
/// Every new banner replaces the whole area, dropping any earlier link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPanel {
    pub banner: Option<Banner>,
    pub download_href: Option<String>,
}

impl ResultPanel {
    pub fn loading(&mut self, message: impl Into<String>) {
        self.replace(Banner::Loading(message.into()));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.replace(Banner::Success(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.replace(Banner::Error(message.into()));
    }

    pub fn append_download(&mut self, href: impl Into<String>) {
        self.download_href = Some(href.into());
    }

    fn replace(&mut self, banner: Banner) {
        self.banner = Some(banner);
        self.download_href = None;
    }
}
