//! Markup adapter: turns view models into HTML fragments.
//!
//! Element ids and classes match the pages the stylesheets target, so a
//! fragment can be swapped into place as-is. Templates live in `templates/`
//! and escape all text.

use askama::Template;

use crate::error::Result;
use crate::view::{Banner, GeneratorView, ResultPanel};

/// Label of the link appended after a successful slide generation.
pub const DOWNLOAD_LABEL: &str = "スライドをダウンロード";

#[derive(Template)]
#[template(path = "generator.html")]
struct GeneratorTemplate<'a> {
    counter_color: &'a str,
    counter_text: &'a str,
    progress_display: &'a str,
    progress_percent: u8,
    status_class: String,
    status_display: &'a str,
    status_message: &'a str,
    download_display: &'a str,
    download_href: &'a str,
    download_filename: &'a str,
    download_label: &'a str,
    generate_enabled: bool,
}

#[derive(Template)]
#[template(path = "result_panel.html")]
struct ResultPanelTemplate<'a> {
    loading: Option<&'a str>,
    success: Option<&'a str>,
    error: Option<&'a str>,
    download_href: Option<&'a str>,
    download_label: &'a str,
}

fn display(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

/// Render the generator page's dynamic region.
pub fn render_generator(view: &GeneratorView) -> Result<String> {
    let status_class = match view.status.as_ref().map(|s| s.kind.class()) {
        Some(class) if !class.is_empty() => format!("status {class}"),
        _ => "status".to_string(),
    };
    let (download_href, download_filename) = match &view.download {
        Some(link) => (link.href.as_str(), link.filename.as_str()),
        None => ("#", ""),
    };

    let template = GeneratorTemplate {
        counter_color: view.counter.tone.color(),
        counter_text: &view.counter.text,
        progress_display: display(view.progress.visible),
        progress_percent: view.progress.percent,
        status_class,
        status_display: display(view.status.is_some()),
        status_message: view.status.as_ref().map_or("", |s| s.message.as_str()),
        download_display: display(view.download.is_some()),
        download_href,
        download_filename,
        download_label: DOWNLOAD_LABEL,
        generate_enabled: view.generate_enabled,
    };
    Ok(template.render()?)
}

/// Render the upload page's result area.
pub fn render_result_panel(panel: &ResultPanel) -> Result<String> {
    let mut template = ResultPanelTemplate {
        loading: None,
        success: None,
        error: None,
        download_href: panel.download_href.as_deref(),
        download_label: DOWNLOAD_LABEL,
    };
    match &panel.banner {
        Some(Banner::Loading(message)) => template.loading = Some(message.as_str()),
        Some(Banner::Success(message)) => template.success = Some(message.as_str()),
        Some(Banner::Error(message)) => template.error = Some(message.as_str()),
        None => {}
    }
    Ok(template.render()?)
}
