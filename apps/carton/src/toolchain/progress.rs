//! Terminal progress rendering for downloads.
//!
//! Adapts [`ProgressEvent`]s to an `indicatif` progress bar drawn on stderr.
//! The bar hides itself when stderr is not a terminal.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use super::download::{ProgressCallback, ProgressEvent};

const BAR_TEMPLATE: &str =
    "{msg}\n{wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Returns a callback that renders download progress as a terminal bar.
#[must_use]
pub fn terminal_progress() -> ProgressCallback {
    let bar = ProgressBar::new(0);
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);

    Arc::new(move |event| render(&bar, event))
}

/// Returns a callback that discards all progress events.
#[must_use]
pub fn silent_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

fn render(bar: &ProgressBar, event: ProgressEvent) {
    match event {
        ProgressEvent::Started { total } => {
            bar.set_length(total);
            bar.set_position(0);
        }
        ProgressEvent::Progress {
            downloaded,
            total,
            description,
        } => {
            bar.set_length(total);
            bar.set_position(downloaded);
            bar.set_message(description);
        }
        ProgressEvent::Completed => bar.finish_and_clear(),
        ProgressEvent::Failed { error } => bar.abandon_with_message(error),
    }
}
