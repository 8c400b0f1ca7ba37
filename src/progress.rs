//! Build-time progress reporting, gated behind the `parallel` feature —
//! matching the teacher's own convention of using `indicatif` only when
//! that feature is enabled.

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

#[cfg(feature = "parallel")]
pub fn bar(len: u64, label: &str) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message(label.to_string());
    bar
}
