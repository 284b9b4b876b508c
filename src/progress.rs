//! Progress reporting: byte-based bar for the distribution pass,
//! count-based bar for the permute pass.

use indicatif::{ProgressBar, ProgressStyle};

pub fn make_progress_bar_labeled(total_bytes: u64, label: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} {bytes:>10}/{total_bytes:<10} [{bar:.cyan/blue}] {percent:>3}%  \
         {bytes_per_sec}  elapsed: {elapsed_precise}",
    )
    .unwrap()
    .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);
    if let Some(msg) = label {
        pb.set_message(msg.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

pub fn make_count_progress(total: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  elapsed: {elapsed_precise}",
    )
    .unwrap()
    .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);
    if !label.is_empty() {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// A small, ergonomic wrapper around `indicatif` progress bars. `None`
/// when progress is disabled, so call sites don't need to branch on
/// the progress flag everywhere.
pub struct ProgressScope(Option<ProgressBar>);

impl ProgressScope {
    pub fn bytes(enabled: bool, label: impl Into<String>, total_bytes: u64) -> Self {
        Self(enabled.then(|| make_progress_bar_labeled(total_bytes, Some(&label.into()))))
    }
    pub fn count(enabled: bool, label: impl Into<String>, total: u64) -> Self {
        Self(enabled.then(|| make_count_progress(total, &label.into())))
    }
    #[inline]
    pub fn inc(&self, delta: u64) {
        if let Some(pb) = &self.0 {
            pb.inc(delta);
        }
    }
    pub fn finish(&self, msg: impl Into<String>) {
        if let Some(pb) = &self.0 {
            pb.finish_with_message(msg.into());
        }
    }
}
