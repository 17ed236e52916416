// src/progress.rs
//! `indicatif` rendering of batch progress events.

use crate::batch::{ProgressEvent, ProgressSink};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Percentage bar over the documents of one run.
pub struct IndicatifProgress {
    bar: ProgressBar,
}

impl IndicatifProgress {
    /// The bar is added to `multi`, the same set the logger suspends.
    pub fn new(multi: &MultiProgress) -> Self {
        let bar = multi.add(ProgressBar::new(0));
        bar.set_style(
            ProgressStyle::with_template("{msg:<32} {wide_bar:.green/dim} {pos}/{len} {percent:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        Self { bar }
    }
}

impl ProgressSink for IndicatifProgress {
    fn on_event(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => {
                self.bar.set_length(*total as u64);
                self.bar.set_position(0);
            }
            ProgressEvent::DocumentStarted { file, .. } => {
                self.bar.set_message(file.clone());
            }
            ProgressEvent::DocumentFinished { completed, .. } => {
                self.bar.set_position(*completed as u64);
            }
            ProgressEvent::Finished { completed, total } => {
                self.bar
                    .finish_with_message(format!("{} di {} documenti elaborati", completed, total));
            }
        }
    }
}
