//! Per-stage progress bars for the item run.

use dex_catalog::{RunProgress, RunStage};
use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {prefix:>10} {wide_bar} {pos}/{len} {msg}";

/// One bar per run stage; a new stage finishes the previous bar.
#[derive(Default)]
pub struct StageProgress {
    current: Option<(RunStage, ProgressBar)>,
    hidden: bool,
}

impl StageProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws nothing. Used when logs already go to the terminal at debug level or below.
    pub fn hidden() -> Self {
        Self {
            current: None,
            hidden: true,
        }
    }

    pub fn update(&mut self, progress: RunProgress<'_>) {
        let bar = match &self.current {
            Some((stage, bar)) if *stage == progress.stage => bar.clone(),
            _ => {
                self.finish();
                let bar = self.stage_bar(progress.stage, progress.total);
                self.current = Some((progress.stage, bar.clone()));
                bar
            }
        };
        bar.set_position(progress.position as u64);
        bar.set_message(progress.release.to_string());
    }

    pub fn finish(&mut self) {
        if let Some((_, bar)) = self.current.take() {
            bar.finish_and_clear();
        }
    }

    fn stage_bar(&self, stage: RunStage, total: usize) -> ProgressBar {
        if self.hidden {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
        }
        bar.set_prefix(stage_label(stage));
        bar
    }
}

impl Drop for StageProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

fn stage_label(stage: RunStage) -> &'static str {
    match stage {
        RunStage::Expansions => "expansions",
        RunStage::Products => "products",
        RunStage::Currency => "currency",
    }
}
