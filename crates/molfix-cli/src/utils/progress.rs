use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::path::Path;

/// Progress bar for a batch of files processed on several threads.
///
/// `ProgressBar` is internally synchronised, so clones of the handler may be used from
/// rayon workers without extra locking.
#[derive(Clone)]
pub struct BatchProgress {
    pb: ProgressBar,
}

impl BatchProgress {
    pub fn new(total_files: u64, visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let pb = ProgressBar::with_draw_target(Some(total_files), target)
            .with_style(Self::bar_style())
            .with_message("Repairing");
        Self { pb }
    }

    pub fn file_done(&self, path: &Path, error: Option<&str>) {
        if let Some(error) = error {
            self.pb
                .println(format!("  ✗ {}: {}", path.display(), error));
        }
        self.pb.inc(1);
    }

    pub fn finish(&self, failed: usize) {
        if failed == 0 {
            self.pb.finish_with_message("✓ Done");
        } else {
            self.pb
                .finish_with_message(format!("✗ {} failed", failed));
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn counts_finished_files() {
        let progress = BatchProgress::new(3, false);
        progress.file_done(Path::new("a.mol"), None);
        progress.file_done(Path::new("b.mol"), Some("Parse error"));
        assert_eq!(progress.pb.position(), 2);
        assert_eq!(progress.pb.length(), Some(3));
        assert!(!progress.pb.is_finished());
    }

    #[test]
    fn finish_message_reflects_failures() {
        let progress = BatchProgress::new(1, false);
        progress.file_done(Path::new("a.mol"), None);
        progress.finish(0);
        assert!(progress.pb.is_finished());
        assert_eq!(progress.pb.message(), "✓ Done");

        let progress = BatchProgress::new(2, false);
        progress.finish(2);
        assert_eq!(progress.pb.message(), "✗ 2 failed");
    }

    #[test]
    fn clones_share_one_bar_across_threads() {
        let progress = BatchProgress::new(4, false);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let progress = progress.clone();
                thread::spawn(move || {
                    progress.file_done(Path::new(&format!("{}.mol", i)), None);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(progress.pb.position(), 4);
    }
}
