//! CLI-specific progress handling for butterfly-visit
//!
//! Provides the geocoding progress bar for the command-line interface.

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar counting geocoded addresses
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} addresses ETA: {eta}")
            .expect("Failed to create progress style")
            .progress_chars("#>-")
    );
    pb
}

/// Progress manager for the geocoding pass
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total: u64, message: &str) -> Self {
        let pb = create_progress_bar(total);

        // Print initial message to stderr
        eprintln!("{}", message);

        Self { pb }
    }

    /// Callback suitable for the planner's progress hook
    pub fn callback(&self) -> butterfly_visit::ProgressCallback {
        let pb = self.pb.clone();
        std::sync::Arc::new(move |done, total| {
            if pb.length().unwrap_or(0) != total {
                pb.set_length(total);
            }
            pb.set_position(done);
            if done >= total {
                pb.finish_with_message("✅ Geocoding completed!");
            }
        })
    }
}
