//! Progress bar display for archive downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a single download
pub struct DownloadProgress {
    pb: ProgressBar,
}

impl DownloadProgress {
    /// Create a bar for a download of `total` bytes, or a spinner when the
    /// server did not announce a length.
    pub fn new(name: &str, total: Option<u64>) -> Self {
        let pb = match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("  [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                {
                    pb.set_style(style.progress_chars("#>-"));
                }
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {bytes} {msg}")
                {
                    pb.set_style(style);
                }
                pb
            }
        };
        pb.set_message(name.to_string());

        Self { pb }
    }

    /// Wrap a writer so bytes written advance the bar
    pub fn wrap_write<W: std::io::Write>(&self, writer: W) -> indicatif::ProgressBarIter<W> {
        self.pb.wrap_write(writer)
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
