// docstamp - inject git metadata into documentation files
pub mod error;
pub mod git;
pub mod injector;
pub mod template;

pub use error::InjectError;
pub use git::GitResolver;
pub use injector::{FileReport, Injector};

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Fetches hash from build.rs
pub fn git_commit_hash() -> String {
    env!("GIT_HASH").to_string()
}

pub fn build_timestamp() -> String {
    let now = std::time::SystemTime::now();
    let dt = chrono::DateTime::<chrono::Utc>::from(now);
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Aggregated counters for a whole run, one `FileReport` at a time.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct InjectStats {
    pub files: usize,
    pub changed: usize,
    pub replaced: usize,
    pub bytes: usize,
}

impl InjectStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, report: &FileReport) {
        self.files += 1;
        if report.changed {
            self.changed += 1;
        }
        self.replaced += report.replaced;
        self.bytes += report.bytes;
    }
}
