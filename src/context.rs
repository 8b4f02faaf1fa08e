use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::error::SweepResult;

/// immutable per-run state: the operator's target, its sanitized form
/// used in file names, the start timestamp and the run directory
pub struct RunContext {
    pub target: String,
    pub sanitized: String,
    pub stamp: String,
    pub dir: PathBuf,
}

/// strip a leading scheme and replace path separators so the target can
/// be embedded in a directory name
pub fn sanitize_target(raw: &str) -> String {
    let trimmed = raw.trim();
    let bare = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    bare.replace('/', "_")
}

impl RunContext {
    pub fn new(target: &str, started: DateTime<Local>) -> Self {
        let sanitized = sanitize_target(target);
        let stamp = started.format("%Y%m%d_%H%M%S").to_string();
        let dir = PathBuf::from(format!("VAPT_{sanitized}_{stamp}"));
        Self {
            target: target.trim().to_string(),
            sanitized,
            stamp,
            dir,
        }
    }

    /// build the context from wall-clock time and create the run
    /// directory. directory names only collide for runs started in the
    /// same second against colliding sanitizations, which is accepted
    pub fn create(target: &str) -> SweepResult<Self> {
        let ctx = Self::new(target, Local::now());
        fs::create_dir_all(&ctx.dir)?;
        Ok(ctx)
    }

    /// path of an artifact inside the run directory
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}
