use std::io;
use thiserror::Error;

/// fatal setup errors only. anything that happens after the run
/// directory exists is best-effort and never surfaces here
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("no target supplied")]
    EmptyTarget,

    #[error("authorization not confirmed, aborting before any scan")]
    ConsentDeclined,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type SweepResult<T> = Result<T, SweepError>;
