use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between reading the logfile and saving the plot.
#[derive(Debug, Error)]
pub enum LatencyError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("logfile header is truncated, found {found} of {} lines", crate::HEADER_LINES)]
    TruncatedHeader { found: usize },

    #[error("no data group after the logfile header")]
    MissingGroup,

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("the series has no samples")]
    EmptySeries,

    #[error("could not draw the plot: {0}")]
    Render(String),
}

impl LatencyError {
    pub fn parse(line: usize, reason: impl Into<String>) -> LatencyError {
        LatencyError::Parse {
            line,
            reason: reason.into(),
        }
    }
}
