use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::Difficulty;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tier {0} has no sentences")]
    EmptyTier(Difficulty),

    #[error("tier {0} contains an empty sentence")]
    EmptySentence(Difficulty),

    #[error("tier {0} has a zero time limit")]
    ZeroTimeLimit(Difficulty),

    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to install log subscriber: {0}")]
    Logging(Box<dyn std::error::Error + Send + Sync + 'static>),
}
