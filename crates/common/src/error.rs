//! Common error types

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid log filter: {0}")]
    LogFilter(#[from] ParseError),

    #[error("Logging already initialised: {0}")]
    LoggingInit(#[from] TryInitError),
}

pub type Result<T> = std::result::Result<T, Error>;
