use thiserror::Error;

/// Error type returned by instance creators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("An instance already exists, use acquire() to get it")]
    DuplicateConstruction,

    #[error("The shared instance cannot be duplicated")]
    DuplicationNotSupported,

    #[error("Failed to construct the shared instance: {0}")]
    Construction(#[source] BoxError),

    #[error("Failed to load a persisted instance: {0}")]
    Load(#[source] BoxError),
}
