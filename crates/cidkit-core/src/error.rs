use thiserror::Error;

pub type CidkitResult<T> = Result<T, CidkitError>;

#[derive(Debug, Error)]
pub enum CidkitError {
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
