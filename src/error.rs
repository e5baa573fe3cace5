use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubshiftError {
    #[error("Malformed subtitle: {0}")]
    Format(String),

    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    #[error("Range not satisfiable: {0}")]
    Range(String),

    #[error("Path escapes media root: {0}")]
    PathTraversal(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SubshiftError>;
