use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarouscrollError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No content supplied")]
    NoContent,

    #[error("Content has no section headings")]
    NoSections,

    #[error("Unknown container: {0}")]
    UnknownContainer(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("TUI error: {0}")]
    Tui(String),
}

pub type Result<T> = std::result::Result<T, CarouscrollError>;
