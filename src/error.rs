use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("PDF download failed with status {0}")]
    DownloadStatus(u16),

    #[error("PDF request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("PDF has no pages")]
    NoPages,

    #[error("could not extract any text from the PDF")]
    NoText,

    #[error("PDF text extraction failed: {0}")]
    Extract(String),

    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("invalid menu layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, MenuError>;
