use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    RemoteFetch { status: u16 },

    /// Connection, body or JSON decode failure.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered but reported `success: false`.
    #[error("{message}")]
    RemoteApplication { message: String },

    #[error("Photo not found: {0}")]
    NotFound(String),
}

impl PhotoError {
    /// HTTP status carried by a fetch failure, if the server got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            PhotoError::RemoteFetch { status } => Some(*status),
            PhotoError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PhotoError>;
