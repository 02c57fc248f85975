use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server could not resolve a signed-in user
    #[error("Not signed in")]
    Unauthorized,

    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(u16),

    /// The page shell carried no `csrf-token` meta tag
    #[error("Page has no CSRF token")]
    MissingCsrfToken,

    /// The form was already sent; `open_new_post` starts a new draft
    #[error("Draft already submitted")]
    AlreadySubmitted,

    #[error("Configuration error: {0}")]
    Config(String),
}
