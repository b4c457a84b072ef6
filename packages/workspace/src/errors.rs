use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend rejected our credentials; the session has been cleared
    /// and the shell should route to login.
    #[error("unauthorized")]
    Unauthorized,

    #[error("backend returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}
