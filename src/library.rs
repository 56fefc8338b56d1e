use crate::song::Song;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("login rejected: {0}")]
    Authentication(String),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("{url} returned {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("{0} cannot be used as a service base URL")]
    InvalidUrl(String),
}

/// The remote music library as seen by the deletion workflow.
///
/// Calls block until the service answers; timeouts and retries are the
/// implementation's business.
pub trait MusicLibrary {
    fn login(&mut self, user: &str, pass: &str) -> Result<(), LibraryError>;

    /// The whole catalog of the logged in account, in service order.
    fn songs(&mut self) -> Result<Vec<Song>, LibraryError>;

    fn delete_song(&mut self, id: &str) -> Result<(), LibraryError>;

    fn logout(&mut self) -> Result<(), LibraryError>;
}
