// SPDX-License-Identifier: MPL-2.0
use crate::backend::BackendError;
use thiserror::Error;

/// Application-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Backend Error: {0}")]
    Backend(#[from] BackendError),

    #[error("Download Error: {0}")]
    Download(String),

    #[error("Image Error: {0}")]
    Image(String),

    #[error("Video Error: {0}")]
    Video(String),

    #[error("Invalid code: {0}")]
    InvalidCode(String),
}

impl Error {
    /// Returns the i18n message key used when this error is shown to the user.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Backend(BackendError::NotFound) => "error-gallery-not-found",
            Error::Backend(BackendError::MissingCredentials) => "error-backend-credentials",
            Error::Backend(BackendError::CommentsDisabled) => "error-comments-disabled",
            Error::Backend(_) => "error-gallery-load",
            Error::Download(_) => "error-download",
            Error::Image(_) => "error-image-load",
            Error::Video(_) => "error-video",
            Error::InvalidCode(_) => "error-invalid-code",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn backend_not_found_maps_to_not_found_key() {
        let err: Error = BackendError::NotFound.into();
        assert_eq!(err.i18n_key(), "error-gallery-not-found");
    }

    #[test]
    fn other_backend_errors_map_to_load_key() {
        let err: Error = BackendError::Decode("bad json".into()).into();
        assert_eq!(err.i18n_key(), "error-gallery-load");
        assert!(format!("{}", err).contains("bad json"));
    }
}
