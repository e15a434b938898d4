//! Result extensions for handler plumbing.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Collapse infrastructure failures into an opaque 500.
///
/// The detail goes to the log; the response body stays generic.
pub(crate) trait ResultExt<T> {
    fn or_500(self, what_failed: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, what_failed: &str) -> Result<T, StatusError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => {
                error!("{what_failed}: {error}");

                Err(StatusError::internal_server_error())
            }
        }
    }
}
