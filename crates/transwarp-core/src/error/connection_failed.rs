use super::Error;

/// Error when a physical connection cannot be established.
///
/// The connection context that attempted the connect is left without a
/// connection; the failed operation is not retried.
#[derive(Debug)]
pub(super) struct ConnectionFailed {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConnectionFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConnectionFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to connect: {}", self.inner)
    }
}

impl Error {
    /// Creates an error for a failed attempt to open a physical connection.
    pub fn connection_failed(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::ConnectionFailed(ConnectionFailed {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a connection failure.
    pub fn is_connection_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ConnectionFailed(_))
    }
}
