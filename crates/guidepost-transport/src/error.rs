/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Binding the listening socket failed (port in use, bad address).
    #[error("bind failed: {0}")]
    BindFailed(#[source] std::io::Error),

    /// The accept/serve loop stopped with an I/O error.
    #[error("serve failed: {0}")]
    ServeFailed(#[source] std::io::Error),
}
