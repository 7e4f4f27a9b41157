#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("handshake failed: {0}")]
    Handshake(String),
    #[error("connection lost: {0}")]
    Connection(String),
    #[error("send failed: {0}")]
    Send(String),
}
