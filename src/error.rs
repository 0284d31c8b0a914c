//! Error type shared by the backend, configuration and storage layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid server name for TLS: {0}")]
    InvalidServerName(String),

    #[error("malformed gateway payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("gateway framing error: {0}")]
    Codec(#[from] tokio_util::codec::LinesCodecError),

    #[error("not connected to a gateway")]
    NotConnected,

    #[error("session rejected by gateway: {0}")]
    InvalidSession(String),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
