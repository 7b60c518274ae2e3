use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("packet {id} rejected: {reason}")]
    InvalidPacket { id: u64, reason: String },
    #[error("link bandwidth must be a positive finite rate, got {0} bps")]
    InvalidLink(f64),
    #[error("unknown scheduling policy: {0}")]
    UnknownPolicy(String),
    #[error("unknown traffic class: {0}")]
    UnknownTrafficClass(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
