use thiserror::Error;

/// Core error type for cepfetch.
/// Internally, modules can use `anyhow::Result<T>` for convenience,
/// but public boundaries should expose `CoreResult<T>` with this error.
#[derive(Debug, Error)]
pub enum CepError {
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request never produced a response (DNS, connect, TLS, request timeout).
    #[error("transport error from {provider}: {message}")]
    Transport { provider: String, message: String },

    /// A response arrived but its body could not be read or decoded.
    #[error("decode error from {provider}: {message}")]
    Decode { provider: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CepError {
    /// Provider that produced this error, if it came from a provider call.
    pub fn provider(&self) -> Option<&str> {
        match self {
            CepError::Transport { provider, .. } | CepError::Decode { provider, .. } => {
                Some(provider.as_str())
            }
            _ => None,
        }
    }

    /// Short stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CepError::Validation(_) => "validation",
            CepError::Transport { .. } => "transport",
            CepError::Decode { .. } => "decode",
            CepError::Io(_) => "io",
            CepError::Other(_) => "other",
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, CepError>;
