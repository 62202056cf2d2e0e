//! Error types for catalog reads

use thiserror::Error;

/// A catalog read that did not produce a usable list
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("catalog service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl FetchError {
    /// Short message shown under a picker when its catalog failed to load
    pub fn user_message(&self) -> String {
        match self {
            FetchError::InvalidUrl(_) => "Endereço do serviço inválido".to_string(),
            FetchError::Status(status) => format!("Serviço indisponível (HTTP {})", status.as_u16()),
            FetchError::Request(e) if e.is_timeout() => "Tempo de resposta esgotado".to_string(),
            FetchError::Request(e) if e.is_decode() => "Resposta inesperada do serviço".to_string(),
            FetchError::Request(_) => "Falha de conexão".to_string(),
        }
    }
}
