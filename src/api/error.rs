//! Erreurs de la couche API.

use thiserror::Error;

/// Erreur renvoyée par un fournisseur de prix
#[derive(Debug, Error)]
pub enum ApiError {
    /// Erreur réseau / HTTP (reqwest)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Statut HTTP hors 2xx
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// JSON invalide ou structure inattendue
    #[error("deserialization error: {0}")]
    Deserialize(String),

    /// Pas d'objet DISPLAY.{SYMBOL}.USD dans la réponse
    #[error("no USD quote for {0}")]
    MissingQuote(String),

    /// Enveloppe d'erreur CryptoCompare ("Response": "Error")
    #[error("provider error: {0}")]
    Provider(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Deserialize(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
