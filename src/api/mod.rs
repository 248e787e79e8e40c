// ============================================================================
// Module : api
// ============================================================================
// Clients API pour récupérer les prix (CryptoCompare)
// ============================================================================

pub mod cryptocompare; // Client API CryptoCompare + trait PriceProvider
pub mod error;         // Erreurs typées de la couche API
#[cfg(test)]
pub mod mock;          // Fournisseur en mémoire pour les tests

// Re-export des éléments principaux
pub use cryptocompare::{CryptoCompareClient, PriceProvider, CRYPTOCOMPARE_API_BASE};
pub use error::{ApiError, ApiResult};
