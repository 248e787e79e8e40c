// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application : registre des actifs, cotations,
// historique journalier
// ============================================================================

pub mod asset;   // Registre des six cryptomonnaies suivies
pub mod quote;   // Cotation (objet DISPLAY) et snapshot
pub mod history; // Historique journalier et séries du graphique

// Re-export des structures principales
pub use asset::{Asset, TRACKED_ASSETS};
pub use history::{HistoryPoint, HistorySeries, HISTORY_WINDOW};
pub use quote::{AssetQuote, DisplayValue, Snapshot};
