// ============================================================================
// Kryptodash - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;          // API CryptoCompare
pub mod app;          // État de l'application
pub mod chart_handle; // Surface du graphique et instance liée
pub mod config;       // Configuration (environnement, .env)
pub mod history;      // History Renderer (données)
pub mod models;       // Structures de données
pub mod snapshot;     // Snapshot Loader
pub mod ui;           // Interface utilisateur
pub mod worker;       // Thread worker (appels réseau)
