// ============================================================================
// Configuration
// ============================================================================
// Lue une seule fois au démarrage depuis l'environnement (et un .env optionnel)
//
// Variables :
// - KRYPTODASH_API_BASE : URL de base de l'API (défaut : min-api.cryptocompare.com)
// - KRYPTODASH_LOG_DIR  : répertoire des logs (défaut : ~/.local/share/kryptodash/logs)
// ============================================================================

use std::path::PathBuf;

use crate::api::CRYPTOCOMPARE_API_BASE;

pub const API_BASE_VAR: &str = "KRYPTODASH_API_BASE";
pub const LOG_DIR_VAR: &str = "KRYPTODASH_LOG_DIR";

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub log_dir: PathBuf,
}

impl Config {
    /// Charge .env (s'il existe) puis lit les variables d'environnement
    pub fn load() -> Self {
        // Pas de .env : ce n'est pas une erreur
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construit la configuration à partir d'une fonction de lecture
    ///
    /// Une valeur vide est traitée comme absente.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            api_base: read(API_BASE_VAR).unwrap_or_else(|| CRYPTOCOMPARE_API_BASE.to_string()),
            log_dir: read(LOG_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_log_dir),
        }
    }
}

/// ~/.local/share/kryptodash/logs (Linux), ./logs si introuvable
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("kryptodash").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base, CRYPTOCOMPARE_API_BASE);
        assert!(config.log_dir.ends_with("logs"));
    }

    #[test]
    fn test_overrides_and_empty_values() {
        let vars: HashMap<&str, &str> = [(API_BASE_VAR, "http://localhost:8080"), (LOG_DIR_VAR, "  ")]
            .into_iter()
            .collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.log_dir, default_log_dir());
    }
}
