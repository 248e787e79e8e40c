// ============================================================================
// Structure : Asset
// ============================================================================
// Registre fixe des cryptomonnaies suivies par le dashboard
//
// CONCEPTS RUST :
// 1. const + slice statique : données connues à la compilation
// 2. &'static str : chaînes qui vivent pendant tout le programme
// 3. Iterator::find : recherche linéaire (6 éléments, pas besoin de HashMap)
// ============================================================================

/// Une cryptomonnaie suivie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// Symbole côté API (ex: "BTC")
    pub symbol: &'static str,

    /// Nom affiché en minuscules (ex: "bitcoin")
    pub name: &'static str,
}

/// Les six actifs suivis, dans l'ordre d'affichage
pub static TRACKED_ASSETS: [Asset; 6] = [
    Asset { symbol: "BTC", name: "bitcoin" },
    Asset { symbol: "ETH", name: "ethereum" },
    Asset { symbol: "LTC", name: "litecoin" },
    Asset { symbol: "NEO", name: "neo" },
    Asset { symbol: "XRP", name: "ripple" },
    Asset { symbol: "XLM", name: "stellar" },
];

impl Asset {
    /// Clé du snapshot : symbole en minuscules (ex: "btc")
    pub fn key(&self) -> String {
        self.symbol.to_lowercase()
    }

    /// Recherche un actif par nom ou par symbole, sans tenir compte de la casse
    ///
    /// "bitcoin", "BTC" et "btc" renvoient tous Bitcoin.
    pub fn resolve(identifier: &str) -> Option<&'static Asset> {
        let id = identifier.trim();
        TRACKED_ASSETS
            .iter()
            .find(|asset| asset.name.eq_ignore_ascii_case(id) || asset.symbol.eq_ignore_ascii_case(id))
    }
}

/// Liste des symboles suivis (entrée du Snapshot Loader)
pub fn tracked_symbols() -> Vec<&'static str> {
    TRACKED_ASSETS.iter().map(|asset| asset.symbol).collect()
}

/// Symbole à interroger pour un identifiant de sélection
///
/// Les identifiants inconnus sont transmis tels quels (en majuscules) :
/// l'API connaît bien plus de monnaies que le registre.
pub fn api_symbol(identifier: &str) -> String {
    match Asset::resolve(identifier) {
        Some(asset) => asset.symbol.to_string(),
        None => identifier.trim().to_uppercase(),
    }
}

/// Met la première lettre en majuscule ("bitcoin" -> "Bitcoin")
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name_and_symbol() {
        assert_eq!(Asset::resolve("bitcoin").map(|a| a.symbol), Some("BTC"));
        assert_eq!(Asset::resolve("btc").map(|a| a.symbol), Some("BTC"));
        assert_eq!(Asset::resolve("Stellar").map(|a| a.symbol), Some("XLM"));
        assert!(Asset::resolve("dogecoin").is_none());
    }

    #[test]
    fn test_tracked_symbols() {
        assert_eq!(tracked_symbols(), vec!["BTC", "ETH", "LTC", "NEO", "XRP", "XLM"]);
    }

    #[test]
    fn test_api_symbol() {
        assert_eq!(api_symbol("ripple"), "XRP");
        assert_eq!(api_symbol("doge"), "DOGE");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bitcoin"), "Bitcoin");
        assert_eq!(capitalize(""), "");
    }
}
