// ============================================================================
// Structure : AssetQuote
// ============================================================================
// Cotation d'un actif telle que renvoyée par l'objet DISPLAY de CryptoCompare
//
// CONCEPTS RUST :
// 1. Newtype DisplayValue : garde le texte exact ET une valeur numérique
// 2. Deserialize manuel via serde_json::Value : accepte texte ou nombre
// 3. HashMap : le snapshot complet (clé = symbole en minuscules)
// ============================================================================

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Snapshot : symbole en minuscules -> dernière cotation
pub type Snapshot = HashMap<String, AssetQuote>;

/// Valeur formatée pour l'affichage
///
/// Le texte est conservé tel quel (jamais arrondi ni reformaté).
/// La valeur numérique n'est utilisée que pour les couleurs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayValue {
    pub text: String,
    pub value: Option<f64>,
}

impl DisplayValue {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let value = parse_display_number(&text);
        Self { text, value }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for DisplayValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // L'objet DISPLAY contient du texte ("$ 50,000.0"), mais on accepte
        // aussi un nombre brut : on garde alors sa représentation JSON exacte
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(DisplayValue::new(s)),
            serde_json::Value::Number(n) => Ok(DisplayValue::new(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "valeur d'affichage inattendue : {}",
                other
            ))),
        }
    }
}

/// Extrait un nombre d'un texte formaté ("$ 50,000.0" -> 50000.0)
fn parse_display_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok()
}

/// Cotation d'un actif (devise fixe : USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetQuote {
    /// Prix actuel
    #[serde(rename = "PRICE")]
    pub price: DisplayValue,

    /// Plus haut du jour
    #[serde(rename = "HIGHDAY")]
    pub high_day: DisplayValue,

    /// Plus bas du jour
    #[serde(rename = "LOWDAY")]
    pub low_day: DisplayValue,

    /// Variation sur 24h en pourcentage
    #[serde(rename = "CHANGEPCT24HOUR")]
    pub change_pct_24h: DisplayValue,
}

impl AssetQuote {
    /// Retourne true si la variation 24h est positive ou nulle
    pub fn is_positive(&self) -> bool {
        self.change_pct_24h.value.map(|c| c >= 0.0).unwrap_or(false)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_from_display_strings() {
        let json = r#"{"PRICE":"$ 50,000.0","HIGHDAY":"$ 51,000.0","LOWDAY":"$ 49,000.0","CHANGEPCT24HOUR":"-1.25"}"#;
        let quote: AssetQuote = serde_json::from_str(json).unwrap();

        assert_eq!(quote.price.text, "$ 50,000.0");
        assert_eq!(quote.price.value, Some(50000.0));
        assert_eq!(quote.change_pct_24h.value, Some(-1.25));
        assert!(!quote.is_positive());
    }

    #[test]
    fn test_quote_from_raw_numbers_is_unrounded() {
        let json = r#"{"PRICE":50000,"HIGHDAY":51000,"LOWDAY":49000,"CHANGEPCT24HOUR":2.5}"#;
        let quote: AssetQuote = serde_json::from_str(json).unwrap();

        assert_eq!(quote.price.to_string(), "50000");
        assert_eq!(quote.high_day.to_string(), "51000");
        assert_eq!(quote.low_day.to_string(), "49000");
        assert_eq!(quote.change_pct_24h.to_string(), "2.5");
        assert!(quote.is_positive());
    }

    #[test]
    fn test_quote_rejects_null_field() {
        let json = r#"{"PRICE":null,"HIGHDAY":"1","LOWDAY":"1","CHANGEPCT24HOUR":"1"}"#;
        assert!(serde_json::from_str::<AssetQuote>(json).is_err());
    }
}
