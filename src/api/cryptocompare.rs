// ============================================================================
// API Client : CryptoCompare
// ============================================================================
// Récupère les cotations et l'historique journalier depuis min-api.cryptocompare.com
//
// Endpoints utilisés :
// - /data/pricemultifull?fsyms={SYMBOL}&tsyms=USD              (cotation)
// - /data/v2/histoday?fsym={SYMBOL}&tsym=USD&limit=7&aggregate=1 (historique)
//
// CONCEPTS RUST :
// 1. Trait async (async_trait) : abstraction du fournisseur, remplaçable en test
// 2. Séparation URL / requête / parsing : le parsing se teste sans réseau
// 3. #[serde(rename = "...")] : mapping des champs JSON en MAJUSCULES
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use super::error::{ApiError, ApiResult};
use crate::models::{history, AssetQuote, HistoryPoint, HISTORY_WINDOW};

/// URL de base par défaut
pub const CRYPTOCOMPARE_API_BASE: &str = "https://min-api.cryptocompare.com";

/// Devise cible (fixe)
pub const QUOTE_CURRENCY: &str = "USD";

// ============================================================================
// Trait : PriceProvider
// ============================================================================

/// Source de prix : cotation courante et historique journalier
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Cotation affichable (objet DISPLAY) pour un symbole
    async fn fetch_quote(&self, symbol: &str) -> ApiResult<AssetQuote>;

    /// Historique journalier, du plus ancien au plus récent
    ///
    /// Un Vec vide signifie "pas de données" (symbole inconnu du fournisseur).
    async fn fetch_history(&self, symbol: &str) -> ApiResult<Vec<HistoryPoint>>;
}

// ============================================================================
// Structures pour parser les réponses JSON
// ============================================================================

/// Réponse de /data/pricemultifull
#[derive(Debug, Deserialize)]
struct PriceMultiFullResponse {
    /// Enveloppe d'erreur ("Error") le cas échéant
    #[serde(rename = "Response")]
    response: Option<String>,

    #[serde(rename = "Message")]
    message: Option<String>,

    /// DISPLAY.{SYMBOL}.{CURRENCY}
    #[serde(rename = "DISPLAY", default)]
    display: HashMap<String, HashMap<String, AssetQuote>>,
}

/// Réponse de /data/v2/histoday
#[derive(Debug, Deserialize)]
struct HistoDayResponse {
    #[serde(rename = "Response")]
    response: Option<String>,

    #[serde(rename = "Message")]
    message: Option<String>,

    #[serde(rename = "Data")]
    data: Option<HistoDayData>,
}

#[derive(Debug, Deserialize)]
struct HistoDayData {
    #[serde(rename = "Data", default)]
    data: Vec<HistoDayRecord>,
}

/// Un jour : seuls le timestamp et la clôture sont utilisés
#[derive(Debug, Deserialize)]
struct HistoDayRecord {
    time: i64,
    close: f64,
}

// ============================================================================
// Client
// ============================================================================

/// Client HTTP CryptoCompare
#[derive(Debug, Clone)]
pub struct CryptoCompareClient {
    base_url: String,
    http: reqwest::Client,
}

impl CryptoCompareClient {
    /// Crée un client pour l'URL de base donnée (sans slash final)
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("kryptodash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /data/pricemultifull?fsyms={SYMBOL}&tsyms=USD
    pub fn price_multi_full_url(&self, symbol: &str) -> String {
        format!(
            "{}/data/pricemultifull?fsyms={}&tsyms={}",
            self.base_url, symbol, QUOTE_CURRENCY
        )
    }

    /// GET /data/v2/histoday?fsym={SYMBOL}&tsym=USD&limit=7&aggregate=1
    pub fn histoday_url(&self, symbol: &str) -> String {
        format!(
            "{}/data/v2/histoday?fsym={}&tsym={}&limit={}&aggregate=1",
            self.base_url, symbol, QUOTE_CURRENCY, HISTORY_WINDOW
        )
    }

    /// Exécute un GET et retourne le corps si le statut est 2xx
    async fn get_body(&self, url: &str) -> ApiResult<String> {
        debug!(url = %url, "Sending HTTP request to CryptoCompare");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            error!(status = %status, "CryptoCompare returned error status");
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PriceProvider for CryptoCompareClient {
    #[instrument(skip(self))]
    async fn fetch_quote(&self, symbol: &str) -> ApiResult<AssetQuote> {
        let body = self.get_body(&self.price_multi_full_url(symbol)).await?;
        let quote = parse_price_multi_full(&body, symbol)?;
        info!(price = %quote.price, "Fetched quote");
        Ok(quote)
    }

    #[instrument(skip(self))]
    async fn fetch_history(&self, symbol: &str) -> ApiResult<Vec<HistoryPoint>> {
        let body = self.get_body(&self.histoday_url(symbol)).await?;
        let points = parse_histoday(&body)?;
        info!(points = points.len(), "Fetched daily history");
        Ok(points)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Extrait DISPLAY.{SYMBOL}.USD d'une réponse pricemultifull
pub fn parse_price_multi_full(body: &str, symbol: &str) -> ApiResult<AssetQuote> {
    let response: PriceMultiFullResponse = serde_json::from_str(body)?;

    if response.response.as_deref() == Some("Error") {
        let message = response.message.unwrap_or_else(|| "unknown error".to_string());
        return Err(ApiError::Provider(message));
    }

    response
        .display
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(symbol))
        .and_then(|(_, mut by_currency)| by_currency.remove(QUOTE_CURRENCY))
        .ok_or_else(|| ApiError::MissingQuote(symbol.to_string()))
}

/// Convertit une réponse histoday en points ordonnés (fenêtre de 7 jours)
///
/// Une enveloppe d'erreur donne un Vec vide : pas de données à dessiner.
pub fn parse_histoday(body: &str) -> ApiResult<Vec<HistoryPoint>> {
    let response: HistoDayResponse = serde_json::from_str(body)?;

    if response.response.as_deref() == Some("Error") {
        warn!(message = ?response.message, "CryptoCompare returned no history");
        return Ok(Vec::new());
    }

    let records = response.data.map(|d| d.data).unwrap_or_default();
    let mut points = Vec::with_capacity(records.len());
    for record in records {
        let timestamp = DateTime::from_timestamp(record.time, 0)
            .ok_or_else(|| ApiError::Deserialize(format!("invalid timestamp {}", record.time)))?;
        points.push(HistoryPoint::new(timestamp, record.close));
    }

    Ok(history::window(points))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = CryptoCompareClient::new("https://example.test/").unwrap();
        assert_eq!(
            client.price_multi_full_url("BTC"),
            "https://example.test/data/pricemultifull?fsyms=BTC&tsyms=USD"
        );
        assert_eq!(
            client.histoday_url("ETH"),
            "https://example.test/data/v2/histoday?fsym=ETH&tsym=USD&limit=7&aggregate=1"
        );
    }

    #[test]
    fn test_parse_price_multi_full() {
        let body = r#"{
            "RAW": {"BTC": {"USD": {"PRICE": 50000.12}}},
            "DISPLAY": {"BTC": {"USD": {
                "FROMSYMBOL": "Ƀ", "TOSYMBOL": "$",
                "PRICE": "$ 50,000.1", "HIGHDAY": "$ 51,000.0",
                "LOWDAY": "$ 49,000.0", "CHANGEPCT24HOUR": "2.50"
            }}}
        }"#;

        let quote = parse_price_multi_full(body, "BTC").unwrap();
        assert_eq!(quote.price.text, "$ 50,000.1");
        assert_eq!(quote.high_day.text, "$ 51,000.0");
        assert_eq!(quote.low_day.text, "$ 49,000.0");
        assert_eq!(quote.change_pct_24h.text, "2.50");
    }

    #[test]
    fn test_parse_price_multi_full_missing_symbol() {
        let body = r#"{"DISPLAY": {}}"#;
        assert!(matches!(
            parse_price_multi_full(body, "BTC"),
            Err(ApiError::MissingQuote(s)) if s == "BTC"
        ));
    }

    #[test]
    fn test_parse_price_multi_full_error_envelope() {
        let body = r#"{"Response":"Error","Message":"fsyms param is invalid","Data":{}}"#;
        assert!(matches!(parse_price_multi_full(body, "???"), Err(ApiError::Provider(_))));
    }

    #[test]
    fn test_parse_histoday() {
        let body = r#"{
            "Response": "Success",
            "Data": {"Aggregated": false, "TimeFrom": 1704067200, "TimeTo": 1704672000, "Data": [
                {"time": 1704067200, "open": 1, "high": 1, "low": 1, "close": 100.0},
                {"time": 1704153600, "open": 1, "high": 1, "low": 1, "close": 101.0},
                {"time": 1704240000, "open": 1, "high": 1, "low": 1, "close": 102.0},
                {"time": 1704326400, "open": 1, "high": 1, "low": 1, "close": 103.0},
                {"time": 1704412800, "open": 1, "high": 1, "low": 1, "close": 104.0},
                {"time": 1704499200, "open": 1, "high": 1, "low": 1, "close": 105.0},
                {"time": 1704585600, "open": 1, "high": 1, "low": 1, "close": 106.0},
                {"time": 1704672000, "open": 1, "high": 1, "low": 1, "close": 107.0}
            ]}
        }"#;

        let points = parse_histoday(body).unwrap();
        assert_eq!(points.len(), HISTORY_WINDOW);
        assert_eq!(points[0].close, 101.0);
        assert_eq!(points[6].close, 107.0);
        assert_eq!(points[0].date_label(), "2024-01-02");
    }

    #[test]
    fn test_parse_histoday_error_envelope_is_empty() {
        let body = r#"{"Response":"Error","Message":"There is no data for the symbol DOGEX .","Data":{}}"#;
        assert!(parse_histoday(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_histoday_invalid_json() {
        assert!(matches!(parse_histoday("not json"), Err(ApiError::Deserialize(_))));
    }
}
