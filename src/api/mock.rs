//! Fournisseur en mémoire pour les tests (aucun appel réseau).

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;

use super::cryptocompare::PriceProvider;
use super::error::{ApiError, ApiResult};
use crate::models::{AssetQuote, DisplayValue, HistoryPoint};

/// Réponses préenregistrées par symbole
#[derive(Debug, Default)]
pub struct StaticProvider {
    quotes: HashMap<String, AssetQuote>,
    histories: HashMap<String, Vec<HistoryPoint>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: &str, price: &str, high: &str, low: &str, change: &str) -> Self {
        self.quotes.insert(
            symbol.to_string(),
            AssetQuote {
                price: DisplayValue::new(price),
                high_day: DisplayValue::new(high),
                low_day: DisplayValue::new(low),
                change_pct_24h: DisplayValue::new(change),
            },
        );
        self
    }

    /// Historique journalier : une clôture par jour à partir de `start` (Unix secondes)
    pub fn with_history(mut self, symbol: &str, start: i64, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let ts = DateTime::from_timestamp(start + i as i64 * 86_400, 0).unwrap();
                HistoryPoint::new(ts, close)
            })
            .collect();
        self.histories.insert(symbol.to_string(), points);
        self
    }

    pub fn failing(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    pub fn delayed(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    async fn before(&self, symbol: &str) -> ApiResult<()> {
        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(symbol) {
            return Err(ApiError::Status(503));
        }
        Ok(())
    }
}

#[async_trait]
impl PriceProvider for StaticProvider {
    async fn fetch_quote(&self, symbol: &str) -> ApiResult<AssetQuote> {
        self.before(symbol).await?;
        self.quotes
            .get(symbol)
            .cloned()
            .ok_or_else(|| ApiError::MissingQuote(symbol.to_string()))
    }

    async fn fetch_history(&self, symbol: &str) -> ApiResult<Vec<HistoryPoint>> {
        self.before(symbol).await?;
        Ok(self.histories.get(symbol).cloned().unwrap_or_default())
    }
}

/// Les six actifs suivis avec des cotations factices
pub fn all_tracked() -> StaticProvider {
    crate::models::TRACKED_ASSETS
        .iter()
        .fold(StaticProvider::new(), |provider, asset| {
            provider.with_quote(asset.symbol, "1", "2", "0.5", "0.1")
        })
}
