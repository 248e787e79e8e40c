// ============================================================================
// Structure : HistoryPoint
// ============================================================================
// Un point de l'historique journalier : date (jour) + prix de clôture
//
// CONCEPTS RUST :
// 1. DateTime<Utc> : type de chrono pour dates avec timezone UTC
// 2. Iterator chaining : dériver labels et prix en deux passes alignées
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Nombre de jours affichés dans le graphique
pub const HISTORY_WINDOW: usize = 7;

/// Format des labels de l'axe X
pub const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Point de l'historique
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Jour (timestamp Unix converti en UTC)
    pub timestamp: DateTime<Utc>,

    /// Prix de clôture en USD
    pub close: f64,
}

impl HistoryPoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }

    /// Label lisible du jour (ex: "2024-01-15")
    pub fn date_label(&self) -> String {
        self.timestamp.format(DATE_LABEL_FORMAT).to_string()
    }
}

/// Séries parallèles prêtes pour le graphique
///
/// INVARIANT : labels.len() == closes.len(), même index = même jour
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySeries {
    pub labels: Vec<String>,
    pub closes: Vec<f64>,
}

impl HistorySeries {
    /// Dérive les labels et les prix à partir des points (du plus ancien au plus récent)
    pub fn from_points(points: &[HistoryPoint]) -> Self {
        Self {
            labels: points.iter().map(HistoryPoint::date_label).collect(),
            closes: points.iter().map(|p| p.close).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// Ordonne les points du plus ancien au plus récent et garde la fenêtre
///
/// L'API renvoie limit + 1 jours : on ne garde que les HISTORY_WINDOW plus récents.
pub fn window(mut points: Vec<HistoryPoint>) -> Vec<HistoryPoint> {
    points.sort_by_key(|p| p.timestamp);
    let skip = points.len().saturating_sub(HISTORY_WINDOW);
    points.split_off(skip)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> DateTime<Utc> {
        // 2024-01-01 00:00:00 UTC + n jours
        DateTime::from_timestamp(1_704_067_200 + n * 86_400, 0).unwrap()
    }

    #[test]
    fn test_series_alignment() {
        let points: Vec<HistoryPoint> = (0..7).map(|i| HistoryPoint::new(day(i), 100.0 + i as f64)).collect();
        let series = HistorySeries::from_points(&points);

        assert_eq!(series.labels.len(), series.closes.len());
        assert_eq!(series.labels[0], "2024-01-01");
        assert_eq!(series.labels[6], "2024-01-07");
        assert_eq!(series.closes[6], 106.0);
    }

    #[test]
    fn test_window_keeps_newest_in_order() {
        // 8 points dans le désordre (l'API renvoie limit + 1)
        let mut points: Vec<HistoryPoint> = (0..8).map(|i| HistoryPoint::new(day(i), i as f64)).collect();
        points.reverse();

        let kept = window(points);
        assert_eq!(kept.len(), HISTORY_WINDOW);
        assert_eq!(kept.first().unwrap().close, 1.0);
        assert_eq!(kept.last().unwrap().close, 7.0);
    }

    #[test]
    fn test_window_shorter_than_limit() {
        let points = vec![HistoryPoint::new(day(0), 1.0), HistoryPoint::new(day(1), 2.0)];
        assert_eq!(window(points).len(), 2);
    }
}
