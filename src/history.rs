// ============================================================================
// History Renderer - côté données
// ============================================================================
// Récupère la fenêtre de 7 jours d'un actif et prépare le contenu du graphique.
// Le dessin lui-même (destroy puis create) est fait par App::apply_history.
// ============================================================================

use tracing::{debug, instrument};

use crate::api::{ApiResult, PriceProvider};
use crate::chart_handle::ChartSpec;
use crate::models::asset::{api_symbol, capitalize};
use crate::models::HistorySeries;

/// Nom de la série pour un identifiant ("bitcoin" -> "Bitcoin Price (USD)")
pub fn series_label(identifier: &str) -> String {
    format!("{} Price (USD)", capitalize(identifier))
}

/// Récupère l'historique et construit le graphique
///
/// Retourne Ok(None) quand le fournisseur n'a aucune donnée pour cet actif.
#[instrument(skip(provider))]
pub async fn fetch_history<P>(provider: &P, identifier: &str) -> ApiResult<Option<ChartSpec>>
where
    P: PriceProvider + ?Sized,
{
    let symbol = api_symbol(identifier);
    let points = provider.fetch_history(&symbol).await?;

    if points.is_empty() {
        debug!(symbol = %symbol, "No history data");
        return Ok(None);
    }

    Ok(Some(ChartSpec {
        label: series_label(identifier),
        series: HistorySeries::from_points(&points),
    }))
}

// ============================================================================
// Tests
// ============================================================================
