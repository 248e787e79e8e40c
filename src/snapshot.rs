// ============================================================================
// Snapshot Loader
// ============================================================================
// Charge la cotation de chaque actif suivi, en parallèle, tout ou rien
//
// CONCEPTS RUST :
// 1. try_join_all : attend toutes les futures, échoue dès la première erreur
// 2. Generics + trait bound : fonctionne avec n'importe quel PriceProvider
// ============================================================================

use futures::future::try_join_all;
use tracing::{debug, info, instrument};

use crate::api::{ApiResult, PriceProvider};
use crate::models::Snapshot;

/// Charge un snapshot complet pour les symboles donnés
///
/// Une requête par symbole, toutes lancées en même temps. Si une seule échoue,
/// l'opération entière échoue et les résultats partiels sont jetés.
///
/// Les clés du snapshot sont les symboles en minuscules ("btc").
#[instrument(skip(provider), fields(count = symbols.len()))]
pub async fn load_snapshot<P>(provider: &P, symbols: &[&str]) -> ApiResult<Snapshot>
where
    P: PriceProvider + ?Sized,
{
    debug!("Requesting quotes");

    let requests = symbols.iter().map(|&symbol| async move {
        let quote = provider.fetch_quote(symbol).await?;
        Ok::<_, crate::api::ApiError>((symbol.to_lowercase(), quote))
    });

    let snapshot: Snapshot = try_join_all(requests).await?.into_iter().collect();

    info!(assets = snapshot.len(), "Snapshot loaded");
    Ok(snapshot)
}

// ============================================================================
// Tests
// ============================================================================
