// ============================================================================
// Background Worker
// ============================================================================
// Thread séparé qui exécute les appels réseau sans bloquer l'UI
//
// CONCEPTS RUST :
// 1. Command pattern avec channels (mpsc) : UI -> worker -> UI
// 2. Runtime tokio possédé par le thread worker
// 3. runtime.spawn() : chaque commande est une tâche indépendante, donc
//    plusieurs requêtes d'historique peuvent se chevaucher
// ============================================================================

use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::api::PriceProvider;
use crate::app::{App, HistoryRequest};
use crate::chart_handle::ChartSpec;
use crate::history::fetch_history;
use crate::models::asset::tracked_symbols;
use crate::models::Snapshot;
use crate::snapshot::load_snapshot;

/// Commandes envoyées au worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Charger le snapshot des six actifs (une fois, au démarrage)
    LoadSnapshot,

    /// Charger l'historique d'une sélection
    FetchHistory(HistoryRequest),
}

/// Résultats renvoyés par le worker
#[derive(Debug)]
pub enum AppResult {
    SnapshotLoaded(Result<Snapshot, String>),

    HistoryLoaded {
        token: u64,
        asset: String,
        result: Result<Option<ChartSpec>, String>,
    },
}

/// Lance le worker en arrière-plan
///
/// Le thread se termine quand tous les Sender de commandes sont fermés.
pub fn spawn_background_worker<P>(
    provider: Arc<P>,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) -> Result<JoinHandle<()>>
where
    P: PriceProvider + 'static,
{
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;

    let handle = std::thread::Builder::new()
        .name("kryptodash-worker".to_string())
        .spawn(move || {
            while let Ok(command) = command_rx.recv() {
                info!(?command, "Worker received command");
                runtime.spawn(run_command(provider.clone(), command, result_tx.clone()));
            }
            info!("Worker thread exiting (channel closed)");
        })
        .context("Échec du lancement du thread worker")?;

    Ok(handle)
}

/// Exécute une commande et renvoie son résultat à l'UI
async fn run_command<P>(provider: Arc<P>, command: AppCommand, result_tx: mpsc::Sender<AppResult>)
where
    P: PriceProvider + ?Sized,
{
    let result = match command {
        AppCommand::LoadSnapshot => {
            let symbols = tracked_symbols();
            let snapshot = load_snapshot(provider.as_ref(), &symbols)
                .await
                .map_err(|e| e.to_string());
            AppResult::SnapshotLoaded(snapshot)
        }
        AppCommand::FetchHistory(HistoryRequest { token, asset }) => {
            let result = fetch_history(provider.as_ref(), &asset)
                .await
                .map_err(|e| e.to_string());
            AppResult::HistoryLoaded { token, asset, result }
        }
    };

    if result_tx.send(result).is_err() {
        debug!("UI closed before result was delivered");
    }
}

/// Applique un résultat du worker sur l'état de l'application
pub fn apply_result(app: &mut App, result: AppResult) {
    match result {
        AppResult::SnapshotLoaded(snapshot) => app.apply_snapshot(snapshot),
        AppResult::HistoryLoaded { token, asset, result } => {
            app.apply_history(token, &asset, result);
        }
    }
}

/// Envoie une requête d'historique si la sélection en a produit une
pub fn dispatch_history(command_tx: &mpsc::Sender<AppCommand>, request: Option<HistoryRequest>) {
    if let Some(request) = request {
        if command_tx.send(AppCommand::FetchHistory(request)).is_err() {
            error!("Worker thread disconnected, history request dropped");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
