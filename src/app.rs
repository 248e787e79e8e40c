// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global du dashboard : snapshot des cotations, sélection,
// recherche et surface du graphique
//
// CONCEPTS RUST :
// 1. State Management : tout l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Fonctions de mise à jour pures : testables sans terminal ni réseau
//
// PATTERN : Cette structure suit le pattern "Application State"
// - L'UI lit depuis App
// - Les résultats du worker passent par apply_snapshot / apply_history
// ============================================================================

use tracing::{debug, error, info, warn};

use crate::chart_handle::{ChartInstance, ChartSpec, ChartSurface};
use crate::models::{Asset, AssetQuote, Snapshot, TRACKED_ASSETS};

// ============================================================================
// Enum : Screen
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : liste des actifs + détail
    Dashboard,

    /// Mode saisie : la barre de recherche capture le clavier
    /// - Enter valide, ESC annule
    SearchMode,
}

/// Requête d'historique à envoyer au worker
///
/// Le jeton identifie la sélection qui l'a émise : un résultat dont le jeton
/// n'est plus le jeton courant est ignoré.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub token: u64,
    pub asset: String,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Index de l'actif surligné dans la liste
    pub selected_index: usize,

    /// Dernier snapshot complet (vide tant que le chargement n'a pas réussi)
    pub snapshot: Snapshot,

    /// Identifiant actif (None = aucun panneau de détail)
    pub selection: Option<String>,

    /// Jeton de la sélection courante, incrémenté à chaque sélection
    pub selection_token: u64,

    /// Texte de la barre de recherche
    pub search_text: String,

    /// Surface du graphique (au plus une instance liée)
    pub chart: ChartSurface,

    /// Two-step quit : première pression de 'q' -> confirmation
    pub confirm_quit: bool,

    /// Chargement du snapshot en cours
    pub snapshot_loading: bool,

    /// Jeton de la requête d'historique en attente
    pub pending_history: Option<u64>,
}

impl App {
    /// Crée l'état initial : snapshot vide, aucune sélection
    pub fn new() -> Self {
        Self {
            running: true,
            current_screen: Screen::Dashboard,
            selected_index: 0,
            snapshot: Snapshot::new(),
            selection: None,
            selection_token: 0,
            search_text: String::new(),
            chart: ChartSurface::new(),
            confirm_quit: false,
            snapshot_loading: false,
            pending_history: None,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Navigation dans la liste
    // ========================================================================

    /// Navigue vers le haut (saturating_sub : ne descend pas sous 0)
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas (limité au dernier actif)
    pub fn navigate_down(&mut self) {
        let max_index = TRACKED_ASSETS.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Actif surligné dans la liste
    pub fn highlighted_asset(&self) -> Option<&'static Asset> {
        TRACKED_ASSETS.get(self.selected_index)
    }

    // ========================================================================
    // Sélection
    // ========================================================================

    /// Sélectionne un actif par identifiant
    ///
    /// Retourne la requête d'historique à lancer, ou None si l'identifiant est vide.
    /// Aucune validation contre le registre : un identifiant inconnu donne
    /// un panneau vide.
    pub fn select_asset(&mut self, id: &str) -> Option<HistoryRequest> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        self.selection_token += 1;
        self.selection = Some(id.to_string());
        self.chart.attach();
        self.pending_history = Some(self.selection_token);

        info!(asset = %id, token = self.selection_token, "Asset selected");
        Some(HistoryRequest {
            token: self.selection_token,
            asset: id.to_string(),
        })
    }

    /// Sélectionne l'actif surligné dans la liste (par son nom)
    pub fn select_highlighted(&mut self) -> Option<HistoryRequest> {
        let asset = self.highlighted_asset()?;
        self.select_asset(asset.name)
    }

    /// Efface la sélection : le graphique est détruit et la surface retirée
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.selection_token += 1;
            self.pending_history = None;
            self.chart.detach();
            info!("Selection cleared");
        }
    }

    /// Cotation de la sélection courante
    ///
    /// Le nom ("bitcoin") et le symbole ("btc") pointent vers la même clé.
    pub fn selected_quote(&self) -> Option<&AssetQuote> {
        let selection = self.selection.as_deref()?;
        let key = match Asset::resolve(selection) {
            Some(asset) => asset.key(),
            None => selection.to_lowercase(),
        };
        self.snapshot.get(&key)
    }

    /// Graphique actuellement affiché
    pub fn current_chart(&self) -> Option<&ChartInstance> {
        self.chart.current()
    }

    /// Graphique lié, seulement s'il correspond à la sélection courante
    ///
    /// Une sélection sans historique laisse l'ancien graphique lié : il ne
    /// doit pas être affiché sous le panneau d'un autre actif.
    pub fn chart_for_selection(&self) -> Option<&ChartInstance> {
        let selection = self.selection.as_deref()?;
        self.chart.current().filter(|instance| instance.asset == selection)
    }

    // ========================================================================
    // Recherche
    // ========================================================================

    /// Entre en mode recherche
    pub fn start_search(&mut self) {
        self.current_screen = Screen::SearchMode;
        self.search_text.clear();
    }

    /// Annule la recherche et retourne au dashboard
    pub fn cancel_search(&mut self) {
        self.current_screen = Screen::Dashboard;
        self.search_text.clear();
    }

    /// Remplace le texte de recherche
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    /// Ajoute un caractère au texte de recherche
    pub fn append_char(&mut self, c: char) {
        self.search_text.push(c);
    }

    /// Supprime le dernier caractère
    pub fn backspace(&mut self) {
        self.search_text.pop();
    }

    /// Valide la recherche : sélection = texte en minuscules
    ///
    /// Les espaces autour du texte sont retirés. Un texte vide efface la
    /// sélection (panneau de détail et graphique retirés).
    pub fn submit_search(&mut self) -> Option<HistoryRequest> {
        let text = self.search_text.trim().to_lowercase();
        self.current_screen = Screen::Dashboard;
        self.search_text.clear();

        if text.is_empty() {
            debug!("Empty search, clearing selection");
            self.clear_selection();
            return None;
        }
        self.select_asset(&text)
    }

    pub fn is_in_search_mode(&self) -> bool {
        self.current_screen == Screen::SearchMode
    }

    // ========================================================================
    // Résultats du worker
    // ========================================================================

    /// Marque le début du chargement du snapshot
    pub fn start_snapshot_loading(&mut self) {
        self.snapshot_loading = true;
    }

    /// Applique le résultat du Snapshot Loader
    ///
    /// Succès : le snapshot est remplacé en entier (pas de fusion).
    /// Échec : l'erreur est loggée et l'ancien snapshot reste en place.
    pub fn apply_snapshot(&mut self, result: Result<Snapshot, String>) {
        self.snapshot_loading = false;
        match result {
            Ok(snapshot) => {
                info!(assets = snapshot.len(), "Snapshot replaced");
                self.snapshot = snapshot;
            }
            Err(error) => {
                error!(error = %error, "Failed to load snapshot, keeping previous one");
            }
        }
    }

    /// Applique le résultat d'une requête d'historique
    ///
    /// Retourne true si le graphique a été redessiné. Aucun changement si :
    /// - le jeton ne correspond plus à la sélection courante (résultat périmé)
    /// - la requête a échoué (loggé, graphique précédent conservé)
    /// - il n'y a pas de données ou la surface n'est pas affichée
    pub fn apply_history(
        &mut self,
        token: u64,
        asset: &str,
        result: Result<Option<ChartSpec>, String>,
    ) -> bool {
        if token != self.selection_token {
            debug!(asset = %asset, token, current = self.selection_token, "Discarding stale history");
            return false;
        }
        self.pending_history = None;

        let spec = match result {
            Ok(Some(spec)) => spec,
            Ok(None) => {
                debug!(asset = %asset, "No history data, chart untouched");
                return false;
            }
            Err(error) => {
                error!(asset = %asset, error = %error, "Failed to load history, chart untouched");
                return false;
            }
        };

        match self.chart.replace(asset, spec) {
            Ok(instance) => {
                info!(asset = %asset, chart_id = instance.id, points = instance.spec.series.len(), "Chart drawn");
                true
            }
            Err(error) => {
                warn!(asset = %asset, error = %error, "Chart not drawn");
                false
            }
        }
    }

    /// Vérifie si des données sont en cours de chargement
    pub fn is_loading_data(&self) -> bool {
        self.snapshot_loading || self.pending_history.is_some()
    }

    // ========================================================================
    // Quit Confirmation
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
