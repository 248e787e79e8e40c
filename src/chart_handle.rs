// ============================================================================
// ChartSurface - Surface de dessin et instance de graphique liée
// ============================================================================
// Au plus UNE instance de graphique est liée à la surface à un instant donné.
// Remplacer une instance détruit TOUJOURS l'ancienne avant de créer la nouvelle.
//
// CONCEPTS RUST :
// 1. Ownership : la surface possède son instance (Option<ChartInstance>)
// 2. Option::take : détache la valeur en laissant None à la place
// 3. Result pour refuser une création quand une instance est déjà liée
// ============================================================================

use thiserror::Error;
use tracing::debug;

use crate::models::HistorySeries;

/// Erreurs de cycle de vie du graphique
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// La surface n'est pas affichée (aucune sélection)
    #[error("chart surface is not attached")]
    Detached,

    /// Une instance est déjà liée : il faut la détruire ou utiliser replace()
    #[error("chart instance #{0} is already bound to the surface")]
    AlreadyBound(u64),
}

/// Contenu d'un graphique ligne
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Nom de la série (ex: "Bitcoin Price (USD)")
    pub label: String,

    /// Labels de l'axe X et valeurs, alignés par index
    pub series: HistorySeries,
}

/// Instance de graphique vivante
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    /// Numéro unique, croissant à chaque création
    pub id: u64,

    /// Identifiant de l'actif dessiné
    pub asset: String,

    pub spec: ChartSpec,
}

impl ChartInstance {
    /// Points (x, y) pour le widget Chart de ratatui
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.spec
            .series
            .closes
            .iter()
            .enumerate()
            .map(|(i, &close)| (i as f64, close))
            .collect()
    }

    /// (min, max) des prix de clôture
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let closes = &self.spec.series.closes;
        if closes.is_empty() {
            return None;
        }
        Some(closes.iter().fold((f64::MAX, f64::MIN), |(min, max), &y| (min.min(y), max.max(y))))
    }
}

/// Surface de dessin du graphique
#[derive(Debug, Default)]
pub struct ChartSurface {
    attached: bool,
    bound: Option<ChartInstance>,
    next_id: u64,
    created: u64,
    destroyed: u64,
}

impl ChartSurface {
    /// Surface non affichée, sans instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Rend la surface disponible (panneau de détail affiché)
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Retire la surface : l'instance liée est détruite
    pub fn detach(&mut self) {
        self.destroy();
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Crée une instance sur une surface vide
    pub fn create(&mut self, asset: &str, spec: ChartSpec) -> Result<&ChartInstance, SurfaceError> {
        if !self.attached {
            return Err(SurfaceError::Detached);
        }
        if let Some(existing) = &self.bound {
            return Err(SurfaceError::AlreadyBound(existing.id));
        }

        self.next_id += 1;
        self.created += 1;
        debug!(chart_id = self.next_id, asset = %asset, "Chart instance created");

        Ok(&*self.bound.insert(ChartInstance {
            id: self.next_id,
            asset: asset.to_string(),
            spec,
        }))
    }

    /// Détruit l'instance liée (s'il y en a une) puis en crée une nouvelle
    pub fn replace(&mut self, asset: &str, spec: ChartSpec) -> Result<&ChartInstance, SurfaceError> {
        if !self.attached {
            return Err(SurfaceError::Detached);
        }
        self.destroy();
        self.create(asset, spec)
    }

    /// Détruit l'instance liée et la retourne
    pub fn destroy(&mut self) -> Option<ChartInstance> {
        let instance = self.bound.take()?;
        self.destroyed += 1;
        debug!(chart_id = instance.id, asset = %instance.asset, "Chart instance destroyed");
        Some(instance)
    }

    /// Instance actuellement liée
    pub fn current(&self) -> Option<&ChartInstance> {
        self.bound.as_ref()
    }

    /// Nombre d'instances vivantes (0 ou 1)
    pub fn live_instances(&self) -> u64 {
        self.created - self.destroyed
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(label: &str, closes: &[f64]) -> ChartSpec {
        ChartSpec {
            label: label.to_string(),
            series: HistorySeries {
                labels: closes.iter().map(|c| c.to_string()).collect(),
                closes: closes.to_vec(),
            },
        }
    }

    #[test]
    fn test_create_requires_attached_surface() {
        let mut surface = ChartSurface::new();
        assert_eq!(surface.create("btc", spec("a", &[1.0])).unwrap_err(), SurfaceError::Detached);
        assert!(surface.current().is_none());
    }

    #[test]
    fn test_create_refuses_second_instance() {
        let mut surface = ChartSurface::new();
        surface.attach();
        surface.create("btc", spec("a", &[1.0])).unwrap();

        assert_eq!(surface.create("eth", spec("b", &[2.0])).unwrap_err(), SurfaceError::AlreadyBound(1));
        assert_eq!(surface.current().unwrap().asset, "btc");
    }

    #[test]
    fn test_replace_destroys_before_create() {
        let mut surface = ChartSurface::new();
        surface.attach();
        surface.replace("btc", spec("a", &[1.0])).unwrap();
        surface.replace("eth", spec("b", &[2.0])).unwrap();
        surface.replace("ltc", spec("c", &[3.0])).unwrap();

        assert_eq!(surface.live_instances(), 1);
        let current = surface.current().unwrap();
        assert_eq!(current.asset, "ltc");
        assert_eq!(current.id, 3);
    }

    #[test]
    fn test_detach_releases_instance() {
        let mut surface = ChartSurface::new();
        surface.attach();
        surface.replace("btc", spec("a", &[1.0])).unwrap();

        surface.detach();
        assert!(!surface.is_attached());
        assert_eq!(surface.live_instances(), 0);
        assert!(surface.destroy().is_none());
    }

    #[test]
    fn test_points_and_bounds() {
        let mut surface = ChartSurface::new();
        surface.attach();
        let instance = surface.replace("btc", spec("a", &[3.0, 1.0, 2.0])).unwrap();

        assert_eq!(instance.points(), vec![(0.0, 3.0), (1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(instance.bounds(), Some((1.0, 3.0)));
    }
}
