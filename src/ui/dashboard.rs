// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Header, barre latérale (recherche + liste des actifs), panneau de détail,
// footer avec les raccourcis
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Widgets : Block, Paragraph, List
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::asset::capitalize;
use crate::models::{Asset, TRACKED_ASSETS};
use crate::ui::chart::render_detail;

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Contenu
            Constraint::Length(3), // Footer
        ])
        .split(frame.size())
        .to_vec();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(rows[1])
        .to_vec();

    render_header(frame, app, rows[0]);
    render_sidebar(frame, app, columns[0]);
    render_detail(frame, app, columns[1]);
    render_footer(frame, app, rows[2]);
}

/// Dessine le header avec le titre et l'indicateur de chargement
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Kryptodash ")
        .title_alignment(Alignment::Center);

    let status = if app.is_loading_data() {
        Span::styled("⏳ Chargement...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            "Cryptomonnaies (USD)",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    };

    let paragraph = Paragraph::new(Line::from(status))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine la barre latérale : recherche + liste des actifs
fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area)
        .to_vec();

    render_search(frame, app, chunks[0]);
    render_asset_list(frame, app, chunks[1]);
}

/// Barre de recherche (active en mode recherche)
fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.is_in_search_mode();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if active { Color::Green } else { Color::Cyan }))
        .title(" Rechercher ");

    let line = if active {
        Line::from(vec![
            Span::styled(app.search_text.as_str(), Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else {
        Line::from(Span::styled("[/] pour chercher", Style::default().fg(Color::Gray)))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Liste des six actifs suivis
fn render_asset_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Cryptomonnaies ");

    let items: Vec<ListItem> = TRACKED_ASSETS
        .iter()
        .enumerate()
        .map(|(index, asset)| {
            let style = if is_active(app, asset) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut item = ListItem::new(format!(" {:<10} {}", capitalize(asset.name), asset.symbol)).style(style);
            if index == app.selected_index {
                item = item.style(style.add_modifier(Modifier::REVERSED));
            }
            item
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// L'actif est-il la sélection courante ?
fn is_active(app: &App, asset: &Asset) -> bool {
    app.selection
        .as_deref()
        .and_then(Asset::resolve)
        .map(|selected| selected == asset)
        .unwrap_or(false)
}

/// Dessine le footer avec les raccourcis clavier
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if app.is_in_search_mode() {
        Line::from(vec![key("[Enter]"), Span::raw(" Valider  "), key("[ESC]"), Span::raw(" Annuler")])
    } else {
        Line::from(vec![
            key("[q]"),
            Span::raw(" Quitter  "),
            key("[↑↓ / j k]"),
            Span::raw(" Naviguer  "),
            key("[Enter]"),
            Span::raw(" Sélectionner  "),
            key("[/]"),
            Span::raw(" Rechercher  "),
            key("[ESC]"),
            Span::raw(" Fermer"),
        ])
    };

    let paragraph = Paragraph::new(shortcuts)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::chart_handle::ChartSpec;
    use crate::models::{AssetQuote, DisplayValue, HistorySeries, Snapshot};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_detail_panel_shows_values_unrounded() {
        let mut app = App::new();
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "btc".to_string(),
            AssetQuote {
                price: DisplayValue::new("50000"),
                high_day: DisplayValue::new("51000"),
                low_day: DisplayValue::new("49000"),
                change_pct_24h: DisplayValue::new("2.5"),
            },
        );
        app.apply_snapshot(Ok(snapshot));
        app.select_asset("bitcoin");

        let text = screen_text(&app);
        assert!(text.contains("50000"));
        assert!(text.contains("51000"));
        assert!(text.contains("49000"));
        assert!(text.contains("2.5%"));
    }

    #[test]
    fn test_chart_title_is_rendered() {
        let mut app = App::new();
        let request = app.select_asset("bitcoin").unwrap();
        app.apply_history(
            request.token,
            &request.asset,
            Ok(Some(ChartSpec {
                label: "Bitcoin Price (USD)".to_string(),
                series: HistorySeries {
                    labels: (1..=7).map(|d| format!("2024-01-0{}", d)).collect(),
                    closes: vec![100.0, 102.0, 101.0, 105.0, 110.0, 108.0, 112.0],
                },
            })),
        );

        let text = screen_text(&app);
        assert!(text.contains("Bitcoin Price (USD)"));
    }

    #[test]
    fn test_previous_chart_hidden_for_other_selection() {
        let mut app = App::new();
        let first = app.select_asset("bitcoin").unwrap();
        app.apply_history(
            first.token,
            &first.asset,
            Ok(Some(ChartSpec {
                label: "Bitcoin Price (USD)".to_string(),
                series: HistorySeries {
                    labels: (1..=7).map(|d| format!("2024-01-0{}", d)).collect(),
                    closes: vec![100.0, 102.0, 101.0, 105.0, 110.0, 108.0, 112.0],
                },
            })),
        );

        let second = app.select_asset("dogecoin").unwrap();
        app.apply_history(second.token, &second.asset, Ok(None));

        let text = screen_text(&app);
        assert!(text.contains("Dogecoin"));
        assert!(text.contains("Pas de données"));
        assert!(!text.contains("Bitcoin Price (USD)"));
    }

    #[test]
    fn test_empty_state_without_selection() {
        let text = screen_text(&App::new());
        assert!(text.contains("Sélectionnez une cryptomonnaie"));
    }
}
