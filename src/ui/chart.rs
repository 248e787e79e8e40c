// ============================================================================
// Chart - Panneau de détail et graphique de l'actif sélectionné
// ============================================================================
// Affiche les quatre valeurs de la cotation puis le graphique ligne lié
// à la surface (App::chart)
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de données à afficher
// 3. Axis : configuration des axes X et Y
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::chart_handle::ChartInstance;
use crate::models::asset::capitalize;
use crate::models::AssetQuote;

/// Dessine le panneau de détail (cotation + graphique)
pub fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let selection = match app.selection.as_deref() {
        Some(selection) => selection,
        None => {
            render_message(frame, area, " Détail ", "Sélectionnez une cryptomonnaie", Color::Gray);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Cotation
            Constraint::Min(0),    // Graphique
        ])
        .split(area)
        .to_vec();

    render_quote(frame, selection, app.selected_quote(), chunks[0]);

    // Le graphique lié peut appartenir à une sélection précédente
    match app.chart_for_selection() {
        Some(instance) => render_line_chart(frame, instance, chunks[1]),
        None if app.is_loading_data() => {
            render_message(frame, chunks[1], " Historique ", "Chargement...", Color::Yellow)
        }
        None => render_message(frame, chunks[1], " Historique ", "Pas de données", Color::Gray),
    }
}

/// Dessine les valeurs de la cotation, telles que reçues (non arrondies)
fn render_quote(frame: &mut Frame, selection: &str, quote: Option<&AssetQuote>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", capitalize(selection)));

    let value = |v: Option<String>| v.unwrap_or_default();
    let change_color = match quote {
        Some(q) if q.is_positive() => Color::Green,
        Some(_) => Color::Red,
        None => Color::Gray,
    };

    let text = vec![
        Line::from(vec![Span::raw("Nom :              "), Span::raw(selection.to_string())]),
        Line::from(vec![
            Span::raw("Prix actuel :      "),
            Span::styled(
                value(quote.map(|q| q.price.to_string())),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("Plus haut du jour : "),
            Span::raw(value(quote.map(|q| q.high_day.to_string()))),
        ]),
        Line::from(vec![
            Span::raw("Plus bas du jour :  "),
            Span::raw(value(quote.map(|q| q.low_day.to_string()))),
        ]),
        Line::from(vec![
            Span::raw("Variation 24h :    "),
            Span::styled(
                value(quote.map(|q| format!("{}%", q.change_pct_24h))),
                Style::default().fg(change_color),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Dessine le graphique ligne de l'instance liée
fn render_line_chart(frame: &mut Frame, instance: &ChartInstance, area: Rect) {
    let points = instance.points();
    let (min_price, max_price) = match instance.bounds() {
        Some(bounds) => bounds,
        None => {
            render_message(frame, area, " Historique ", "Pas de données", Color::Gray);
            return;
        }
    };

    // Marge de 5% pour que le graphique respire
    let margin = ((max_price - min_price) * 0.05).max(max_price.abs() * 0.001);
    let y_min = (min_price - margin).max(0.0);
    let y_max = max_price + margin;

    let datasets = vec![Dataset::default()
        .name(instance.spec.label.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Rgb(75, 192, 192)))
        .data(&points)];

    // Labels X : premier, milieu, dernier jour
    let labels = &instance.spec.series.labels;
    let x_labels: Vec<Span> = match labels.len() {
        0 => Vec::new(),
        1 => vec![Span::raw(labels[0].clone())],
        n => vec![
            Span::raw(labels[0].clone()),
            Span::raw(labels[n / 2].clone()),
            Span::raw(labels[n - 1].clone()),
        ],
    };

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, points.len().saturating_sub(1) as f64])
        .labels(x_labels);

    let y_axis = Axis::default()
        .title("USD")
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.2}", y_min)),
            Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.2}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", instance.spec.label)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Message centré dans un bloc
fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title.to_string());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(color))),
    ];

    frame.render_widget(Paragraph::new(text).block(block).alignment(Alignment::Center), area);
}
