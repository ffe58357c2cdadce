//! Render functions for the TUI.
//!
//! Dispatches on the page phase: loading indicator, error message, or the
//! title bar, pill row and card grid.

use crate::app::App;
use crate::gallery::Pill;
use crate::lifecycle::Phase;
use crate::util::sanitize_text;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{grid, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Braille spinner frames for the loading indicator.
pub(super) const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(f, app, chunks[0]);

    let surfaces = app.phase.surfaces();
    if surfaces.loading {
        render_loading(f, app, chunks[2]);
    } else if surfaces.error {
        render_error(f, app, chunks[2]);
    } else if surfaces.content {
        render_pills(f, app, chunks[1]);
        grid::render(f, app, chunks[2]);
    }

    status::render(f, app, chunks[3]);
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(app.kind.title(), app.style("title_bar"))];
    if let Some(feed) = &app.feed {
        spans.push(Span::styled(
            format!("  {} items", feed.items().len()),
            app.style("card_caption"),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let frame = SPINNER[app.spinner_frame % SPINNER.len()];
    let text = format!("{} Loading feed...", frame);
    let p = Paragraph::new(text)
        .style(app.style("loading"))
        .alignment(Alignment::Center);
    f.render_widget(p, centered_line(area));
}

fn render_error(f: &mut Frame, app: &App, area: Rect) {
    let message = match &app.phase {
        Phase::Error { message } => sanitize_text(message).into_owned(),
        _ => return,
    };
    let text = vec![
        Line::from(Span::styled("Failed to load the feed", app.style("error"))),
        Line::from(""),
        Line::from(message),
    ];
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

/// Pill row: one label per visible category, the active one highlighted.
fn render_pills(f: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(pill_spans(app, &app.pills));
    f.render_widget(Paragraph::new(line), area);
}

fn pill_spans(app: &App, pills: &[Pill]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(pills.len() * 2);
    for (i, pill) in pills.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let label = format!(" {} ", sanitize_text(&pill.label));
        let style = if pill.active {
            app.style("pill_active")
        } else {
            app.style("pill")
        };
        spans.push(Span::styled(label, style));
    }
    spans
}

/// One-line rect in the vertical middle of `area`.
fn centered_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}
