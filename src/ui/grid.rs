//! Card grid widget.
//!
//! Lays visible cards out left to right in fixed-size cells and scrolls by
//! whole rows to keep the selection on screen.

use crate::app::App;
use crate::gallery::{Card, GridView, MediaStatus};
use crate::util::{sanitize_text, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Cell width of one card, borders included.
pub(super) const CARD_WIDTH: u16 = 32;
/// Cell height of one card: two border rows plus three content lines.
pub(super) const CARD_HEIGHT: u16 = 5;

/// Number of card columns that fit in `width`.
pub(super) fn columns_for(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// First visible row so that `selected_row` stays on screen.
pub(super) fn scroll_for(selected_row: usize, scroll: usize, visible_rows: usize) -> usize {
    let visible_rows = visible_rows.max(1);
    if selected_row < scroll {
        selected_row
    } else if selected_row >= scroll + visible_rows {
        selected_row + 1 - visible_rows
    } else {
        scroll
    }
}

/// Render the grid area: placeholder or cards.
pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let columns = columns_for(area.width);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    app.grid_columns = columns;

    let cards = match app.grid.view() {
        GridView::Placeholder(msg) => {
            let p = Paragraph::new(msg)
                .style(app.style("placeholder"))
                .alignment(Alignment::Center);
            f.render_widget(p, area);
            return;
        }
        GridView::Cards(cards) => cards,
    };

    let selected_row = app.selected_card / columns;
    let scroll = scroll_for(selected_row, app.grid_scroll, visible_rows);

    for (index, card) in cards.iter().enumerate().skip(scroll * columns) {
        let row = index / columns - scroll;
        if row >= visible_rows {
            break;
        }
        let col = index % columns;

        let cell = Rect {
            x: area.x + col as u16 * CARD_WIDTH,
            y: area.y + row as u16 * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT.min(area.height),
        };
        render_card(f, app, card, cell, index == app.selected_card);
    }

    app.grid_scroll = scroll;
}

fn render_card(f: &mut Frame, app: &App, card: &Card, area: Rect, selected: bool) {
    let border_style = if selected {
        app.style("card_selected")
    } else {
        app.style("card_border")
    };

    let inner_width = usize::from(area.width.saturating_sub(2));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = card_lines(app, card, inner_width);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Content lines for one card: title, caption, media.
fn card_lines(app: &App, card: &Card, width: usize) -> Vec<Line<'static>> {
    let title = sanitize_text(&card.title);
    let heading = format!("{} {}", card.icon, title);

    let media = match card.media {
        MediaStatus::Fallback => {
            let initial = title.chars().next().unwrap_or('?').to_uppercase();
            Span::styled(
                format!("[{}] logo unavailable", initial),
                app.style("card_fallback"),
            )
        }
        _ => Span::styled(
            truncate_to_width(&media_label(&card.media_url), width).into_owned(),
            app.style("card_caption"),
        ),
    };

    vec![
        Line::from(Span::styled(
            truncate_to_width(&heading, width).into_owned(),
            app.style("card_title"),
        )),
        Line::from(Span::styled(
            truncate_to_width(&sanitize_text(&card.caption), width).into_owned(),
            app.style("card_caption"),
        )),
        Line::from(media),
    ]
}

/// Short description of a media URL: its host, or the raw text.
fn media_label(media_url: &str) -> String {
    match url::Url::parse(media_url) {
        Ok(url) => url.host_str().map_or_else(|| media_url.to_string(), |h| format!("▣ {}", h)),
        Err(_) => sanitize_text(media_url).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_for() {
        assert_eq!(columns_for(10), 1);
        assert_eq!(columns_for(CARD_WIDTH), 1);
        assert_eq!(columns_for(CARD_WIDTH * 3 + 5), 3);
    }

    #[test]
    fn test_scroll_follows_selection() {
        assert_eq!(scroll_for(0, 0, 3), 0);
        assert_eq!(scroll_for(2, 0, 3), 0);
        assert_eq!(scroll_for(3, 0, 3), 1);
        assert_eq!(scroll_for(1, 4, 3), 1);
        assert_eq!(scroll_for(5, 2, 0), 5);
    }

    #[test]
    fn test_media_label() {
        assert_eq!(media_label("https://img.example.com/a.jpg"), "▣ img.example.com");
        assert_eq!(media_label("not a url"), "not a url");
    }
}
