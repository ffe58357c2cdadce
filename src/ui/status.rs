use crate::app::App;
use crate::lifecycle::Phase;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(&**msg)
    } else {
        match app.phase {
            Phase::Loading | Phase::Error { .. } => Cow::Borrowed("[t]heme [q]uit"),
            Phase::Ready => Cow::Borrowed(
                "[Tab/[ ]]category [1-9]jump [hjkl]move [Enter/o]pen [t]heme [q]uit",
            ),
        }
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
