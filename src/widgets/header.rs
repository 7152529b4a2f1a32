use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::ui::AppState;

/// Top banner: title on the left, field counters on the right.
pub fn draw_header(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let border = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(if state.drag.is_some() {
            theme.accent
        } else {
            theme.muted
        }));
    let inner = border.inner(area);
    f.render_widget(border, area);

    let fields = state.builder.fields();
    let required = fields.iter().filter(|fd| fd.required).count();
    let title = Line::from(vec![
        Span::styled(
            state.config.title.clone(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  drag-and-drop form builder", theme.text_muted()),
    ]);
    let counters = Line::from(Span::styled(
        format!("{} fields · {} required", fields.len(), required),
        Style::default().fg(theme.secondary),
    ))
    .right_aligned();
    f.render_widget(Paragraph::new(title), inner);
    f.render_widget(Paragraph::new(counters), inner);
}
