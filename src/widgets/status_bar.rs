use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::{AppState, ToastLevel};

pub fn draw_footer(f: &mut Frame, area: Rect, state: &AppState, help_text: &str) {
    let mut spans: Vec<Span> = Vec::new();
    if let Some(t) = &state.toast {
        let color = state.theme.toast_color(t.level);
        let tag = match t.level {
            ToastLevel::Success => "[OK]",
            ToastLevel::Error => "[ERROR]",
            ToastLevel::Info => "[INFO]",
        };
        spans.push(Span::styled(
            format!("{tag} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  |  ", t.text),
            Style::default().fg(color),
        ));
    }
    if let Some(g) = &state.drag {
        let spinner = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"][state.tick as usize % 6];
        let target = match g.over() {
            Some(i) => format!("slot {}", i + 1),
            None => "outside".to_string(),
        };
        spans.push(Span::styled(
            format!("{spinner} dragging {} → {target}  |  ", g.id()),
            Style::default().fg(state.theme.accent),
        ));
    }
    spans.push(Span::styled(
        format!("focus: {}", state.focus.pane.label()),
        Style::default().fg(Color::Magenta),
    ));
    if state.builder.selection().is_some() {
        spans.push(Span::raw("  |  editing"));
    }
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        help_text.to_string(),
        Style::default().fg(Color::DarkGray),
    ));
    let p = Paragraph::new(Line::from(spans));
    f.render_widget(p, area);
}
