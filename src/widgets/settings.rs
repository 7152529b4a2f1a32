use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_textarea::{CursorMove, Input, Key, TextArea};

use crate::builder::focus::Pane;
use crate::ui::{AppState, HitTarget};
use crate::widgets::chrome::{button_line, panel_block};

/// Single-line label editor backed by tui-textarea.
#[derive(Default)]
pub struct LabelInput {
    ta: TextArea<'static>,
}

impl LabelInput {
    pub fn reset(&mut self, text: &str) {
        let mut ta = TextArea::new(vec![text.to_string()]);
        ta.move_cursor(CursorMove::End);
        ta.set_cursor_line_style(Style::default());
        self.ta = ta;
    }

    pub fn text(&self) -> String {
        self.ta.lines().join("")
    }

    /// Feeds one key into the editor. Newlines are never inserted.
    pub fn input(&mut self, key: &KeyEvent) -> bool {
        let k = match key.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => return false,
        };
        let before = self.text();
        self.ta.input(Input {
            key: k,
            ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
            alt: key.modifiers.contains(KeyModifiers::ALT),
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
        });
        self.text() != before
    }

    fn styled(&mut self, focused: bool, frame: Color, active: Color) -> &TextArea<'static> {
        let border = if focused { active } else { frame };
        self.ta.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        let cursor = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.ta.set_cursor_style(cursor);
        &self.ta
    }
}

pub fn draw_settings(
    f: &mut Frame,
    area: Rect,
    state: &mut AppState,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let theme = state.theme.clone();
    let focused = state.focus.pane == Pane::Settings;
    let block = panel_block("Field Settings", focused, &theme, theme.accent);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let Some(sel) = state.builder.selection() else {
        return;
    };
    let draft = sel.draft.clone();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(Paragraph::new("Label:"), rows[0]);
    let ta = state.label_input.styled(focused, theme.frame, theme.selected);
    f.render_widget(ta, rows[1]);
    hits.push((rows[1], HitTarget::LabelInput));

    let options = if draft.values.is_empty() {
        "-".to_string()
    } else {
        draft.values.join(", ")
    };
    let meta = vec![
        Line::from(vec![
            Span::styled("Type: ", theme.text_muted()),
            Span::raw(draft.kind.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Required: ", theme.text_muted()),
            Span::raw(if draft.required { "yes" } else { "no" }),
        ]),
        Line::from(vec![
            Span::styled("Options: ", theme.text_muted()),
            Span::raw(options),
        ]),
        Line::from(Span::styled(
            format!("Id: {}", draft.id),
            theme.text_muted(),
        )),
    ];
    f.render_widget(Paragraph::new(meta).wrap(Wrap { trim: true }), rows[2]);

    let caption = "[ Save ]";
    let w = (caption.len() as u16).min(rows[3].width);
    let save = Rect {
        x: rows[3].right().saturating_sub(w),
        y: rows[3].y,
        width: w,
        height: 1,
    };
    f.render_widget(Paragraph::new(button_line(caption, theme.accent, focused)), save);
    hits.push((save, HitTarget::Save));
}
