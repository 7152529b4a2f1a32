use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::builder::focus::Pane;
use crate::model::{Field, FieldType};
use crate::theme::Theme;
use crate::ui::{AppState, HitTarget};
use crate::widgets::chrome::{button_line, panel_block};

/// Rows per field card: two borders plus two body lines.
pub const CARD_H: u16 = 4;
const DELETE_CAPTION: &str = "[Delete]";

/// Keeps `selected` inside a window of `capacity` slots starting at `offset`.
pub(crate) fn adjust_offset(offset: usize, selected: usize, capacity: usize, total: usize) -> usize {
    if capacity == 0 || total == 0 {
        return 0;
    }
    let sel = selected.min(total - 1);
    let mut start = offset.min(total.saturating_sub(capacity));
    if sel < start {
        start = sel;
    } else if sel >= start + capacity {
        start = sel + 1 - capacity;
    }
    start
}

fn input_line(placeholder: &str, theme: &Theme, width: usize) -> Line<'static> {
    let fill = width.saturating_sub(placeholder.chars().count() + 4);
    Line::from(vec![
        Span::styled("[ ", Style::default().fg(theme.frame)),
        Span::styled(placeholder.to_string(), theme.text_muted()),
        Span::raw(" ".repeat(fill)),
        Span::styled(" ]", Style::default().fg(theme.frame)),
    ])
}

fn choices_line(marker: &str, values: &[String]) -> Line<'static> {
    let parts: Vec<String> = values.iter().map(|v| format!("{marker} {v}")).collect();
    Line::raw(parts.join("  "))
}

/// Body lines for one card, by field type.
pub(crate) fn field_body(field: &Field, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let meta = Line::from(Span::styled(
        format!("{} · {}", field.kind, field.id),
        theme.text_muted(),
    ));
    match field.kind {
        FieldType::Select => {
            let first = field.values.first().cloned().unwrap_or_default();
            vec![
                Line::from(vec![
                    Span::styled("[ ", Style::default().fg(theme.frame)),
                    Span::raw(first),
                    Span::styled(" ▾ ]", Style::default().fg(theme.frame)),
                ]),
                Line::from(Span::styled(
                    format!("options: {}", field.values.join(", ")),
                    theme.text_muted(),
                )),
            ]
        }
        FieldType::Radio => vec![choices_line("( )", &field.values), meta],
        FieldType::Checkbox => vec![choices_line("[ ]", &field.values), meta],
        FieldType::Textarea => vec![input_line("", theme, width), input_line("", theme, width)],
        FieldType::Text => vec![input_line("", theme, width), meta],
        FieldType::Number => vec![input_line("0", theme, width), meta],
        FieldType::Email => vec![input_line("name@example.com", theme, width), meta],
        FieldType::Password => vec![input_line("••••••", theme, width), meta],
        FieldType::Date => vec![input_line("yyyy-mm-dd", theme, width), meta],
        FieldType::File => vec![input_line("Browse... No file chosen", theme, width), meta],
    }
}

pub fn draw_preview(
    f: &mut Frame,
    area: Rect,
    state: &mut AppState,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let theme = state.theme.clone();
    let focused = state.focus.pane == Pane::Preview;
    let block = panel_block("Live Preview", focused, &theme, theme.secondary);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }
    let list = Rect {
        height: inner.height - 1,
        ..inner
    };
    let buttons = Rect {
        y: inner.bottom() - 1,
        height: 1,
        ..inner
    };
    state.preview_list_area = list;

    let snap = state.builder.snapshot();
    let total = snap.fields.len();
    if total == 0 {
        let p = Paragraph::new(Line::from(Span::styled(
            "No fields added yet.",
            theme.text_muted().add_modifier(Modifier::ITALIC),
        )));
        f.render_widget(p, list);
    } else {
        let order = match &state.drag {
            Some(g) => g.preview_order(total),
            None => (0..total).collect(),
        };
        let selected_slot = state
            .drag
            .as_ref()
            .and_then(|g| g.over())
            .unwrap_or(state.preview_cursor);
        let capacity = ((list.height / CARD_H) as usize).max(1);
        let start = adjust_offset(state.preview_offset, selected_slot, capacity, total);
        let end = (start + capacity).min(total);
        let editing = snap.selection.map(|s| s.id());
        let dragging = state.drag.as_ref().map(|g| g.id());
        for (row, slot) in (start..end).enumerate() {
            let field = &snap.fields[order[slot]];
            let rect = Rect {
                x: list.x,
                y: list.y + row as u16 * CARD_H,
                width: list.width,
                height: CARD_H.min(list.bottom().saturating_sub(list.y + row as u16 * CARD_H)),
            };
            if rect.height < 3 {
                break;
            }
            let is_cursor = slot == selected_slot;
            let border = if dragging == Some(field.id) {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else if is_cursor && focused {
                theme.border_focused()
            } else {
                theme.border_unfocused()
            };
            let mut title = String::new();
            if dragging == Some(field.id) {
                title.push_str("⇅ ");
            } else if editing == Some(field.id) {
                title.push_str("✎ ");
            }
            title.push_str(&field.label);
            if field.required {
                title.push_str(" *");
            }
            let card = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(title, Style::default().fg(theme.fg)))
                .title(
                    Line::from(Span::styled(DELETE_CAPTION, Style::default().fg(theme.error)))
                        .right_aligned(),
                );
            let body_area = card.inner(rect);
            f.render_widget(card, rect);
            let body = field_body(field, &theme, body_area.width as usize);
            f.render_widget(Paragraph::new(body), body_area);

            hits.push((rect, HitTarget::Card(slot)));
            let dw = DELETE_CAPTION.len() as u16;
            if rect.width > dw + 2 {
                let del = Rect {
                    x: rect.right() - 1 - dw,
                    y: rect.y,
                    width: dw,
                    height: 1,
                };
                hits.push((
                    del,
                    HitTarget::Delete {
                        index: order[slot],
                        slot,
                    },
                ));
            }
        }
        state.preview_offset = start;
    }

    let submit = "[ Submit ]";
    let reset = "[ Reset ]";
    let sw = (submit.len() as u16).min(buttons.width);
    let rw = (reset.len() as u16).min(buttons.width.saturating_sub(sw));
    let submit_rect = Rect {
        width: sw,
        ..buttons
    };
    let reset_rect = Rect {
        x: buttons.right().saturating_sub(rw),
        width: rw,
        ..buttons
    };
    f.render_widget(
        Paragraph::new(button_line(submit, theme.success, false)),
        submit_rect,
    );
    f.render_widget(
        Paragraph::new(button_line(reset, theme.muted, false)),
        reset_rect,
    );
    hits.push((submit_rect, HitTarget::Submit));
    hits.push((reset_rect, HitTarget::Reset));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldId;

    #[test]
    fn offset_keeps_selection_visible() {
        assert_eq!(adjust_offset(0, 0, 3, 10), 0);
        assert_eq!(adjust_offset(0, 2, 3, 10), 0);
        assert_eq!(adjust_offset(0, 3, 3, 10), 1);
        assert_eq!(adjust_offset(5, 2, 3, 10), 2);
        assert_eq!(adjust_offset(9, 9, 3, 10), 7);
        assert_eq!(adjust_offset(4, 0, 0, 10), 0);
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn choice_bodies_list_options() {
        let theme = Theme::default();
        let mut field = Field {
            id: FieldId(1),
            kind: FieldType::Radio,
            label: "Pick".into(),
            required: false,
            values: vec!["A".into(), "B".into()],
        };
        let body = field_body(&field, &theme, 30);
        assert_eq!(line_text(&body[0]), "( ) A  ( ) B");
        field.kind = FieldType::Checkbox;
        let body = field_body(&field, &theme, 30);
        assert_eq!(line_text(&body[0]), "[ ] A  [ ] B");
        field.kind = FieldType::Select;
        let body = field_body(&field, &theme, 30);
        assert!(line_text(&body[0]).contains("A ▾"));
    }

    #[test]
    fn input_bodies_show_type_hint() {
        let theme = Theme::default();
        let field = Field {
            id: FieldId(3),
            kind: FieldType::Date,
            label: "When".into(),
            required: false,
            values: vec![],
        };
        let body = field_body(&field, &theme, 30);
        assert!(line_text(&body[0]).contains("yyyy-mm-dd"));
        assert_eq!(line_text(&body[1]), "date · field-3");
    }
}
