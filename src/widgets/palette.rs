use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::builder::focus::Pane;
use crate::model::FieldType;
use crate::ui::{AppState, HitTarget};
use crate::widgets::chrome::panel_block;

pub const PALETTE_COLUMNS: usize = 2;

/// Quick-add digit: `1`..`9` map to the first nine types, `0` to the tenth.
pub fn digit_field_type(c: char) -> Option<FieldType> {
    let d = c.to_digit(10)? as usize;
    let idx = if d == 0 { 9 } else { d - 1 };
    FieldType::ALL.get(idx).copied()
}

/// Moves the grid cursor; arrows never wrap.
pub fn move_cursor(cursor: usize, dx: isize, dy: isize) -> usize {
    let total = FieldType::ALL.len() as isize;
    let cols = PALETTE_COLUMNS as isize;
    let cur = cursor as isize;
    let next = cur + dx + dy * cols;
    if dx != 0 && (next.div_euclid(cols) != cur.div_euclid(cols)) {
        return cursor;
    }
    if next < 0 || next >= total {
        return cursor;
    }
    next as usize
}

pub fn draw_palette(f: &mut Frame, area: Rect, state: &AppState, hits: &mut Vec<(Rect, HitTarget)>) {
    let theme = &state.theme;
    let focused = state.focus.pane == Pane::Palette;
    let block = panel_block(&state.config.title, focused, theme, theme.primary);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 4 || inner.height == 0 {
        return;
    }
    let col_w = inner.width / PALETTE_COLUMNS as u16;
    for (i, kind) in FieldType::ALL.iter().enumerate() {
        let row = (i / PALETTE_COLUMNS) as u16;
        let col = (i % PALETTE_COLUMNS) as u16;
        let y = inner.y + row * 2;
        if y >= inner.bottom() {
            break;
        }
        let rect = Rect {
            x: inner.x + col * col_w,
            y,
            width: col_w,
            height: 1,
        };
        let caption = kind.palette_caption();
        let style = if focused && i == state.palette_cursor {
            theme.list_cursor_style()
        } else {
            Style::default().fg(theme.bg).bg(theme.primary)
        };
        let p = Paragraph::new(Line::from(Span::styled(caption, style)))
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(p, rect);
        hits.push((rect, HitTarget::Palette(i)));
    }
    let rows = FieldType::ALL.len().div_ceil(PALETTE_COLUMNS) as u16;
    let hint_y = inner.y + rows * 2;
    if hint_y < inner.bottom() {
        let hint = Rect {
            x: inner.x,
            y: hint_y,
            width: inner.width,
            height: inner.bottom() - hint_y,
        };
        let p = Paragraph::new("1-9, 0: quick add")
            .style(theme.text_muted())
            .wrap(Wrap { trim: true });
        f.render_widget(p, hint);
    }
}
