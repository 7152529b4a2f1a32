use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::builder::confirm::ConfirmAction;
use crate::theme::Theme;
use crate::ui::HitTarget;
use crate::widgets::chrome::button_line;

pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

pub fn draw_confirm(
    f: &mut Frame,
    screen: Rect,
    action: &ConfirmAction,
    theme: &Theme,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    let area = centered(screen, 52, 7);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .title(Span::styled(
            " Confirm ",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ))
        .style(theme.base_style());
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 3 {
        return;
    }
    let prompt = Rect {
        height: inner.height - 1,
        ..inner
    };
    f.render_widget(
        Paragraph::new(action.prompt())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        prompt,
    );
    let row = inner.bottom() - 1;
    let yes = "[ y Yes ]";
    let no = "[ n No ]";
    let yes_rect = Rect {
        x: inner.x + inner.width / 4,
        y: row,
        width: (yes.len() as u16).min(inner.width / 2),
        height: 1,
    };
    let no_x = inner.x + inner.width / 2 + inner.width / 8;
    let no_rect = Rect {
        x: no_x,
        y: row,
        width: (no.len() as u16)
            .min(inner.width / 2)
            .min(inner.right().saturating_sub(no_x)),
        height: 1,
    };
    f.render_widget(Paragraph::new(button_line(yes, theme.error, true)), yes_rect);
    f.render_widget(Paragraph::new(button_line(no, theme.fg, false)), no_rect);
    hits.push((yes_rect, HitTarget::ConfirmYes));
    hits.push((no_rect, HitTarget::ConfirmNo));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fits_inside_small_screens() {
        let r = centered(Rect::new(0, 0, 40, 5), 52, 7);
        assert_eq!(r, Rect::new(0, 0, 40, 5));
        let r = centered(Rect::new(0, 0, 100, 30), 52, 7);
        assert_eq!(r, Rect::new(24, 11, 52, 7));
    }

    #[test]
    fn buttons_stay_inside_narrow_dialog() {
        let backend = ratatui::backend::TestBackend::new(20, 7);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut hits = Vec::new();
        terminal
            .draw(|f| {
                draw_confirm(
                    f,
                    f.area(),
                    &ConfirmAction::ResetAll,
                    &Theme::default(),
                    &mut hits,
                )
            })
            .unwrap();
        // Border occupies the last column
        assert_eq!(hits.len(), 2);
        for (r, _) in &hits {
            assert!(r.right() <= 19, "{r:?} overlaps the border");
        }
    }
}
