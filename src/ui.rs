use crate::app::{parse_script, update, AppMsg, Effect};
use crate::builder::drag::DragGesture;
use crate::builder::focus::{FocusState, Pane};
use crate::builder::FormBuilder;
use crate::model::{AppConfig, FieldType};
use crate::services::config::{env_flag, load_config};
use crate::theme::{Theme, ThemeMode};
use crate::widgets::confirm_dialog::draw_confirm;
use crate::widgets::header::draw_header;
use crate::widgets::palette::{digit_field_type, draw_palette, move_cursor};
use crate::widgets::preview::draw_preview;
use crate::widgets::settings::{draw_settings, LabelInput};
use crate::widgets::status_bar::draw_footer;
use anyhow::{anyhow, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Clickable regions recorded while drawing the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitTarget {
    Palette(usize),
    // display slot in the preview list
    Card(usize),
    // `index` is the field's list position, `slot` where its card is drawn
    Delete { index: usize, slot: usize },
    Submit,
    Reset,
    LabelInput,
    Save,
    ConfirmYes,
    ConfirmNo,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) theme: Theme,
    pub(crate) builder: FormBuilder,
    pub(crate) focus: FocusState,
    pub(crate) palette_cursor: usize,
    pub(crate) preview_cursor: usize,
    pub(crate) preview_offset: usize,
    pub(crate) preview_list_area: Rect,
    pub(crate) drag: Option<DragGesture>,
    pub(crate) drag_moved: bool,
    // Mouse events are ignored while a keyboard-lifted gesture is active
    pub(crate) drag_by_mouse: bool,
    pub(crate) label_input: LabelInput,
    pub(crate) hits: Vec<(Rect, HitTarget)>,
    pub(crate) tick: u64,
    pub(crate) toast: Option<Toast>,
    pub(crate) show_debug: bool,
    // Debug log (rendered in bottom debug pane)
    pub(crate) debug_log: VecDeque<String>,
}

impl AppState {
    pub(crate) fn from_config(config: AppConfig) -> Self {
        let mode = config
            .theme
            .as_deref()
            .and_then(ThemeMode::parse)
            .unwrap_or_default();
        let mut builder = FormBuilder::new(config.default_options.clone());
        for kind in &config.initial_fields {
            builder.add_field(*kind);
        }
        let mut state = Self {
            theme: Theme::from_mode(mode),
            builder,
            focus: FocusState::new(Pane::Preview),
            show_debug: true,
            ..Default::default()
        };
        state.dbg(format!(
            "config: title='{}' theme={mode:?} seeded={}",
            config.title,
            config.initial_fields.len()
        ));
        state.config = config;
        state
    }

    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg.into());
    }

    pub(crate) fn hit_at(&self, pos: Position) -> Option<HitTarget> {
        // Later entries are drawn on top
        self.hits
            .iter()
            .rev()
            .find(|(r, _)| r.contains(pos))
            .map(|(_, t)| *t)
    }

    fn dispatch(&mut self, msgs: Vec<AppMsg>) {
        for msg in msgs {
            let effects = update(self, msg);
            run_effects(self, effects);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::ShowToast {
                text,
                level,
                seconds,
            } => {
                let ticks = seconds.saturating_mul(5); // ~200ms tick
                let exp = state.tick.saturating_add(ticks);
                state.toast = Some(Toast {
                    text,
                    level,
                    expires_at_tick: exp,
                });
            }
            Effect::CopyToClipboard { text } => {
                let copied = arboard::Clipboard::new()
                    .and_then(|mut c| c.set_text(text.as_str()))
                    .map_err(|e| e.to_string());
                let (msg, level) = match copied {
                    Ok(()) => ("Form JSON copied to clipboard".to_string(), ToastLevel::Success),
                    Err(e) => (format!("Clipboard unavailable: {e}"), ToastLevel::Error),
                };
                state.dbg(format!("copy form ({} bytes): {msg}", text.len()));
                state.toast = Some(Toast {
                    text: msg,
                    level,
                    expires_at_tick: state.tick.saturating_add(10),
                });
            }
        }
    }
}

fn start_drag(state: &mut AppState, index: usize, by_mouse: bool) {
    if let Some(field) = state.builder.fields().get(index) {
        let id = field.id;
        state.drag = Some(DragGesture::lift(id, index));
        state.drag_moved = false;
        state.drag_by_mouse = by_mouse;
        state.preview_cursor = index;
        state.dbg(format!("lift {id} from {index}"));
    }
}

/// Translates one key press into messages. Returns `true` when the app should quit.
pub(crate) fn handle_key(state: &mut AppState, key: KeyEvent) -> (Vec<AppMsg>, bool) {
    let mut msgs = Vec::new();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // The confirm modal blocks everything else
    if state.builder.pending().is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                msgs.push(AppMsg::Confirm(true))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                msgs.push(AppMsg::Confirm(false))
            }
            _ => {}
        }
        return (msgs, false);
    }

    if state.drag.is_some() {
        let len = state.builder.fields().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(g) = &mut state.drag {
                    g.move_by(-1, len);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(g) = &mut state.drag {
                    g.move_by(1, len);
                }
            }
            KeyCode::Home => {
                if let Some(g) = &mut state.drag {
                    g.move_to(0, len);
                }
            }
            KeyCode::End => {
                if let Some(g) = &mut state.drag {
                    g.move_to(len.saturating_sub(1), len);
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(g) = state.drag.take() {
                    msgs.push(AppMsg::DragEnd(g.drop()));
                }
            }
            KeyCode::Esc => {
                if let Some(g) = state.drag.take() {
                    msgs.push(AppMsg::DragEnd(g.cancel()));
                }
            }
            _ => {}
        }
        return (msgs, false);
    }

    let settings_open = state.builder.selection().is_some();
    match key.code {
        KeyCode::Char('c') if ctrl => {
            msgs.push(AppMsg::CopyForm);
            return (msgs, false);
        }
        KeyCode::Char('q') if ctrl => return (msgs, true),
        KeyCode::F(12) => {
            state.show_debug = !state.show_debug;
            return (msgs, false);
        }
        KeyCode::Tab => {
            state.focus.next(settings_open);
            return (msgs, false);
        }
        KeyCode::BackTab => {
            state.focus.prev(settings_open);
            return (msgs, false);
        }
        _ => {}
    }

    match state.focus.pane {
        Pane::Settings => match key.code {
            KeyCode::Enter => msgs.push(AppMsg::CommitEdit),
            KeyCode::Char('s') if ctrl => msgs.push(AppMsg::CommitEdit),
            KeyCode::Esc => state.focus.leave_settings(),
            _ => {
                if state.label_input.input(&key) {
                    msgs.push(AppMsg::EditLabel(state.label_input.text()));
                }
            }
        },
        Pane::Palette => match key.code {
            KeyCode::Left => state.palette_cursor = move_cursor(state.palette_cursor, -1, 0),
            KeyCode::Right => state.palette_cursor = move_cursor(state.palette_cursor, 1, 0),
            KeyCode::Up => state.palette_cursor = move_cursor(state.palette_cursor, 0, -1),
            KeyCode::Down => state.palette_cursor = move_cursor(state.palette_cursor, 0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(kind) = FieldType::ALL.get(state.palette_cursor) {
                    msgs.push(AppMsg::AddField(*kind));
                }
            }
            KeyCode::Char('r') => msgs.push(AppMsg::RequestReset),
            KeyCode::Char('q') | KeyCode::Esc => return (msgs, true),
            KeyCode::Char(c) => {
                if let Some(kind) = digit_field_type(c) {
                    msgs.push(AppMsg::AddField(kind));
                }
            }
            _ => {}
        },
        Pane::Preview => {
            let len = state.builder.fields().len();
            let cur = state.preview_cursor;
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => state.preview_cursor = cur.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    state.preview_cursor = (cur + 1).min(len.saturating_sub(1))
                }
                KeyCode::Home => state.preview_cursor = 0,
                KeyCode::End => state.preview_cursor = len.saturating_sub(1),
                KeyCode::Enter if len > 0 => msgs.push(AppMsg::OpenEdit(cur)),
                KeyCode::Char('d') | KeyCode::Delete if len > 0 => {
                    msgs.push(AppMsg::RequestDelete(cur))
                }
                KeyCode::Char(' ') => start_drag(state, cur, false),
                KeyCode::Char('K') if cur > 0 => msgs.push(AppMsg::Reorder {
                    source: cur,
                    destination: cur - 1,
                }),
                KeyCode::Char('J') if cur + 1 < len => msgs.push(AppMsg::Reorder {
                    source: cur,
                    destination: cur + 1,
                }),
                KeyCode::Char('r') => msgs.push(AppMsg::RequestReset),
                KeyCode::Char('s') => msgs.push(AppMsg::Submit),
                KeyCode::Char('q') | KeyCode::Esc => return (msgs, true),
                KeyCode::Char(c) => {
                    if let Some(kind) = digit_field_type(c) {
                        msgs.push(AppMsg::AddField(kind));
                    }
                }
                _ => {}
            }
        }
    }
    (msgs, false)
}

/// Mouse gestures: click palette buttons, press-drag-release cards to reorder.
pub(crate) fn handle_mouse(state: &mut AppState, me: MouseEvent) -> Vec<AppMsg> {
    let mut msgs = Vec::new();
    let pos = Position::new(me.column, me.row);
    if state.builder.pending().is_some() {
        if let MouseEventKind::Down(MouseButton::Left) = me.kind {
            match state.hit_at(pos) {
                Some(HitTarget::ConfirmYes) => msgs.push(AppMsg::Confirm(true)),
                Some(HitTarget::ConfirmNo) => msgs.push(AppMsg::Confirm(false)),
                _ => {}
            }
        }
        return msgs;
    }
    if state.drag.is_some() && !state.drag_by_mouse {
        return msgs;
    }
    match me.kind {
        MouseEventKind::Down(MouseButton::Left) => match state.hit_at(pos) {
            Some(HitTarget::Palette(i)) => {
                state.palette_cursor = i;
                state.focus.pane = Pane::Palette;
                if let Some(kind) = FieldType::ALL.get(i) {
                    msgs.push(AppMsg::AddField(*kind));
                }
            }
            Some(HitTarget::Delete { index, .. }) => msgs.push(AppMsg::RequestDelete(index)),
            Some(HitTarget::Card(i)) => {
                state.focus.pane = Pane::Preview;
                start_drag(state, i, true);
            }
            Some(HitTarget::Submit) => msgs.push(AppMsg::Submit),
            Some(HitTarget::Reset) => msgs.push(AppMsg::RequestReset),
            Some(HitTarget::Save) => msgs.push(AppMsg::CommitEdit),
            Some(HitTarget::LabelInput) => state.focus.pane = Pane::Settings,
            Some(HitTarget::ConfirmYes) | Some(HitTarget::ConfirmNo) | None => {}
        },
        MouseEventKind::Drag(MouseButton::Left) => {
            let len = state.builder.fields().len();
            let hit = state.hit_at(pos);
            let inside = state.preview_list_area.contains(pos);
            if let Some(g) = &mut state.drag {
                match hit {
                    Some(HitTarget::Card(slot)) | Some(HitTarget::Delete { slot, .. }) => {
                        g.move_to(slot, len)
                    }
                    _ if inside => {}
                    _ => g.hover_outside(),
                }
                if g.over() != Some(g.source()) {
                    state.drag_moved = true;
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(g) = state.drag.take() {
                if state.drag_moved {
                    msgs.push(AppMsg::DragEnd(g.drop()));
                } else {
                    msgs.push(AppMsg::OpenEdit(g.source()));
                }
            }
        }
        MouseEventKind::ScrollUp if state.preview_list_area.contains(pos) => {
            state.preview_cursor = state.preview_cursor.saturating_sub(1);
        }
        MouseEventKind::ScrollDown if state.preview_list_area.contains(pos) => {
            let len = state.builder.fields().len();
            state.preview_cursor = (state.preview_cursor + 1).min(len.saturating_sub(1));
        }
        _ => {}
    }
    msgs
}

pub fn run() -> Result<()> {
    let cfg = load_config()?;
    let mut state = AppState::from_config(cfg);
    state.show_debug = !env_flag("FORM_BUILDER_HIDE_DEBUG");

    // Headless smoke mode
    if env_flag("FORM_BUILDER_HEADLESS") {
        let ticks: u64 = std::env::var("FORM_BUILDER_TICKS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);
        let script = match std::env::var("FORM_BUILDER_SCRIPT") {
            Ok(s) => parse_script(&s).map_err(|e| anyhow!("FORM_BUILDER_SCRIPT: {e}"))?,
            Err(_) => Vec::new(),
        };
        let steps = script.len();
        let backend = ratatui::backend::TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend)?;
        let mut pending = script.into_iter();
        for _ in 0..ticks {
            if let Some(msg) = pending.next() {
                state.dispatch(vec![msg]);
            }
            terminal.draw(|f| ui(f, &mut state))?;
            state.tick = state.tick.wrapping_add(1);
        }
        // Steps beyond the tick budget still run so the summary is complete
        state.dispatch(pending.collect());
        terminal.draw(|f| ui(f, &mut state))?;
        if env_flag("FORM_BUILDER_SMOKE_SUMMARY") {
            let fields = state.builder.fields();
            let summary = serde_json::json!({
                "ok": true,
                "steps": steps,
                "fields": fields.len(),
                "types": fields.iter().map(|f| f.kind.as_str()).collect::<Vec<_>>(),
                "labels": fields.iter().map(|f| f.label.as_str()).collect::<Vec<_>>(),
                "editing": state.builder.selection().map(|s| s.index()),
                "pending_confirm": state.builder.pending().is_some(),
            });
            println!("{summary}");
        }
        return Ok(());
    }

    // Setup terminal (interactive)
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();
    let res = loop {
        terminal.draw(|f| ui(f, &mut state))?;
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    let (msgs, quit) = handle_key(&mut state, key);
                    state.dispatch(msgs);
                    if quit {
                        break Ok(());
                    }
                }
                Event::Mouse(me) => {
                    let msgs = handle_mouse(&mut state, me);
                    state.dispatch(msgs);
                }
                _ => {}
            }
        }
        if last_tick.elapsed() >= tick_rate {
            state.tick = state.tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    };
    // Restore
    disable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    res
}

fn help_text(state: &AppState) -> &'static str {
    if state.builder.pending().is_some() {
        return "y/Enter confirm  n/Esc cancel";
    }
    if state.drag.is_some() {
        return "↑/↓ move  Space/Enter drop  Esc cancel";
    }
    match state.focus.pane {
        Pane::Palette => "←/→/↑/↓ choose  Enter add  1-9,0 quick add  r reset  Tab next  q quit",
        Pane::Preview => {
            "↑/↓ select  Enter edit  Space drag  J/K move  d delete  s submit  r reset  Ctrl+C copy  q quit"
        }
        Pane::Settings => "type to edit label  Enter/Ctrl+S save  Esc back  Tab next",
    }
}

fn ui(f: &mut Frame, state: &mut AppState) {
    // Clear expired toast
    if let Some(t) = &state.toast {
        if state.tick >= t.expires_at_tick {
            state.toast = None;
        }
    }
    let mut hits: Vec<(Rect, HitTarget)> = Vec::new();

    let screen = f.area();
    f.render_widget(Block::default().style(state.theme.base_style()), screen);

    const HEADER_H: u16 = 2;
    const DEBUG_H: u16 = 4;
    let mut constraints = vec![Constraint::Length(HEADER_H), Constraint::Min(0)];
    if state.show_debug {
        constraints.push(Constraint::Length(DEBUG_H));
    }
    constraints.push(Constraint::Length(1)); // Footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(screen);

    draw_header(f, chunks[0], state);

    let settings_open = state.builder.selection().is_some();
    let columns: Vec<Constraint> = if settings_open {
        vec![
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ]
    } else {
        vec![Constraint::Percentage(25), Constraint::Percentage(75)]
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns)
        .split(chunks[1]);
    draw_palette(f, cols[0], state, &mut hits);
    draw_preview(f, cols[1], state, &mut hits);
    if settings_open {
        draw_settings(f, cols[2], state, &mut hits);
    }

    let footer = chunks[chunks.len() - 1];
    if state.show_debug {
        draw_debug(f, chunks[2], state);
    }
    draw_footer(f, footer, state, help_text(state));

    if let Some(action) = state.builder.snapshot().pending {
        // Modal: only its own buttons stay clickable
        hits.clear();
        draw_confirm(f, screen, action, &state.theme, &mut hits);
    }
    state.hits = hits;
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let b = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            "Debug",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
    // Take last lines that fit below the border
    let h = area.height.saturating_sub(1) as usize;
    let total = state.debug_log.len();
    let start = total.saturating_sub(h);
    let lines: Vec<Line> = state
        .debug_log
        .iter()
        .skip(start)
        .map(|s| Line::raw(s.clone()))
        .collect();
    let p = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(b)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}
