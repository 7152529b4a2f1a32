use crate::builder::confirm::ConfirmOutcome;
use crate::builder::drag::DragResult;
use crate::builder::focus::Pane;
use crate::model::FieldType;
use crate::ui::{AppState, ToastLevel};

#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    AddField(FieldType),
    RequestDelete(usize),
    RequestReset,
    Confirm(bool),
    Reorder { source: usize, destination: usize },
    DragEnd(DragResult),
    OpenEdit(usize),
    EditLabel(String),
    CommitEdit,
    Submit,
    CopyForm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowToast {
        text: String,
        level: ToastLevel,
        seconds: u64,
    },
    CopyToClipboard {
        text: String,
    },
}

fn toast(text: impl Into<String>, level: ToastLevel) -> Effect {
    Effect::ShowToast {
        text: text.into(),
        level,
        seconds: 2,
    }
}

pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    use AppMsg::*;
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        AddField(kind) => {
            let id = state.builder.add_field(kind);
            let count = state.builder.fields().len();
            state.preview_cursor = count.saturating_sub(1);
            state.dbg(format!("add {kind} -> {id} (total {count})"));
        }
        RequestDelete(index) => {
            if state.builder.request_delete(index) {
                state.dbg(format!("confirm delete #{index}?"));
            }
        }
        RequestReset => {
            state.builder.request_reset();
            state.dbg("confirm reset?");
        }
        Confirm(accepted) => match state.builder.resolve_confirm(accepted) {
            ConfirmOutcome::Nothing => {}
            ConfirmOutcome::Declined(action) => {
                state.dbg(format!("declined: {action:?}"));
            }
            ConfirmOutcome::Deleted { id, label } => {
                state.dbg(format!("deleted {id} '{label}'"));
                effects.push(toast(format!("Deleted '{label}'"), ToastLevel::Info));
            }
            ConfirmOutcome::Reset { removed } => {
                state.dbg(format!("reset form ({removed} fields removed)"));
                effects.push(toast("Form reset", ToastLevel::Info));
            }
        },
        Reorder {
            source,
            destination,
        } => {
            if state.builder.reorder_field(source, destination) {
                state.preview_cursor = destination;
                state.dbg(format!("reorder {source} -> {destination}"));
            }
        }
        DragEnd(result) => match result.destination {
            None => state.dbg(format!("drag {} dropped outside", result.draggable_id)),
            Some(dest) => {
                if state.builder.drag_end(&result) {
                    state.preview_cursor = dest.index;
                    state.dbg(format!(
                        "drag {} {} -> {}",
                        result.draggable_id, result.source.index, dest.index
                    ));
                }
            }
        },
        OpenEdit(index) => {
            if state.builder.open_edit(index) {
                let label = state
                    .builder
                    .selection()
                    .map(|s| s.draft.label.clone())
                    .unwrap_or_default();
                state.label_input.reset(&label);
                state.preview_cursor = index;
                state.focus.pane = Pane::Settings;
                state.dbg(format!("edit #{index} '{label}'"));
            }
        }
        EditLabel(label) => {
            state.builder.update_edit_label(label);
        }
        CommitEdit => {
            if state.builder.commit_edit() {
                let label = state
                    .builder
                    .selection()
                    .map(|s| s.draft.label.clone())
                    .unwrap_or_default();
                state.dbg(format!("saved '{label}'"));
                effects.push(toast("Saved", ToastLevel::Success));
            }
        }
        Submit => {
            state.dbg("submit (no handler)");
            effects.push(toast("Submit is a preview placeholder", ToastLevel::Info));
        }
        CopyForm => match state.builder.to_json() {
            Ok(text) => effects.push(Effect::CopyToClipboard { text }),
            Err(e) => effects.push(toast(format!("Export failed: {e}"), ToastLevel::Error)),
        },
    }
    clamp_after_update(state);
    effects
}

fn clamp_after_update(state: &mut AppState) {
    let len = state.builder.fields().len();
    state.preview_cursor = state.preview_cursor.min(len.saturating_sub(1));
    if state.builder.selection().is_none() {
        state.focus.leave_settings();
    }
}

/// Parses a headless replay script such as `add:select,add:text,delete:0,confirm:yes`.
pub fn parse_script(script: &str) -> Result<Vec<AppMsg>, String> {
    let mut msgs = Vec::new();
    for (i, step) in script.split(',').enumerate() {
        let step = step.trim();
        if step.is_empty() {
            continue;
        }
        let (cmd, arg) = match step.split_once(':') {
            Some((c, a)) => (c, Some(a)),
            None => (step, None),
        };
        let index = |a: Option<&str>| -> Result<usize, String> {
            a.and_then(|s| s.trim().parse::<usize>().ok())
                .ok_or_else(|| format!("step {i} '{step}': expected an index"))
        };
        let msg = match cmd {
            "add" => {
                let kind = arg
                    .and_then(FieldType::parse)
                    .ok_or_else(|| format!("step {i} '{step}': unknown field type"))?;
                AppMsg::AddField(kind)
            }
            "delete" => AppMsg::RequestDelete(index(arg)?),
            "reset" => AppMsg::RequestReset,
            "confirm" => match arg.map(str::trim) {
                Some("yes") | Some("y") | Some("true") => AppMsg::Confirm(true),
                Some("no") | Some("n") | Some("false") => AppMsg::Confirm(false),
                _ => return Err(format!("step {i} '{step}': expected confirm:yes|no")),
            },
            "move" => {
                let (a, b) = arg
                    .and_then(|s| s.split_once(':'))
                    .ok_or_else(|| format!("step {i} '{step}': expected move:<from>:<to>"))?;
                AppMsg::Reorder {
                    source: index(Some(a))?,
                    destination: index(Some(b))?,
                }
            }
            "edit" => AppMsg::OpenEdit(index(arg)?),
            "label" => AppMsg::EditLabel(arg.unwrap_or_default().to_string()),
            "save" => AppMsg::CommitEdit,
            "submit" => AppMsg::Submit,
            other => return Err(format!("step {i}: unknown action '{other}'")),
        };
        msgs.push(msg);
    }
    Ok(msgs)
}
