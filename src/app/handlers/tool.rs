//! Handler für werkzeugübergreifende Operationen (Aktivierung, Maus, Speichern).

use crate::app::state::ActiveTool;
use crate::app::tools::{MapTool, ToolAction, ToolContext};
use crate::app::AppState;
use crate::host::{MapHost, MessageSink, MouseEvent};

/// Führt `f` auf dem aktiven Werkzeug mit geliehenem Kontext aus.
fn with_active_tool<R>(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    f: impl FnOnce(&mut dyn MapTool, &mut ToolContext) -> R,
) -> Option<R> {
    let AppState {
        options,
        active_tool,
        pol_tool,
        lol_tool,
        ..
    } = state;
    let tool: &mut dyn MapTool = match active_tool {
        ActiveTool::None => return None,
        ActiveTool::Pol => pol_tool,
        ActiveTool::Lol => lol_tool,
    };
    let mut ctx = ToolContext::new(host, sink, options);
    Some(f(tool, &mut ctx))
}

/// Aktiviert ein Werkzeug.
pub fn set_active(state: &mut AppState, tool: ActiveTool) {
    if state.active_tool != tool {
        log::info!("Werkzeug aktiviert: {:?}", tool);
    }
    state.active_tool = tool;
}

/// Setzt alle Werkzeuge zurück und verwirft gehaltene Punkte.
pub fn cancel_all(state: &mut AppState) {
    state.pol_tool.cancel();
    state.lol_tool.cancel();
}

pub fn mouse_move(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    event: &MouseEvent,
) -> Option<ToolAction> {
    with_active_tool(state, host, sink, |tool, ctx| tool.on_mouse_move(ctx, event))
}

pub fn click(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    event: &MouseEvent,
) -> Option<ToolAction> {
    with_active_tool(state, host, sink, |tool, ctx| tool.on_click(ctx, event))
}

pub fn drag_start(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    event: &MouseEvent,
) -> Option<ToolAction> {
    with_active_tool(state, host, sink, |tool, ctx| tool.drag_start(ctx, event))
}

pub fn drag_update(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    event: &MouseEvent,
) -> Option<ToolAction> {
    with_active_tool(state, host, sink, |tool, ctx| tool.drag_update(ctx, event))
}

pub fn drag_end(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
) -> Option<ToolAction> {
    with_active_tool(state, host, sink, |tool, ctx| tool.drag_end(ctx))
}

/// Legt das Ergebnis des aktiven Werkzeugs in den Speicher-Ausgang.
pub fn commit(state: &mut AppState, host: &dyn MapHost, sink: &mut dyn MessageSink) {
    if let Some(request) = with_active_tool(state, host, sink, |tool, ctx| tool.commit(ctx)).flatten()
    {
        state.pending_commits.push(request);
    }
}

/// Legt einen Löschauftrag in den Speicher-Ausgang.
pub fn delete(state: &mut AppState, host: &dyn MapHost, sink: &mut dyn MessageSink) {
    if let Some(request) = with_active_tool(state, host, sink, |tool, ctx| tool.delete(ctx)).flatten()
    {
        state.pending_commits.push(request);
    }
}

/// Setzt das aktive Werkzeug zurück (Escape).
pub fn reset(state: &mut AppState) {
    match state.active_tool {
        ActiveTool::None => {}
        ActiveTool::Pol => state.pol_tool.reset(),
        ActiveTool::Lol => state.lol_tool.reset(),
    }
}
