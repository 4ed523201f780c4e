//! Handler für Eingaben am PoL-Werkzeug (Formular, Schritte, Edit).

use crate::app::tools::{PolTool, StepDirection, ToolAction, ToolContext};
use crate::app::AppState;
use crate::features::{LrMode, PolFeature};
use crate::host::{MapHost, MessageSink, Modifiers};

fn with_pol_tool(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    f: impl FnOnce(&mut PolTool, &mut ToolContext) -> ToolAction,
) -> ToolAction {
    let mut ctx = ToolContext::new(host, sink, &state.options);
    f(&mut state.pol_tool, &mut ctx)
}

pub fn set_stationing(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    value: f64,
    mode: LrMode,
) -> ToolAction {
    with_pol_tool(state, host, sink, |tool, ctx| {
        tool.set_stationing(ctx, value, mode)
    })
}

pub fn move_to_start(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
) -> ToolAction {
    with_pol_tool(state, host, sink, |tool, ctx| tool.move_to_start(ctx))
}

pub fn move_to_end(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
) -> ToolAction {
    with_pol_tool(state, host, sink, |tool, ctx| tool.move_to_end(ctx))
}

pub fn step(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    direction: StepDirection,
    modifiers: Modifiers,
) -> ToolAction {
    with_pol_tool(state, host, sink, |tool, ctx| {
        tool.step(ctx, direction, modifiers)
    })
}

/// Öffnet einen gespeicherten Punkt im Edit-Modus.
pub fn start_edit(state: &mut AppState, pk: i64, pol: PolFeature) {
    state.pol_tool.start_edit(pk, pol);
}
