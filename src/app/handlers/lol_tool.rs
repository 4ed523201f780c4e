//! Handler für Eingaben am LoL-Werkzeug (Endpunkte, Abschnitts-Operationen, Edit).

use crate::app::tools::{LolTool, StepDirection, ToolAction, ToolContext};
use crate::app::AppState;
use crate::features::{Endpoint, LolFeature, LrMode};
use crate::host::{MapHost, MessageSink, Modifiers};

fn with_lol_tool(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    f: impl FnOnce(&mut LolTool, &mut ToolContext) -> ToolAction,
) -> ToolAction {
    let mut ctx = ToolContext::new(host, sink, &state.options);
    f(&mut state.lol_tool, &mut ctx)
}

pub fn set_endpoint_stationing(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    endpoint: Endpoint,
    value: f64,
    mode: LrMode,
) -> ToolAction {
    with_lol_tool(state, host, sink, |tool, ctx| {
        tool.set_endpoint_stationing(ctx, endpoint, value, mode)
    })
}

pub fn move_to_start(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
) -> ToolAction {
    with_lol_tool(state, host, sink, |tool, ctx| tool.move_segment_to_start(ctx))
}

pub fn move_to_end(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
) -> ToolAction {
    with_lol_tool(state, host, sink, |tool, ctx| tool.move_segment_to_end(ctx))
}

pub fn prepend(state: &mut AppState, host: &dyn MapHost, sink: &mut dyn MessageSink) -> ToolAction {
    with_lol_tool(state, host, sink, |tool, ctx| tool.prepend_segment(ctx))
}

pub fn append(state: &mut AppState, host: &dyn MapHost, sink: &mut dyn MessageSink) -> ToolAction {
    with_lol_tool(state, host, sink, |tool, ctx| tool.append_segment(ctx))
}

pub fn shift(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    direction: StepDirection,
    modifiers: Modifiers,
) -> ToolAction {
    with_lol_tool(state, host, sink, |tool, ctx| {
        tool.shift_segment(ctx, direction, modifiers)
    })
}

pub fn set_distance(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    distance: f64,
) -> ToolAction {
    with_lol_tool(state, host, sink, |tool, ctx| tool.set_distance(ctx, distance))
}

pub fn set_offset(
    state: &mut AppState,
    host: &dyn MapHost,
    sink: &mut dyn MessageSink,
    offset: f64,
) -> ToolAction {
    with_lol_tool(state, host, sink, |tool, ctx| tool.set_offset(ctx, offset))
}

pub fn flip(state: &mut AppState) -> ToolAction {
    state.lol_tool.flip()
}

/// Öffnet einen gespeicherten Abschnitt im Edit-Modus.
pub fn start_edit(state: &mut AppState, pk: i64, lol: LolFeature) {
    state.lol_tool.start_edit(pk, lol);
}
