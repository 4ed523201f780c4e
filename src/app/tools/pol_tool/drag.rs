//! Drag-Logik für das PoL-Werkzeug.

use super::super::{common, DragState, DragTarget, ToolAction, ToolContext};
use super::state::PolTool;
use crate::host::MouseEvent;

/// Startet einen Drag, wenn die Maus nahe am gemessenen Punkt ist.
pub(crate) fn on_drag_start(
    tool: &mut PolTool,
    ctx: &mut ToolContext,
    event: &MouseEvent,
) -> ToolAction {
    let pick_radius = ctx.options.drag_pick_radius;
    let Some((pol, drag)) = tool.measured_parts() else {
        return ToolAction::Ignored;
    };
    if drag.is_some() {
        return ToolAction::Ignored;
    }

    let within = common::pick_distance(ctx, pol, event).is_some_and(|d| d <= pick_radius);
    let Some(n) = pol.snap_n_abs.filter(|_| within) else {
        return ToolAction::Ignored;
    };

    log::debug!("PoL-Tool: Drag-Start bei n={:.3}", n);
    *drag = Some(DragState::new(DragTarget::Point, n, (n, n)));
    ToolAction::Updated
}

/// Verschiebt den Punkt auf den Snap-Treffer derselben Linie.
///
/// Fehlschläge werden gemerkt und erst beim Drag-Ende gemeldet.
pub(crate) fn on_drag_update(
    tool: &mut PolTool,
    ctx: &mut ToolContext,
    event: &MouseEvent,
) -> ToolAction {
    let Some((pol, Some(drag))) = tool.measured_parts() else {
        return ToolAction::Ignored;
    };

    match common::resnap_pol(ctx, pol, event) {
        Ok(moved) => {
            *pol = moved;
            drag.failed = None;
            ToolAction::Updated
        }
        Err(e) => {
            drag.failed = Some(e);
            ToolAction::Ignored
        }
    }
}

/// Beendet den Drag; der Punkt bleibt an der letzten gültigen Position.
pub(crate) fn on_drag_end(tool: &mut PolTool, ctx: &mut ToolContext) -> ToolAction {
    let Some((_, drag)) = tool.measured_parts() else {
        return ToolAction::Ignored;
    };
    let Some(finished) = drag.take() else {
        return ToolAction::Ignored;
    };

    log::debug!("PoL-Tool: Drag-Ende");
    match finished.failed {
        Some(error) => ctx.reject(error),
        None => ToolAction::Updated,
    }
}
