//! Drag-Logik für das LoL-Werkzeug: Endpunkte oder ganzer Abschnitt.

use super::super::{common, DragState, DragTarget, ToolAction, ToolContext};
use super::segment::Span;
use super::state::LolTool;
use crate::core::LrError;
use crate::features::{Endpoint, LolFeature};
use crate::host::MouseEvent;

/// Startet einen Drag: nächster Endpunkt im Pick-Radius, sonst der Abschnitt
/// selbst, wenn der Snap-Treffer zwischen den Endpunkten liegt.
pub(crate) fn on_drag_start(
    tool: &mut LolTool,
    ctx: &mut ToolContext,
    event: &MouseEvent,
) -> ToolAction {
    let ctx: &ToolContext = ctx;
    let pick_radius = ctx.options.drag_pick_radius;
    let Some((lol, drag)) = tool.measured_parts() else {
        return ToolAction::Ignored;
    };
    if drag.is_some() {
        return ToolAction::Ignored;
    }
    let (Some(n_from), Some(n_to)) = (lol.pol_from.snap_n_abs, lol.pol_to.snap_n_abs) else {
        return ToolAction::Ignored;
    };

    let endpoint = [Endpoint::From, Endpoint::To]
        .into_iter()
        .filter_map(|endpoint| {
            let distance = common::pick_distance(ctx, lol.pol(endpoint), event)?;
            (distance <= pick_radius).then_some((endpoint, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(endpoint, _)| endpoint);

    let started = match endpoint {
        Some(Endpoint::From) => DragState::new(DragTarget::From, n_from, (n_from, n_to)),
        Some(Endpoint::To) => DragState::new(DragTarget::To, n_to, (n_from, n_to)),
        None => {
            let Ok(pointer) = common::resnap_pol(ctx, &lol.pol_from, event) else {
                return ToolAction::Ignored;
            };
            let Some(n) = pointer.snap_n_abs else {
                return ToolAction::Ignored;
            };
            if n < n_from.min(n_to) || n > n_from.max(n_to) {
                return ToolAction::Ignored;
            }
            DragState::new(DragTarget::Segment, n, (n_from, n_to))
        }
    };

    log::debug!(
        "LoL-Tool: Drag-Start {:?} bei n={:.3}",
        started.target,
        started.origin_n
    );
    *drag = Some(started);
    ToolAction::Updated
}

/// Verschiebt Endpunkt oder Abschnitt; Fehlschläge werden beim Drag-Ende gemeldet.
pub(crate) fn on_drag_update(
    tool: &mut LolTool,
    ctx: &mut ToolContext,
    event: &MouseEvent,
) -> ToolAction {
    let Some((lol, Some(drag))) = tool.measured_parts() else {
        return ToolAction::Ignored;
    };

    let moved = match drag.target {
        DragTarget::From => move_endpoint(ctx, lol, Endpoint::From, event),
        DragTarget::To => move_endpoint(ctx, lol, Endpoint::To, event),
        DragTarget::Segment => move_segment(ctx, lol, drag, event),
        DragTarget::Point => Err(LrError::NoSnap),
    };

    match moved {
        Ok(updated) => {
            *lol = updated;
            drag.failed = None;
            ToolAction::Updated
        }
        Err(e) => {
            drag.failed = Some(e);
            ToolAction::Ignored
        }
    }
}

/// Beendet den Drag; der Abschnitt bleibt an der letzten gültigen Lage.
pub(crate) fn on_drag_end(tool: &mut LolTool, ctx: &mut ToolContext) -> ToolAction {
    let Some((_, drag)) = tool.measured_parts() else {
        return ToolAction::Ignored;
    };
    let Some(finished) = drag.take() else {
        return ToolAction::Ignored;
    };

    log::debug!("LoL-Tool: Drag-Ende {:?}", finished.target);
    match finished.failed {
        Some(error) => ctx.reject(error),
        None => ToolAction::Updated,
    }
}

fn move_endpoint(
    ctx: &ToolContext,
    lol: &LolFeature,
    endpoint: Endpoint,
    event: &MouseEvent,
) -> Result<LolFeature, LrError> {
    let moved = common::resnap_pol(ctx, lol.pol(endpoint), event)?;
    let mut updated = lol.clone();
    updated.set_pol(endpoint, &moved);
    if updated.is_valid {
        Ok(updated)
    } else {
        Err(updated.last_error.unwrap_or(LrError::FidMismatch))
    }
}

/// Beide Enden folgen der Zeigerbewegung entlang der Linie.
fn move_segment(
    ctx: &ToolContext,
    lol: &LolFeature,
    drag: &DragState,
    event: &MouseEvent,
) -> Result<LolFeature, LrError> {
    let pointer = common::pointer_n(ctx, &lol.pol_from, event)?;
    let line_length = lol.pol_from.reference_length(ctx.host)?;
    let span = Span::new(drag.start_n.0, drag.start_n.1, line_length);
    let (n_from, n_to) = span.shifted(pointer - drag.origin_n);

    let mut updated = lol.clone();
    updated.set_n_stationings(ctx.host, n_from, n_to, true)?;
    Ok(updated)
}
