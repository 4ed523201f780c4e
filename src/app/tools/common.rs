//! Gemeinsame Hilfsfunktionen für PoL- und LoL-Werkzeug.

use crate::core::LrError;
use crate::features::{GeomSource, LrMode, PolFeature};
use crate::host::{Modifiers, MouseEvent};

use super::{StepDirection, ToolContext};

/// Layer-ID der Referenzlinien aus den Optionen.
pub(crate) fn reference_layer_id<'a>(ctx: &'a ToolContext) -> Result<&'a str, LrError> {
    ctx.options
        .reference_layer_id
        .as_deref()
        .ok_or(LrError::ReferenceLayerNotFound)
}

/// Neuer PoL aus dem Snap-Treffer des Ereignisses.
pub(crate) fn snap_new_pol(
    ctx: &ToolContext,
    event: &MouseEvent,
    filter_fid: Option<i64>,
) -> Result<PolFeature, LrError> {
    let layer_id = reference_layer_id(ctx)?;
    let mut pol = PolFeature::new();
    if pol.snap_to_layer(ctx.host, event, layer_id, filter_fid) {
        Ok(pol)
    } else {
        Err(pol.last_error.unwrap_or(LrError::NoSnap))
    }
}

/// Verschiebt eine Kopie von `pol` auf den Snap-Treffer, beschränkt auf dieselbe Linie.
pub(crate) fn resnap_pol(
    ctx: &ToolContext,
    pol: &PolFeature,
    event: &MouseEvent,
) -> Result<PolFeature, LrError> {
    if pol.geom_source != GeomSource::RefFid {
        return Err(LrError::NoSnap);
    }
    let layer_id = pol
        .ref_layer_id
        .as_deref()
        .ok_or(LrError::ReferenceLayerNotFound)?;
    let fid = pol.ref_fid.ok_or(LrError::ReferenceFidNotSet)?;

    let mut moved = pol.clone();
    if moved.snap_to_layer(ctx.host, event, layer_id, Some(fid)) {
        Ok(moved)
    } else {
        Err(moved.last_error.unwrap_or(LrError::NoSnap))
    }
}

/// N-Stationierung der Mausposition auf der Linie von `pol`, unabhängig vom Abstand.
pub(crate) fn pointer_n(
    ctx: &ToolContext,
    pol: &PolFeature,
    event: &MouseEvent,
) -> Result<f64, LrError> {
    let layer_id = pol
        .ref_layer_id
        .as_deref()
        .ok_or(LrError::ReferenceLayerNotFound)?;
    let fid = pol.ref_fid.ok_or(LrError::ReferenceFidNotSet)?;

    let mut probe = pol.clone();
    if !probe.line_locate_event(ctx.host, event, layer_id, fid) {
        return Err(probe.last_error.unwrap_or(LrError::ReferenceFeatureInvalid));
    }
    probe.snap_n_abs.ok_or(LrError::InterpolationFailed)
}

/// Kartenabstand zwischen Mausposition und Punkt auf der Linie.
pub(crate) fn pick_distance(ctx: &ToolContext, pol: &PolFeature, event: &MouseEvent) -> Option<f64> {
    let point = pol.canvas_point(ctx.host).ok()?;
    Some(point.distance(event.map_point()))
}

/// Schrittweite entlang der Linie: Standard-Schritt des KBS × Modifikator-Faktor.
pub(crate) fn step_distance(
    ctx: &ToolContext,
    pol: &PolFeature,
    direction: StepDirection,
    modifiers: Modifiers,
) -> f64 {
    let calibration = pol.calibration(ctx.host);
    calibration.default_step * ctx.options.step_factor(modifiers) * direction.sign()
}

/// Stationiert eine Kopie neu; übernommen wird nur ein gültiges Ergebnis.
pub(crate) fn restation(
    ctx: &ToolContext,
    pol: &PolFeature,
    value: f64,
    mode: LrMode,
) -> Result<PolFeature, LrError> {
    let mut updated = pol.clone();
    if updated.recalc_by_stationing(ctx.host, value, mode, ctx.options.sync_canvas_on_edit) {
        Ok(updated)
    } else {
        Err(updated.last_error.unwrap_or(LrError::InterpolationFailed))
    }
}
