//! Lifecycle-Methoden des PolTool (MapTool-Implementierung) und Punkt-Eingaben.

use super::super::{common, MapTool, StepDirection, ToolAction, ToolContext, ToolRecord};
use super::drag;
use super::state::{PolTool, PolToolState};
use crate::app::events::{CommitKind, CommitRecord, CommitRequest};
use crate::core::LrError;
use crate::features::LrMode;
use crate::host::{Modifiers, MouseEvent};

impl MapTool for PolTool {
    fn name(&self) -> &str {
        "Punkt auf Linie"
    }

    fn status_text(&self) -> &str {
        match &self.state {
            PolToolState::Idle => "Referenzlinie anfahren",
            PolToolState::Hovering(_) => "Klicken, um den Punkt zu messen",
            PolToolState::Measured { drag: Some(_), .. } | PolToolState::Edit { drag: Some(_), .. } => {
                "Punkt entlang der Linie ziehen"
            }
            PolToolState::Measured { .. } => "Stationierung bearbeiten, Punkt ziehen oder speichern",
            PolToolState::Edit { .. } => "Datensatz bearbeiten, Speichern aktualisiert",
        }
    }

    fn on_mouse_move(&mut self, ctx: &mut ToolContext, event: &MouseEvent) -> ToolAction {
        if self.is_dragging() {
            return drag::on_drag_update(self, ctx, event);
        }

        match self.state {
            PolToolState::Idle | PolToolState::Hovering(_) => {
                match common::snap_new_pol(ctx, event, None) {
                    Ok(pol) => {
                        self.state = PolToolState::Hovering(pol);
                        ToolAction::Updated
                    }
                    // Hover ohne Treffer ist kein Fehler
                    Err(_) => {
                        let was_hovering = matches!(self.state, PolToolState::Hovering(_));
                        self.state = PolToolState::Idle;
                        if was_hovering {
                            ToolAction::Updated
                        } else {
                            ToolAction::Ignored
                        }
                    }
                }
            }
            _ => ToolAction::Ignored,
        }
    }

    fn on_click(&mut self, ctx: &mut ToolContext, event: &MouseEvent) -> ToolAction {
        match self.state {
            PolToolState::Idle | PolToolState::Hovering(_) => {
                match common::snap_new_pol(ctx, event, None) {
                    Ok(pol) => {
                        log::debug!(
                            "PoL-Tool: gemessen fid={:?} n={:?}",
                            pol.ref_fid,
                            pol.snap_n_abs
                        );
                        self.state = PolToolState::Measured { pol, drag: None };
                        ToolAction::Measured
                    }
                    Err(e) => ctx.reject(e),
                }
            }
            _ => ToolAction::Ignored,
        }
    }

    fn drag_start(&mut self, ctx: &mut ToolContext, event: &MouseEvent) -> ToolAction {
        drag::on_drag_start(self, ctx, event)
    }

    fn drag_end(&mut self, ctx: &mut ToolContext) -> ToolAction {
        drag::on_drag_end(self, ctx)
    }

    fn commit(&mut self, ctx: &mut ToolContext) -> Option<CommitRequest> {
        let request = match &self.state {
            PolToolState::Measured { pol, drag: None } => {
                CommitRequest::insert(CommitRecord::Pol(pol.clone()))
            }
            PolToolState::Edit {
                pk,
                pol,
                drag: None,
            } => CommitRequest::update(*pk, CommitRecord::Pol(pol.clone())),
            _ => return None,
        };

        if let Some(error) = request.invalid_reason() {
            ctx.reject(error);
            return None;
        }
        log::info!("PoL-Tool: {:?} angefordert", request.kind);
        // Nach INSERT ist der Punkt gespeichert, Edit bleibt offen
        if request.kind == CommitKind::Insert {
            self.state = PolToolState::Idle;
        }
        Some(request)
    }

    fn delete(&mut self, _ctx: &mut ToolContext) -> Option<CommitRequest> {
        if self.edit_pk().is_none() {
            return None;
        }
        let PolToolState::Edit { pk, pol, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        log::info!("PoL-Tool: Löschen pk={} angefordert", pk);
        Some(CommitRequest::delete(pk, CommitRecord::Pol(pol)))
    }

    fn reset(&mut self) {
        if !matches!(self.state, PolToolState::Idle) {
            log::debug!("PoL-Tool: zurück zu Idle");
        }
        self.state = PolToolState::Idle;
    }

    fn has_pending_input(&self) -> bool {
        self.measured_pol().is_some()
    }

    fn record(&self) -> Option<ToolRecord<'_>> {
        self.pol().map(ToolRecord::Pol)
    }
}

impl PolTool {
    /// Stationiert den gemessenen Punkt neu (Formular-Eingabe).
    ///
    /// Gerechnet wird auf einer Kopie; übernommen wird nur ein gültiges Ergebnis.
    pub fn set_stationing(&mut self, ctx: &mut ToolContext, value: f64, mode: LrMode) -> ToolAction {
        let Some((pol, drag)) = self.measured_parts() else {
            return ToolAction::Ignored;
        };
        if drag.is_some() {
            return ToolAction::Ignored;
        }
        match common::restation(ctx, pol, value, mode) {
            Ok(updated) => {
                *pol = updated;
                ToolAction::Updated
            }
            Err(e) => ctx.reject(e),
        }
    }

    /// Setzt den Punkt an den Linienanfang.
    pub fn move_to_start(&mut self, ctx: &mut ToolContext) -> ToolAction {
        self.set_stationing(ctx, 0.0, LrMode::NAbs)
    }

    /// Setzt den Punkt an das Linienende.
    pub fn move_to_end(&mut self, ctx: &mut ToolContext) -> ToolAction {
        let Some(pol) = self.measured_pol() else {
            return ToolAction::Ignored;
        };
        match pol.reference_length(ctx.host) {
            Ok(length) => self.set_stationing(ctx, length, LrMode::NAbs),
            Err(e) => ctx.reject(e),
        }
    }

    /// Verschiebt den Punkt um eine Schrittweite; das Ergebnis bleibt auf der Linie.
    pub fn step(
        &mut self,
        ctx: &mut ToolContext,
        direction: StepDirection,
        modifiers: Modifiers,
    ) -> ToolAction {
        let Some(pol) = self.measured_pol() else {
            return ToolAction::Ignored;
        };
        let length = match pol.reference_length(ctx.host) {
            Ok(length) => length,
            Err(e) => return ctx.reject(e),
        };
        let Some(n) = pol.snap_n_abs else {
            return ctx.reject(pol.last_error.unwrap_or(LrError::InterpolationFailed));
        };

        let delta = common::step_distance(ctx, pol, direction, modifiers);
        let target = (n + delta).clamp(0.0, length);
        self.set_stationing(ctx, target, LrMode::NAbs)
    }
}
