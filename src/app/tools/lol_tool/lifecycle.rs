//! Lifecycle-Methoden des LolTool (MapTool-Implementierung) und Endpunkt-Eingaben.

use super::super::{common, MapTool, ToolAction, ToolContext, ToolRecord};
use super::drag;
use super::state::{LolTool, LolToolState};
use crate::app::events::{CommitKind, CommitRecord, CommitRequest};
use crate::core::LrError;
use crate::features::{Endpoint, LolFeature, LrMode};
use crate::host::MouseEvent;

impl MapTool for LolTool {
    fn name(&self) -> &str {
        "Linie auf Linie"
    }

    fn status_text(&self) -> &str {
        match &self.state {
            LolToolState::Idle => "Anfangspunkt auf Referenzlinie klicken",
            LolToolState::AwaitingTo { .. } => "Endpunkt auf derselben Linie klicken",
            LolToolState::Measured { drag: Some(_), .. } | LolToolState::Edit { drag: Some(_), .. } => {
                "Abschnitt entlang der Linie ziehen"
            }
            LolToolState::Measured { .. } => "Abschnitt bearbeiten, ziehen oder speichern",
            LolToolState::Edit { .. } => "Datensatz bearbeiten, Speichern aktualisiert",
        }
    }

    fn on_mouse_move(&mut self, ctx: &mut ToolContext, event: &MouseEvent) -> ToolAction {
        if self.is_dragging() {
            return drag::on_drag_update(self, ctx, event);
        }

        let LolToolState::AwaitingTo { from, hover } = &mut self.state else {
            return ToolAction::Ignored;
        };
        match common::snap_new_pol(ctx, event, from.ref_fid) {
            Ok(pol) => {
                *hover = Some(pol);
                ToolAction::Updated
            }
            // Hover ohne Treffer auf derselben Linie ist kein Fehler
            Err(_) => {
                if hover.take().is_some() {
                    ToolAction::Updated
                } else {
                    ToolAction::Ignored
                }
            }
        }
    }

    fn on_click(&mut self, ctx: &mut ToolContext, event: &MouseEvent) -> ToolAction {
        match &self.state {
            LolToolState::Idle => match common::snap_new_pol(ctx, event, None) {
                Ok(from) => {
                    log::debug!(
                        "LoL-Tool: Anfang fid={:?} n={:?}",
                        from.ref_fid,
                        from.snap_n_abs
                    );
                    self.state = LolToolState::AwaitingTo { from, hover: None };
                    ToolAction::Updated
                }
                Err(e) => ctx.reject(e),
            },
            LolToolState::AwaitingTo { from, .. } => {
                let to = match common::snap_new_pol(ctx, event, from.ref_fid) {
                    Ok(to) => to,
                    Err(e) => return ctx.reject(e),
                };
                let lol = LolFeature::from_pols(from.clone(), to, ctx.options.default_offset);
                if !lol.is_valid {
                    return ctx.reject(lol.last_error.unwrap_or(LrError::FidMismatch));
                }
                log::debug!("LoL-Tool: gemessen, Länge {:?}", lol.distance());
                self.state = LolToolState::Measured { lol, drag: None };
                ToolAction::Measured
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
            LolToolState::Measured { lol, drag: None } => {
                CommitRequest::insert(CommitRecord::Lol(lol.clone()))
            }
            LolToolState::Edit {
                pk,
                lol,
                drag: None,
            } => CommitRequest::update(*pk, CommitRecord::Lol(lol.clone())),
            _ => return None,
        };

        if let Some(error) = request.invalid_reason() {
            ctx.reject(error);
            return None;
        }
        log::info!("LoL-Tool: {:?} angefordert", request.kind);
        if request.kind == CommitKind::Insert {
            self.state = LolToolState::Idle;
        }
        Some(request)
    }

    fn delete(&mut self, _ctx: &mut ToolContext) -> Option<CommitRequest> {
        if self.edit_pk().is_none() {
            return None;
        }
        let LolToolState::Edit { pk, lol, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        log::info!("LoL-Tool: Löschen pk={} angefordert", pk);
        Some(CommitRequest::delete(pk, CommitRecord::Lol(lol)))
    }

    fn reset(&mut self) {
        if !matches!(self.state, LolToolState::Idle) {
            log::debug!("LoL-Tool: zurück zu Idle");
        }
        self.state = LolToolState::Idle;
    }

    fn has_pending_input(&self) -> bool {
        !matches!(self.state, LolToolState::Idle)
    }

    fn record(&self) -> Option<ToolRecord<'_>> {
        match &self.state {
            LolToolState::Idle => None,
            LolToolState::AwaitingTo { from, .. } => Some(ToolRecord::Pol(from)),
            LolToolState::Measured { lol, .. } | LolToolState::Edit { lol, .. } => {
                Some(ToolRecord::Lol(lol))
            }
        }
    }
}

impl LolTool {
    /// Stationiert einen Endpunkt neu (Formular-Eingabe), ohne Begrenzung.
    pub fn set_endpoint_stationing(
        &mut self,
        ctx: &mut ToolContext,
        endpoint: Endpoint,
        value: f64,
        mode: LrMode,
    ) -> ToolAction {
        let Some((lol, drag)) = self.measured_parts() else {
            return ToolAction::Ignored;
        };
        if drag.is_some() {
            return ToolAction::Ignored;
        }

        let mut updated = lol.clone();
        match updated.recalc_endpoint(
            ctx.host,
            endpoint,
            value,
            mode,
            ctx.options.sync_canvas_on_edit,
        ) {
            Ok(()) => {
                *lol = updated;
                ToolAction::Updated
            }
            Err(e) => ctx.reject(e),
        }
    }

    /// Vertauscht Anfang und Ende.
    pub fn flip(&mut self) -> ToolAction {
        match self.measured_parts() {
            Some((lol, None)) => {
                lol.flip();
                ToolAction::Updated
            }
            _ => ToolAction::Ignored,
        }
    }

    /// Setzt den seitlichen Versatz (positiv = links).
    ///
    /// NaN und ±∞ werden abgelehnt, der bisherige Versatz bleibt.
    pub fn set_offset(&mut self, ctx: &mut ToolContext, offset: f64) -> ToolAction {
        if !offset.is_finite() {
            return ctx.reject(LrError::OffsetCurveFailed);
        }
        match self.measured_parts() {
            Some((lol, _)) => {
                lol.set_offset(offset);
                ToolAction::Updated
            }
            None => ToolAction::Ignored,
        }
    }
}
