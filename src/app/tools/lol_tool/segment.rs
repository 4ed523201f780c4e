//! Abschnitts-Operationen des LoL-Werkzeugs.
//!
//! Alle Operationen rechnen in N-Stationierung der Referenzlinie, bleiben auf
//! der Linie und erhalten die Richtung des Abschnitts.

use super::super::{common, StepDirection, ToolAction, ToolContext};
use super::state::LolTool;
use crate::core::LrError;
use crate::features::LolFeature;
use crate::host::Modifiers;

/// Lage eines Abschnitts auf seiner Referenzlinie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Span {
    pub from: f64,
    pub to: f64,
    pub line_length: f64,
}

impl Span {
    pub fn new(from: f64, to: f64, line_length: f64) -> Self {
        Self {
            from,
            to,
            line_length,
        }
    }

    /// Lage eines gültigen Abschnitts.
    pub fn of(ctx: &ToolContext, lol: &LolFeature) -> Result<Self, LrError> {
        if !lol.is_valid {
            return Err(lol.last_error.unwrap_or(LrError::ReferenceFeatureInvalid));
        }
        let (Some(from), Some(to)) = (lol.pol_from.snap_n_abs, lol.pol_to.snap_n_abs) else {
            return Err(LrError::InterpolationFailed);
        };
        let line_length = lol.pol_from.reference_length(ctx.host)?;
        Ok(Self::new(from, to, line_length))
    }

    pub fn lo(&self) -> f64 {
        self.from.min(self.to)
    }

    pub fn hi(&self) -> f64 {
        self.from.max(self.to)
    }

    pub fn len(&self) -> f64 {
        self.hi() - self.lo()
    }

    /// Neue Grenzen `lo..hi` in der ursprünglichen Richtung als `(from, to)`.
    ///
    /// Beide Grenzen werden auf `[0, line_length]` geklemmt, damit Rundung
    /// beim Addieren nicht über das Linienende hinausführt.
    pub fn oriented(&self, lo: f64, hi: f64) -> (f64, f64) {
        let lo = lo.clamp(0.0, self.line_length);
        let hi = hi.clamp(0.0, self.line_length);
        if self.from <= self.to {
            (lo, hi)
        } else {
            (hi, lo)
        }
    }

    /// Verschiebt beide Enden um `delta`, begrenzt durch die Linienenden.
    pub fn shifted(&self, delta: f64) -> (f64, f64) {
        let delta = delta.clamp(-self.lo(), (self.line_length - self.hi()).max(-self.lo()));
        self.oriented(self.lo() + delta, self.hi() + delta)
    }
}

impl LolTool {
    /// Abschnitt an den Linienanfang.
    pub fn move_segment_to_start(&mut self, ctx: &mut ToolContext) -> ToolAction {
        self.update_span(ctx, |span| span.oriented(0.0, span.len()))
    }

    /// Abschnitt an das Linienende.
    pub fn move_segment_to_end(&mut self, ctx: &mut ToolContext) -> ToolAction {
        self.update_span(ctx, |span| {
            span.oriented(span.line_length - span.len(), span.line_length)
        })
    }

    /// Abschnitt um die eigene Länge nach vorn; das untere Ende endet bei 0.
    pub fn prepend_segment(&mut self, ctx: &mut ToolContext) -> ToolAction {
        self.update_span(ctx, |span| {
            span.oriented((span.lo() - span.len()).max(0.0), span.lo())
        })
    }

    /// Abschnitt um die eigene Länge nach hinten; das obere Ende endet an der Linienlänge.
    pub fn append_segment(&mut self, ctx: &mut ToolContext) -> ToolAction {
        self.update_span(ctx, |span| {
            span.oriented(span.hi(), (span.hi() + span.len()).min(span.line_length))
        })
    }

    /// Verschiebt den Abschnitt um eine Schrittweite.
    pub fn shift_segment(
        &mut self,
        ctx: &mut ToolContext,
        direction: StepDirection,
        modifiers: Modifiers,
    ) -> ToolAction {
        let Some(lol) = self.lol() else {
            return ToolAction::Ignored;
        };
        let delta = common::step_distance(ctx, &lol.pol_from, direction, modifiers);
        self.update_span(ctx, |span| span.shifted(delta))
    }

    /// Setzt die Länge; der Endpunkt wird verschoben und bleibt auf der Linie.
    pub fn set_distance(&mut self, ctx: &mut ToolContext, distance: f64) -> ToolAction {
        self.update_span(ctx, |span| {
            (span.from, (span.from + distance).clamp(0.0, span.line_length))
        })
    }

    /// Berechnet neue `(from, to)` und übernimmt sie nur gemeinsam und gültig.
    fn update_span(
        &mut self,
        ctx: &mut ToolContext,
        op: impl FnOnce(&Span) -> (f64, f64),
    ) -> ToolAction {
        let Some((lol, drag)) = self.measured_parts() else {
            return ToolAction::Ignored;
        };
        if drag.is_some() {
            return ToolAction::Ignored;
        }

        let span = match Span::of(ctx, lol) {
            Ok(span) => span,
            Err(e) => return ctx.reject(e),
        };
        let (n_from, n_to) = op(&span);
        log::debug!(
            "LoL-Tool: Abschnitt {:.3}..{:.3} -> {:.3}..{:.3}",
            span.from,
            span.to,
            n_from,
            n_to
        );

        let mut updated = lol.clone();
        match updated.set_n_stationings(ctx.host, n_from, n_to, ctx.options.sync_canvas_on_edit) {
            Ok(()) => {
                *lol = updated;
                ToolAction::Updated
            }
            Err(e) => ctx.reject(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verschieben_begrenzt() {
        let span = Span::new(2.0, 8.0, 20.0);
        assert_eq!(span.shifted(10.0), (12.0, 18.0));
        assert_eq!(span.shifted(30.0), (14.0, 20.0));
        assert_eq!(span.shifted(-5.0), (0.0, 6.0));
    }

    #[test]
    fn test_verschieben_ueber_ende_bleibt_auf_linie() {
        // 5.42 + (23.44 - 5.42) rundet über 23.44
        let span = Span::new(5.13, 5.42, 23.44);
        let (from, to) = span.shifted(100.0);
        assert_eq!(to, 23.44);
        assert!(from <= to);
        assert!((from - 23.15).abs() < 1e-9);
    }

    #[test]
    fn test_richtung_bleibt_erhalten() {
        let span = Span::new(8.0, 2.0, 20.0);
        assert_eq!(span.len(), 6.0);
        assert_eq!(span.shifted(1.0), (9.0, 3.0));
        assert_eq!(span.oriented(0.0, 6.0), (6.0, 0.0));
    }
}
