//! MapTool-Trait — Schnittstelle für alle Karten-Werkzeuge.

use crate::app::events::CommitRequest;
use crate::host::MouseEvent;

use super::{ToolAction, ToolContext, ToolRecord};

/// Schnittstelle für die Karten-Werkzeuge (PoL, LoL).
///
/// Werkzeuge sind zustandsbehaftet und verarbeiten Ereignisse synchron in
/// Eingangsreihenfolge. Ein fehlgeschlagenes Ereignis ändert den Zustand nicht.
pub trait MapTool {
    /// Anzeigename für Toolbar
    fn name(&self) -> &str;

    /// Statustext (z.B. "Punkt auf Referenzlinie klicken")
    fn status_text(&self) -> &str;

    /// Mausbewegung (Hover, Drag-Update).
    fn on_mouse_move(&mut self, ctx: &mut ToolContext, event: &MouseEvent) -> ToolAction;

    /// Klick auf die Karte.
    fn on_click(&mut self, ctx: &mut ToolContext, event: &MouseEvent) -> ToolAction;

    /// Drag beginnt an der Mausposition.
    fn drag_start(&mut self, ctx: &mut ToolContext, event: &MouseEvent) -> ToolAction;

    /// Drag-Update; identisch zu `on_mouse_move` während eines Drags.
    fn drag_update(&mut self, ctx: &mut ToolContext, event: &MouseEvent) -> ToolAction {
        self.on_mouse_move(ctx, event)
    }

    /// Drag endet; Fehler des letzten Updates werden jetzt gemeldet.
    fn drag_end(&mut self, ctx: &mut ToolContext) -> ToolAction;

    /// Aktuelles Ergebnis als Speicher-Auftrag (INSERT bzw. UPDATE im Edit-Modus).
    fn commit(&mut self, ctx: &mut ToolContext) -> Option<CommitRequest>;

    /// Löscht den bearbeiteten Datensatz (nur im Edit-Modus).
    fn delete(&mut self, ctx: &mut ToolContext) -> Option<CommitRequest>;

    /// Zustand zurücksetzen (Escape).
    fn reset(&mut self);

    /// Abbruch von außen (Tool-Wechsel, Layer entfernt, Projekt geschlossen).
    fn cancel(&mut self) {
        self.reset();
    }

    /// Hat das Werkzeug angefangene Eingaben?
    fn has_pending_input(&self) -> bool;

    /// Aktuelles Ergebnis zur Anzeige.
    fn record(&self) -> Option<ToolRecord<'_>>;
}
