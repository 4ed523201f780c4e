//! Trait-basierte Karten-Werkzeuge für die Stationierung.
//!
//! Jedes Werkzeug implementiert den `MapTool`-Trait und hält seinen Zustand
//! als Summentyp. Host, Meldungskanal und Optionen werden pro Aufruf über
//! einen `ToolContext` geliehen.

/// Gemeinsame Hilfsfunktionen für Snap, Drag und Schrittweiten.
pub mod common;
/// Line-on-Line-Werkzeug: Abschnitt zwischen zwei Punkten einer Linie.
pub mod lol_tool;
/// MapTool-Trait — Schnittstelle für alle Karten-Werkzeuge.
mod map_tool;
/// Point-on-Line-Werkzeug: einzelner Punkt auf einer Linie.
pub mod pol_tool;

pub use lol_tool::{LolTool, LolToolState};
pub use map_tool::MapTool;
pub use pol_tool::{PolTool, PolToolState};

use serde::{Deserialize, Serialize};

use crate::core::LrError;
use crate::features::{LolFeature, PolFeature};
use crate::host::{MapHost, MessageLevel, MessageSink};
use crate::shared::LrOptions;

// ── Kontext ──────────────────────────────────────────────────────────

/// Pro Aufruf geliehene Umgebung eines Werkzeugs.
pub struct ToolContext<'a> {
    pub host: &'a dyn MapHost,
    pub sink: &'a mut dyn MessageSink,
    pub options: &'a LrOptions,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        host: &'a dyn MapHost,
        sink: &'a mut dyn MessageSink,
        options: &'a LrOptions,
    ) -> Self {
        Self {
            host,
            sink,
            options,
        }
    }

    /// Meldet einen abgelehnten Schritt an den Host.
    pub fn reject(&mut self, error: LrError) -> ToolAction {
        log::warn!("Ereignis abgelehnt: {}", error.tag());
        self.sink.push(MessageLevel::Warning, &error.to_string());
        ToolAction::Rejected(error)
    }

    pub fn info(&mut self, message: &str) {
        log::info!("{}", message);
        self.sink.push(MessageLevel::Info, message);
    }
}

// ── Typen ────────────────────────────────────────────────────────────

/// Rückgabe eines Tool-Handlers — steuert den Tool-Flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    /// Ereignis ohne Wirkung im aktuellen Zustand
    Ignored,
    /// Zustand oder Vorschau aktualisiert
    Updated,
    /// Messung abgeschlossen (Zustand `Measured`)
    Measured,
    /// Ereignis abgelehnt, Zustand unverändert
    Rejected(LrError),
}

/// Was beim Drag bewegt wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    /// Einzelpunkt (PoL)
    Point,
    /// Anfangspunkt eines Abschnitts
    From,
    /// Endpunkt eines Abschnitts
    To,
    /// Ganzer Abschnitt, beide Enden verschieben sich gemeinsam
    Segment,
}

/// Laufender Drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub target: DragTarget,
    /// N-Stationierung des Zeigers beim Drag-Start
    pub origin_n: f64,
    /// Stationierungen (from, to) beim Drag-Start
    pub start_n: (f64, f64),
    /// Fehler des letzten Drag-Updates; wird beim Drag-Ende gemeldet
    pub failed: Option<LrError>,
}

impl DragState {
    pub fn new(target: DragTarget, origin_n: f64, start_n: (f64, f64)) -> Self {
        Self {
            target,
            origin_n,
            start_n,
            failed: None,
        }
    }
}

/// Richtung eines Schritts entlang der Linie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepDirection {
    /// Zum Linienanfang
    Backward,
    /// Zum Linienende
    Forward,
}

impl StepDirection {
    pub fn sign(self) -> f64 {
        match self {
            StepDirection::Backward => -1.0,
            StepDirection::Forward => 1.0,
        }
    }
}

/// Aktuelles Ergebnis eines Werkzeugs zur Anzeige beim Host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolRecord<'a> {
    Pol(&'a PolFeature),
    Lol(&'a LolFeature),
}
