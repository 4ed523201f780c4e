use super::super::state::ActiveTool;
use crate::app::tools::StepDirection;
use crate::features::{Endpoint, LolFeature, LrMode, PolFeature};
use crate::host::{Modifiers, MouseEvent};
use crate::shared::LrOptions;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Aktives Werkzeug wechseln
    SetActiveTool { tool: ActiveTool },
    /// Alle Werkzeuge nach `Idle`, gehaltene Punkte verwerfen
    CancelTools,

    /// Aktives Werkzeug: Mausbewegung
    ToolMouseMove { event: MouseEvent },
    /// Aktives Werkzeug: Klick
    ToolClick { event: MouseEvent },
    /// Aktives Werkzeug: Drag beginnen
    ToolDragStart { event: MouseEvent },
    /// Aktives Werkzeug: Drag fortsetzen
    ToolDragUpdate { event: MouseEvent },
    /// Aktives Werkzeug: Drag beenden
    ToolDragEnd,
    /// Aktives Werkzeug: Ergebnis in den Speicher-Ausgang legen
    ToolCommit,
    /// Aktives Werkzeug: Löschauftrag in den Speicher-Ausgang legen
    ToolDelete,
    /// Aktives Werkzeug zurücksetzen
    ToolReset,

    /// PoL: Stationierung setzen
    PolSetStationing { value: f64, mode: LrMode },
    /// PoL: an den Linienanfang
    PolMoveToStart,
    /// PoL: an das Linienende
    PolMoveToEnd,
    /// PoL: Schritt entlang der Linie
    PolStep {
        direction: StepDirection,
        modifiers: Modifiers,
    },
    /// PoL: gespeicherten Datensatz bearbeiten
    PolStartEdit { pk: i64, pol: PolFeature },

    /// LoL: Stationierung eines Endpunkts setzen
    LolSetEndpointStationing {
        endpoint: Endpoint,
        value: f64,
        mode: LrMode,
    },
    /// LoL: Abschnitt an den Linienanfang
    LolMoveSegmentToStart,
    /// LoL: Abschnitt an das Linienende
    LolMoveSegmentToEnd,
    /// LoL: Abschnitt vor sich selbst setzen
    LolPrependSegment,
    /// LoL: Abschnitt hinter sich selbst setzen
    LolAppendSegment,
    /// LoL: Abschnitt um eine Schrittweite verschieben
    LolShiftSegment {
        direction: StepDirection,
        modifiers: Modifiers,
    },
    /// LoL: Länge setzen (Endpunkt wird verschoben)
    LolSetDistance { distance: f64 },
    /// LoL: Versatz setzen
    LolSetOffset { offset: f64 },
    /// LoL: Richtung umkehren
    LolFlip,
    /// LoL: gespeicherten Datensatz bearbeiten
    LolStartEdit { pk: i64, lol: LolFeature },

    /// Referenz-Layer setzen
    SetReferenceLayer { layer_id: Option<String> },
    /// Optionen übernehmen
    ApplyOptions { options: LrOptions },
    /// Optionen aus Datei laden
    LoadOptions { path: std::path::PathBuf },
    /// Optionen in Datei speichern
    SaveOptions { path: std::path::PathBuf },
}
