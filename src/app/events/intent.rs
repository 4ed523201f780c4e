use super::super::state::ActiveTool;
use crate::features::{Endpoint, LolFeature, LrMode, PolFeature};
use crate::host::{Modifiers, MouseEvent};
use crate::shared::LrOptions;

use crate::app::tools::StepDirection;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus Host/UI ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Werkzeug in der Toolbar gewählt
    ToolSelected { tool: ActiveTool },
    /// Werkzeug vom Host deaktiviert
    ToolDeactivated,

    /// Mausbewegung auf der Karte (inkl. Snap-Treffer)
    MouseMoved { event: MouseEvent },
    /// Klick auf die Karte
    MouseClicked { event: MouseEvent },
    /// Drag-Lifecycle Start
    DragStarted { event: MouseEvent },
    /// Drag-Lifecycle Update
    DragMoved { event: MouseEvent },
    /// Drag-Lifecycle Ende
    DragEnded,

    /// Stationierung des PoL im Formular geändert
    PointStationingEdited { value: f64, mode: LrMode },
    /// Stationierung eines LoL-Endpunkts im Formular geändert
    EndpointStationingEdited {
        endpoint: Endpoint,
        value: f64,
        mode: LrMode,
    },
    /// Punkt bzw. Abschnitt an den Linienanfang
    MoveToStartRequested,
    /// Punkt bzw. Abschnitt an das Linienende
    MoveToEndRequested,
    /// Punkt bzw. Abschnitt um eine Schrittweite verschieben
    StepRequested {
        direction: StepDirection,
        modifiers: Modifiers,
    },
    /// Abschnitt vor sich selbst setzen
    SegmentPrependRequested,
    /// Abschnitt hinter sich selbst setzen
    SegmentAppendRequested,
    /// Länge des Abschnitts im Formular geändert
    DistanceEdited { distance: f64 },
    /// Versatz des Abschnitts geändert
    OffsetEdited { offset: f64 },
    /// Abschnitts-Richtung umkehren
    FlipRequested,

    /// Aktuelles Ergebnis speichern
    CommitRequested,
    /// Bearbeiteten Datensatz löschen
    DeleteRequested,
    /// Escape: Werkzeug zurücksetzen
    CancelRequested,
    /// Gespeicherten PoL zur Bearbeitung öffnen
    EditPolRequested { pk: i64, pol: PolFeature },
    /// Gespeicherten LoL zur Bearbeitung öffnen
    EditLolRequested { pk: i64, lol: LolFeature },

    /// Referenz-Layer in den Einstellungen geändert
    ReferenceLayerChanged { layer_id: Option<String> },
    /// Layer wurde im Host entfernt
    LayerRemoved { layer_id: String },
    /// Projekt geschlossen
    ProjectClosed,
    /// Optionen übernehmen
    OptionsChanged { options: LrOptions },
    /// Optionen aus Datei laden
    OptionsLoadRequested { path: std::path::PathBuf },
    /// Optionen in Datei speichern
    OptionsSaveRequested { path: std::path::PathBuf },
}
