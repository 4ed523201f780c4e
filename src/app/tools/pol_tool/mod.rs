//! Point-on-Line-Werkzeug: misst einen Punkt auf der Referenzlinie.
//!
//! **Ablauf:** Hover zeigt den Snap-Punkt → Klick misst → Stationierung per
//! Formular, Schritt-Tasten oder Drag anpassen → Speichern (INSERT, im
//! Edit-Modus UPDATE).
//!
//! Aufgeteilt in:
//! - `state`      — Zustands-Summentyp, Konstruktor, Zugriffe
//! - `lifecycle`  — MapTool-Implementierung und Punkt-Eingaben
//! - `drag`       — Drag-Logik (Start, Update, Ende)

mod drag;
mod lifecycle;
mod state;

pub use state::{PolTool, PolToolState};
