//! Line-on-Line-Werkzeug: misst einen Abschnitt auf der Referenzlinie.
//!
//! **Ablauf:** Klick 1 setzt den Anfang → Hover zeigt die Vorschau auf
//! derselben Linie → Klick 2 setzt das Ende → Endpunkte, Länge, Versatz und
//! Lage bearbeiten → Speichern (INSERT, im Edit-Modus UPDATE).
//!
//! Aufgeteilt in:
//! - `state`      — Zustands-Summentyp, Konstruktor, Zugriffe, Vorschau
//! - `lifecycle`  — MapTool-Implementierung und Endpunkt-Eingaben
//! - `segment`    — Abschnitts-Operationen (verschieben, anhängen, Länge)
//! - `drag`       — Drag-Logik für Endpunkte und ganzen Abschnitt

mod drag;
mod lifecycle;
mod segment;
mod state;

pub use state::{LolTool, LolToolState};

#[cfg(test)]
mod tests;
