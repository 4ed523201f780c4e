//! Handler für Optionen und Referenz-Layer.

use std::path::Path;

use crate::app::AppState;
use crate::shared::LrOptions;

/// Übernimmt neue Optionen.
pub fn apply(state: &mut AppState, options: LrOptions) {
    log::debug!("Optionen übernommen: {:?}", options);
    state.options = options;
}

/// Setzt den Referenz-Layer für neue Messungen.
pub fn set_reference_layer(state: &mut AppState, layer_id: Option<String>) {
    log::info!("Referenz-Layer: {:?}", layer_id);
    state.options.reference_layer_id = layer_id;
}

/// Lädt Optionen aus einer TOML-Datei (Fallback auf Standardwerte).
pub fn load(state: &mut AppState, path: &Path) {
    state.options = LrOptions::load_from_file(path);
}

/// Speichert die aktuellen Optionen.
pub fn save(state: &AppState, path: &Path) -> anyhow::Result<()> {
    state.options.save_to_file(path)
}
