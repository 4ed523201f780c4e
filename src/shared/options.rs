//! Zentrale Konfiguration der Stationierungs-Werkzeuge.
//!
//! `LrOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::host::Modifiers;

// ── Tools ───────────────────────────────────────────────────────────

/// Snap-Toleranz des In-Memory-Hosts (Layer-Einheiten).
pub const SNAP_TOLERANCE: f64 = 5.0;
/// Pick-Radius für Drag-Starts (Karten-Einheiten).
pub const DRAG_PICK_RADIUS: f64 = 3.0;

// ── Schrittweiten ───────────────────────────────────────────────────

/// Multiplikator der Schrittweite mit gedrückter Strg-Taste.
pub const STEP_FACTOR_CTRL: f64 = 10.0;
/// Multiplikator der Schrittweite mit gedrückter Shift-Taste.
pub const STEP_FACTOR_SHIFT: f64 = 100.0;
/// Multiplikator der Schrittweite mit Strg + Shift.
pub const STEP_FACTOR_CTRL_SHIFT: f64 = 1000.0;

// ── Abschnitte ──────────────────────────────────────────────────────

/// Standard-Versatz neuer Abschnitte.
pub const DEFAULT_OFFSET: f64 = 0.0;

/// Laufzeit-Optionen (persistiert als TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LrOptions {
    /// Layer-ID der Referenzlinien
    pub reference_layer_id: Option<String>,
    /// Versatz für neu gemessene Abschnitte
    pub default_offset: f64,
    pub step_factor_ctrl: f64,
    pub step_factor_shift: f64,
    pub step_factor_ctrl_shift: f64,
    /// Pick-Radius für Drag-Starts (Karten-Einheiten)
    pub drag_pick_radius: f64,
    /// Snap-Toleranz für den In-Memory-Host
    pub snap_tolerance: f64,
    /// Kartenposition bei numerischen Eingaben mitführen
    pub sync_canvas_on_edit: bool,
}

impl Default for LrOptions {
    fn default() -> Self {
        Self {
            reference_layer_id: None,
            default_offset: DEFAULT_OFFSET,
            step_factor_ctrl: STEP_FACTOR_CTRL,
            step_factor_shift: STEP_FACTOR_SHIFT,
            step_factor_ctrl_shift: STEP_FACTOR_CTRL_SHIFT,
            drag_pick_radius: DRAG_PICK_RADIUS,
            snap_tolerance: SNAP_TOLERANCE,
            sync_canvas_on_edit: true,
        }
    }
}

impl LrOptions {
    /// Lädt Optionen aus einer TOML-Datei, Fallback auf Defaults.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Multiplikator der Schrittweite für die gedrückten Modifikatoren.
    pub fn step_factor(&self, modifiers: Modifiers) -> f64 {
        match (modifiers.ctrl, modifiers.shift) {
            (false, false) => 1.0,
            (true, false) => self.step_factor_ctrl,
            (false, true) => self.step_factor_shift,
            (true, true) => self.step_factor_ctrl_shift,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lr_options_{}_{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_speichern_und_laden() {
        let path = temp_path("roundtrip");
        let opts = LrOptions {
            reference_layer_id: Some("roads".into()),
            default_offset: -2.5,
            sync_canvas_on_edit: false,
            ..LrOptions::default()
        };
        opts.save_to_file(&path).expect("Speichern erwartet");

        let loaded = LrOptions::load_from_file(&path);
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_fehlende_felder_nutzen_defaults() {
        let opts: LrOptions = toml::from_str("default_offset = 3.0").expect("TOML erwartet");
        assert_eq!(opts.default_offset, 3.0);
        assert_eq!(opts.step_factor_shift, STEP_FACTOR_SHIFT);
        assert!(opts.reference_layer_id.is_none());
    }

    #[test]
    fn test_fehlerhafte_datei_liefert_defaults() {
        let path = temp_path("broken");
        std::fs::write(&path, "default_offset = [").expect("Schreiben erwartet");
        assert_eq!(LrOptions::load_from_file(&path), LrOptions::default());
        let _ = std::fs::remove_file(&path);

        assert_eq!(
            LrOptions::load_from_file(&temp_path("missing")),
            LrOptions::default()
        );
    }

    #[test]
    fn test_schrittfaktoren() {
        let opts = LrOptions::default();
        assert_eq!(opts.step_factor(Modifiers::NONE), 1.0);
        assert_eq!(
            opts.step_factor(Modifiers {
                ctrl: true,
                shift: true
            }),
            1000.0
        );
    }
}
