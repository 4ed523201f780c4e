//! Schnittstellen zum einbettenden GIS-Host.
//!
//! Der Kern hält keinen globalen Zustand: Host, KBS-Transformation und
//! Meldungskanal werden jedem Aufruf geliehen übergeben.

pub mod memory;
mod messages;
mod transform;

pub use memory::{MemoryHost, MemoryLayer};
pub use messages::{CollectingSink, LogSink, MessageLevel, MessageSink};
pub use transform::{IdentityTransformer, ScopedTransform};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::{CrsCalibration, DistanceUnit, Polyline, WkbType};

// ── Host-Dienste ────────────────────────────────────────────────────

/// Zugriff auf Layer und Karten-KBS des Hosts.
pub trait MapHost {
    /// Layer-Lookup über die opake Layer-ID.
    fn map_layer(&self, layer_id: &str) -> Option<&dyn ReferenceLayer>;

    /// Authority-ID des Karten-KBS (Canvas).
    fn canvas_authid(&self) -> &str;

    /// KBS-Transformation des Hosts.
    fn transformer(&self) -> &dyn CrsTransformer;
}

/// Vektor-Layer, der als Referenz dienen kann.
pub trait ReferenceLayer {
    fn id(&self) -> &str;

    /// Deklarierter Geometrietyp des Layers.
    fn wkb_type(&self) -> WkbType;

    /// Authority-ID des Layer-KBS, z.B. `"EPSG:25832"`.
    fn crs_authid(&self) -> Option<&str>;

    /// Feature-Lookup über die Feature-ID.
    fn feature(&self, fid: i64) -> Option<&Feature>;
}

/// KBS-Transformation, vom Host bereitgestellt.
pub trait CrsTransformer {
    /// Transformiert einen Punkt von `src_authid` nach `dst_authid`.
    fn transform(&self, src_authid: &str, dst_authid: &str, point: DVec2) -> DVec2;

    /// Grundeinheit eines KBS.
    fn map_units(&self, authid: &str) -> DistanceUnit {
        DistanceUnit::guess_from_authid(authid)
    }
}

/// Kalibrierung (Toleranz, Genauigkeit, Schrittweite) für ein Referenz-KBS.
///
/// Ohne Authority-ID gilt die Kalibrierung für unbekannte Einheiten.
pub fn eval_crs_units(authid: Option<&str>, transformer: &dyn CrsTransformer) -> CrsCalibration {
    authid
        .map(|authid| transformer.map_units(authid).calibration())
        .unwrap_or_default()
}

// ── Werte vom Host ──────────────────────────────────────────────────

/// Feature eines Referenz-Layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub fid: i64,
    geometry: Option<Polyline>,
}

impl Feature {
    pub fn new(fid: i64, geometry: Option<Polyline>) -> Self {
        Self { fid, geometry }
    }

    /// Referenz-Geometrie, falls vorhanden.
    pub fn geometry(&self) -> Option<&Polyline> {
        self.geometry.as_ref()
    }
}

/// Vom Host vorberechneter Snap-Treffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapMatch {
    pub layer_id: String,
    pub fid: i64,
    /// Getroffener Punkt im Karten-KBS
    pub point: DVec2,
    pub is_valid: bool,
}

/// Tastatur-Modifikatoren zum Zeitpunkt des Ereignisses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
}

/// Maus-Ereignis auf der Karte.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    map_point: DVec2,
    snap_match: Option<SnapMatch>,
    modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(map_point: DVec2, snap_match: Option<SnapMatch>) -> Self {
        Self {
            map_point,
            snap_match,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mausposition im Karten-KBS.
    pub fn map_point(&self) -> DVec2 {
        self.map_point
    }

    pub fn snap_match(&self) -> Option<&SnapMatch> {
        self.snap_match.as_ref()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kalibrierung_aus_authid() {
        let cal = eval_crs_units(Some("EPSG:4326"), &IdentityTransformer);
        assert!(cal.is_geographic());
        assert_eq!(cal.display_precision, 5);

        let cal = eval_crs_units(None, &IdentityTransformer);
        assert_eq!(cal.unit, DistanceUnit::Unknown);
    }
}
