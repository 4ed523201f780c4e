//! Fehlerarten der Stationierung.
//!
//! `LrError` ist ein reiner Tag (Copy): Prädikate geben ihn als `Err` zurück,
//! PoL/LoL speichern ihn als `last_error` neben `is_valid = false`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnose-Art eines fehlgeschlagenen Stationierungs-Schritts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum LrError {
    /// Referenz-Layer ist kein Linien-Layer
    #[error("Referenz-Layer ist kein (Multi-)LineString-Layer")]
    ReferenceLayerTypeUnsupported,
    /// Referenz-Layer nicht gesetzt oder im Host nicht vorhanden
    #[error("Referenz-Layer nicht gefunden")]
    ReferenceLayerNotFound,
    /// Feature-ID der Referenzlinie fehlt
    #[error("Feature-ID der Referenzlinie nicht gesetzt")]
    ReferenceFidNotSet,
    /// Feature fehlt, hat keine Geometrie oder eine leere Geometrie
    #[error("Referenz-Feature ungültig oder ohne Geometrie")]
    ReferenceFeatureInvalid,
    #[error("Geometrie hat keine M-Werte")]
    GeometryNoM,
    #[error("Geometrie ist mehrteilig")]
    GeometryMultiPart,
    #[error("M-Werte der Geometrie sind nicht streng aufsteigend")]
    GeometryNonMonotonicM,
    /// Mehrteilige Geometrie mit Lücken zwischen den Teilen
    #[error("Geometrie ist nicht zusammenhängend (N-Stationierung nicht möglich)")]
    GeometryNotNValid,
    #[error("Stationierung außerhalb des zulässigen Bereichs")]
    StationingOutOfRange,
    /// Unbekannter Stationierungs-Modus
    #[error("Stationierungs-Modus nicht implementiert")]
    LrModeNotImplemented,
    /// Interpolation lieferte keine Geometrie (deutet auf defekte Daten)
    #[error("Interpolation fehlgeschlagen")]
    InterpolationFailed,
    #[error("Abschnitt konnte nicht aus der Referenzlinie geschnitten werden")]
    CurveSubstringFailed,
    #[error("Parallele Versatzlinie konnte nicht berechnet werden")]
    OffsetCurveFailed,
    /// Kein gültiger Snap auf den Referenz-Layer
    #[error("Kein Snap auf den Referenz-Layer")]
    NoSnap,
    /// Snap traf ein anderes Feature als gefordert
    #[error("Snap auf ein anderes Referenz-Feature")]
    FidMismatch,
    #[error("Authority-ID des Referenz-KBS nicht gesetzt")]
    ReferenceAuthidNotSet,
}

impl LrError {
    /// Stabiler Tag-Name, z.B. für Logging und Host-Meldungen.
    pub fn tag(self) -> &'static str {
        match self {
            LrError::ReferenceLayerTypeUnsupported => "REFERENCE_LAYER_TYPE_UNSUPPORTED",
            LrError::ReferenceLayerNotFound => "REFERENCE_LAYER_NOT_FOUND",
            LrError::ReferenceFidNotSet => "REFERENCE_FID_NOT_SET",
            LrError::ReferenceFeatureInvalid => "REFERENCE_FEATURE_INVALID",
            LrError::GeometryNoM => "GEOMETRY_NO_M",
            LrError::GeometryMultiPart => "GEOMETRY_MULTI_PART",
            LrError::GeometryNonMonotonicM => "GEOMETRY_NON_MONOTONIC_M",
            LrError::GeometryNotNValid => "GEOMETRY_NOT_N_VALID",
            LrError::StationingOutOfRange => "STATIONING_OUT_OF_RANGE",
            LrError::LrModeNotImplemented => "LR_MODE_NOT_IMPLEMENTED",
            LrError::InterpolationFailed => "INTERPOLATION_FAILED",
            LrError::CurveSubstringFailed => "CURVE_SUBSTRING_FAILED",
            LrError::OffsetCurveFailed => "OFFSET_CURVE_FAILED",
            LrError::NoSnap => "NO_SNAP",
            LrError::FidMismatch => "FID_MISMATCH",
            LrError::ReferenceAuthidNotSet => "REFERENCE_AUTHID_NOT_SET",
        }
    }
}
