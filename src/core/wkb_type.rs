//! Geometrietyp eines Layers bzw. einer Geometrie im WKB-Sinne.

use serde::{Deserialize, Serialize};

/// Grundtyp ohne Dimensionen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    /// Layer ohne Geometrie (reine Tabelle)
    NoGeometry,
    Unknown,
}

impl GeometryKind {
    fn from_base_code(code: u32) -> Self {
        match code {
            1 => GeometryKind::Point,
            2 => GeometryKind::LineString,
            3 => GeometryKind::Polygon,
            4 => GeometryKind::MultiPoint,
            5 => GeometryKind::MultiLineString,
            6 => GeometryKind::MultiPolygon,
            7 => GeometryKind::GeometryCollection,
            100 => GeometryKind::NoGeometry,
            _ => GeometryKind::Unknown,
        }
    }

    fn base_code(self) -> u32 {
        match self {
            GeometryKind::Point => 1,
            GeometryKind::LineString => 2,
            GeometryKind::Polygon => 3,
            GeometryKind::MultiPoint => 4,
            GeometryKind::MultiLineString => 5,
            GeometryKind::MultiPolygon => 6,
            GeometryKind::GeometryCollection => 7,
            GeometryKind::NoGeometry => 100,
            GeometryKind::Unknown => 0,
        }
    }
}

/// Geometrietyp inkl. Z/M-Flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WkbType {
    pub kind: GeometryKind,
    pub has_z: bool,
    pub has_m: bool,
}

/// EWKB-Flag für Z (auch "25D"-Codes, z.B. `0x80000002`)
pub const EWKB_Z_FLAG: u32 = 0x8000_0000;
/// EWKB-Flag für M
pub const EWKB_M_FLAG: u32 = 0x4000_0000;
/// EWKB-Flag für eingebettete SRID
pub const EWKB_SRID_FLAG: u32 = 0x2000_0000;

impl WkbType {
    pub fn new(kind: GeometryKind, has_z: bool, has_m: bool) -> Self {
        Self { kind, has_z, has_m }
    }

    pub fn line_string(has_z: bool, has_m: bool) -> Self {
        Self::new(GeometryKind::LineString, has_z, has_m)
    }

    pub fn multi_line_string(has_z: bool, has_m: bool) -> Self {
        Self::new(GeometryKind::MultiLineString, has_z, has_m)
    }

    /// Dekodiert einen Typ-Code (ISO, EWKB-Flags und 25D werden erkannt).
    pub fn from_code(code: u32) -> Self {
        let mut has_z = code & EWKB_Z_FLAG != 0;
        let mut has_m = code & EWKB_M_FLAG != 0;
        let iso = code & !(EWKB_Z_FLAG | EWKB_M_FLAG | EWKB_SRID_FLAG);

        let base = match iso / 1000 {
            1 => {
                has_z = true;
                iso - 1000
            }
            2 => {
                has_m = true;
                iso - 2000
            }
            3 => {
                has_z = true;
                has_m = true;
                iso - 3000
            }
            _ => iso,
        };

        Self::new(GeometryKind::from_base_code(base), has_z, has_m)
    }

    /// ISO-Typ-Code (z.B. 3002 für LineStringZM).
    pub fn iso_code(&self) -> u32 {
        let offset = match (self.has_z, self.has_m) {
            (false, false) => 0,
            (true, false) => 1000,
            (false, true) => 2000,
            (true, true) => 3000,
        };
        self.kind.base_code() + offset
    }

    /// `true` für LineString und MultiLineString in allen Dimensionen.
    pub fn is_line(&self) -> bool {
        matches!(
            self.kind,
            GeometryKind::LineString | GeometryKind::MultiLineString
        )
    }

    pub fn is_multi(&self) -> bool {
        matches!(
            self.kind,
            GeometryKind::MultiPoint
                | GeometryKind::MultiLineString
                | GeometryKind::MultiPolygon
                | GeometryKind::GeometryCollection
        )
    }
}
