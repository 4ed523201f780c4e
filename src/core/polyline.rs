//! Polylinie (LineString / MultiLineString) mit einheitlichen Z/M-Flags.

use serde::{Deserialize, Serialize};

use super::{GeometryKind, LrError, Vertex, WkbType};

/// Ein- oder mehrteilige Polylinie.
///
/// Invarianten: mindestens ein Teil, jeder Teil mit ≥ 2 Stützpunkten,
/// Z/M einheitlich für alle Stützpunkte. Die Konstruktoren prüfen das und
/// liefern sonst `LrError::ReferenceFeatureInvalid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolylineRepr")]
pub struct Polyline {
    parts: Vec<Vec<Vertex>>,
    multi: bool,
    has_z: bool,
    has_m: bool,
}

impl Polyline {
    /// Erstellt einen einteiligen LineString.
    pub fn line_string(vertices: Vec<Vertex>) -> Result<Self, LrError> {
        Self::build(vec![vertices], false)
    }

    /// Erstellt einen MultiLineString aus mehreren Teilen.
    pub fn multi_line_string(parts: Vec<Vec<Vertex>>) -> Result<Self, LrError> {
        Self::build(parts, true)
    }

    /// Erstellt einen 2D-LineString aus Koordinaten-Paaren.
    pub fn from_xy(coords: &[(f64, f64)]) -> Result<Self, LrError> {
        Self::line_string(coords.iter().map(|&(x, y)| Vertex::new(x, y)).collect())
    }

    /// Erstellt einen LineStringM aus `(x, y, m)`-Tripeln.
    pub fn from_xym(coords: &[(f64, f64, f64)]) -> Result<Self, LrError> {
        Self::line_string(
            coords
                .iter()
                .map(|&(x, y, m)| Vertex::xym(x, y, m))
                .collect(),
        )
    }

    fn build(parts: Vec<Vec<Vertex>>, multi: bool) -> Result<Self, LrError> {
        let first = parts
            .first()
            .and_then(|part| part.first())
            .ok_or(LrError::ReferenceFeatureInvalid)?;
        let has_z = first.z.is_some();
        let has_m = first.m.is_some();

        for part in &parts {
            if part.len() < 2 {
                return Err(LrError::ReferenceFeatureInvalid);
            }
            let uniform = part
                .iter()
                .all(|v| v.z.is_some() == has_z && v.m.is_some() == has_m);
            if !uniform {
                return Err(LrError::ReferenceFeatureInvalid);
            }
        }

        Ok(Self {
            parts,
            multi,
            has_z,
            has_m,
        })
    }

    /// Alle Teile in Reihenfolge.
    pub fn parts(&self) -> &[Vec<Vertex>] {
        &self.parts
    }

    /// Stützpunkte, falls die Geometrie genau einen Teil hat.
    pub fn single_part(&self) -> Option<&[Vertex]> {
        match self.parts.as_slice() {
            [only] => Some(only.as_slice()),
            _ => None,
        }
    }

    /// Alle Stützpunkte über alle Teile hinweg.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.parts.iter().flatten()
    }

    /// `true` bei MultiLineString (auch mit nur einem Teil).
    pub fn is_multi(&self) -> bool {
        self.multi
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(Vec::len).sum()
    }

    pub fn has_z(&self) -> bool {
        self.has_z
    }

    pub fn has_m(&self) -> bool {
        self.has_m
    }

    /// WKB-Typ dieser Geometrie.
    pub fn wkb_type(&self) -> WkbType {
        let kind = if self.multi {
            GeometryKind::MultiLineString
        } else {
            GeometryKind::LineString
        };
        WkbType::new(kind, self.has_z, self.has_m)
    }

    /// Summe der 2D-Segmentlängen über alle Teile (Lücken zählen nicht).
    pub fn length(&self) -> f64 {
        self.parts.iter().map(|part| part_length(part)).sum()
    }

    /// Erster Stützpunkt des ersten Teils.
    pub fn first_vertex(&self) -> Option<&Vertex> {
        self.parts.first().and_then(|part| part.first())
    }

    /// Letzter Stützpunkt des letzten Teils.
    pub fn last_vertex(&self) -> Option<&Vertex> {
        self.parts.last().and_then(|part| part.last())
    }

    /// Zerlegt die Polylinie in ihre Teile.
    pub fn into_parts(self) -> Vec<Vec<Vertex>> {
        self.parts
    }
}

/// Ungeprüfte Serde-Form; Deserialisierung läuft durch die Konstruktoren.
#[derive(Deserialize)]
struct PolylineRepr {
    parts: Vec<Vec<Vertex>>,
    multi: bool,
}

impl TryFrom<PolylineRepr> for Polyline {
    type Error = LrError;

    fn try_from(repr: PolylineRepr) -> Result<Self, Self::Error> {
        Self::build(repr.parts, repr.multi)
    }
}

/// 2D-Länge einer Stützpunktfolge.
pub(crate) fn part_length(vertices: &[Vertex]) -> f64 {
    vertices.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
