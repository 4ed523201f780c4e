//! Gültigkeitsprüfungen für N- und M-Stationierung.

use crate::core::{LrError, Polyline};

/// Absolute Toleranz für "Ende von Teil i == Anfang von Teil i+1".
pub const PART_JOIN_TOLERANCE: f64 = 1e-9;

/// Verschmilzt lückenlos verkettete Teile zu einem einteiligen LineString.
///
/// Einteilige Geometrien werden unverändert zurückgegeben. Der doppelte
/// Stützpunkt an jeder Fuge entfällt (es bleibt der des vorderen Teils).
pub fn merge_connected(line: &Polyline) -> Result<Polyline, LrError> {
    if !line.is_multi() {
        return Ok(line.clone());
    }

    let mut merged = Vec::with_capacity(line.vertex_count());
    for part in line.parts() {
        match merged.last() {
            None => merged.extend_from_slice(part),
            Some(joint) => {
                let starts_at_joint = part
                    .first()
                    .is_some_and(|start| start.coincides(joint, PART_JOIN_TOLERANCE));
                if !starts_at_joint {
                    return Err(LrError::GeometryNotNValid);
                }
                merged.extend_from_slice(&part[1..]);
            }
        }
    }

    Polyline::line_string(merged).map_err(|_| LrError::GeometryNotNValid)
}

/// N-Gültigkeit: einteilig oder lückenlos verkettete Teile.
pub fn check_n_valid(line: &Polyline) -> Result<(), LrError> {
    merge_connected(line).map(|_| ())
}

/// `true`, wenn [`check_n_valid`] erfolgreich ist.
pub fn is_n_valid(line: &Polyline) -> bool {
    check_n_valid(line).is_ok()
}

/// M-Gültigkeit ("Trajektorie"): M vorhanden, einteilig, M streng aufsteigend.
pub fn check_m_valid(line: &Polyline) -> Result<(), LrError> {
    if !line.has_m() {
        return Err(LrError::GeometryNoM);
    }
    let vertices = line.single_part().ok_or(LrError::GeometryMultiPart)?;

    let ascending = vertices.windows(2).all(|w| match (w[0].m, w[1].m) {
        // NaN scheitert automatisch am Vergleich
        (Some(a), Some(b)) => b > a,
        _ => false,
    });

    if ascending {
        Ok(())
    } else {
        Err(LrError::GeometryNonMonotonicM)
    }
}

/// `true`, wenn [`check_m_valid`] erfolgreich ist.
pub fn is_m_valid(line: &Polyline) -> bool {
    check_m_valid(line).is_ok()
}

/// Erster M-Wert des ersten Teils und letzter M-Wert des letzten Teils.
pub fn m_range(line: &Polyline) -> Option<(f64, f64)> {
    let first = line.first_vertex()?.m?;
    let last = line.last_vertex()?.m?;
    Some((first, last))
}
