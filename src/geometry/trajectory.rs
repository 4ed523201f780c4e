//! M-Stationierung auf Trajektorien (einteilig, M streng aufsteigend).

use crate::core::{LrError, Polyline, Vertex};

use super::measure::locate_point;
use super::validity::check_m_valid;

/// Fenstergröße, unter der die binäre Suche in eine lineare Suche übergeht.
pub const BINARY_DESCENT_CUTOFF: usize = 15;

/// Interpoliert den Punkt mit Messwert `m`.
///
/// Das Segment wird per binärer Suche über die Stützpunkte gefunden. Der
/// zurückgegebene Stützpunkt trägt `m` exakt; X/Y/Z sind interpoliert.
pub fn trajectory_interpolate_m(line: &Polyline, m: f64) -> Result<Vertex, LrError> {
    check_m_valid(line)?;
    let vertices = line.single_part().ok_or(LrError::GeometryMultiPart)?;

    let m_first = vertices[0].m.ok_or(LrError::GeometryNoM)?;
    let m_last = vertices[vertices.len() - 1].m.ok_or(LrError::GeometryNoM)?;
    if !(m_first..=m_last).contains(&m) {
        return Err(LrError::StationingOutOfRange);
    }

    let index = find_segment(vertices, m).ok_or(LrError::InterpolationFailed)?;
    let (a, b) = (&vertices[index], &vertices[index + 1]);
    let (m_a, m_b) = match (a.m, b.m) {
        (Some(m_a), Some(m_b)) => (m_a, m_b),
        _ => return Err(LrError::GeometryNoM),
    };

    let t = (m - m_a) / (m_b - m_a);
    Ok(Vertex {
        m: Some(m),
        ..a.lerp(b, t)
    })
}

/// Index `i` des Segments `[v_i, v_{i+1}]` mit `m_i <= m <= m_{i+1}`.
fn find_segment(vertices: &[Vertex], m: f64) -> Option<usize> {
    let m_at = |i: usize| vertices[i].m.unwrap_or(f64::NAN);

    let mut lo = 0;
    let mut hi = vertices.len() - 1;
    while hi - lo >= BINARY_DESCENT_CUTOFF {
        let mid = lo + (hi - lo) / 2;
        if m <= m_at(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    (lo..hi).find(|&i| m_at(i) <= m && m <= m_at(i + 1))
}

/// N-Stationierung zum Messwert `m`.
pub fn locate_n_from_m(line: &Polyline, m: f64) -> Result<f64, LrError> {
    let vertex = trajectory_interpolate_m(line, m)?;
    locate_point(line, vertex.xy()).ok_or(LrError::ReferenceFeatureInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_line() -> Polyline {
        Polyline::from_xym(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0), (10.0, 10.0, 25.0)])
            .expect("gültige Geometrie erwartet")
    }

    /// Lange Trajektorie entlang der X-Achse mit nicht-linearem M.
    fn long_trajectory(count: usize) -> Polyline {
        let coords: Vec<(f64, f64, f64)> = (0..count)
            .map(|i| {
                let x = i as f64;
                (x, 0.0, x * 2.0 + (i % 3) as f64 * 0.1)
            })
            .collect();
        Polyline::from_xym(&coords).expect("gültige Geometrie erwartet")
    }

    #[test]
    fn test_interpolate_m_zweites_segment() {
        let v = trajectory_interpolate_m(&reference_line(), 12.0).expect("Punkt erwartet");
        assert_relative_eq!(v.x, 10.0);
        assert_relative_eq!(v.y, 2.0 / 15.0 * 10.0, epsilon = 1e-12);
        assert_eq!(v.m, Some(12.0));
    }

    #[test]
    fn test_locate_n_from_m() {
        let n = locate_n_from_m(&reference_line(), 12.0).expect("N erwartet");
        assert_relative_eq!(n, 10.0 + 2.0 / 15.0 * 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_m_grenzen() {
        let line = reference_line();
        assert_eq!(
            trajectory_interpolate_m(&line, 0.0),
            Ok(Vertex::xym(0.0, 0.0, 0.0))
        );
        assert_eq!(
            trajectory_interpolate_m(&line, 25.0),
            Ok(Vertex::xym(10.0, 10.0, 25.0))
        );
        assert_eq!(
            trajectory_interpolate_m(&line, 25.0 + 1e-9),
            Err(LrError::StationingOutOfRange)
        );
        assert_eq!(
            trajectory_interpolate_m(&line, -1e-9),
            Err(LrError::StationingOutOfRange)
        );
    }

    #[test]
    fn test_binaere_suche_auf_langer_linie() {
        let line = long_trajectory(20_000);
        for &m in &[0.0, 0.05, 1234.567, 19_000.3, 39_996.0] {
            let v = trajectory_interpolate_m(&line, m).expect("Punkt erwartet");
            let n = locate_n_from_m(&line, m).expect("N erwartet");
            assert_relative_eq!(v.x, n, epsilon = 1e-9);
            assert_eq!(v.m, Some(m));
        }
    }

    #[test]
    fn test_keine_trajektorie() {
        let line = Polyline::from_xy(&[(0.0, 0.0), (1.0, 0.0)]).expect("gültig");
        assert_eq!(
            trajectory_interpolate_m(&line, 0.5),
            Err(LrError::GeometryNoM)
        );
    }
}
