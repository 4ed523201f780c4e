//! Abschnitts-Geometrie zwischen zwei Stationierungen einer Referenzlinie.

use crate::core::{LrError, Polyline};
use crate::geometry::{curve_substring, locate_n_from_m, offset_curve};

/// Schneidet den Abschnitt `[min(n), max(n)]` aus und versetzt ihn optional.
///
/// Positive Versätze liegen links der Digitalisierungsrichtung.
pub fn segment_geom_n(
    geom: &Polyline,
    n_from: f64,
    n_to: f64,
    offset: f64,
) -> Result<Polyline, LrError> {
    let (n_lo, n_hi) = if n_from <= n_to {
        (n_from, n_to)
    } else {
        (n_to, n_from)
    };

    let segment = curve_substring(geom, n_lo, n_hi)?;
    if offset != 0.0 {
        offset_curve(&segment, offset)
    } else {
        Ok(segment)
    }
}

/// Wie [`segment_geom_n`], aber mit M-Stationierungen (nur auf Trajektorien).
pub fn segment_geom_m(
    geom: &Polyline,
    m_from: f64,
    m_to: f64,
    offset: f64,
) -> Result<Polyline, LrError> {
    let n_from = locate_n_from_m(geom, m_from)?;
    let n_to = locate_n_from_m(geom, m_to)?;
    segment_geom_n(geom, n_from, n_to, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> Polyline {
        Polyline::from_xym(&[(0.0, 0.0, 0.0), (10.0, 0.0, 10.0), (10.0, 10.0, 25.0)])
            .expect("gültige Geometrie erwartet")
    }

    #[test]
    fn test_reihenfolge_wird_normalisiert() {
        let a = segment_geom_n(&reference(), 5.0, 15.0, 0.0).expect("Abschnitt erwartet");
        let b = segment_geom_n(&reference(), 15.0, 5.0, 0.0).expect("Abschnitt erwartet");
        assert_eq!(a, b);
        assert_eq!(a.vertex_count(), 3);
        assert_relative_eq!(a.length(), 10.0);
    }

    #[test]
    fn test_abschnitt_mit_versatz_links() {
        let seg = segment_geom_n(&reference(), 5.0, 15.0, 1.0).expect("Abschnitt erwartet");
        let xy: Vec<(f64, f64)> = seg.vertices().map(|v| (v.x, v.y)).collect();
        assert_eq!(xy.len(), 3);
        assert_relative_eq!(xy[0].0, 5.0);
        assert_relative_eq!(xy[0].1, 1.0);
        assert_relative_eq!(xy[1].0, 9.0);
        assert_relative_eq!(xy[1].1, 1.0);
        assert_relative_eq!(xy[2].0, 9.0);
        assert_relative_eq!(xy[2].1, 5.0);
    }

    #[test]
    fn test_abschnitt_aus_m_werten() {
        let from_m = segment_geom_m(&reference(), 5.0, 17.5, 0.0).expect("Abschnitt erwartet");
        let from_n = segment_geom_n(&reference(), 5.0, 15.0, 0.0).expect("Abschnitt erwartet");
        assert_eq!(from_m.vertex_count(), from_n.vertex_count());
        assert_relative_eq!(from_m.length(), from_n.length(), epsilon = 1e-9);
    }

    #[test]
    fn test_m_ausserhalb_bereich() {
        assert_eq!(
            segment_geom_m(&reference(), -1.0, 5.0, 0.0),
            Err(LrError::StationingOutOfRange)
        );
    }

    #[test]
    fn test_versatz_auf_nulllaenge_schlaegt_fehl() {
        assert_eq!(
            segment_geom_n(&reference(), 4.0, 4.0, 1.0),
            Err(LrError::OffsetCurveFailed)
        );
    }
}
